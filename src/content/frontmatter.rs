//! Front-matter parsing

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use super::ParsedDocument;

/// Line that opens and closes a front-matter block
const DELIMITER: &str = "---";

/// Title used when a document declares none
pub const DEFAULT_TITLE: &str = "Untitled";

lazy_static! {
    static ref KEY_VALUE: Regex = Regex::new(r"^([A-Za-z0-9_]+):\s*(.+)$").unwrap();
}

/// Split a document into its front-matter and Markdown body
pub struct FrontMatter;

impl FrontMatter {
    /// Parse front-matter using the default placeholder title
    pub fn parse(text: &str) -> ParsedDocument {
        Self::parse_with_title(text, DEFAULT_TITLE)
    }

    /// Parse front-matter, using `untitled` when the block has no `title`
    ///
    /// Never fails: text without an opening delimiter is body text with
    /// default metadata. A leading byte order mark is ignored.
    pub fn parse_with_title(text: &str, untitled: &str) -> ParsedDocument {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<&str> = text.split('\n').collect();
        let mut metadata = default_metadata(untitled);

        if lines[0].trim() != DELIMITER {
            return ParsedDocument::new(metadata, text.to_string());
        }

        let mut declared = IndexMap::new();
        for (i, line) in lines.iter().enumerate().skip(1) {
            if line.trim() == DELIMITER {
                metadata.extend(declared);
                return ParsedDocument::new(metadata, lines[i + 1..].join("\n"));
            }
            if let Some((key, value)) = parse_line(line) {
                declared.insert(key, value);
            }
        }

        // Unterminated block: keys read so far still count, the whole text is body
        tracing::debug!("front-matter block is never closed, treating as body");
        metadata.extend(declared);
        ParsedDocument::new(metadata, text.to_string())
    }
}

fn default_metadata(untitled: &str) -> IndexMap<String, String> {
    let mut metadata = IndexMap::new();
    metadata.insert("title".to_string(), untitled.to_string());
    metadata.insert("date".to_string(), String::new());
    metadata
}

/// Match a `key: value` line
fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let caps = KEY_VALUE.captures(line)?;
    Some((caps[1].to_string(), strip_quotes(&caps[2]).to_string()))
}

/// Remove one matching pair of surrounding quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: "Hello World"
date: 2024-01-15
author: 'Jane'
---

This is the content.
"#;

        let doc = FrontMatter::parse(content);
        assert_eq!(doc.title(), "Hello World");
        assert_eq!(doc.date(), "2024-01-15");
        assert_eq!(doc.metadata.get("author").map(String::as_str), Some("Jane"));
        assert_eq!(doc.body, "\nThis is the content.\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Heading\n\nJust text.\n";
        let doc = FrontMatter::parse(content);
        assert_eq!(doc.body, content);
        assert_eq!(doc.title(), DEFAULT_TITLE);
        assert_eq!(doc.date(), "");
        assert_eq!(doc.metadata.len(), 2);
    }

    #[test]
    fn test_leading_blank_line_is_not_frontmatter() {
        let content = "\n---\ntitle: Hidden\n---\nbody";
        let doc = FrontMatter::parse(content);
        assert_eq!(doc.title(), DEFAULT_TITLE);
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_delimiter_with_surrounding_whitespace() {
        let doc = FrontMatter::parse("  ---  \ntitle: Spaced\n --- \nbody");
        assert_eq!(doc.title(), "Spaced");
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_unterminated_block() {
        let content = "---\ntitle: Never closed\ndate: 2024-02-02\n\nSome text";
        let doc = FrontMatter::parse(content);
        assert_eq!(doc.title(), "Never closed");
        assert_eq!(doc.date(), "2024-02-02");
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_byte_order_mark() {
        let doc = FrontMatter::parse("\u{feff}---\ntitle: Bom\n---\nbody");
        assert_eq!(doc.title(), "Bom");
        assert_eq!(doc.body, "body");

        let doc = FrontMatter::parse("\u{feff}# Plain");
        assert_eq!(doc.body, "# Plain");
    }

    #[test]
    fn test_ignores_malformed_lines() {
        let content = "---\ntitle: Kept\nnot a pair\n- list item\nbad key: value\n---\nbody";
        let doc = FrontMatter::parse(content);
        assert_eq!(doc.title(), "Kept");
        assert_eq!(doc.metadata.len(), 2);
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_value_keeps_inner_colons() {
        let doc = FrontMatter::parse("---\nlink: https://example.com/a\n---\n");
        assert_eq!(
            doc.metadata.get("link").map(String::as_str),
            Some("https://example.com/a")
        );
    }

    #[test]
    fn test_unmatched_quotes_are_kept() {
        let doc = FrontMatter::parse("---\ntitle: \"Half quoted\ndate: '2024'\n---\n");
        assert_eq!(doc.title(), "\"Half quoted");
        assert_eq!(doc.date(), "2024");
    }

    #[test]
    fn test_crlf_lines() {
        let doc = FrontMatter::parse("---\r\ntitle: Windows\r\n---\r\nbody\r\n");
        assert_eq!(doc.title(), "Windows");
        assert_eq!(doc.body, "body\r\n");
    }

    #[test]
    fn test_custom_placeholder_and_order() {
        let doc = FrontMatter::parse_with_title("---\nauthor: A\ndate: 2024\n---\n", "无标题");
        assert_eq!(doc.title(), "无标题");
        let keys: Vec<_> = doc.metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "date", "author"]);
    }

    #[test]
    fn test_empty_document() {
        let doc = FrontMatter::parse("");
        assert_eq!(doc.body, "");
        assert_eq!(doc.title(), DEFAULT_TITLE);
    }
}
