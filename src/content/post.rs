//! Post summary and parsed document models

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A post as listed in the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// URL-safe identifier, also the name of the Markdown file
    pub slug: String,

    /// Post title
    pub title: String,

    /// Display date, not parsed
    pub date: String,

    /// Short description shown in the list
    pub excerpt: String,

    /// Post tags; absent or `null` means none
    #[serde(deserialize_with = "null_as_empty", default)]
    pub tags: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PostSummary {
    /// Create a summary without tags
    pub fn new(slug: &str, title: &str, date: &str, excerpt: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            excerpt: excerpt.to_string(),
            tags: Vec::new(),
        }
    }

    /// Builder-style helper to attach tags
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}

/// A Markdown document split into metadata and body
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Front-matter values, always holding `title` and `date`
    pub metadata: IndexMap<String, String>,
    /// Raw Markdown after the front-matter block
    pub body: String,
}

impl ParsedDocument {
    pub(crate) fn new(metadata: IndexMap<String, String>, body: String) -> Self {
        Self { metadata, body }
    }

    pub fn title(&self) -> &str {
        self.metadata.get("title").map(String::as_str).unwrap_or("")
    }

    pub fn date(&self) -> &str {
        self.metadata.get("date").map(String::as_str).unwrap_or("")
    }
}

/// A problem found in the post index
#[derive(Debug, Clone, PartialEq)]
pub enum IndexIssue {
    /// Two entries share a slug (positions in the index)
    DuplicateSlug {
        slug: String,
        first: usize,
        second: usize,
    },
    /// A slug cannot be used as a path segment as-is
    UnsafeSlug { slug: String, suggestion: String },
    /// An entry has no Markdown file
    MissingDocument { slug: String },
    /// A Markdown file is not referenced by the index
    OrphanDocument { path: String },
}

impl fmt::Display for IndexIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexIssue::DuplicateSlug {
                slug,
                first,
                second,
            } => write!(
                f,
                "duplicate slug '{}' at entries {} and {}",
                slug, first, second
            ),
            IndexIssue::UnsafeSlug { slug, suggestion } => {
                write!(f, "slug '{}' is not URL-safe (try '{}')", slug, suggestion)
            }
            IndexIssue::MissingDocument { slug } => {
                write!(f, "no Markdown file for slug '{}'", slug)
            }
            IndexIssue::OrphanDocument { path } => {
                write!(f, "{} is not listed in the index", path)
            }
        }
    }
}

/// Check slug uniqueness and URL-safety
pub fn validate_index(posts: &[PostSummary]) -> Vec<IndexIssue> {
    let mut issues = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (i, post) in posts.iter().enumerate() {
        if let Some(&first) = seen.get(post.slug.as_str()) {
            issues.push(IndexIssue::DuplicateSlug {
                slug: post.slug.clone(),
                first,
                second: i,
            });
        } else {
            seen.insert(&post.slug, i);
        }

        if !is_url_safe(&post.slug) {
            issues.push(IndexIssue::UnsafeSlug {
                slug: post.slug.clone(),
                suggestion: slug::slugify(&post.slug),
            });
        }
    }

    issues
}

/// Unreserved URL characters only, and not a relative path segment
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_index() {
        let json = r#"[
            {"slug": "a", "title": "Hello World", "date": "2024-01-01", "excerpt": "intro text"},
            {"slug": "b", "title": "Second", "date": "2024-02-01", "excerpt": "more", "tags": ["rust"], "cover": "x.png"}
        ]"#;

        let posts: Vec<PostSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts[0].tags.is_empty());
        assert_eq!(posts[1].tags, vec!["rust"]);
        assert_eq!(posts[1].title, "Second");
    }

    #[test]
    fn test_null_tags() {
        let json = r#"[{"slug": "a", "title": "T", "date": "", "excerpt": "", "tags": null}]"#;
        let posts: Vec<PostSummary> = serde_json::from_str(json).unwrap();
        assert!(posts[0].tags.is_empty());
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let json = r#"[{"slug": "a", "title": "No excerpt", "date": ""}]"#;
        assert!(serde_json::from_str::<Vec<PostSummary>>(json).is_err());
    }

    #[test]
    fn test_validate_index() {
        let posts = vec![
            PostSummary::new("intro", "Intro", "", ""),
            PostSummary::new("Hello World", "Bad slug", "", ""),
            PostSummary::new("intro", "Again", "", ""),
        ];

        let issues = validate_index(&posts);
        assert_eq!(
            issues,
            vec![
                IndexIssue::UnsafeSlug {
                    slug: "Hello World".to_string(),
                    suggestion: "hello-world".to_string(),
                },
                IndexIssue::DuplicateSlug {
                    slug: "intro".to_string(),
                    first: 0,
                    second: 2,
                },
            ]
        );
    }

    #[test]
    fn test_is_url_safe() {
        assert!(is_url_safe("2024-01-ai_notes.v2"));
        assert!(!is_url_safe(""));
        assert!(!is_url_safe(".."));
        assert!(!is_url_safe("../secret"));
        assert!(!is_url_safe("a/b"));
        assert!(!is_url_safe("文章"));
    }
}
