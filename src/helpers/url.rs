//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but unreserved characters is encoded in a query value
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Link from the index to an article view
///
/// # Examples
/// ```ignore
/// article_href("post.html", "hello", true) // -> "post.html?slug=hello"
/// ```
pub fn article_href(article_page: &str, slug: &str, encode: bool) -> String {
    if encode {
        format!(
            "{}?slug={}",
            article_page,
            utf8_percent_encode(slug, QUERY_VALUE)
        )
    } else {
        format!("{}?slug={}", article_page, slug)
    }
}

/// Resource path of an article's Markdown file
///
/// # Examples
/// ```ignore
/// article_path("posts", "hello") // -> "posts/hello.md"
/// ```
pub fn article_path(posts_dir: &str, slug: &str) -> String {
    format!("{}/{}.md", posts_dir.trim_end_matches('/'), slug)
}

/// Read a parameter from a location query string
///
/// Follows `URLSearchParams` semantics: an optional leading `?`, pairs
/// separated by `&`, `+` decoded as a space, and the first occurrence wins.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    let search = search.strip_prefix('?').unwrap_or(search);

    search
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key) == name)
        .map(|(_, value)| decode_component(value))
}

fn decode_component(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}
