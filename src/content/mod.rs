//! Content module - post index entries, front-matter and Markdown conversion

mod frontmatter;
mod markdown;
mod post;

pub use frontmatter::{FrontMatter, DEFAULT_TITLE};
pub use markdown::{MarkdownConverter, MarkdownRenderer};
pub use post::{is_url_safe, validate_index, IndexIssue, ParsedDocument, PostSummary};
