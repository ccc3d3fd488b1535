//! Case-insensitive substring search over the post index

use crate::content::PostSummary;

/// Posts whose title, excerpt or any tag contains `query`, in index order
///
/// A blank query matches everything.
pub fn filter_posts<'a>(query: &str, posts: &'a [PostSummary]) -> Vec<&'a PostSummary> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return posts.iter().collect();
    }

    posts.iter().filter(|post| matches(post, &query)).collect()
}

/// `query` must already be lowercased
fn matches(post: &PostSummary, query: &str) -> bool {
    post.title.to_lowercase().contains(query)
        || post.excerpt.to_lowercase().contains(query)
        || post
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
}
