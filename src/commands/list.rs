//! List the posts in the index

use anyhow::Result;

use crate::content::PostSummary;
use crate::controller::fetch_index;
use crate::Blog;

/// Print every indexed post
pub async fn run(blog: &Blog) -> Result<()> {
    let posts = fetch_index(&blog.fetcher(), &blog.config).await?;

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("  {}", format_entry(post));
    }

    Ok(())
}

fn format_entry(post: &PostSummary) -> String {
    let date = if post.date.is_empty() {
        "----------"
    } else {
        post.date.as_str()
    };

    if post.tags.is_empty() {
        format!("{} - {} [{}]", date, post.title, post.slug)
    } else {
        format!(
            "{} - {} [{}] ({})",
            date,
            post.title,
            post.slug,
            post.tags.join(", ")
        )
    }
}
