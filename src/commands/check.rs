//! Check the post index against the Markdown files it points to

use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::{validate_index, IndexIssue, PostSummary};
use crate::controller::fetch_index;
use crate::fetch::Fetcher;
use crate::helpers::article_path;
use crate::Blog;

/// Report index problems; fails when any are found
pub async fn run(blog: &Blog) -> Result<()> {
    let fetcher = blog.fetcher();
    let posts = fetch_index(&fetcher, &blog.config).await?;

    let mut issues = validate_index(&posts);
    issues.extend(missing_documents(&fetcher, &blog.config.posts_dir, &posts).await?);
    if blog.remote.is_none() {
        issues.extend(orphan_documents(&blog.posts_dir(), &posts));
    }

    if issues.is_empty() {
        println!("{} posts, no problems found", posts.len());
        return Ok(());
    }

    for issue in &issues {
        println!("  {}", issue);
    }
    anyhow::bail!("{} problem(s) in {}", issues.len(), blog.config.index_path())
}

/// Index entries whose Markdown file cannot be fetched
async fn missing_documents<F: Fetcher>(
    fetcher: &F,
    posts_dir: &str,
    posts: &[PostSummary],
) -> Result<Vec<IndexIssue>> {
    let mut issues = Vec::new();
    for post in posts {
        let response = fetcher.get(&article_path(posts_dir, &post.slug)).await?;
        if !response.is_success() {
            issues.push(IndexIssue::MissingDocument {
                slug: post.slug.clone(),
            });
        }
    }
    Ok(issues)
}

/// Markdown files under `posts_dir` that no index entry refers to
fn orphan_documents(posts_dir: &Path, posts: &[PostSummary]) -> Vec<IndexIssue> {
    let slugs: HashSet<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
    let mut issues = Vec::new();

    for entry in WalkDir::new(posts_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let relative = path.strip_prefix(posts_dir).unwrap_or(path);
        let slug = relative
            .with_extension("")
            .to_string_lossy()
            .replace('\\', "/");
        if !slugs.contains(slug.as_str()) {
            issues.push(IndexIssue::OrphanDocument {
                path: path.display().to_string(),
            });
        }
    }

    issues
}
