//! Render a single article page

use anyhow::Result;

use super::load_shell;
use crate::content::MarkdownRenderer;
use crate::controller::{ArticleController, ArticleState};
use crate::helpers::article_href;
use crate::page::Page;
use crate::Blog;

/// Run the article flow for `?slug=<slug>` or a raw query string
pub async fn run(blog: &Blog, slug: Option<&str>, query: Option<&str>) -> Result<()> {
    let config = &blog.config;
    let fetcher = blog.fetcher();
    let search = location_search(slug, query);
    let mut page = load_shell(
        &fetcher,
        &config.article_page,
        &search,
        &[config.elements.post_content.as_str()],
    )
    .await;

    let renderer = MarkdownRenderer::new();
    let mut controller = ArticleController::new(config);

    match controller.load(&fetcher, &mut page, &renderer).await {
        ArticleState::Redirected => {
            println!("Redirected to {}", page.navigated_to().unwrap_or_default());
        }
        state => {
            tracing::debug!("Article flow finished in state {:?}", state);
            println!("Title: {}", page.title());
            if let Some(html) = page.inner_html(&config.elements.post_content) {
                println!("{}", html);
            }
        }
    }

    Ok(())
}

/// Query string for the headless page
fn location_search(slug: Option<&str>, query: Option<&str>) -> String {
    match (query, slug) {
        (Some(query), _) => query.to_string(),
        (None, Some(slug)) => article_href("", slug, true),
        (None, None) => String::new(),
    }
}
