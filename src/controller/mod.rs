//! Controllers for the two page flows
//!
//! Each controller performs one fetch, renders into a [`Page`](crate::page::Page)
//! and settles in a terminal state. Failures never escape a controller: they
//! are logged and turned into a placeholder on the page.

mod article;
mod index;

pub use article::{ArticleController, ArticleState};
pub use index::{fetch_index, IndexController, IndexState};


#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MarkdownRenderer;
    use crate::fetch::{Fetcher, SiteFetcher};
    use crate::page::{HeadlessPage, Page};
    use crate::Blog;

    fn demo_site() -> Blog {
        Blog::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demo-site")).unwrap()
    }

    async fn shell(fetcher: &SiteFetcher, path: &str, search: &str) -> HeadlessPage {
        let response = fetcher.get(path).await.unwrap();
        HeadlessPage::from_shell(&response.body, search)
    }

    #[tokio::test]
    async fn test_demo_site_index() {
        let blog = demo_site();
        let fetcher = SiteFetcher::new(&blog.site_dir);
        let mut page = shell(&fetcher, "index.html", "").await;
        let mut controller = IndexController::new(&blog.config);

        assert_eq!(controller.load(&fetcher, &mut page).await, IndexState::Rendered);
        assert!(controller.search_attached());
        assert_eq!(controller.posts().len(), 2);

        controller.on_search_input(&mut page, "LLM");
        let list = page.inner_html("posts-list").unwrap();
        assert!(list.contains("post.html?slug=prompt-design-notes"));
        assert!(!list.contains("hello-world"));
    }

    #[tokio::test]
    async fn test_demo_site_article() {
        let blog = demo_site();
        let fetcher = SiteFetcher::new(&blog.site_dir);
        let mut page = shell(&fetcher, "post.html", "?slug=prompt-design-notes").await;
        let mut controller = ArticleController::new(&blog.config);

        let state = controller
            .load(&fetcher, &mut page, &MarkdownRenderer::new())
            .await;

        assert_eq!(state, ArticleState::Rendered);
        assert_eq!(page.title(), "Notes on Prompt Design - AI Blog");
        let content = page.inner_html("post-content").unwrap();
        assert!(content.contains(r#"<div class="meta">2024-03-12</div>"#));
        assert!(content.contains("<table>"));
        assert!(content.contains("highlight rust"));
    }
}
