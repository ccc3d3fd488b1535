//! Article page: one Markdown post selected by the `slug` query parameter

use crate::config::SiteConfig;
use crate::content::{FrontMatter, MarkdownConverter};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::helpers::{article_path, escape_if, query_param};
use crate::page::Page;

/// Lifecycle of the article page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleState {
    Init,
    Loading,
    Rendered,
    Failed,
    Redirected,
}

/// Loads and renders a single post
pub struct ArticleController {
    config: SiteConfig,
    state: ArticleState,
}

impl ArticleController {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            config: config.clone(),
            state: ArticleState::Init,
        }
    }

    pub fn state(&self) -> ArticleState {
        self.state
    }

    /// Run the article flow against `page`
    pub async fn load<F, P, M>(&mut self, fetcher: &F, page: &mut P, markdown: &M) -> ArticleState
    where
        F: Fetcher,
        P: Page,
        M: MarkdownConverter,
    {
        self.state = ArticleState::Init;

        let slug = match slug_param(page) {
            Ok(slug) => slug,
            Err(e) => {
                tracing::debug!("{}, redirecting to {}", e, self.config.index_page);
                page.navigate(&self.config.index_page);
                self.state = ArticleState::Redirected;
                return self.state;
            }
        };

        self.state = ArticleState::Loading;
        let content_id = &self.config.elements.post_content;

        match self.fetch_article(fetcher, markdown, &slug).await {
            Ok((title, html)) => {
                page.set_title(&self.config.article_title(&title));
                page.set_inner_html(content_id, &html);
                self.state = ArticleState::Rendered;
            }
            Err(e) => {
                tracing::error!("Failed to load post '{}': {}", slug, e);
                let message = escape_if(&self.config.messages.load_failed, self.config.escape_html);
                page.set_inner_html(content_id, &format!("<p>{}</p>", message));
                self.state = ArticleState::Failed;
            }
        }

        self.state
    }

    /// Fetch, parse and convert; returns the article title and content fragment
    async fn fetch_article<F, M>(
        &self,
        fetcher: &F,
        markdown: &M,
        slug: &str,
    ) -> Result<(String, String)>
    where
        F: Fetcher,
        M: MarkdownConverter,
    {
        let path = article_path(&self.config.posts_dir, slug);
        let response = fetcher.get(&path).await?;
        if !response.is_success() {
            return Err(Error::Status {
                path,
                status: response.status,
            });
        }

        let doc = FrontMatter::parse_with_title(&response.body, &self.config.untitled);
        let body = markdown.convert(&doc.body)?;

        let escape = self.config.escape_html;
        let html = format!(
            r#"<h1>{}</h1>
<div class="meta">{}</div>
<div class="content">{}</div>
"#,
            escape_if(doc.title(), escape),
            escape_if(doc.date(), escape),
            body
        );

        Ok((doc.title().to_string(), html))
    }
}

/// Non-empty `slug` from the page location
fn slug_param<P: Page>(page: &P) -> Result<String> {
    query_param(page.location_search(), "slug")
        .filter(|slug| !slug.is_empty())
        .ok_or(Error::MissingParameter("slug"))
}
