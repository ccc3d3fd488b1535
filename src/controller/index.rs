//! Index page: post list with live search

use tokio_stream::{Stream, StreamExt};

use crate::config::SiteConfig;
use crate::content::{validate_index, PostSummary};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::helpers::{no_results, ListRenderer};
use crate::page::Page;
use crate::search::filter_posts;

/// Lifecycle of the index page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    Loading,
    Rendered,
    Failed,
}

/// Loads the post index and keeps it for searching
pub struct IndexController {
    config: SiteConfig,
    renderer: ListRenderer,
    state: IndexState,
    posts: Vec<PostSummary>,
    search_attached: bool,
}

impl IndexController {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            config: config.clone(),
            renderer: ListRenderer::new(&config.article_page, config.escape_html),
            state: IndexState::Loading,
            posts: Vec::new(),
            search_attached: false,
        }
    }

    pub fn state(&self) -> IndexState {
        self.state
    }

    /// Posts loaded by the last successful [`load`](Self::load)
    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    /// Whether search input is being handled
    pub fn search_attached(&self) -> bool {
        self.search_attached
    }

    /// Fetch the index and render the full list
    pub async fn load<F: Fetcher, P: Page>(&mut self, fetcher: &F, page: &mut P) -> IndexState {
        self.state = IndexState::Loading;
        self.search_attached = false;
        let list_id = &self.config.elements.posts_list;

        match fetch_index(fetcher, &self.config).await {
            Ok(posts) => {
                for issue in validate_index(&posts) {
                    tracing::warn!("Post index: {}", issue);
                }
                tracing::info!("Loaded {} posts", posts.len());

                self.posts = posts;
                let html = self
                    .renderer
                    .render(&self.posts, &self.config.messages.no_posts);
                page.set_inner_html(list_id, &html);

                self.search_attached = page.has_element(&self.config.elements.search);
                self.state = IndexState::Rendered;
            }
            Err(e) => {
                tracing::error!("Failed to load post index: {}", e);
                page.set_inner_html(
                    list_id,
                    &no_results(&self.config.messages.no_posts, self.config.escape_html),
                );
                self.state = IndexState::Failed;
            }
        }

        self.state
    }

    /// Handle one search input event
    ///
    /// Ignored unless the index rendered and the page has a search box.
    pub fn on_search_input<P: Page>(&self, page: &mut P, query: &str) {
        if !self.search_attached {
            return;
        }

        let matched = filter_posts(query, &self.posts);
        tracing::debug!("Search '{}' matched {} posts", query.trim(), matched.len());

        let html = self
            .renderer
            .render(matched, &self.config.messages.no_matches);
        page.set_inner_html(&self.config.elements.posts_list, &html);
    }

    /// Feed a stream of input values to [`on_search_input`](Self::on_search_input)
    pub async fn listen<P, S>(&self, page: &mut P, mut inputs: S)
    where
        P: Page,
        S: Stream<Item = String> + Unpin,
    {
        if !self.search_attached {
            tracing::debug!("No search box on the page, not listening");
            return;
        }

        while let Some(query) = inputs.next().await {
            self.on_search_input(page, &query);
        }
    }
}

/// Fetch and decode the post index
pub async fn fetch_index<F: Fetcher>(fetcher: &F, config: &SiteConfig) -> Result<Vec<PostSummary>> {
    let path = config.index_path();
    let response = fetcher.get(&path).await?;
    if !response.is_success() {
        return Err(Error::Status {
            path,
            status: response.status,
        });
    }

    serde_json::from_str(&response.body).map_err(|source| Error::Deserialize { path, source })
}
