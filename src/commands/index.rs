//! Render the index page and run searches against it

use anyhow::Result;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;

use super::load_shell;
use crate::controller::{IndexController, IndexState};
use crate::page::{HeadlessPage, Page};
use crate::Blog;

/// Load the index, print the list, then print it again for every search
pub async fn run(blog: &Blog, searches: &[String], interactive: bool) -> Result<()> {
    let config = &blog.config;
    let fetcher = blog.fetcher();
    let ids = [
        config.elements.posts_list.as_str(),
        config.elements.search.as_str(),
    ];
    let mut page = load_shell(&fetcher, &config.index_page, "", &ids).await;

    let mut controller = IndexController::new(config);
    let state = controller.load(&fetcher, &mut page).await;
    print_list(blog, &page);

    if state != IndexState::Rendered {
        return Ok(());
    }
    if !controller.search_attached() && (interactive || !searches.is_empty()) {
        tracing::warn!(
            "{} has no #{} element, search is disabled",
            config.index_page,
            config.elements.search
        );
        return Ok(());
    }

    for query in searches {
        println!("\n> {}", query);
        controller.on_search_input(&mut page, query);
        print_list(blog, &page);
    }

    if interactive {
        println!("\nType to search, Ctrl+D to quit.");
        let mut lines = LinesStream::new(BufReader::new(io::stdin()).lines());
        while let Some(line) = lines.next().await {
            controller.on_search_input(&mut page, &line?);
            print_list(blog, &page);
        }
    }

    Ok(())
}

fn print_list(blog: &Blog, page: &HeadlessPage) {
    if let Some(html) = page.inner_html(&blog.config.elements.posts_list) {
        println!("{}", html);
    }
}
