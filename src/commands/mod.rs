//! CLI commands

pub mod check;
pub mod index;
pub mod list;
pub mod post;

use crate::fetch::Fetcher;
use crate::page::HeadlessPage;

/// Build a headless page from the site's HTML shell, or from `fallback_ids` when it is unavailable
pub(crate) async fn load_shell<F: Fetcher>(
    fetcher: &F,
    shell_path: &str,
    search: &str,
    fallback_ids: &[&str],
) -> HeadlessPage {
    match fetcher.get(shell_path).await {
        Ok(response) if response.is_success() => HeadlessPage::from_shell(&response.body, search),
        Ok(response) => {
            tracing::debug!(
                "No page shell at {} (HTTP {}), using default elements",
                shell_path,
                response.status
            );
            HeadlessPage::new(search, fallback_ids)
        }
        Err(e) => {
            tracing::debug!("Could not read page shell {}: {}", shell_path, e);
            HeadlessPage::new(search, fallback_ids)
        }
    }
}
