//! Turning file system changes into preview events

use anyhow::Result;
use indexmap::IndexSet;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

use crate::config::SiteConfig;
use crate::content::validate_index;
use crate::controller::fetch_index;
use crate::fetch::SiteFetcher;

/// What a changed file means for the blog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteChange {
    /// The post index
    Index,
    /// A post's Markdown, by slug
    Post(String),
    /// Any other file: page shells, styles, scripts
    Asset(String),
}

impl fmt::Display for SiteChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteChange::Index => write!(f, "post index"),
            SiteChange::Post(slug) => write!(f, "post '{}'", slug),
            SiteChange::Asset(path) => write!(f, "{}", path),
        }
    }
}

/// Message pushed to open pages, serialized as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PreviewEvent {
    /// The index changed and still loads
    Index { posts: usize },
    /// A post's Markdown changed
    Post { slug: String },
    /// A static file changed
    Asset { path: String },
    /// The index changed and no longer loads; pages keep what they show
    Broken { message: String },
}

/// Classify a changed path under `site_dir`
///
/// Returns `None` for paths outside the site and for hidden or backup files.
pub fn classify(site_dir: &Path, config: &SiteConfig, path: &Path) -> Option<SiteChange> {
    let relative = path.strip_prefix(site_dir).ok()?;
    let hidden = relative.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => true,
    });
    let name = relative.to_string_lossy();
    if hidden || name.is_empty() || name.ends_with('~') {
        return None;
    }

    if relative == Path::new(&config.index_path()) {
        return Some(SiteChange::Index);
    }

    let is_markdown = relative.extension().and_then(|e| e.to_str()) == Some("md");
    if let (Ok(in_posts), true) = (relative.strip_prefix(&config.posts_dir), is_markdown) {
        let slug = in_posts.with_extension("");
        return Some(SiteChange::Post(to_url_path(&slug)));
    }

    Some(SiteChange::Asset(to_url_path(relative)))
}

fn to_url_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolve a change into the event sent to pages, reloading the index when it changed
pub async fn resolve(
    change: SiteChange,
    fetcher: &SiteFetcher,
    config: &SiteConfig,
) -> PreviewEvent {
    match change {
        SiteChange::Index => match fetch_index(fetcher, config).await {
            Ok(posts) => {
                for issue in validate_index(&posts) {
                    tracing::warn!("{}", issue);
                }
                PreviewEvent::Index { posts: posts.len() }
            }
            Err(e) => {
                tracing::warn!("Post index no longer loads, pages not reloaded: {}", e);
                PreviewEvent::Broken {
                    message: e.to_string(),
                }
            }
        },
        SiteChange::Post(slug) => PreviewEvent::Post { slug },
        SiteChange::Asset(path) => PreviewEvent::Asset { path },
    }
}

/// Watch `site_dir` and broadcast an event per distinct change in each debounced batch
pub fn spawn(
    site_dir: PathBuf,
    config: SiteConfig,
    events: broadcast::Sender<PreviewEvent>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut debouncer = new_debouncer(
        Duration::from_millis(300),
        move |result: DebounceEventResult| {
            // Fails only once the server is shutting down
            let _ = tx.send(result);
        },
    )?;
    debouncer
        .watcher()
        .watch(&site_dir, RecursiveMode::Recursive)?;
    tracing::debug!("Watching: {:?}", site_dir);

    tokio::spawn(async move {
        let _debouncer = debouncer;
        let fetcher = SiteFetcher::new(&site_dir);

        while let Some(result) = rx.recv().await {
            let batch = match result {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::error!("Watch error: {:?}", e);
                    continue;
                }
            };

            let changes: IndexSet<SiteChange> = batch
                .iter()
                .filter_map(|e| classify(&site_dir, &config, &e.path))
                .collect();

            for change in changes {
                tracing::info!("Changed: {}", change);
                let event = resolve(change, &fetcher, &config).await;
                // No receivers just means no open pages
                let _ = events.send(event);
            }
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn classify_in(config: &SiteConfig, path: &str) -> Option<SiteChange> {
        let root = Path::new("/site");
        classify(root, config, &root.join(path))
    }

    #[test]
    fn test_classify() {
        let config = SiteConfig::default();

        assert_eq!(classify_in(&config, "posts/index.json"), Some(SiteChange::Index));
        assert_eq!(
            classify_in(&config, "posts/hello-world.md"),
            Some(SiteChange::Post("hello-world".to_string()))
        );
        assert_eq!(
            classify_in(&config, "posts/2024/recap.md"),
            Some(SiteChange::Post("2024/recap".to_string()))
        );
        assert_eq!(
            classify_in(&config, "post.html"),
            Some(SiteChange::Asset("post.html".to_string()))
        );
        assert_eq!(
            classify_in(&config, "README.md"),
            Some(SiteChange::Asset("README.md".to_string()))
        );
    }

    #[test]
    fn test_classify_skips_noise() {
        let config = SiteConfig::default();

        assert_eq!(classify_in(&config, ".git/index"), None);
        assert_eq!(classify_in(&config, "posts/.hello.md.swp"), None);
        assert_eq!(classify_in(&config, "posts/hello.md~"), None);
        assert_eq!(classify(Path::new("/site"), &config, Path::new("/tmp/x.md")), None);
    }

    #[test]
    fn test_classify_custom_posts_dir() {
        let config: SiteConfig =
            serde_yaml::from_str("posts_dir: content/\nindex_file: all.json\n").unwrap();

        assert_eq!(classify_in(&config, "content/all.json"), Some(SiteChange::Index));
        assert_eq!(
            classify_in(&config, "content/a.md"),
            Some(SiteChange::Post("a".to_string()))
        );
        assert_eq!(
            classify_in(&config, "posts/index.json"),
            Some(SiteChange::Asset("posts/index.json".to_string()))
        );
    }

    #[test]
    fn test_event_json() {
        let event = PreviewEvent::Index { posts: 2 };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"kind":"index","posts":2}"#
        );

        let event = PreviewEvent::Post {
            slug: "a".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"kind":"post","slug":"a"}"#
        );
    }

    #[tokio::test]
    async fn test_resolve_index_change() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        let index = dir.path().join("posts/index.json");
        let config = SiteConfig::default();
        let fetcher = SiteFetcher::new(dir.path());

        fs::write(
            &index,
            r#"[{"slug": "a", "title": "A", "date": "", "excerpt": ""}]"#,
        )
        .unwrap();
        assert_eq!(
            resolve(SiteChange::Index, &fetcher, &config).await,
            PreviewEvent::Index { posts: 1 }
        );

        // Half-written file
        fs::write(&index, r#"[{"slug": "a", "#).unwrap();
        assert!(matches!(
            resolve(SiteChange::Index, &fetcher, &config).await,
            PreviewEvent::Broken { .. }
        ));

        assert_eq!(
            resolve(SiteChange::Post("a".to_string()), &fetcher, &config).await,
            PreviewEvent::Post {
                slug: "a".to_string()
            }
        );
    }
}
