//! Serve resources from a site directory on disk

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::{FetchResponse, Fetcher};
use crate::error::{Error, Result};

/// Reads resources from a local site directory, answering like a static file server
#[derive(Debug, Clone)]
pub struct SiteFetcher {
    root: PathBuf,
}

impl SiteFetcher {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a request path into the site directory, refusing anything that escapes it
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes {
            None
        } else {
            Some(self.root.join(relative))
        }
    }
}

impl Fetcher for SiteFetcher {
    async fn get(&self, path: &str) -> Result<FetchResponse> {
        let Some(file) = self.resolve(path) else {
            tracing::warn!("Refusing to serve {} outside the site directory", path);
            return Ok(FetchResponse::new(403, "Forbidden"));
        };

        match tokio::fs::read_to_string(&file).await {
            Ok(body) => {
                tracing::debug!("GET {} -> {:?}", path, file);
                Ok(FetchResponse::ok(body))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::not_found()),
            Err(e) if file.is_dir() => {
                tracing::debug!("GET {} is a directory: {}", path, e);
                Ok(FetchResponse::not_found())
            }
            Err(e) => Err(Error::Fetch {
                path: path.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
