//! ai-blog: a minimal static blog front end
//!
//! Loads a JSON post index and Markdown articles from a static site, renders
//! them into page fragments and filters the index with a live search box.
//! The browser is reduced to two seams, [`fetch::Fetcher`] and [`page::Page`],
//! so both page flows run headless from the command line.

pub mod commands;
pub mod config;
pub mod content;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod helpers;
pub mod page;
pub mod search;
pub mod server;

pub use error::{Error, ErrorKind, Result};

use std::path::{Path, PathBuf};

use fetch::{AnyFetcher, HttpFetcher, SiteFetcher};

/// A static blog site on disk
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Site directory, the root all resources are served from
    pub site_dir: PathBuf,
    /// Base URL of a deployed copy to read from instead of `site_dir`
    pub remote: Option<String>,
}

impl Blog {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(site_dir: P) -> Result<Self> {
        let site_dir = site_dir.as_ref().to_path_buf();
        let config_path = site_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self {
            config,
            site_dir,
            remote: None,
        })
    }

    /// Read resources from a deployed site instead of the local directory
    pub fn with_remote(mut self, base_url: Option<String>) -> Self {
        self.remote = base_url;
        self
    }

    /// Fetcher for this site's resources
    pub fn fetcher(&self) -> AnyFetcher {
        match &self.remote {
            Some(url) => AnyFetcher::Http(HttpFetcher::new(url.as_str())),
            None => AnyFetcher::Site(SiteFetcher::new(&self.site_dir)),
        }
    }

    /// Directory holding the index and Markdown files
    pub fn posts_dir(&self) -> PathBuf {
        self.site_dir.join(&self.config.posts_dir)
    }
}
