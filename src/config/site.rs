//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, appended to article titles
    pub title: String,

    // Pages
    pub index_page: String,
    pub article_page: String,

    // Content
    pub posts_dir: String,
    pub index_file: String,

    // Rendering
    pub escape_html: bool,
    /// Title used when an article declares none
    pub untitled: String,

    #[serde(default)]
    pub elements: ElementIds,
    #[serde(default)]
    pub messages: Messages,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "AI Blog".to_string(),
            index_page: "index.html".to_string(),
            article_page: "post.html".to_string(),
            posts_dir: "posts".to_string(),
            index_file: "index.json".to_string(),
            escape_html: true,
            untitled: "Untitled".to_string(),
            elements: ElementIds::default(),
            messages: Messages::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resource path of the post index, relative to the site root
    pub fn index_path(&self) -> String {
        format!("{}/{}", self.posts_dir.trim_end_matches('/'), self.index_file)
    }

    /// Title shown in the browser tab for an article
    pub fn article_title(&self, title: &str) -> String {
        format!("{} - {}", title, self.title)
    }
}

/// Ids of the page elements the controllers write into
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub posts_list: String,
    pub post_content: String,
    pub search: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            posts_list: "posts-list".to_string(),
            post_content: "post-content".to_string(),
            search: "search".to_string(),
        }
    }
}

/// User-visible placeholder messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// The index is empty or could not be loaded
    pub no_posts: String,
    /// A search matched nothing
    pub no_matches: String,
    /// An article could not be loaded
    pub load_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            no_posts: "No posts yet".to_string(),
            no_matches: "No matching posts found".to_string(),
            load_failed: "Failed to load post".to_string(),
        }
    }
}
