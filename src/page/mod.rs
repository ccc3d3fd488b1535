//! The page a controller renders into
//!
//! [`Page`] is the narrow slice of a browser document the controllers need.
//! [`HeadlessPage`] keeps that state in memory for the CLI and for tests.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ELEMENT_ID: Regex = Regex::new(r#"(?:^|\s)id\s*=\s*["']([^"']+)["']"#).unwrap();
}

/// Document operations used by the controllers
pub trait Page {
    /// Whether an element with this id exists
    fn has_element(&self, id: &str) -> bool;

    /// Replace the inner HTML of an element; missing elements are skipped
    fn set_inner_html(&mut self, id: &str, html: &str);

    /// Current inner HTML of an element
    fn inner_html(&self, id: &str) -> Option<&str>;

    fn title(&self) -> &str;

    fn set_title(&mut self, title: &str);

    /// Query string of the current location, including the leading `?` if any
    fn location_search(&self) -> &str;

    /// Navigate away to another page
    fn navigate(&mut self, href: &str);
}

/// In-memory page
#[derive(Debug, Clone, Default)]
pub struct HeadlessPage {
    title: String,
    search: String,
    elements: IndexMap<String, String>,
    navigated_to: Option<String>,
}

impl HeadlessPage {
    /// Create a page at the given location query with the given element ids
    pub fn new(search: &str, element_ids: &[&str]) -> Self {
        Self {
            search: search.to_string(),
            elements: element_ids
                .iter()
                .map(|id| (id.to_string(), String::new()))
                .collect(),
            ..Default::default()
        }
    }

    /// Create a page whose elements are the `id` attributes found in an HTML shell
    pub fn from_shell(html: &str, search: &str) -> Self {
        let mut page = Self::new(search, &[]);
        for caps in ELEMENT_ID.captures_iter(html) {
            page.elements.entry(caps[1].to_string()).or_default();
        }
        if let Some(title) = shell_title(html) {
            page.title = title;
        }
        page
    }

    /// Where the page navigated to, if it did
    pub fn navigated_to(&self) -> Option<&str> {
        self.navigated_to.as_deref()
    }

    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }
}

impl Page for HeadlessPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) {
        match self.elements.get_mut(id) {
            Some(content) => *content = html.to_string(),
            None => tracing::warn!("No element with id '{}' on the page", id),
        }
    }

    fn inner_html(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(String::as_str)
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn location_search(&self) -> &str {
        &self.search
    }

    fn navigate(&mut self, href: &str) {
        tracing::debug!("Navigating to {}", href);
        self.navigated_to = Some(href.to_string());
    }
}

fn shell_title(html: &str) -> Option<String> {
    let start = html.find("<title>")? + "<title>".len();
    let end = html[start..].find("</title>")?;
    Some(html[start..start + end].trim().to_string())
}
