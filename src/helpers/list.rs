//! Post list rendering

use super::html::{escape_if, no_results};
use super::url::article_href;
use crate::content::PostSummary;

/// Renders post summaries into the list fragment of the index page
#[derive(Debug, Clone)]
pub struct ListRenderer {
    article_page: String,
    escape: bool,
}

impl ListRenderer {
    pub fn new(article_page: &str, escape: bool) -> Self {
        Self {
            article_page: article_page.to_string(),
            escape,
        }
    }

    /// Render posts in order, or the placeholder `empty_message` when there are none
    pub fn render<'a, I>(&self, posts: I, empty_message: &str) -> String
    where
        I: IntoIterator<Item = &'a PostSummary>,
    {
        let blocks: Vec<String> = posts.into_iter().map(|p| self.render_item(p)).collect();

        if blocks.is_empty() {
            return no_results(empty_message, self.escape);
        }

        blocks.concat()
    }

    fn render_item(&self, post: &PostSummary) -> String {
        let href = article_href(&self.article_page, &post.slug, self.escape);
        // Same whitespace as the legacy list markup
        format!(
            r#"
        <div class="post-item">
            <h2><a href="{}">{}</a></h2>
            <div class="post-meta">{}</div>
            <p class="post-excerpt">{}</p>
        </div>
    "#,
            escape_if(&href, self.escape),
            escape_if(&post.title, self.escape),
            escape_if(&post.date, self.escape),
            escape_if(&post.excerpt, self.escape)
        )
    }
}

impl Default for ListRenderer {
    fn default() -> Self {
        Self::new("post.html", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_posts() -> Vec<PostSummary> {
        vec![
            PostSummary::new("first", "First Post", "2024-01-01", "Intro"),
            PostSummary::new("second", "Second Post", "2024-02-01", "More"),
        ]
    }

    #[test]
    fn test_render_empty() {
        let renderer = ListRenderer::default();
        let posts: Vec<PostSummary> = Vec::new();
        assert_eq!(
            renderer.render(&posts, "No posts yet"),
            r#"<p class="no-results">No posts yet</p>"#
        );
    }

    #[test]
    fn test_render_in_order() {
        let renderer = ListRenderer::default();
        let html = renderer.render(&sample_posts(), "unused");

        assert_eq!(html.matches(r#"<div class="post-item">"#).count(), 2);
        let first = html.find(r#"href="post.html?slug=first""#).unwrap();
        let second = html.find(r#"href="post.html?slug=second""#).unwrap();
        assert!(first < second);
        assert!(html.contains(r#"<div class="post-meta">2024-01-01</div>"#));
        assert!(html.contains(r#"<p class="post-excerpt">More</p>"#));
        assert!(!html.contains("unused"));
    }

    #[test]
    fn test_render_escapes_content() {
        let renderer = ListRenderer::default();
        let posts = vec![PostSummary::new(
            "x\"><script>",
            "<script>alert(1)</script>",
            "today & tomorrow",
            "it's",
        )];
        let html = renderer.render(&posts, "");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("today &amp; tomorrow"));
        assert!(html.contains("it&#39;s"));
        assert!(!html.contains("slug=x\""));
    }

    #[test]
    fn test_render_raw_when_escaping_disabled() {
        let renderer = ListRenderer::new("article.html", false);
        let posts = vec![PostSummary::new("a", "<em>Hi</em>", "d", "e")];
        let html = renderer.render(&posts, "");

        assert!(html.contains(r#"<a href="article.html?slug=a"><em>Hi</em></a>"#));
    }

    #[test]
    fn test_item_layout() {
        let posts = vec![PostSummary::new("a", "T", "D", "E")];
        let expected = "\n        <div class=\"post-item\">\n            \
            <h2><a href=\"post.html?slug=a\">T</a></h2>\n            \
            <div class=\"post-meta\">D</div>\n            \
            <p class=\"post-excerpt\">E</p>\n        </div>\n    ";
        assert_eq!(ListRenderer::new("post.html", false).render(&posts, ""), expected);

        let two = ListRenderer::default().render(&sample_posts(), "");
        assert!(two.contains("</div>\n    \n        <div class=\"post-item\">"));
    }

    #[test]
    fn test_escaping_keeps_well_formed_output() {
        let posts = sample_posts();
        assert_eq!(
            ListRenderer::new("post.html", true).render(&posts, ""),
            ListRenderer::new("post.html", false).render(&posts, "")
        );
    }
}
