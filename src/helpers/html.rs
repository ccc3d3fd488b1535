//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape when `escape` is set, otherwise return the text unchanged
pub fn escape_if(s: &str, escape: bool) -> String {
    if escape {
        html_escape(s)
    } else {
        s.to_string()
    }
}

/// Placeholder shown in place of an empty or failed list
pub fn no_results(message: &str, escape: bool) -> String {
    format!(r#"<p class="no-results">{}</p>"#, escape_if(message, escape))
}
