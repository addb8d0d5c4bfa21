//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap `inner` in an element, with optional pre-escaped attributes
pub fn tag(name: &str, attrs: &[(&str, &str)], inner: &str) -> String {
    let attrs: String = attrs
        .iter()
        .map(|(k, v)| format!(r#" {}="{}""#, k, html_escape(v)))
        .collect();
    format!("<{name}{attrs}>{inner}</{name}>")
}
