use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Escapes text for safe inclusion in HTML element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Popup markup for one earthquake. `place` comes from the feed and is escaped.
pub fn earthquake_popup(place: &str, magnitude: f64, depth_km: f64) -> String {
    format!(
        "<h1>Location: {}</h1><hr><h3>Magnitude: {}</h3><br><h3>Depth: {}</h3>",
        escape_html(place),
        magnitude,
        depth_km
    )
}

/// Popup bound to a map position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub position: LatLng,
    /// Ready-to-insert HTML
    pub content: String,
    pub max_width: u32,
}

impl Popup {
    pub fn new(position: LatLng, content: String) -> Self {
        Self {
            position,
            content,
            max_width: 300,
        }
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain text"), "plain text");
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_earthquake_popup_template() {
        assert_eq!(
            earthquake_popup("Central Alaska", 1.7, -0.5),
            "<h1>Location: Central Alaska</h1><hr><h3>Magnitude: 1.7</h3><br><h3>Depth: -0.5</h3>"
        );
    }

    #[test]
    fn test_place_cannot_break_markup() {
        let html = earthquake_popup("</h1><img src=x onerror=alert(1)>", 2.0, 3.0);
        assert!(!html.contains("<img"));
        assert!(html.starts_with("<h1>Location: &lt;/h1&gt;&lt;img"));
    }
}
