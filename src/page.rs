//! Page composer.
//!
//! Wraps a rendered Markdown fragment plus the highlight stylesheets into a
//! complete HTML document. Pure function of its inputs; the template itself
//! is compiled into the binary, so failures here are packaging errors that
//! surface as per-request 500s.

use crate::config::Theme;
use askama::Template;

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    /// Rendered Markdown fragment
    pub content: &'a str,
    /// Theme selector written into the `data-theme` attribute
    pub theme: &'a str,
    /// Whether to draw a bounding box around the content
    pub bounding_box: bool,
    /// CSS for the light code-highlight scheme
    pub css_light: &'a str,
    /// CSS for the dark code-highlight scheme
    pub css_dark: &'a str,
}

/// Compose a full HTML document from a rendered fragment.
pub fn compose(
    content: &str,
    theme: Theme,
    bounding_box: bool,
) -> Result<String, askama::Error> {
    PageTemplate {
        content,
        theme: theme.as_str(),
        bounding_box,
        css_light: crate::highlight::CSS_LIGHT.as_str(),
        css_dark: crate::highlight::CSS_DARK.as_str(),
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_embeds_content_in_shell() {
        let html = compose("<h1>Hi</h1>", Theme::Auto, false).expect("Failed to render");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("</body>"));
    }

    #[test]
    fn test_compose_sets_theme_attribute() {
        let html = compose("x", Theme::Dark, false).expect("Failed to render");
        assert!(html.contains("data-theme=\"dark\""));
    }

    #[test]
    fn test_compose_bounding_box_class() {
        let with = compose("x", Theme::Auto, true).expect("Failed to render");
        let without = compose("x", Theme::Auto, false).expect("Failed to render");
        assert!(with.contains("bounding-box"));
        assert!(!without.contains("bounding-box"));
    }

    #[test]
    fn test_compose_fixed_theme_includes_single_stylesheet() {
        let light = compose("x", Theme::Light, false).expect("Failed to render");
        assert!(light.contains(".highlight"));
        assert!(!light.contains("prefers-color-scheme"));

        let auto = compose("x", Theme::Auto, false).expect("Failed to render");
        assert!(auto.contains("prefers-color-scheme: light"));
        assert!(auto.contains("prefers-color-scheme: dark"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose("<p>same</p>", Theme::Auto, true).expect("Failed to render");
        let b = compose("<p>same</p>", Theme::Auto, true).expect("Failed to render");
        assert_eq!(a, b);
    }
}
