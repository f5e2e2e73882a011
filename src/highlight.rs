//! Syntax-highlight CSS provider.
//!
//! Produces the stylesheet matching the classed spans emitted by the
//! renderer. The two color schemes used by the page shell are fixed, so
//! their CSS is computed once per server lifetime.

use once_cell::sync::Lazy;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle};

/// Highlight style used for the light color scheme.
const LIGHT_STYLE: &str = "InspiredGitHub";

/// Highlight style used for the dark color scheme.
const DARK_STYLE: &str = "base16-ocean.dark";

static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// CSS for the light code-highlight scheme, computed on first use.
pub static CSS_LIGHT: Lazy<String> = Lazy::new(|| css_for(LIGHT_STYLE));

/// CSS for the dark code-highlight scheme, computed on first use.
pub static CSS_DARK: Lazy<String> = Lazy::new(|| css_for(DARK_STYLE));

/// Generate the CSS for a named highlight style.
///
/// Unknown style names return an empty string rather than failing.
pub fn css_for(style: &str) -> String {
    let Some(theme) = THEME_SET.themes.get(style) else {
        tracing::debug!("Unknown highlight style '{style}', returning empty CSS");
        return String::new();
    };

    match css_for_theme_with_class_style(theme, ClassStyle::Spaced) {
        Ok(css) => css,
        Err(e) => {
            tracing::warn!("Failed to generate CSS for style '{style}': {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_for_known_styles() {
        assert!(!css_for(LIGHT_STYLE).is_empty());
        assert!(!css_for(DARK_STYLE).is_empty());
    }

    #[test]
    fn test_css_for_unknown_style_is_empty() {
        assert!(css_for("no-such-style").is_empty());
    }

    #[test]
    fn test_memoized_css_matches_direct_generation() {
        assert_eq!(*CSS_LIGHT, css_for(LIGHT_STYLE));
        assert_eq!(*CSS_DARK, css_for(DARK_STYLE));
    }
}
