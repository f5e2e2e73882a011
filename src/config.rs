use serde::{Deserialize, Serialize};
use std::fmt;

/// Default port used when none is given on the command line
pub const DEFAULT_PORT: u16 = 6419;

/// Default host used when none is given on the command line
pub const DEFAULT_HOST: &str = "localhost";

/// Server configuration
///
/// Contains all configuration parameters for the preview server. The value is
/// constructed once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host name used in the announced URL
    pub host: String,
    /// Port to bind the listener to
    pub port: u16,
    /// Color theme for rendered pages
    pub theme: Theme,
    /// Whether to draw a bounding box around rendered content
    pub bounding_box: bool,
    /// Whether to open the announced URL in a browser on startup
    pub browser: bool,
}

impl ServerConfig {
    /// Build a server configuration, normalizing the theme name.
    ///
    /// Unknown theme names are replaced by [`Theme::Auto`] with a warning;
    /// this is a normalization step, not a fatal error.
    pub fn new(host: String, port: u16, theme: &str, bounding_box: bool, browser: bool) -> Self {
        Self {
            host,
            port,
            theme: Theme::normalize(theme),
            bounding_box,
            browser,
        }
    }
}

/// Color theme options for rendered pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Always use the light color scheme
    Light,
    /// Always use the dark color scheme
    Dark,
    /// Follow the browser's `prefers-color-scheme`
    #[default]
    Auto,
}

impl Theme {
    /// Parse a theme name, falling back to `auto` for anything unknown.
    pub fn normalize(name: &str) -> Self {
        match name {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            "auto" => Theme::Auto,
            other => {
                tracing::warn!("Unknown theme '{other}', defaulting to 'auto'");
                Theme::Auto
            }
        }
    }

    /// String form used in the page template's `data-theme` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_known_themes() {
        assert_eq!(Theme::normalize("light"), Theme::Light);
        assert_eq!(Theme::normalize("dark"), Theme::Dark);
        assert_eq!(Theme::normalize("auto"), Theme::Auto);
    }

    #[test]
    fn test_normalize_unknown_theme_falls_back_to_auto() {
        assert_eq!(Theme::normalize("solarized"), Theme::Auto);
        assert_eq!(Theme::normalize(""), Theme::Auto);
        assert_eq!(Theme::normalize("LIGHT"), Theme::Auto);
    }

    #[test]
    fn test_config_construction_normalizes_theme() {
        let config = ServerConfig::new("localhost".to_string(), 6419, "sepia", false, true);
        assert_eq!(config.theme, Theme::Auto);
        assert_eq!(config.port, 6419);
        assert!(config.browser);
    }

    #[test]
    fn test_theme_display() {
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(Theme::Auto.to_string(), "auto");
    }
}
