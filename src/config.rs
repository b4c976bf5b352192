//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::{lookup, style};
use crate::error::Result;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Base URL of the lyrics provider API
    pub lyrics_api_base: String,
    /// Directory searched for font files
    pub font_dir: Option<PathBuf>,
    /// Preferred font family for slide text
    pub font_family: String,
    /// Directory where the exported archive is written
    pub output_dir: PathBuf,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            lyrics_api_base: lookup::DEFAULT_BASE_URL.to_string(),
            font_dir: None,
            font_family: style::DEFAULT_FONT_FAMILY.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(base) = env::var("PROBRIDGE_LYRICS_API") {
            config.lyrics_api_base = base.trim_end_matches('/').to_string();
        }

        if let Ok(family) = env::var("PROBRIDGE_FONT_FAMILY") {
            config.font_family = family;
        }

        // Font dir: env var override, or platform default font directories
        config.font_dir = env::var("PROBRIDGE_FONT_DIR").ok().map_or_else(
            detect_font_dir,
            |path| {
                let p = PathBuf::from(shellexpand::tilde(&path).to_string());
                p.is_dir().then_some(p)
            },
        );

        // Output dir: env var override, or Downloads, or current directory
        config.output_dir = env::var("PROBRIDGE_OUTPUT_DIR").ok().map_or_else(
            || dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            |path| PathBuf::from(shellexpand::tilde(&path).to_string()),
        );

        Ok(config)
    }
}

/// Attempt to detect a system font directory
fn detect_font_dir() -> Option<PathBuf> {
    // Common font paths for different platforms
    let paths = if cfg!(target_os = "macos") {
        vec![
            PathBuf::from("/System/Library/Fonts"),
            PathBuf::from("/Library/Fonts"),
        ]
    } else if cfg!(target_os = "windows") {
        vec![PathBuf::from("C:\\Windows\\Fonts")]
    } else {
        vec![
            PathBuf::from("/usr/share/fonts"),
            PathBuf::from("/usr/local/share/fonts"),
        ]
    };

    // Check each path, then fall back to the per-user font dir
    paths
        .into_iter()
        .find(|p| p.is_dir())
        .or_else(|| dirs::font_dir().filter(|p| p.is_dir()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn default_config_uses_public_provider() {
        let config = Config::default();
        assert_eq!(config.lyrics_api_base, "https://api.lyrics.ovh/v1");
        assert_eq!(config.app_name(), "probridge");
    }
}
