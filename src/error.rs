//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Error fetching lyrics: {0}")]
    Network(String),

    /// Lyrics provider error with status context
    #[error("Lyrics lookup failed: {message}")]
    Lyrics {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Malformed search query (expected "Artist - Title")
    #[error("Invalid search query: {0}")]
    Query(String),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Response or file parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Font discovery or glyph rasterization error
    #[error("Font error: {0}")]
    Font(String),

    /// Slide rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// Archive export error
    #[error("Export failed: {0}")]
    Export(String),

    /// Export cancelled by the user
    #[error("Export cancelled")]
    ExportCancelled,

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    #[allow(dead_code)]
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a lyrics provider error without status context
    pub fn lyrics(message: impl Into<String>) -> Self {
        Self::Lyrics {
            message: message.into(),
            status: None,
            hint: None,
        }
    }

    /// Create a lyrics provider error with HTTP status
    pub fn lyrics_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            404 => Some("No lyrics were found for this artist and title"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Lyrics provider server error - try again later"),
            _ => None,
        };
        Self::Lyrics {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Whether this error should surface as a transient (auto-dismissing) alert.
    ///
    /// Lookup and render failures are non-fatal to the session; only
    /// configuration problems warrant a persistent message.
    pub const fn is_transient(&self) -> bool {
        !matches!(self, Self::Config { .. })
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Export(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Self::Render(e.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn lyrics_status_provides_hints() {
        let err = Error::lyrics_status("Not found", 404);
        match err {
            Error::Lyrics { hint: Some(h), .. } => {
                assert!(h.contains("No lyrics"));
            }
            _ => panic!("Expected Lyrics error with hint"),
        }
    }

    #[test]
    fn network_and_missing_lyrics_wording_differ() {
        let network = Error::Network("connection refused".to_string());
        let missing = Error::lyrics("Lyrics not found.");
        assert_ne!(network.to_string(), missing.to_string());
        assert!(network.to_string().contains("fetching"));
    }

    #[test]
    fn transient_classification() {
        assert!(Error::Network("timeout".to_string()).is_transient());
        assert!(Error::Query("missing title".to_string()).is_transient());
        assert!(!Error::config("no font", "set PROBRIDGE_FONT_DIR").is_transient());
    }
}
