//! Request and response types for the lyrics provider.

use serde::Deserialize;

use crate::error::{Error, Result};

/// A parsed "Artist - Title" search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    /// Performing artist, trimmed, non-empty.
    pub artist: String,
    /// Song title, trimmed, non-empty.
    pub title: String,
}

impl SongQuery {
    /// Parse a raw search string of the form `"Artist - Title"`.
    ///
    /// Splits on the first `" - "` separator; both halves are trimmed and
    /// must be non-empty. Titles containing `" - "` themselves keep their
    /// remainder intact.
    pub fn parse(input: &str) -> Result<Self> {
        let (artist, title) = input.split_once(" - ").ok_or_else(|| {
            Error::Query(
                "Please enter both artist and song title in the format: Artist - Title."
                    .to_string(),
            )
        })?;

        let artist = artist.trim();
        let title = title.trim();
        if artist.is_empty() || title.is_empty() {
            return Err(Error::Query(
                "Please enter both artist and song title in the format: Artist - Title."
                    .to_string(),
            ));
        }

        Ok(Self {
            artist: artist.to_string(),
            title: title.to_string(),
        })
    }
}

impl std::fmt::Display for SongQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// Response body of the lyrics provider.
///
/// A present but empty `lyrics` field counts as an absence signal.
#[derive(Debug, Deserialize)]
pub struct LyricsResponse {
    /// Free-text lyrics body, when found.
    #[serde(default)]
    pub lyrics: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn parses_artist_and_title() {
        let q = SongQuery::parse("Chris Tomlin - How Great Is Our God").unwrap();
        assert_eq!(q.artist, "Chris Tomlin");
        assert_eq!(q.title, "How Great Is Our God");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let q = SongQuery::parse("Toto - Africa - Live").unwrap();
        assert_eq!(q.artist, "Toto");
        assert_eq!(q.title, "Africa - Live");
    }

    #[test]
    fn trims_both_halves() {
        let q = SongQuery::parse("  Hillsong  -  Oceans  ").unwrap();
        assert_eq!(q.artist, "Hillsong");
        assert_eq!(q.title, "Oceans");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(
            SongQuery::parse("just a title"),
            Err(crate::error::Error::Query(_))
        ));
    }

    #[test]
    fn rejects_empty_halves() {
        assert!(SongQuery::parse(" - Title").is_err());
        assert!(SongQuery::parse("Artist - ").is_err());
        // A bare hyphen without spaces is not a separator
        assert!(SongQuery::parse("Artist-Title").is_err());
    }
}
