use reqwest::Client;
use std::time::Duration;

use crate::config::Config;
use crate::constants::lookup;
use crate::error::{Error, Result};
use crate::lyrics_api::types::{LyricsResponse, SongQuery};

/// Client for the public lyrics lookup API.
///
/// One outstanding request per search action, bounded by a 10 second
/// timeout; timeouts surface as [`Error::Network`] and the request is
/// dropped. Races between overlapping searches are resolved by the caller
/// via generation numbers, not here.
#[derive(Clone)]
pub struct LyricsClient {
    base_url: String,
    client: Client,
}

impl LyricsClient {
    /// Create a new lyrics client from config
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.lyrics_api_base.clone(),
            client: Client::builder()
                .timeout(Duration::from_millis(lookup::TIMEOUT_MS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch the lyrics body for a song.
    ///
    /// Network errors, non-success statuses, and a missing or empty
    /// `lyrics` field each map to distinctly worded errors so the UI can
    /// show the right transient message.
    pub async fn fetch(&self, query: &SongQuery) -> Result<String> {
        let url = format!("{}/{}/{}", self.base_url, query.artist, query.title);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Network("The search timed out. Please try again later.".to_string())
                } else {
                    Error::Network(format!("Request for \"{query}\" failed: {e}"))
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::lyrics_status(
                format!("Request for \"{query}\" returned {status}"),
                status.as_u16(),
            ));
        }

        let body: LyricsResponse = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON from lyrics provider: {e}"), None))?;

        match body.lyrics {
            Some(lyrics) if !lyrics.trim().is_empty() => Ok(lyrics),
            _ => Err(Error::lyrics("Lyrics not found.")),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn client_uses_configured_base_url() {
        let mut config = Config::default();
        config.lyrics_api_base = "http://localhost:9999/v1".to_string();
        let client = LyricsClient::new(&config);
        assert_eq!(client.base_url, "http://localhost:9999/v1");
    }

    #[tokio::test]
    async fn unreachable_provider_reports_network_error() {
        let mut config = Config::default();
        // Reserved TEST-NET-1 address; connection fails fast
        config.lyrics_api_base = "http://192.0.2.1:1/v1".to_string();
        let client = LyricsClient::new(&config);
        let query = SongQuery::parse("Artist - Title").unwrap();
        match client.fetch(&query).await {
            Err(Error::Network(_)) => {}
            other => panic!("expected network error, got {other:?}"),
        }
    }
}
