//! Integration tests for the lyrics provider client.

// Ensure this test only runs when integration tests are explicitly enabled
// or when running all tests, but provide feedback if skipped.
#![cfg(feature = "integration_test")]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use probridge::config::Config;
use probridge::error::Error;
use probridge::lyrics_api::{LyricsClient, SongQuery};

// Helper function to set up the client for tests
fn setup_client() -> LyricsClient {
    let config = Config::load().unwrap_or_default();
    LyricsClient::new(&config)
}

// Test fetching a well-known song
#[tokio::test]
async fn test_fetch_known_song() {
    let client = setup_client();
    let query = SongQuery::parse("Toto - Africa").unwrap();

    match client.fetch(&query).await {
        Ok(lyrics) => {
            println!("Fetched {} characters of lyrics.", lyrics.len());
            assert!(!lyrics.trim().is_empty(), "Expected non-empty lyrics.");
        }
        Err(Error::Network(e)) => {
            // Provider outages shouldn't fail the suite
            println!("Skipping integration test: provider unreachable ({e})");
        }
        Err(e) => panic!("fetch failed: {e}"),
    }
}

// Test that an unknown song surfaces a lyrics error rather than a panic
#[tokio::test]
async fn test_fetch_unknown_song_is_an_error() {
    let client = setup_client();
    let query = SongQuery::parse("zzzznotarealartist - zzzznotarealsong").unwrap();

    match client.fetch(&query).await {
        Ok(_) => panic!("Expected a lookup failure for a nonsense song."),
        Err(Error::Network(e)) => {
            println!("Skipping integration test: provider unreachable ({e})");
        }
        Err(e) => println!("Got expected error: {e}"),
    }
}
