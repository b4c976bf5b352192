//! Lyrics provider integration.
//!
//! This module handles communication with the public lyrics lookup API,
//! providing query parsing and a timeout-bounded fetch client.

pub mod api;
pub mod types;

pub use api::LyricsClient;
pub use types::SongQuery;
