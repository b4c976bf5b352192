//! `ProBridge` - lyrics formatting and slide generation tool.
//!
//! This crate turns raw song lyrics into presentation-ready slides: a
//! frequency-based formatter segments lyrics into slide-sized chunks, a
//! raster pipeline draws each slide onto a 1920x1080 canvas, and the result
//! is packaged as a zip archive of PNGs for import into presentation
//! software.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatter;
pub mod input;
pub mod lyrics_api;
pub mod render;
pub mod session;
pub mod types;
pub mod ui;
