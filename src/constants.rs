//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Slide canvas geometry.
pub mod canvas {
    /// Exported slide width in pixels.
    pub const WIDTH: u32 = 1920;

    /// Exported slide height in pixels.
    pub const HEIGHT: u32 = 1080;

    /// Horizontal anchor for left-aligned text.
    pub const ANCHOR_LEFT: u32 = 50;

    /// Horizontal anchor for centered text.
    pub const ANCHOR_CENTER: u32 = 960;

    /// Horizontal anchor for right-aligned text.
    pub const ANCHOR_RIGHT: u32 = 1870;

    /// Vertical anchor for top-aligned text.
    pub const ANCHOR_TOP: u32 = 50;

    /// Vertical anchor for middle-aligned text.
    pub const ANCHOR_MIDDLE: u32 = 540;

    /// Vertical anchor for bottom-aligned text.
    pub const ANCHOR_BOTTOM: u32 = 1030;

    /// Extra pixels between successive lines, added to the font size.
    pub const LINE_GAP: u32 = 10;

    /// Flat fill used when no background image is set (neutral gray).
    pub const FALLBACK_BACKGROUND: [u8; 4] = [0xf3, 0xf4, 0xf6, 0xff];

    /// Text color for exported slides.
    pub const TEXT_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
}

/// Formatting engine bounds.
pub mod formatting {
    /// Minimum precision value.
    pub const MIN_PRECISION: u8 = 1;

    /// Maximum precision value.
    pub const MAX_PRECISION: u8 = 100;

    /// Default precision for new sessions.
    pub const DEFAULT_PRECISION: u8 = 50;
}

/// Text styling bounds.
pub mod style {
    /// Minimum font size in pixels.
    pub const MIN_FONT_SIZE: u32 = 12;

    /// Maximum font size in pixels.
    pub const MAX_FONT_SIZE: u32 = 72;

    /// Default font size in pixels.
    pub const DEFAULT_FONT_SIZE: u32 = 24;

    /// Default font family.
    pub const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans";
}

/// Emphasis color palette offered in the slide view.
///
/// Hex values mirror the ten-swatch grid of the original tool.
pub const PALETTE: &[&str] = &[
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF",
    "#00FFFF", "#FFA500", "#800080", "#008000", "#FFC0CB",
];

/// Lyrics lookup constants.
pub mod lookup {
    /// Request timeout for the lyrics provider, in milliseconds.
    pub const TIMEOUT_MS: u64 = 10_000;

    /// Default lyrics provider base URL.
    pub const DEFAULT_BASE_URL: &str = "https://api.lyrics.ovh/v1";
}

/// Alert display constants.
pub mod alerts {
    /// How long a transient alert stays on screen, in milliseconds.
    pub const DISMISS_MS: u64 = 5_000;
}

/// Export constants.
pub mod export {
    /// File name of the exported archive.
    pub const ARCHIVE_NAME: &str = "slides.zip";
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 16;
}
