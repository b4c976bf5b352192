//! Core type definitions for compile-time safety.
//!
//! Newtype wrappers and small enums shared by the formatting and rendering
//! engines, so raw integers and strings cannot be mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{canvas, formatting};

/// The 1-100 control inversely governing maximum lines grouped per slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precision(u8);

impl Precision {
    /// Create a precision value, clamping into the valid 1-100 range.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.clamp(formatting::MIN_PRECISION, formatting::MAX_PRECISION))
    }

    /// Get the raw precision value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Maximum lines grouped per slide: `ceil(100 / precision)`.
    ///
    /// Lower precision means larger slides; precision 100 gives one line per
    /// slide and precision 1 gives a hundred.
    #[must_use]
    pub const fn max_lines_per_slide(self) -> usize {
        (100usize).div_ceil(self.0 as usize)
    }

    /// Step the precision up or down by `delta`, staying in range.
    #[must_use]
    pub fn step(self, delta: i16) -> Self {
        let next = i16::from(self.0).saturating_add(delta);
        Self::new(next.clamp(0, i16::from(u8::MAX)) as u8)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::new(formatting::DEFAULT_PRECISION)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal text alignment within the slide canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HAlign {
    /// Anchored at the left margin.
    Left,
    /// Anchored at the canvas midline.
    #[default]
    Center,
    /// Anchored at the right margin.
    Right,
}

impl HAlign {
    /// Returns all variants in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Left, Self::Center, Self::Right]
    }

    /// Returns the human-readable name of this alignment.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }

    /// Cycle to the next alignment (for keyboard toggling).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Left => Self::Center,
            Self::Center => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Horizontal anchor x-coordinate on the export canvas.
    #[must_use]
    pub const fn anchor_x(self) -> u32 {
        match self {
            Self::Left => canvas::ANCHOR_LEFT,
            Self::Center => canvas::ANCHOR_CENTER,
            Self::Right => canvas::ANCHOR_RIGHT,
        }
    }
}

/// Vertical text alignment within the slide canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VAlign {
    /// Anchored near the top edge.
    Top,
    /// Anchored at the vertical midline.
    #[default]
    Center,
    /// Anchored near the bottom edge.
    Bottom,
}

impl VAlign {
    /// Returns all variants in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Top, Self::Center, Self::Bottom]
    }

    /// Returns the human-readable name of this alignment.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Center => "Center",
            Self::Bottom => "Bottom",
        }
    }

    /// Cycle to the next alignment (for keyboard toggling).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Top => Self::Center,
            Self::Center => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Vertical anchor y-coordinate on the export canvas.
    #[must_use]
    pub const fn anchor_y(self) -> u32 {
        match self {
            Self::Top => canvas::ANCHOR_TOP,
            Self::Center => canvas::ANCHOR_MIDDLE,
            Self::Bottom => canvas::ANCHOR_BOTTOM,
        }
    }
}

/// An RGBA color from the emphasis palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl PaletteColor {
    /// White, the fallback when no palette colors are selected.
    pub const WHITE: Self = Self { r: 0xff, g: 0xff, b: 0xff };

    /// Parse a `#RRGGBB` hex string.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// RGBA byte representation at full opacity.
    #[must_use]
    pub const fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn precision_clamps_into_range() {
        assert_eq!(Precision::new(0).get(), 1);
        assert_eq!(Precision::new(255).get(), 100);
        assert_eq!(Precision::new(50).get(), 50);
    }

    #[test]
    fn max_lines_per_slide_matches_ceiling() {
        assert_eq!(Precision::new(100).max_lines_per_slide(), 1);
        assert_eq!(Precision::new(50).max_lines_per_slide(), 2);
        assert_eq!(Precision::new(33).max_lines_per_slide(), 4);
        assert_eq!(Precision::new(1).max_lines_per_slide(), 100);
    }

    #[test]
    fn max_lines_per_slide_monotone_in_precision() {
        let mut last = usize::MAX;
        for p in 1..=100u8 {
            let lines = Precision::new(p).max_lines_per_slide();
            assert!(lines <= last, "not monotone at precision {p}");
            last = lines;
        }
    }

    #[test]
    fn alignment_anchors() {
        assert_eq!(HAlign::Left.anchor_x(), 50);
        assert_eq!(HAlign::Center.anchor_x(), 960);
        assert_eq!(HAlign::Right.anchor_x(), 1870);
        assert_eq!(VAlign::Top.anchor_y(), 50);
        assert_eq!(VAlign::Center.anchor_y(), 540);
        assert_eq!(VAlign::Bottom.anchor_y(), 1030);
    }

    #[test]
    fn palette_color_hex_round_trip() {
        let c = PaletteColor::from_hex("#FFA500").unwrap();
        assert_eq!(c.to_string(), "#FFA500");
        assert!(PaletteColor::from_hex("FFA500").is_none());
        assert!(PaletteColor::from_hex("#GG0000").is_none());
    }
}
