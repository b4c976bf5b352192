//! Session document: the shared data model for one formatting session.
//!
//! The original tool kept slides, style, and emphasis words in ambient UI
//! state. Here they live in one explicit [`Session`] value; formatting
//! replaces derived fields with freshly computed values instead of mutating
//! them in place. Nothing is persisted across runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::constants::style;
use crate::formatter;
use crate::types::{HAlign, PaletteColor, Precision, VAlign};

/// User-chosen words forced to uppercase during formatting.
///
/// Insertion order is preserved for display; membership checks are
/// case-insensitive. Order has no effect on formatting semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmphasisWordSet {
    words: Vec<String>,
}

impl EmphasisWordSet {
    /// Create an empty word set.
    #[must_use]
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Add a word if non-empty and not already present (case-insensitive).
    ///
    /// Returns true when the word was inserted.
    pub fn add(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() || self.contains(word) {
            return false;
        }
        self.words.push(word.to_string());
        true
    }

    /// Remove a word (case-insensitive). Returns true when removed.
    pub fn remove(&mut self, word: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| !w.eq_ignore_ascii_case(word));
        self.words.len() != before
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    /// Iterate words in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of words in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A decoded background image shared by reference across all slides.
#[derive(Debug)]
pub struct BackgroundImage {
    /// Path the image was loaded from, for display.
    pub path: PathBuf,
    /// Decoded pixel data.
    pub image: image::DynamicImage,
}

/// Session-lifetime styling configuration read at format/render time.
#[derive(Debug, Clone)]
pub struct StyleConfig {
    /// Font family used for slide text.
    pub font_family: String,
    /// Font size in pixels, 12-72.
    pub font_size: u32,
    /// Horizontal text alignment.
    pub halign: HAlign,
    /// Vertical text alignment.
    pub valign: VAlign,
    /// Palette subset selected for emphasis coloring, in palette order.
    pub selected_colors: Vec<PaletteColor>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: style::DEFAULT_FONT_FAMILY.to_string(),
            font_size: style::DEFAULT_FONT_SIZE,
            halign: HAlign::default(),
            valign: VAlign::default(),
            selected_colors: Vec::new(),
        }
    }
}

impl StyleConfig {
    /// Adjust the font size by `delta`, clamped to the 12-72 px range.
    pub fn step_font_size(&mut self, delta: i32) {
        let next = i64::from(self.font_size) + i64::from(delta);
        self.font_size = u32::try_from(
            next.clamp(i64::from(style::MIN_FONT_SIZE), i64::from(style::MAX_FONT_SIZE)),
        )
        .unwrap_or(style::DEFAULT_FONT_SIZE);
    }

    /// Toggle a palette color in or out of the selected subset.
    pub fn toggle_color(&mut self, color: PaletteColor) {
        if let Some(idx) = self.selected_colors.iter().position(|c| *c == color) {
            self.selected_colors.remove(idx);
        } else {
            self.selected_colors.push(color);
        }
    }
}

/// One render-stage slide: a text body plus the shared background reference.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Slide body; may contain internal newlines.
    pub text: String,
    /// Shared background image, if one has been loaded.
    pub background: Option<Arc<BackgroundImage>>,
}

/// All state for one formatting session.
#[derive(Debug, Default)]
pub struct Session {
    /// Raw lyric text as typed or fetched.
    pub raw_lyrics: String,
    /// Output of the last formatting pass.
    pub formatted: String,
    /// Render-stage slides derived from the formatted text.
    pub slides: Vec<Slide>,
    /// Precision control for segmentation.
    pub precision: Precision,
    /// Emphasis words applied during formatting.
    pub emphasis_words: EmphasisWordSet,
    /// Styling read by the preview and export engines.
    pub style: StyleConfig,
    /// Background applied to every slide; last load wins for all of them.
    pub background: Option<Arc<BackgroundImage>>,
}

impl Session {
    /// Create a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run both formatting engines and rebuild the slide list.
    ///
    /// Derived fields (`formatted`, `slides`) are replaced wholesale; the raw
    /// text and styling are left untouched.
    pub fn format(&mut self) {
        self.formatted =
            formatter::format_lyrics(&self.raw_lyrics, self.precision, &self.emphasis_words);
        self.rebuild_slides();
    }

    /// Rebuild render-stage slides from the current formatted text.
    pub fn rebuild_slides(&mut self) {
        self.slides = formatter::split_slides(&self.formatted)
            .into_iter()
            .map(|text| Slide {
                text,
                background: self.background.clone(),
            })
            .collect();
    }

    /// Set the shared background image and apply it to every slide.
    pub fn set_background(&mut self, background: Arc<BackgroundImage>) {
        self.background = Some(background);
        for slide in &mut self.slides {
            slide.background = self.background.clone();
        }
    }

    /// Number of render-stage slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn word_set_deduplicates_case_insensitively() {
        let mut set = EmphasisWordSet::new();
        assert!(set.add("Love"));
        assert!(!set.add("love"));
        assert!(!set.add("  "));
        assert_eq!(set.len(), 1);
        assert!(set.remove("LOVE"));
        assert!(set.is_empty());
    }

    #[test]
    fn word_set_preserves_insertion_order() {
        let mut set = EmphasisWordSet::new();
        set.add("grace");
        set.add("mercy");
        set.add("hope");
        let order: Vec<&str> = set.iter().collect();
        assert_eq!(order, vec!["grace", "mercy", "hope"]);
    }

    #[test]
    fn word_set_survives_json_round_trip_in_order() {
        let mut set = EmphasisWordSet::new();
        set.add("grace");
        set.add("mercy");
        let json = serde_json::to_string(&set).unwrap();
        let restored: EmphasisWordSet = serde_json::from_str(&json).unwrap();
        let order: Vec<&str> = restored.iter().collect();
        assert_eq!(order, vec!["grace", "mercy"]);
        assert!(restored.contains("GRACE"));
    }

    #[test]
    fn format_rebuilds_slides_from_raw_text() {
        let mut session = Session::new();
        session.raw_lyrics = "one\ntwo\nthree\nfour".to_string();
        session.precision = Precision::new(50);
        session.format();
        assert_eq!(session.slide_count(), 2);
        assert_eq!(session.slides[0].text, "one\ntwo");
    }

    #[test]
    fn background_applies_to_all_slides_retroactively() {
        let mut session = Session::new();
        session.raw_lyrics = "one\ntwo\nthree\nfour".to_string();
        session.precision = Precision::new(50);
        session.format();

        let bg = Arc::new(BackgroundImage {
            path: PathBuf::from("bg.png"),
            image: image::DynamicImage::new_rgba8(2, 2),
        });
        session.set_background(Arc::clone(&bg));

        assert!(session.slides.iter().all(|s| s.background.is_some()));
        // Reformatting keeps the shared background on new slides
        session.format();
        assert!(session.slides.iter().all(|s| s.background.is_some()));
    }

    #[test]
    fn font_size_clamps_to_bounds() {
        let mut style = StyleConfig::default();
        style.step_font_size(1000);
        assert_eq!(style.font_size, 72);
        style.step_font_size(-1000);
        assert_eq!(style.font_size, 12);
    }

    #[test]
    fn toggle_color_selection() {
        let mut style = StyleConfig::default();
        let red = PaletteColor::from_hex("#FF0000").unwrap();
        style.toggle_color(red);
        assert_eq!(style.selected_colors.len(), 1);
        style.toggle_color(red);
        assert!(style.selected_colors.is_empty());
    }
}
