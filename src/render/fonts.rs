//! Font discovery and loading.
//!
//! Finds a usable TrueType/OpenType font for slide text by walking the
//! configured font directory, preferring files whose name matches the
//! requested family.

use fontdue::{Font, FontSettings};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Error, Result};

/// Locates and loads fonts from the configured directory.
#[derive(Debug)]
pub struct FontStore {
    font_dir: Option<PathBuf>,
}

impl FontStore {
    /// Create a store from config.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            font_dir: config.font_dir.clone(),
        }
    }

    /// Create a store searching an explicit directory.
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            font_dir: Some(dir.into()),
        }
    }

    /// Find a font file for the given family name.
    ///
    /// Matches file stems case-insensitively against the family (spaces
    /// ignored, so "DejaVu Sans" matches `DejaVuSans.ttf`). Falls back to
    /// the first font file found when no name matches.
    pub fn locate(&self, family: &str) -> Result<PathBuf> {
        let dir = self.font_dir.as_ref().ok_or_else(|| {
            Error::config(
                "No font directory configured",
                "Set PROBRIDGE_FONT_DIR to a directory containing .ttf or .otf files",
            )
        })?;

        let wanted = normalize_family(family);
        let mut fallback: Option<PathBuf> = None;

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            let path = entry.path();
            if !is_font_file(path) {
                continue;
            }
            let stem = path
                .file_stem()
                .map(|s| normalize_family(&s.to_string_lossy()))
                .unwrap_or_default();
            if !stem.is_empty() && (stem.contains(&wanted) || wanted.contains(&stem)) {
                return Ok(path.to_path_buf());
            }
            if fallback.is_none() {
                fallback = Some(path.to_path_buf());
            }
        }

        fallback.ok_or_else(|| {
            Error::Font(format!(
                "No font files found under {} for family \"{family}\"",
                dir.display()
            ))
        })
    }

    /// Locate and parse a font for the given family.
    pub fn load(&self, family: &str) -> Result<Font> {
        let path = self.locate(family)?;
        let bytes = fs_err::read(&path)?;
        Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| Error::Font(format!("Failed to parse font {}: {e}", path.display())))
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == "ttf" || ext == "otf"
        })
}

fn normalize_family(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect::<String>()
        .to_lowercase()
}
