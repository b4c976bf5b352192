//! Archive export pipeline.
//!
//! Renders slides strictly in order, encodes each to PNG, and packages the
//! results as `slide_1.png` .. `slide_N.png` inside a single zip archive.
//! Any per-slide failure aborts the remaining export and removes the partial
//! archive rather than leaving an incomplete file behind. Export is
//! cancellable and reports per-slide progress.

use image::RgbaImage;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::render::raster::SlideRenderer;
use crate::session::Slide;

/// Per-slide export progress report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    /// Slides fully written so far.
    pub completed: usize,
    /// Total slides in this export.
    pub total: usize,
}

/// Archive entry name for a slide, 1-based.
fn entry_name(index: usize) -> String {
    format!("slide_{}.png", index + 1)
}

/// Render every slide and write the archive to `output_path`.
///
/// Slides are processed in list order so the archive order always matches
/// the on-screen order. `render` is called once per slide; `on_progress`
/// after each written entry. Checking `cancel` between slides makes a long
/// export abortable; on cancellation or error the partial file is removed.
pub fn export_archive(
    slides: &[Slide],
    output_path: &Path,
    cancel: &AtomicBool,
    mut render: impl FnMut(&Slide) -> Result<RgbaImage>,
    mut on_progress: impl FnMut(ExportProgress),
) -> Result<PathBuf> {
    if slides.is_empty() {
        return Err(Error::Export("No slides to export".to_string()));
    }

    let result = write_entries(slides, output_path, cancel, &mut render, &mut on_progress);
    if result.is_err() {
        let _ = fs_err::remove_file(output_path);
    }
    result.map(|()| output_path.to_path_buf())
}

fn write_entries(
    slides: &[Slide],
    output_path: &Path,
    cancel: &AtomicBool,
    render: &mut impl FnMut(&Slide) -> Result<RgbaImage>,
    on_progress: &mut impl FnMut(ExportProgress),
) -> Result<()> {
    let file = fs_err::File::create(output_path)?;
    let mut archive = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let total = slides.len();
    for (idx, slide) in slides.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return Err(Error::ExportCancelled);
        }

        let canvas_img = render(slide)?;
        let png = SlideRenderer::encode_png(&canvas_img)?;

        archive.start_file(entry_name(idx), options)?;
        archive
            .write_all(&png)
            .map_err(|e| Error::Export(format!("Failed writing {}: {e}", entry_name(idx))))?;

        on_progress(ExportProgress {
            completed: idx + 1,
            total,
        });
    }

    archive.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::render::raster::base_canvas;

    fn plain_slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| Slide {
                text: format!("slide body {i}"),
                background: None,
            })
            .collect()
    }

    fn solid_render(slide: &Slide) -> Result<RgbaImage> {
        let _ = slide;
        Ok(base_canvas(None))
    }

    #[test]
    fn entry_names_are_one_based() {
        assert_eq!(entry_name(0), "slide_1.png");
        assert_eq!(entry_name(2), "slide_3.png");
    }

    #[test]
    fn empty_slide_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.zip");
        let cancel = AtomicBool::new(false);
        let result = export_archive(&[], &path, &cancel, solid_render, |_| {});
        assert!(matches!(result, Err(Error::Export(_))));
        assert!(!path.exists());
    }

    #[test]
    fn archive_contains_sequential_entries_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.zip");
        let cancel = AtomicBool::new(false);
        let mut reports = Vec::new();

        let out = export_archive(&plain_slides(3), &path, &cancel, solid_render, |p| {
            reports.push(p);
        })
        .unwrap();

        assert_eq!(out, path);
        assert_eq!(
            reports,
            vec![
                ExportProgress { completed: 1, total: 3 },
                ExportProgress { completed: 2, total: 3 },
                ExportProgress { completed: 3, total: 3 },
            ]
        );

        let file = fs_err::File::open(&path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        assert_eq!(archive.len(), 3);
        for (idx, expected) in ["slide_1.png", "slide_2.png", "slide_3.png"]
            .iter()
            .enumerate()
        {
            let entry = archive.by_index(idx).unwrap();
            assert_eq!(entry.name(), *expected);
        }
    }

    #[test]
    fn exported_entries_are_png_rasters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.zip");
        let cancel = AtomicBool::new(false);
        export_archive(&plain_slides(1), &path, &cancel, solid_render, |_| {}).unwrap();

        let file = fs_err::File::open(&path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_index(0).unwrap();
        let mut bytes = Vec::new();
        std::io::Read::read_to_end(&mut entry, &mut bytes).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 1920);
        assert_eq!(decoded.height(), 1080);
    }

    #[test]
    fn cancellation_aborts_and_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.zip");
        let cancel = AtomicBool::new(true);
        let result = export_archive(&plain_slides(2), &path, &cancel, solid_render, |_| {});
        assert!(matches!(result, Err(Error::ExportCancelled)));
        assert!(!path.exists());
    }

    #[test]
    fn render_failure_aborts_without_partial_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.zip");
        let cancel = AtomicBool::new(false);
        let mut calls = 0;
        let result = export_archive(
            &plain_slides(3),
            &path,
            &cancel,
            |slide| {
                calls += 1;
                if calls == 2 {
                    Err(Error::Render("encoding error".to_string()))
                } else {
                    solid_render(slide)
                }
            },
            |_| {},
        );
        assert!(matches!(result, Err(Error::Render(_))));
        assert_eq!(calls, 2, "export must stop at the failing slide");
        assert!(!path.exists());
    }
}
