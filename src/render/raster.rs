//! Per-slide rasterization.
//!
//! Each slide is drawn onto a fixed 1920x1080 RGBA canvas: background image
//! stretched to fill (no aspect preservation) or a flat neutral fill, then
//! the slide body in white, one line at a time, anchored per the style's
//! alignment. Exported rasters carry no emphasis coloring; that is a
//! preview-only effect.

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use fontdue::Font;
use image::{imageops::FilterType, DynamicImage, RgbaImage};
use std::collections::HashMap;
use std::io::Cursor;

use crate::constants::canvas;
use crate::error::Result;
use crate::session::{Slide, StyleConfig};
use crate::types::{HAlign, VAlign};

#[derive(Debug, Clone)]
struct GlyphBitmap {
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

/// Renders slides to RGBA canvases with a per-font glyph cache.
pub struct SlideRenderer {
    font: Font,
    glyph_cache: HashMap<fontdue::layout::GlyphRasterConfig, GlyphBitmap>,
}

impl SlideRenderer {
    /// Create a renderer around a parsed font.
    #[must_use]
    pub fn new(font: Font) -> Self {
        Self {
            font,
            glyph_cache: HashMap::new(),
        }
    }

    /// Render one slide to a 1920x1080 canvas.
    pub fn render(&mut self, slide: &Slide, style: &StyleConfig) -> RgbaImage {
        let mut canvas_img = base_canvas(slide.background.as_ref().map(|bg| &bg.image));

        let font_size = style.font_size;
        let anchor_x = style.halign.anchor_x();
        let anchor_y = style.valign.anchor_y();

        for (idx, line) in slide.text.split('\n').enumerate() {
            let line_y = line_top(anchor_y, style.valign, font_size, idx);
            self.draw_line(&mut canvas_img, line, anchor_x, line_y, font_size, style.halign);
        }

        canvas_img
    }

    /// Draw a single text line anchored at (`anchor_x`, `top`).
    fn draw_line(
        &mut self,
        canvas_img: &mut RgbaImage,
        text: &str,
        anchor_x: u32,
        top: i64,
        font_size: u32,
        halign: HAlign,
    ) {
        if text.trim().is_empty() {
            return;
        }

        #[allow(clippy::cast_precision_loss)]
        let px = font_size as f32;
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, px, 0));

        // Measure the laid-out width so center/right anchors can offset from it.
        let line_width = layout
            .glyphs()
            .iter()
            .map(|g| g.x + g.width as f32)
            .fold(0.0f32, f32::max);
        let start_x = aligned_start_x(anchor_x, halign, line_width);

        for glyph in layout.glyphs().clone() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let bitmap = self.glyph_cache.entry(glyph.key).or_insert_with(|| {
                let (metrics, coverage) = self.font.rasterize_config(glyph.key);
                GlyphBitmap {
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                }
            });
            #[allow(clippy::cast_possible_truncation)]
            blend_glyph(
                canvas_img,
                start_x + f64::from(glyph.x).round() as i64,
                top + f64::from(glyph.y).round() as i64,
                bitmap,
                canvas::TEXT_COLOR,
            );
        }
    }

    /// Encode a rendered canvas to PNG bytes.
    pub fn encode_png(canvas_img: &RgbaImage) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        canvas_img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Build the slide base: background stretched to the full canvas, or the
/// flat neutral fill when none is set.
#[must_use]
pub fn base_canvas(background: Option<&DynamicImage>) -> RgbaImage {
    background.map_or_else(
        || {
            RgbaImage::from_pixel(
                canvas::WIDTH,
                canvas::HEIGHT,
                image::Rgba(canvas::FALLBACK_BACKGROUND),
            )
        },
        |bg| {
            bg.resize_exact(canvas::WIDTH, canvas::HEIGHT, FilterType::Triangle)
                .to_rgba8()
        },
    )
}

/// Top y-coordinate for line `idx`.
///
/// Middle vertical alignment mirrors a middle text baseline: the first line
/// is centered on the anchor rather than hanging below it.
fn line_top(anchor_y: u32, valign: VAlign, font_size: u32, idx: usize) -> i64 {
    let baseline_shift = if valign == VAlign::Center {
        i64::from(font_size) / 2
    } else {
        0
    };
    i64::from(anchor_y) - baseline_shift
        + idx as i64 * i64::from(font_size + canvas::LINE_GAP)
}

/// Starting x for a measured line, per horizontal anchor semantics.
fn aligned_start_x(anchor_x: u32, halign: HAlign, line_width: f32) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let width = f64::from(line_width).round() as i64;
    match halign {
        HAlign::Left => i64::from(anchor_x),
        HAlign::Center => i64::from(anchor_x) - width / 2,
        HAlign::Right => i64::from(anchor_x) - width,
    }
}

/// Alpha-blend a glyph coverage bitmap onto the canvas.
fn blend_glyph(canvas_img: &mut RgbaImage, x: i64, y: i64, glyph: &GlyphBitmap, color: [u8; 4]) {
    for row in 0..glyph.height {
        let dst_y = y + row as i64;
        if dst_y < 0 || dst_y >= i64::from(canvas::HEIGHT) {
            continue;
        }
        for col in 0..glyph.width {
            let dst_x = x + col as i64;
            if dst_x < 0 || dst_x >= i64::from(canvas::WIDTH) {
                continue;
            }
            let coverage = glyph.coverage[row * glyph.width + col];
            if coverage == 0 {
                continue;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let pixel = canvas_img.get_pixel_mut(dst_x as u32, dst_y as u32);
            let alpha = u32::from(coverage);
            for channel in 0..3 {
                let src = u32::from(color[channel]);
                let dst = u32::from(pixel.0[channel]);
                pixel.0[channel] = ((src * alpha + dst * (255 - alpha)) / 255) as u8;
            }
            pixel.0[3] = 255;
        }
    }
}
