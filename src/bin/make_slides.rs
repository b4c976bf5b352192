//! Headless slide generator for debugging the render pipeline.
//!
//! Usage:
//!   `cargo run --bin make_slides -- <lyrics.txt> [precision] [output.zip]`
//!   `cargo run --bin make_slides -- --json <lyrics.txt> [precision]`
//!
//! Formats the lyrics file at the given precision and writes the full
//! archive without starting the TUI. With `--json` it prints the formatted
//! slides as JSON instead of rendering, for inspecting the formatting
//! engines in isolation.

// Development/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use anyhow::{bail, Context};
use probridge::config::Config;
use probridge::render::{export_archive, FontStore, SlideRenderer};
use probridge::session::Session;
use probridge::types::Precision;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

#[derive(Serialize)]
struct FormatDump {
    precision: u8,
    slide_count: usize,
    slides: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = env::args().collect();
    let json = args.iter().any(|a| a == "--json");
    args.retain(|a| a != "--json");

    if args.len() < 2 {
        bail!("Usage: {} <lyrics.txt> [precision] [output.zip]", args[0]);
    }

    let lyrics = fs_err::read_to_string(&args[1])
        .with_context(|| format!("Failed to read {}", args[1]))?;
    let precision = args
        .get(2)
        .map(|p| p.parse::<u8>().context("precision must be 1-100"))
        .transpose()?
        .map_or_else(Precision::default, Precision::new);
    let output = args
        .get(3)
        .map_or_else(|| PathBuf::from("slides.zip"), PathBuf::from);

    let mut session = Session::new();
    session.raw_lyrics = lyrics;
    session.precision = precision;
    session.format();

    if session.slides.is_empty() {
        bail!("No slides produced - is the lyrics file empty?");
    }

    if json {
        let dump = FormatDump {
            precision: precision.get(),
            slide_count: session.slide_count(),
            slides: session.slides.iter().map(|s| s.text.clone()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    println!(
        "Formatted {} slide(s) at precision {precision}",
        session.slide_count()
    );

    let config = Config::load().unwrap_or_default();
    let font = FontStore::new(&config)
        .load(&session.style.font_family)
        .context("Failed to load a font")?;
    let mut renderer = SlideRenderer::new(font);

    let cancel = AtomicBool::new(false);
    let style = session.style.clone();
    let path = export_archive(
        &session.slides,
        &output,
        &cancel,
        |slide| Ok(renderer.render(slide, &style)),
        |progress| println!("  wrote slide {}/{}", progress.completed, progress.total),
    )?;

    println!("Archive written to {}", path.display());
    Ok(())
}
