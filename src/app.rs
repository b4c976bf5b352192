//! Application state machine.
//!
//! Holds the session document, drives the two formatting engines, and
//! coordinates the async lyrics lookup and slide export tasks. All state
//! transitions happen on the UI task in response to key events or completed
//! async work delivered over the update channel.

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::constants::{alerts, async_tasks, export, PALETTE};
use crate::error::Result;
use crate::input::{GlobalHandler, InputContext, InputHandler, InputResult, SplashHandler};
use crate::lyrics_api::{LyricsClient, SongQuery};
use crate::render::{export_archive, ExportProgress, FontStore, SlideRenderer};
use crate::session::{BackgroundImage, Session};
use crate::types::PaletteColor;

/// Messages sent back from async tasks to the UI loop.
#[derive(Debug)]
pub enum AppUpdate {
    /// A lyrics lookup finished. Stale generations are discarded.
    LyricsFetched {
        /// Generation number the search was started with.
        generation: u64,
        /// Fetched lyrics body or the failure to report.
        result: Result<String>,
    },
    /// A background image finished decoding.
    BackgroundLoaded(Result<BackgroundImage>),
    /// One more slide was written to the export archive.
    ExportProgress(ExportProgress),
    /// The export task finished.
    ExportFinished(Result<PathBuf>),
}

/// Top-level view modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Initial splash screen.
    Splash,
    /// Lyrics editor with formatting options.
    Editor,
    /// Slide preview with style controls and export.
    Slides,
}

/// Which text-entry field currently receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The lyrics textarea.
    #[default]
    Lyrics,
    /// The "Artist - Title" search bar.
    Search,
    /// The emphasis word entry field.
    WordEntry,
    /// The background image path entry field.
    ImagePath,
}

/// A transient, auto-dismissing alert.
#[derive(Debug, Clone)]
pub struct Alert {
    /// Message shown to the user.
    pub message: String,
    /// When the alert was raised; it expires after five seconds.
    pub raised_at: Instant,
}

/// Cursor and viewport state for the lyrics textarea.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Line buffer; always at least one line.
    pub lines: Vec<String>,
    /// Cursor column (character index into the current line).
    pub cursor_x: usize,
    /// Cursor line index.
    pub cursor_y: usize,
    /// First visible line.
    pub scroll_offset: usize,
    /// Height of the visible area, updated by the draw pass.
    pub viewport_height: usize,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_x: 0,
            cursor_y: 0,
            scroll_offset: 0,
            viewport_height: 0,
        }
    }
}

impl EditorState {
    /// Replace the whole buffer and reset the cursor.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(ToString::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.scroll_offset = 0;
    }

    /// Join the buffer back into raw lyric text.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn current_line(&mut self) -> &mut String {
        &mut self.lines[self.cursor_y]
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let x = self.cursor_x;
        let line = self.current_line();
        let byte = char_to_byte(line, x);
        line.insert(byte, c);
        self.cursor_x += 1;
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let x = self.cursor_x;
        let line = self.current_line();
        let byte = char_to_byte(line, x);
        let rest = line.split_off(byte);
        self.lines.insert(self.cursor_y + 1, rest);
        self.cursor_y += 1;
        self.cursor_x = 0;
    }

    /// Delete the character before the cursor, merging lines at column zero.
    pub fn backspace(&mut self) {
        if self.cursor_x > 0 {
            let x = self.cursor_x;
            let line = self.current_line();
            let byte = char_to_byte(line, x - 1);
            line.remove(byte);
            self.cursor_x -= 1;
        } else if self.cursor_y > 0 {
            let removed = self.lines.remove(self.cursor_y);
            self.cursor_y -= 1;
            self.cursor_x = self.lines[self.cursor_y].chars().count();
            self.lines[self.cursor_y].push_str(&removed);
        }
    }

    /// Insert possibly multi-line text at the cursor (clipboard paste).
    pub fn insert_text(&mut self, text: &str) {
        for c in text.replace("\r\n", "\n").chars() {
            if c == '\n' {
                self.insert_newline();
            } else {
                self.insert_char(c);
            }
        }
    }

    /// Move the cursor, clamping to line bounds.
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        if dy < 0 {
            self.cursor_y = self.cursor_y.saturating_sub(dy.unsigned_abs() as usize);
        } else {
            self.cursor_y = (self.cursor_y + dy as usize).min(self.lines.len() - 1);
        }
        let line_len = self.lines[self.cursor_y].chars().count();
        if dx < 0 {
            self.cursor_x = self.cursor_x.saturating_sub(dx.unsigned_abs() as usize);
        } else {
            self.cursor_x += dx.unsigned_abs() as usize;
        }
        self.cursor_x = self.cursor_x.min(line_len);
    }

    /// Keep the cursor inside the visible window.
    pub fn scroll_to_cursor(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        if self.cursor_y < self.scroll_offset {
            self.scroll_offset = self.cursor_y;
        } else if self.cursor_y >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = self.cursor_y + 1 - self.viewport_height;
        }
    }
}

/// Character index to byte offset within a line.
fn char_to_byte(line: &str, chars: usize) -> usize {
    line.char_indices()
        .nth(chars)
        .map_or(line.len(), |(byte, _)| byte)
}

/// The application.
pub struct App {
    /// Current view mode.
    pub mode: AppMode,
    /// Focused text-entry field.
    pub focus: Focus,
    /// The session document driving both engines.
    pub session: Session,
    /// Lyrics textarea state.
    pub editor: EditorState,
    /// Search bar contents.
    pub search_buffer: String,
    /// Emphasis word entry contents.
    pub word_buffer: String,
    /// Background image path entry contents.
    pub image_path_buffer: String,
    /// Index of the slide shown in the preview pane.
    pub current_slide: usize,
    /// Re-roll counter for preview emphasis colors; bumping it re-seeds the
    /// per-slide color draw.
    pub preview_nonce: u64,
    /// Transient alert, auto-dismissed after five seconds.
    pub alert: Option<Alert>,
    /// Whether a lyrics lookup is in flight.
    pub is_searching: bool,
    /// Progress of a running export, if any.
    pub export_progress: Option<ExportProgress>,
    /// Whether help is shown.
    pub show_help: bool,
    /// Application configuration.
    pub config: Config,
    should_quit: bool,
    lyrics_client: LyricsClient,
    search_generation: u64,
    export_cancel: Option<Arc<AtomicBool>>,
    update_tx: mpsc::Sender<AppUpdate>,
    update_rx: mpsc::Receiver<AppUpdate>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create the application, loading config from the environment.
    #[must_use]
    pub fn new() -> Self {
        let config = Config::load().unwrap_or_default();
        let lyrics_client = LyricsClient::new(&config);
        let (update_tx, update_rx) = mpsc::channel(async_tasks::CHANNEL_BUFFER_SIZE);

        Self {
            mode: AppMode::Splash,
            focus: Focus::default(),
            session: Session::new(),
            editor: EditorState::default(),
            search_buffer: String::new(),
            word_buffer: String::new(),
            image_path_buffer: String::new(),
            current_slide: 0,
            preview_nonce: 0,
            alert: None,
            is_searching: false,
            export_progress: None,
            show_help: false,
            config,
            should_quit: false,
            lyrics_client,
            search_generation: 0,
            export_cancel: None,
            update_tx,
            update_rx,
        }
    }

    /// Whether the main loop should exit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Raise a transient alert.
    pub fn raise_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(Alert {
            message: message.into(),
            raised_at: Instant::now(),
        });
    }

    /// Drop the alert once its display window has passed.
    pub fn expire_alert(&mut self) {
        let expired = self
            .alert
            .as_ref()
            .is_some_and(|a| a.raised_at.elapsed() >= Duration::from_millis(alerts::DISMISS_MS));
        if expired {
            self.alert = None;
        }
    }

    // ---- key handling -----------------------------------------------------

    /// Route a key event by mode and focus.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+Q quits from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        let ctx = InputContext {
            mode: self.mode.into(),
            show_help: self.show_help,
            is_searching: self.is_searching,
            text_entry_active: self.focus != Focus::Lyrics,
        };

        if matches!(GlobalHandler.handle(key, &ctx), InputResult::Status(_)) {
            self.show_help = true;
            return;
        }

        if self.mode == AppMode::Splash {
            if let InputResult::ModeChange(mode) = SplashHandler.handle(key, &ctx) {
                self.mode = mode.into();
            }
            return;
        }

        // Text-entry fields capture typing before mode shortcuts
        match self.focus {
            Focus::Search => {
                self.handle_search_input(key);
                return;
            }
            Focus::WordEntry => {
                self.handle_word_input(key);
                return;
            }
            Focus::ImagePath => {
                self.handle_image_path_input(key);
                return;
            }
            Focus::Lyrics => {}
        }

        // Global shortcuts shared by both main modes
        match (key.code, key.modifiers) {
            (KeyCode::Char('f'), KeyModifiers::CONTROL) => {
                self.format_lyrics();
                return;
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.focus = Focus::Search;
                return;
            }
            (KeyCode::Tab, _) => {
                self.mode = match self.mode {
                    AppMode::Editor => AppMode::Slides,
                    _ => AppMode::Editor,
                };
                return;
            }
            _ => {}
        }

        match self.mode {
            AppMode::Editor => self.handle_editor_key(key),
            AppMode::Slides => self.handle_slides_key(key),
            AppMode::Splash => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('w') => self.focus = Focus::WordEntry,
                KeyCode::Char('v') => self.paste_from_clipboard(),
                KeyCode::Left => self.session.precision = self.session.precision.step(-1),
                KeyCode::Right => self.session.precision = self.session.precision.step(1),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char(c) => self.editor.insert_char(c),
            KeyCode::Enter => self.editor.insert_newline(),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Left => self.editor.move_cursor(-1, 0),
            KeyCode::Right => self.editor.move_cursor(1, 0),
            KeyCode::Up => self.editor.move_cursor(0, -1),
            KeyCode::Down => self.editor.move_cursor(0, 1),
            _ => {}
        }
    }

    fn handle_slides_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => {
                self.current_slide = self.current_slide.saturating_sub(1);
                self.preview_nonce = self.preview_nonce.wrapping_add(1);
            }
            KeyCode::Right => {
                if self.current_slide + 1 < self.session.slide_count() {
                    self.current_slide += 1;
                }
                self.preview_nonce = self.preview_nonce.wrapping_add(1);
            }
            KeyCode::Char('h') => self.session.style.halign = self.session.style.halign.next(),
            KeyCode::Char('v') => self.session.style.valign = self.session.style.valign.next(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.session.style.step_font_size(2),
            KeyCode::Char('-') => self.session.style.step_font_size(-2),
            KeyCode::Char('i') => self.focus = Focus::ImagePath,
            KeyCode::Char('e') => self.start_export(),
            KeyCode::Char('x') => self.cancel_export(),
            KeyCode::Char(c @ '0'..='9') => self.toggle_palette_color(c),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.focus = Focus::Lyrics;
                self.search_buffer.clear();
            }
            KeyCode::Enter => self.start_search(),
            KeyCode::Backspace => {
                self.search_buffer.pop();
            }
            KeyCode::Char(c) => self.search_buffer.push(c),
            _ => {}
        }
    }

    fn handle_word_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.focus = Focus::Lyrics;
                self.word_buffer.clear();
            }
            KeyCode::Enter => {
                let word = std::mem::take(&mut self.word_buffer);
                // Entering an existing word removes it again
                if self.session.emphasis_words.contains(word.trim()) {
                    self.session.emphasis_words.remove(word.trim());
                } else {
                    self.session.emphasis_words.add(&word);
                }
            }
            KeyCode::Backspace => {
                self.word_buffer.pop();
            }
            KeyCode::Char(c) => self.word_buffer.push(c),
            _ => {}
        }
    }

    fn handle_image_path_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.focus = Focus::Lyrics;
                self.image_path_buffer.clear();
            }
            KeyCode::Enter => {
                let path = std::mem::take(&mut self.image_path_buffer);
                self.focus = Focus::Lyrics;
                self.load_background(&path);
            }
            KeyCode::Backspace => {
                self.image_path_buffer.pop();
            }
            KeyCode::Char(c) => self.image_path_buffer.push(c),
            _ => {}
        }
    }

    // ---- actions ----------------------------------------------------------

    /// Run both formatting engines over the textarea contents.
    pub fn format_lyrics(&mut self) {
        self.session.raw_lyrics = self.editor.text();
        self.session.format();
        self.current_slide = 0;
        self.preview_nonce = self.preview_nonce.wrapping_add(1);
        self.mode = AppMode::Slides;
    }

    fn paste_from_clipboard(&mut self) {
        match Clipboard::new().and_then(|mut cb| cb.get_text()) {
            Ok(text) => self.editor.insert_text(&text),
            Err(e) => {
                tracing::warn!("Clipboard paste failed: {e}");
                self.raise_alert("Could not read the clipboard.");
            }
        }
    }

    fn toggle_palette_color(&mut self, digit: char) {
        let idx = digit.to_digit(10).map_or(0, |d| d as usize);
        // '0' addresses the tenth swatch
        let idx = if idx == 0 { 9 } else { idx - 1 };
        if let Some(color) = PALETTE.get(idx).and_then(|hex| PaletteColor::from_hex(hex)) {
            self.session.style.toggle_color(color);
            self.preview_nonce = self.preview_nonce.wrapping_add(1);
        }
    }

    /// Kick off a lyrics lookup for the current search bar contents.
    ///
    /// Starting a new search bumps the generation number; a completion
    /// carrying an older generation is ignored, so overlapping searches can
    /// no longer race each other.
    pub fn start_search(&mut self) {
        let query = match SongQuery::parse(&self.search_buffer) {
            Ok(q) => q,
            Err(e) => {
                self.raise_alert(e.to_string());
                return;
            }
        };

        self.search_generation += 1;
        let generation = self.search_generation;
        self.is_searching = true;
        self.focus = Focus::Lyrics;
        self.search_buffer.clear();

        let client = self.lyrics_client.clone();
        let tx = self.update_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch(&query).await;
            let _ = tx.send(AppUpdate::LyricsFetched { generation, result }).await;
        });
    }

    /// Decode a background image off the UI task.
    pub fn load_background(&mut self, path: &str) {
        let path = PathBuf::from(shellexpand::tilde(path.trim()).to_string());
        let tx = self.update_tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = image::open(&path)
                .map(|img| BackgroundImage { path, image: img })
                .map_err(crate::error::Error::from);
            let _ = tx.blocking_send(AppUpdate::BackgroundLoaded(result));
        });
    }

    /// Start exporting all slides to `slides.zip` in the output directory.
    pub fn start_export(&mut self) {
        if self.export_progress.is_some() {
            self.raise_alert("An export is already running.");
            return;
        }
        if self.session.slides.is_empty() {
            self.raise_alert("Nothing to export - format some lyrics first.");
            return;
        }

        let slides = self.session.slides.clone();
        let style = self.session.style.clone();
        let output_path = self.config.output_dir.join(export::ARCHIVE_NAME);
        let fonts = FontStore::new(&self.config);
        let family = style.font_family.clone();

        let cancel = Arc::new(AtomicBool::new(false));
        self.export_cancel = Some(Arc::clone(&cancel));
        self.export_progress = Some(ExportProgress {
            completed: 0,
            total: slides.len(),
        });

        let tx = self.update_tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = fonts.load(&family).and_then(|font| {
                let mut renderer = SlideRenderer::new(font);
                export_archive(
                    &slides,
                    &output_path,
                    &cancel,
                    |slide| Ok(renderer.render(slide, &style)),
                    |progress| {
                        let _ = tx.blocking_send(AppUpdate::ExportProgress(progress));
                    },
                )
            });
            let _ = tx.blocking_send(AppUpdate::ExportFinished(result));
        });
    }

    /// Request cancellation of a running export.
    pub fn cancel_export(&mut self) {
        if let Some(cancel) = &self.export_cancel {
            cancel.store(true, Ordering::Relaxed);
        }
    }

    // ---- async update handling --------------------------------------------

    /// Drain completed async work and expire stale alerts.
    pub fn handle_updates(&mut self) {
        self.expire_alert();
        while let Ok(update) = self.update_rx.try_recv() {
            self.apply_update(update);
        }
    }

    /// Apply one completed async update to the state.
    pub fn apply_update(&mut self, update: AppUpdate) {
        match update {
            AppUpdate::LyricsFetched { generation, result } => {
                if generation != self.search_generation {
                    tracing::debug!("Ignoring stale lyrics lookup (generation {generation})");
                    return;
                }
                self.is_searching = false;
                match result {
                    Ok(lyrics) => {
                        self.editor.set_text(&lyrics);
                        self.session.raw_lyrics = lyrics;
                        self.mode = AppMode::Editor;
                    }
                    Err(e) => self.raise_alert(e.to_string()),
                }
            }
            AppUpdate::BackgroundLoaded(result) => match result {
                Ok(background) => {
                    self.session.set_background(Arc::new(background));
                }
                Err(e) => {
                    tracing::warn!("Background image decode failed: {e}");
                    self.raise_alert("Could not load the background image.");
                }
            },
            AppUpdate::ExportProgress(progress) => {
                self.export_progress = Some(progress);
            }
            AppUpdate::ExportFinished(result) => {
                self.export_progress = None;
                self.export_cancel = None;
                match result {
                    Ok(path) => self.raise_alert(format!("Exported: {}", path.display())),
                    Err(e) => self.raise_alert(e.to_string()),
                }
            }
        }
    }
}
