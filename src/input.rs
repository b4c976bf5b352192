//! Input handling abstractions.
//!
//! This module provides traits and types for handling keyboard input
//! in a modular way, allowing mode-specific handlers to be tested independently.

use crossterm::event::KeyEvent;

/// Result of processing an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// The input was ignored (not applicable to this handler).
    Ignored,
    /// The mode should change.
    ModeChange(AppMode),
    /// A status message should be shown.
    Status(String),
}

/// Application modes (mirrors `app::AppMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Initial splash screen.
    Splash,
    /// Lyrics editor with formatting options.
    Editor,
    /// Slide preview with style controls and export.
    Slides,
}

impl From<crate::app::AppMode> for AppMode {
    fn from(mode: crate::app::AppMode) -> Self {
        match mode {
            crate::app::AppMode::Splash => Self::Splash,
            crate::app::AppMode::Editor => Self::Editor,
            crate::app::AppMode::Slides => Self::Slides,
        }
    }
}

impl From<AppMode> for crate::app::AppMode {
    fn from(mode: AppMode) -> Self {
        match mode {
            AppMode::Splash => Self::Splash,
            AppMode::Editor => Self::Editor,
            AppMode::Slides => Self::Slides,
        }
    }
}

/// Context passed to input handlers.
///
/// This provides handlers with the information they need to process
/// input without directly accessing the full App state.
pub struct InputContext {
    /// Current application mode.
    pub mode: AppMode,
    /// Whether help is currently shown.
    pub show_help: bool,
    /// Whether a search is in flight.
    pub is_searching: bool,
    /// Whether any text-entry field (search, word, image path) has focus.
    pub text_entry_active: bool,
}

/// Trait for handling keyboard input.
///
/// Implementations of this trait handle input for specific modes
/// or input contexts.
pub trait InputHandler {
    /// Handle a key event.
    ///
    /// # Arguments
    /// * `key` - The key event to handle
    /// * `ctx` - Context about the current application state
    ///
    /// # Returns
    /// The result of handling the input.
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult;
}

/// Handler for global shortcuts (help, quit).
#[derive(Debug, Default)]
pub struct GlobalHandler;

impl InputHandler for GlobalHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        use crossterm::event::KeyCode;

        // F1 shows help everywhere; ? only outside text-entry contexts
        if key.code == KeyCode::F(1) {
            return InputResult::Status("Help".to_string());
        }

        if key.code == KeyCode::Char('?') && ctx.mode == AppMode::Slides && !ctx.text_entry_active {
            return InputResult::Status("Help".to_string());
        }

        InputResult::Ignored
    }
}

/// Handler for the splash screen.
#[derive(Debug, Default)]
pub struct SplashHandler;

impl InputHandler for SplashHandler {
    fn handle(&mut self, _key: KeyEvent, _ctx: &InputContext) -> InputResult {
        // Any key dismisses the splash screen
        InputResult::ModeChange(AppMode::Editor)
    }
}
