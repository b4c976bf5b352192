//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the application's
//! terminal-based user interface using ratatui.

mod editor;
mod slides;

pub use editor::draw_editor;
pub use slides::draw_slides;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppMode, Focus};

/// Render the full application UI to the terminal frame.
#[allow(clippy::cast_possible_truncation)]
pub fn draw(f: &mut Frame, app: &mut App) {
    // Create the base layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    // Draw the main content based on current mode
    match app.mode {
        AppMode::Splash => draw_splash(f, app, chunks[0]),
        AppMode::Editor => draw_editor(f, app, chunks[0]),
        AppMode::Slides => draw_slides(f, app, chunks[0]),
    }

    // Draw searching indicator if a lookup is in flight
    if app.is_searching {
        draw_searching_indicator(f);
    }

    // Draw transient alert if present (auto-dismisses)
    if let Some(alert) = &app.alert {
        draw_alert(f, &alert.message);
    }

    // Draw help modal if shown
    if app.show_help {
        draw_help_modal(f, app);
    }

    // Draw command/status bar at the bottom (except in splash screen)
    if app.mode == AppMode::Splash {
        // Draw a simple press any key message
        let msg = "Press any key to continue...";

        // Make sure the area is large enough for the message
        if chunks[1].width >= msg.len() as u16 && chunks[1].height >= 3 {
            let width = msg.len() as u16;
            let x = (chunks[1].width.saturating_sub(width)) / 2;
            let y = chunks[1].top() + 1;

            let text_area = Rect {
                x: chunks[1].left() + x,
                y,
                width,
                height: 1,
            };

            let style = Style::default().fg(Color::Yellow);
            f.render_widget(Paragraph::new(msg).style(style), text_area);
        }
    } else {
        draw_command_bar(f, app, chunks[1]);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.focus {
        Focus::Search => "Search Lyrics",
        Focus::WordEntry => "Emphasis Word",
        Focus::ImagePath => "Background Image",
        Focus::Lyrics => "Commands/Status",
    };

    let border_color = if app.focus == Focus::Lyrics {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));

    f.render_widget(block, area);

    // Calculate the inner area to render text with more padding
    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1) // Add a margin of 1 to account for the border
        .split(area)[0];

    match app.focus {
        Focus::Search => {
            let search = Paragraph::new(format!(" /{}", app.search_buffer))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(search, inner_area);
            f.set_cursor(
                inner_area.left() + app.search_buffer.len() as u16 + 2,
                inner_area.top(),
            );
        }
        Focus::WordEntry => {
            let entry = Paragraph::new(format!(" +{}", app.word_buffer))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(entry, inner_area);
            f.set_cursor(
                inner_area.left() + app.word_buffer.len() as u16 + 2,
                inner_area.top(),
            );
        }
        Focus::ImagePath => {
            let entry = Paragraph::new(format!(" ~{}", app.image_path_buffer))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(entry, inner_area);
            f.set_cursor(
                inner_area.left() + app.image_path_buffer.len() as u16 + 2,
                inner_area.top(),
            );
        }
        Focus::Lyrics => {
            // Show context-sensitive help/status
            let help_text = match app.mode {
                AppMode::Splash => vec![], // No help text for splash screen
                AppMode::Editor => {
                    let status = format!(
                        "Ln {}, Col {} | Precision: {}",
                        app.editor.cursor_y + 1,
                        app.editor.cursor_x + 1,
                        app.session.precision.get(),
                    );

                    let mut text = create_help_text(&[
                        ("^F", "Format"),
                        ("^S", "Search"),
                        ("^W", "Word"),
                        ("Tab", "Slides"),
                        ("F1", "Help"),
                    ]);
                    text.push(Span::styled(
                        format!(" | {status}"),
                        Style::default().fg(Color::Gray),
                    ));
                    text
                }
                AppMode::Slides => create_help_text(&[
                    ("Left/Right", "Slide"),
                    ("h/v", "Align"),
                    ("+/-", "Size"),
                    ("i", "Image"),
                    ("e", "Export"),
                    ("?", "Help"),
                ]),
            };

            let status_bar =
                Paragraph::new(Line::from(help_text)).style(Style::default().fg(Color::Gray));

            f.render_widget(status_bar, inner_area);
        }
    }
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        // Add the key with bold styling
        text.push(Span::styled(
            *key,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

        // Add the description
        text.push(Span::raw(format!(": {description}")));

        // Add separator unless it's the last item
        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let title_style = if is_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

#[allow(clippy::cast_possible_truncation)]
fn draw_splash(f: &mut Frame, _app: &App, area: Rect) {
    // Define ASCII art logo for the app
    let logo = vec![
        r"  ____            ____       _     _            ",
        r" |  _ \ _ __ ___ | __ ) _ __(_) __| | __ _  ___ ",
        r" | |_) | '__/ _ \|  _ \| '__| |/ _` |/ _` |/ _ \",
        r" |  __/| | | (_) | |_) | |  | | (_| | (_| |  __/",
        r" |_|   |_|  \___/|____/|_|  |_|\__,_|\__, |\___|",
        r"                                     |___/      ",
        r"                                                ",
        r"          Lyrics to Slides, Made Easy           ",
        r"                                                ",
    ];

    // Use block to create a nice border around the splash
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightBlue))
        .title(Span::styled(
            "ProBridge",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    f.render_widget(block, area);

    // Calculate center position (accounting for border)
    let logo_height = logo.len() as u16;
    let logo_width = logo[0].len() as u16;

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1) // Add a margin to account for the border
        .split(area)[0];

    let vertical_pad = (inner_area.height.saturating_sub(logo_height)) / 2;
    let horizontal_pad = (inner_area.width.saturating_sub(logo_width)) / 2;

    // Render each line of the logo
    for (i, line) in logo.iter().enumerate() {
        let y = inner_area.top() + vertical_pad + i as u16;
        if y >= inner_area.bottom() {
            break;
        }

        let text_area = Rect {
            x: inner_area.left() + horizontal_pad,
            y,
            width: line.len() as u16,
            height: 1,
        };

        let style = if i < 6 {
            // Logo itself is light blue
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
        } else {
            // Tagline is yellow
            Style::default().fg(Color::Yellow)
        };

        f.render_widget(Paragraph::new(*line).style(style), text_area);
    }

    // Add version info at the bottom
    let version_text = concat!("v", env!("CARGO_PKG_VERSION"));

    // Make sure the area is large enough to display the version
    if area.width > (version_text.len() + 2) as u16 && area.height >= 2 {
        let version_area = Rect {
            x: area.right() - version_text.len() as u16 - 2,
            y: area.bottom() - 2,
            width: version_text.len() as u16,
            height: 1,
        };

        f.render_widget(
            Paragraph::new(version_text).style(Style::default().fg(Color::Gray)),
            version_area,
        );
    }
}

// Draw a searching indicator overlay
fn draw_searching_indicator(f: &mut Frame) {
    let size = f.size();

    // Create a smaller centered box for the indicator
    let width = 22;
    let height = 3;

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    // Create a block with a border
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new("Searching...")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area); // Clear the area first
    f.render_widget(block, area);

    // Adjust area for inner text
    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1) // Add a margin for the border
        .split(area)[0];

    f.render_widget(text, inner_area);
}

// Draw a transient alert overlay; it clears itself after five seconds
fn draw_alert(f: &mut Frame, message: &str) {
    use unicode_width::UnicodeWidthStr;
    let size = f.size();

    // Calculate box width (max 80% of screen, min 40)
    let max_width = (size.width as usize * 80) / 100;
    #[allow(clippy::cast_possible_truncation)]
    let width = message.width().saturating_add(6).min(max_width).max(40) as u16;

    // Calculate how many lines the message will need when wrapped
    let inner_width = width.saturating_sub(4) as usize; // account for borders + margin
    let msg_lines = message.width().div_ceil(inner_width.max(1));
    #[allow(clippy::cast_possible_truncation)]
    let height = (msg_lines as u16 + 2).min(size.height.saturating_sub(4));

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: size.height.saturating_sub(height + 4),
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    f.render_widget(text, inner_area);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame, app: &App) {
    let size = f.size();

    // Calculate modal dimensions
    let width = 60.min(size.width.saturating_sub(4));
    let height = 24.min(size.height.saturating_sub(4));

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    // Create the modal block
    let block = Block::default()
        .title(Span::styled(
            " Help - Keybindings ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    // Inner area for content
    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    // Build help content based on current mode
    let help_lines = build_help_content(app);

    let help_text: Vec<Line> = help_lines
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(vec![Span::styled(
                    *key,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )])
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{key:>12}"),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let paragraph = Paragraph::new(help_text).wrap(Wrap { trim: true });

    f.render_widget(paragraph, inner_area);
}

/// Keybinding rows for the help modal: (key, description, `is_header`).
fn build_help_content(app: &App) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("Global", "", true),
        ("Ctrl+Q", "Quit", false),
        ("Ctrl+F", "Format lyrics and build slides", false),
        ("Ctrl+S", "Search lyrics (Artist - Title)", false),
        ("Tab", "Toggle editor / slide preview", false),
        ("F1", "Show this help", false),
    ];

    match app.mode {
        AppMode::Editor => {
            lines.push(("Editor", "", true));
            lines.push(("Ctrl+W", "Add/remove an emphasis word", false));
            lines.push(("Ctrl+V", "Paste from clipboard", false));
            lines.push(("Ctrl+Left", "Decrease slide precision", false));
            lines.push(("Ctrl+Right", "Increase slide precision", false));
        }
        AppMode::Slides => {
            lines.push(("Slides", "", true));
            lines.push(("Left/Right", "Previous / next slide", false));
            lines.push(("h", "Cycle horizontal alignment", false));
            lines.push(("v", "Cycle vertical alignment", false));
            lines.push(("+/-", "Adjust font size", false));
            lines.push(("1-9, 0", "Toggle palette colors", false));
            lines.push(("i", "Set background image path", false));
            lines.push(("e", "Export slides.zip", false));
            lines.push(("x", "Cancel running export", false));
            lines.push(("q", "Quit", false));
        }
        AppMode::Splash => {}
    }

    lines
}
