use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::create_titled_block;

/// Draw the lyrics editor: the textarea plus a formatting sidebar.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_editor(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(34)])
        .split(area);

    draw_textarea(f, app, columns[0]);
    draw_sidebar(f, app, columns[1]);
}

#[allow(clippy::cast_possible_truncation)]
fn draw_textarea(f: &mut Frame, app: &mut App, area: Rect) {
    let editor_block = create_titled_block("Lyrics", app.focus == Focus::Lyrics);
    f.render_widget(editor_block.clone(), area);

    let inner_area = editor_block.inner(area);

    // Update the viewport height so scrolling works correctly
    app.editor.viewport_height = inner_area.height as usize;
    app.editor.scroll_to_cursor();

    // Calculate the visible portion of the content
    let start_line = app.editor.scroll_offset;
    let end_line = (start_line + inner_area.height as usize).min(app.editor.lines.len());

    let styled_content: Vec<Line> = app.editor.lines[start_line..end_line]
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), Style::default().fg(Color::White))))
        .collect();

    let paragraph = Paragraph::new(styled_content).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner_area);

    // Show cursor only when the textarea has focus
    if app.focus == Focus::Lyrics {
        let cursor_y = app.editor.cursor_y.saturating_sub(app.editor.scroll_offset) as u16;
        if cursor_y < inner_area.height {
            f.set_cursor(
                inner_area.left() + app.editor.cursor_x.min(u16::MAX as usize) as u16,
                inner_area.top() + cursor_y,
            );
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let block = create_titled_block("Formatting", false);
    f.render_widget(block.clone(), area);
    let inner_area = block.inner(area);

    let precision = app.session.precision;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Precision: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", precision.get()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" ({} lines/slide)", precision.max_lines_per_slide())),
        ]),
        Line::from(precision_gauge(precision.get(), inner_area.width)),
        Line::raw(""),
        Line::from(Span::styled(
            "Emphasis words",
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )),
    ];

    if app.session.emphasis_words.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (none - Ctrl+W to add)",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for word in app.session.emphasis_words.iter() {
            lines.push(Line::from(vec![
                Span::styled("  * ", Style::default().fg(Color::Cyan)),
                Span::raw(word.to_string()),
            ]));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Slides: ", Style::default().fg(Color::Gray)),
        Span::raw(format!("{}", app.session.slide_count())),
    ]));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner_area);
}

/// A simple one-line bar visualizing the precision slider.
#[allow(clippy::cast_possible_truncation)]
fn precision_gauge(value: u8, width: u16) -> Vec<Span<'static>> {
    let bar_width = width.saturating_sub(2).max(10) as usize;
    let filled = (usize::from(value) * bar_width) / 100;
    vec![
        Span::styled("\u{2588}".repeat(filled), Style::default().fg(Color::Yellow)),
        Span::styled(
            "\u{2591}".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        ),
    ]
}
