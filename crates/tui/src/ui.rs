//! Rendering.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use voyager_core::{ArchiveItem, ItemLinks};

use crate::app::{App, Focus};

const CARD_WIDTH: u16 = 38;
const CARD_HEIGHT: u16 = 8;

const ACCENT: Color = Color::Cyan;
const DIM: Color = Color::DarkGray;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Status / error banner
            Constraint::Min(5),    // Result grid
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    draw_header(frame, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_status(frame, app, chunks[2]);
    draw_grid(frame, app, chunks[3]);
    draw_hints(frame, app, chunks[4]);

    if app.session.selected().is_some() {
        draw_detail(frame, app, frame.area());
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::styled(
            "Voyager",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Search the Internet Archive for movies, music, books, and more.",
            Style::default().fg(DIM),
        ),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(24),
            Constraint::Min(24),
            Constraint::Length(22),
        ])
        .split(area);

    draw_input(
        frame,
        chunks[0],
        "Search",
        app.session.query(),
        app.focus == Focus::Query,
    );
    draw_input(
        frame,
        chunks[1],
        "Creator",
        app.session.creator(),
        app.focus == Focus::Creator,
    );

    let media_style = if app.focus == Focus::MediaType {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    let media = Paragraph::new(format!("< {} >", app.session.media_type().label())).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Media ")
            .border_style(media_style),
    );
    frame.render_widget(media, chunks[2]);

    // Show the terminal cursor at the end of the focused text input.
    let focused_input = match app.focus {
        Focus::Query => Some((chunks[0], app.session.query())),
        Focus::Creator => Some((chunks[1], app.session.creator())),
        _ => None,
    };
    if let Some((rect, text)) = focused_input {
        let width: u16 = text
            .chars()
            .map(|c| c.width().unwrap_or(0) as u16)
            .sum();
        let x = (rect.x + 1 + width).min(rect.x + rect.width.saturating_sub(2));
        frame.set_cursor_position(Position::new(x, rect.y + 1));
    }
}

fn draw_input(frame: &mut Frame, area: Rect, title: &str, text: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    let input = Paragraph::new(text.to_string()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(border_style),
    );
    frame.render_widget(input, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.session.is_loading() {
        Line::styled("Searching...", Style::default().fg(ACCENT))
    } else if let Some(error) = app.session.error() {
        Line::styled(error.to_string(), Style::default().fg(Color::Red))
    } else if app.session.has_completed_search() || !app.session.results().is_empty() {
        Line::styled(
            format!("{} results", app.session.results().len()),
            Style::default().fg(DIM),
        )
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let cols = (area.width / CARD_WIDTH).max(1) as usize;
    let rows = (area.height / CARD_HEIGHT).max(1) as usize;
    app.grid_cols = cols;
    app.grid_rows = rows;

    let results = app.session.results();
    if results.is_empty() {
        if !app.session.is_loading() {
            draw_empty_placeholder(frame, area);
        }
        return;
    }

    let first = app.scroll_row * cols;
    for (offset, item) in results.iter().skip(first).take(cols * rows).enumerate() {
        let index = first + offset;
        let col = (offset % cols) as u16;
        let row = (offset / cols) as u16;
        let card_area = Rect {
            x: area.x + col * CARD_WIDTH,
            y: area.y + row * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width.saturating_sub(col * CARD_WIDTH)),
            height: CARD_HEIGHT.min(area.height.saturating_sub(row * CARD_HEIGHT)),
        };
        if card_area.width < 10 || card_area.height < 4 {
            continue;
        }
        draw_card(
            frame,
            card_area,
            item,
            index == app.cursor && app.focus == Focus::Results,
        );
    }
}

fn draw_card(frame: &mut Frame, area: Rect, item: &ArchiveItem, highlighted: bool) {
    let border_style = if highlighted {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM)
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = vec![
        Line::styled(
            truncate_to_width(item.display_title(), inner_width),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Line::raw(truncate_to_width(
            &format!("Creator: {}", item.display_creator()),
            inner_width,
        )),
        Line::raw(truncate_to_width(
            &format!("Year: {}  Type: {}", item.display_year(), item.display_mediatype()),
            inner_width,
        )),
        Line::styled(
            item.short_description(),
            Style::default().fg(DIM),
        ),
    ];

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(card, area);
}

fn draw_empty_placeholder(frame: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(
            "No results found",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Try adjusting your search terms or filters",
            Style::default().fg(DIM),
        ),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(placeholder, area);
}

fn draw_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.session.selected().is_some() {
        "o: open viewer   d: open item page   z: download   Esc: close"
    } else {
        "Tab: switch field   Enter: search/open   arrows: navigate   Esc: quit"
    };
    frame.render_widget(
        Paragraph::new(Line::styled(hints, Style::default().fg(DIM))),
        area,
    );
}

fn draw_detail(frame: &mut Frame, app: &App, area: Rect) {
    let item = match app.session.selected() {
        Some(item) => item,
        None => return,
    };
    let links = ItemLinks::build(&app.config.archive, &item.identifier);

    let popup = centered_rect(area, 80, 80);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::styled(
            item.display_title().to_string(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(format!("Identifier: {}", item.identifier)),
        Line::raw(format!("Creator:    {}", item.display_creator())),
        Line::raw(format!("Year:       {}", item.display_year())),
        Line::raw(format!("Type:       {}", item.display_mediatype())),
        Line::raw(""),
        Line::raw(item.short_description()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[o] ", Style::default().fg(ACCENT)),
            Span::raw(links.viewer.clone()),
        ]),
        Line::from(vec![
            Span::styled("[d] ", Style::default().fg(ACCENT)),
            Span::raw(links.page.clone()),
        ]),
        Line::from(vec![
            Span::styled("[z] ", Style::default().fg(ACCENT)),
            Span::raw(links.archive_zip.clone()),
        ]),
    ];

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Archive Viewer ")
            .border_style(Style::default().fg(ACCENT)),
    );
    frame.render_widget(detail, popup);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Cut a string to a terminal cell budget, appending an ellipsis when
/// anything was dropped.
fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        used += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("hello", 20), "hello");
    }

    #[test]
    fn test_truncate_long_string_gets_ellipsis() {
        let out = truncate_to_width("a very long title that will not fit", 10);
        assert!(out.ends_with('…'));
        assert!(out.chars().count() <= 10);
    }

    #[test]
    fn test_truncate_handles_wide_chars() {
        // Full-width characters occupy two cells each.
        let out = truncate_to_width("日本語のタイトル", 6);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_centered_rect_fits_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(parent, 80, 80);
        assert!(popup.x >= parent.x && popup.y >= parent.y);
        assert!(popup.right() <= parent.right() && popup.bottom() <= parent.bottom());
    }
}
