//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::text::Geometry;
use crate::theme::Theme;

/// Header block: one line of content plus borders
pub const HEADER_HEIGHT: u16 = 3;

/// Footer block: page info, translation, romanization, status, help and
/// quit hint, plus borders
pub const FOOTER_HEIGHT: u16 = 8;

/// Rows around the token grid that the reader uses for everything else
pub const READER_CHROME_ROWS: u16 = HEADER_HEIGHT + FOOTER_HEIGHT + 2;

/// Terminal size assumed when it cannot be queried
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Current terminal size as (columns, rows)
pub fn terminal_size() -> (u16, u16) {
    crossterm::terminal::size().unwrap_or_else(|e| {
        tracing::debug!("Could not query terminal size: {}", e);
        FALLBACK_SIZE
    })
}

/// Reader grid dimensions for a terminal of `size`
pub fn reader_geometry(size: (u16, u16), cell_width: u16) -> Geometry {
    let (width, height) = size;
    let words_per_line = width.saturating_sub(2) / cell_width.max(1);
    let lines_per_page = height.saturating_sub(READER_CHROME_ROWS);
    Geometry::new(words_per_line as usize, lines_per_page as usize)
}

/// Pad or cut `token` to exactly `width` terminal columns
pub fn fit_cell(token: &str, width: usize) -> String {
    if token.width() < width {
        let padding = width - token.width();
        return format!("{}{}", token, " ".repeat(padding));
    }

    // Leave one column so neighbouring cells stay apart
    let limit = width.saturating_sub(1);
    let mut cell = String::new();
    let mut used = 0;
    for c in token.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        cell.push(c);
        used += w;
    }
    cell.push_str(&" ".repeat(width - used));
    cell
}

/// First row to show so that `selected` stays inside a list of `height` rows
pub fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 { selected } else { selected.saturating_sub(height - 1) }
}

/// Bordered block in the theme's colors
pub fn panel(title: &str, theme: &Theme, focused: bool) -> Block<'static> {
    let border_color = if focused { theme.border_focused } else { theme.border };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    if title.is_empty() { block } else { block.title(format!(" {} ", title)) }
}

/// Draw a muted message inside `area`
pub fn draw_message(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let style = Style::default().fg(theme.fg_muted).bg(theme.bg_primary);
    frame.render_widget(Paragraph::new(message).style(style), area);
}
