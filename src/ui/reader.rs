//! Reader screen: header, token grid and footer

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::layout::{self, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::app::state::AppState;
use crate::locale::Strings;
use crate::services::ServiceKind;
use crate::text::{Geometry, Text};
use crate::theme::Theme;

/// Draw the reader for the open text
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme, cell_width: u16) {
    let area = frame.area();
    let Some(text) = &state.text else {
        layout::draw_message(frame, area, "", theme);
        return;
    };
    let strings = state.ui_language.strings();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    draw_header(frame, chunks[0], state, text, strings, theme);
    draw_grid(frame, chunks[1], text, state.geometry, cell_width, theme);
    draw_footer(frame, chunks[2], state, text, strings, theme);
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    text: &Text,
    strings: &Strings,
    theme: &Theme,
) {
    let block = layout::panel(&text.language.id, theme, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let muted = Style::default().fg(theme.fg_muted);
    let (width, height) = state.terminal_size;
    let line = Line::from(vec![
        Span::styled(strings.opened_file, muted),
        Span::styled(text.path.display().to_string(), Style::default().fg(theme.fg_secondary)),
        Span::styled(strings.cursor, muted),
        Span::styled(text.cursor().to_string(), Style::default().fg(theme.accent_primary)),
        Span::styled(format!("  {} {} {}", strings.terminal_size, width, height), muted),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn draw_grid(
    frame: &mut Frame,
    area: Rect,
    text: &Text,
    geometry: Geometry,
    cell_width: u16,
    theme: &Theme,
) {
    let block = layout::panel("", theme, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = grid_lines(text, geometry, cell_width as usize, theme);
    frame.render_widget(Paragraph::new(lines), inner);
}

/// One line per grid row of the current page, each token styled by its level
fn grid_lines(text: &Text, geometry: Geometry, cell_width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let Some(range) = text.current_page_range() else {
        return Vec::new();
    };

    let indices: Vec<usize> = range.collect();
    indices
        .chunks(geometry.words_per_line)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&i| {
                    let style = if i == text.cursor() {
                        theme.cursor_style()
                    } else {
                        theme.level_style(text.level_at(i))
                    };
                    Span::styled(layout::fit_cell(&text.tokens()[i], cell_width), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn draw_footer(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    text: &Text,
    strings: &Strings,
    theme: &Theme,
) {
    let block = layout::panel("", theme, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let muted = Style::default().fg(theme.fg_muted);
    let value = Style::default().fg(theme.fg_secondary);

    let translation = if state.is_pending(ServiceKind::Translation) {
        Span::styled("…", muted)
    } else {
        Span::styled(text.translation.clone(), value.add_modifier(Modifier::BOLD))
    };

    let status = match (&state.error, &state.notice) {
        (Some(error), _) => {
            Span::styled(format!("{}{}", strings.error, error), Style::default().fg(theme.error))
        }
        (None, Some(notice)) => Span::styled(notice.clone(), Style::default().fg(theme.info)),
        (None, None) => Span::styled(strings.error, muted),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", strings.page), muted),
            Span::styled(text.current_page().to_string(), value),
            Span::styled(format!("  {} ", strings.pages), muted),
            Span::styled(text.page_count().to_string(), value),
        ]),
        Line::from(vec![Span::styled(format!("{} ", strings.translation), muted), translation]),
        Line::from(vec![
            Span::styled(format!("{} ", strings.romanization), muted),
            Span::styled(text.romanization.clone(), value),
        ]),
        Line::from(status),
        Line::from(Span::styled(strings.reader_help, muted)),
        Line::from(Span::styled(strings.quit_hint, muted)),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{KnowledgeLevel, KnowledgeStore};
    use crate::language::Language;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn text(dir: &TempDir, tokens: &[&str]) -> Text {
        let language = Language::from_id("spanish");
        let knowledge = KnowledgeStore::load(dir.path(), &language.id);
        Text::from_parts(
            PathBuf::from("doc.txt"),
            language,
            tokens.iter().map(|t| t.to_string()).collect(),
            knowledge,
        )
    }

    #[test]
    fn grid_rows_follow_words_per_line() {
        let dir = TempDir::new().unwrap();
        let mut text = text(&dir, &["uno", "dos", "tres", "cuatro", "cinco"]);
        let geometry = Geometry::new(2, 2);
        text.repaginate(geometry);

        let lines = grid_lines(&text, geometry, 8, &Theme::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].content, "uno     ");
    }

    #[test]
    fn cursor_and_levels_are_styled() {
        let dir = TempDir::new().unwrap();
        let mut text = text(&dir, &["uno", "dos", "tres"]);
        let geometry = Geometry::new(3, 1);
        text.repaginate(geometry);
        text.move_right();
        text.set_current_level(KnowledgeLevel::Known).unwrap();
        text.move_left();

        let theme = Theme::default();
        let lines = grid_lines(&text, geometry, 6, &theme);
        let spans = &lines[0].spans;
        assert_eq!(spans[0].style, theme.cursor_style());
        assert_eq!(spans[1].style, theme.level_style(Some(KnowledgeLevel::Known)));
        assert_eq!(spans[2].style, theme.level_style(None));
    }

    #[test]
    fn empty_text_has_no_grid() {
        let dir = TempDir::new().unwrap();
        let mut text = text(&dir, &[]);
        let geometry = Geometry::new(3, 3);
        text.repaginate(geometry);
        assert!(grid_lines(&text, geometry, 6, &Theme::default()).is_empty());
    }
}
