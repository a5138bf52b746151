//! Language and document picker screens

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout;
use crate::app::state::AppState;
use crate::theme::Theme;

/// Draw the language picker
pub fn draw_languages(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let strings = state.ui_language.strings();
    let [list_area, status_area] = split(frame.area());

    let rows: Vec<&str> = state.catalog.languages.iter().map(String::as_str).collect();
    draw_list(
        frame,
        list_area,
        strings.languages_title,
        &rows,
        state.language_picker.selected_index,
        theme,
    );

    let mut lines = Vec::new();
    push_status(&mut lines, state, theme);
    lines.push(Line::from(Span::styled(strings.quit_hint, Style::default().fg(theme.fg_muted))));
    draw_status(frame, status_area, lines, theme);
}

/// Draw the document picker for the chosen language
pub fn draw_documents(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let strings = state.ui_language.strings();
    let [list_area, status_area] = split(frame.area());

    let rows: Vec<&str> = state.catalog.documents.iter().map(|d| d.name.as_str()).collect();
    draw_list(
        frame,
        list_area,
        strings.texts_title,
        &rows,
        state.document_picker.selected_index,
        theme,
    );

    let language = state.current_language.as_ref().map_or("", |l| l.id.as_str());
    let muted = Style::default().fg(theme.fg_muted);
    let mut lines = vec![Line::from(vec![
        Span::styled(strings.current_language, muted),
        Span::styled(language, Style::default().fg(theme.accent_secondary)),
    ])];
    push_status(&mut lines, state, theme);
    let hints = format!("{}{}", strings.open_hint, strings.export_hint);
    lines.push(Line::from(Span::styled(hints, muted)));
    lines.push(Line::from(Span::styled(strings.quit_hint, muted)));
    draw_status(frame, status_area, lines, theme);
}

fn split(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(6)])
        .split(area);
    [chunks[0], chunks[1]]
}

fn draw_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[&str],
    selected: usize,
    theme: &Theme,
) {
    let block = layout::panel(title, theme, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = inner.height as usize;
    let start = layout::scroll_offset(selected, visible_height);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(start)
        .take(visible_height)
        .map(|(i, row)| {
            let style = if i == selected {
                Style::default()
                    .fg(theme.bg_primary)
                    .bg(theme.accent_primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_primary)
            };
            Line::from(Span::styled(format!(" {} ", row), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Error or notice line, errors first
fn push_status<'a>(lines: &mut Vec<Line<'a>>, state: &AppState, theme: &Theme) {
    let strings = state.ui_language.strings();
    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            format!("{}{}", strings.error, error),
            Style::default().fg(theme.error),
        )));
    } else if let Some(notice) = &state.notice {
        lines.push(Line::from(Span::styled(notice.clone(), Style::default().fg(theme.info))));
    }
}

fn draw_status(frame: &mut Frame, area: Rect, lines: Vec<Line>, theme: &Theme) {
    let block = layout::panel("", theme, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}
