//! UI rendering components

pub mod layout;
pub mod picker;
pub mod reader;

use ratatui::Frame;

use crate::app::state::{AppState, Screen};
use crate::config::Config;
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, config: &Config, theme: &Theme) {
    match state.screen {
        Screen::LanguagePicker => picker::draw_languages(frame, state, theme),
        Screen::DocumentPicker => picker::draw_documents(frame, state, theme),
        Screen::Reader => reader::draw(frame, state, theme, config.cell_width),
    }
}
