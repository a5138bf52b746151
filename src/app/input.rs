//! Key bindings per screen

use crossterm::event::{KeyCode, KeyModifiers};

use super::state::Screen;
use crate::export::ExportKind;
use crate::knowledge::KnowledgeLevel;
use crate::services::TranslationProvider;

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    NextPage,
    PreviousPage,
    PageStart,

    // Selection
    Select,
    Back,

    // Study
    SetLevel(KnowledgeLevel),
    Speak,
    Translate(TranslationProvider),
    Romanize,
    StrokeOrder,
    WebTranslate,
    Export(ExportKind),

    Quit,
}

/// Map a key press to an action valid on `screen`
pub fn key_to_action(screen: Screen, key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('k') | KeyCode::Up => return Some(Action::Up),
        KeyCode::Char('j') | KeyCode::Down => return Some(Action::Down),
        _ => {}
    }

    match screen {
        Screen::LanguagePicker => picker_action(key),
        Screen::DocumentPicker => picker_action(key).or_else(|| match key {
            KeyCode::Char('b') => Some(Action::Back),
            KeyCode::Char(c) => export_action(c),
            _ => None,
        }),
        Screen::Reader => reader_action(key),
    }
}

fn picker_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        _ => None,
    }
}

fn export_action(c: char) -> Option<Action> {
    match c {
        'f' => Some(Action::Export(ExportKind::Plain)),
        'z' => Some(Action::Export(ExportKind::WithReadings)),
        _ => None,
    }
}

fn reader_action(key: KeyCode) -> Option<Action> {
    let KeyCode::Char(c) = key else {
        return match key {
            KeyCode::Left => Some(Action::Left),
            KeyCode::Right => Some(Action::Right),
            KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::PageUp => Some(Action::PreviousPage),
            KeyCode::Home => Some(Action::PageStart),
            _ => None,
        };
    };

    if let Some(level) = KnowledgeLevel::from_digit(c) {
        return Some(Action::SetLevel(level));
    }

    match c {
        'h' => Some(Action::Left),
        'l' => Some(Action::Right),
        'd' => Some(Action::NextPage),
        'a' => Some(Action::PreviousPage),
        'm' => Some(Action::PageStart),
        '4' => Some(Action::Speak),
        '5' => Some(Action::Translate(TranslationProvider::Google)),
        '9' => Some(Action::Translate(TranslationProvider::MyMemory)),
        '6' => Some(Action::Romanize),
        '7' => Some(Action::StrokeOrder),
        '8' => Some(Action::WebTranslate),
        'b' => Some(Action::Back),
        other => export_action(other),
    }
}
