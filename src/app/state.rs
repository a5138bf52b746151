//! Application state and the screen state machine

use std::collections::HashMap;
use std::path::PathBuf;

use super::input::Action;
use crate::export::{self, ExportKind};
use crate::knowledge::{KnowledgeStore, LevelMap};
use crate::language::Language;
use crate::library::Catalog;
use crate::locale::UiLanguage;
use crate::romanize::{self, HANZI, RomanizationTable};
use crate::services::{ServiceEvent, ServiceKind, ServiceRequest, browser};
use crate::text::{Geometry, Text};

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    LanguagePicker,
    DocumentPicker,
    Reader,
}

/// Selection cursor for a picker list
#[derive(Debug, Clone, Copy, Default)]
pub struct PickerState {
    /// Currently selected row
    pub selected_index: usize,
}

impl PickerState {
    pub fn up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn down(&mut self, len: usize) {
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }
}

/// What the runtime has to do after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Quit,
    Dispatch { id: u64, request: ServiceRequest },
    CancelAll,
}

/// Full application state
#[derive(Debug)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Languages and documents found at startup
    pub catalog: Catalog,

    /// Language picker cursor
    pub language_picker: PickerState,

    /// Document picker cursor
    pub document_picker: PickerState,

    /// Language chosen on the language picker
    pub current_language: Option<Language>,

    /// The open document, only while reading
    pub text: Option<Text>,

    /// Last error to show; each new error replaces the previous one
    pub error: Option<String>,

    /// Last informational message (e.g. export written)
    pub notice: Option<String>,

    /// Interface language
    pub ui_language: UiLanguage,

    /// Where per-language data lives
    pub languages_root: PathBuf,

    /// Reader grid dimensions as of the last refresh
    pub geometry: Geometry,

    /// Terminal size as of the last refresh
    pub terminal_size: (u16, u16),

    /// Bundled romanization table
    romanization: &'static RomanizationTable,

    /// Latest request id per kind; results for older ids are dropped
    pending: HashMap<ServiceKind, u64>,

    next_request_id: u64,
}

impl AppState {
    pub fn new(catalog: Catalog, ui_language: UiLanguage, languages_root: PathBuf) -> Self {
        Self {
            screen: Screen::default(),
            catalog,
            language_picker: PickerState::default(),
            document_picker: PickerState::default(),
            current_language: None,
            text: None,
            error: None,
            notice: None,
            ui_language,
            languages_root,
            geometry: Geometry::new(1, 1),
            terminal_size: (0, 0),
            romanization: &HANZI,
            pending: HashMap::new(),
            next_request_id: 0,
        }
    }

    /// Apply the current terminal geometry. Runs before every event.
    pub fn refresh_geometry(&mut self, geometry: Geometry, terminal_size: (u16, u16)) {
        self.geometry = geometry;
        self.terminal_size = terminal_size;
        if let Some(text) = self.text.as_mut() {
            text.repaginate(geometry);
        }
    }

    /// Apply an action to the current screen
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        if action == Action::Quit {
            return Some(Effect::Quit);
        }

        match self.screen {
            Screen::LanguagePicker => self.apply_language_picker(action),
            Screen::DocumentPicker => self.apply_document_picker(action),
            Screen::Reader => self.apply_reader(action),
        }
    }

    fn apply_language_picker(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Up => self.language_picker.up(),
            Action::Down => self.language_picker.down(self.catalog.languages.len()),
            Action::Select => {
                let id = self.catalog.languages.get(self.language_picker.selected_index)?;
                tracing::info!("Studying {}", id);
                self.current_language = Some(Language::from_id(id));
                self.enter(Screen::DocumentPicker);
            }
            _ => {}
        }
        None
    }

    fn apply_document_picker(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Up => self.document_picker.up(),
            Action::Down => self.document_picker.down(self.catalog.documents.len()),
            Action::Select => self.open_selected_document(),
            Action::Export(kind) => {
                let language = self.current_language.as_ref()?.id.clone();
                let levels = KnowledgeStore::load(&self.languages_root, &language).levels().clone();
                self.export(&levels, &language, kind);
            }
            Action::Back => {
                self.current_language = None;
                self.enter(Screen::LanguagePicker);
            }
            _ => {}
        }
        None
    }

    fn open_selected_document(&mut self) {
        let Some(language) = self.current_language.clone() else {
            return;
        };
        let Some(entry) = self.catalog.documents.get(self.document_picker.selected_index) else {
            return;
        };

        match Text::load(&entry.path, language, &self.languages_root) {
            Ok(mut text) => {
                text.repaginate(self.geometry);
                self.text = Some(text);
                self.error = None;
                self.enter(Screen::Reader);
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                self.error = Some(format!("{:#}", e));
            }
        }
    }

    /// Switch screens; notices belong to the screen they were raised on
    fn enter(&mut self, screen: Screen) {
        self.screen = screen;
        self.notice = None;
    }

    fn apply_reader(&mut self, action: Action) -> Option<Effect> {
        if action == Action::Back {
            self.text = None;
            self.error = None;
            self.pending.clear();
            self.enter(Screen::DocumentPicker);
            return Some(Effect::CancelAll);
        }

        let geometry = self.geometry;
        let ui_code = self.ui_language.code();
        let text = self.text.as_mut()?;

        match action {
            Action::Left => text.move_left(),
            Action::Right => text.move_right(),
            Action::Up => text.move_up(geometry.words_per_line),
            Action::Down => text.move_down(geometry.words_per_line),
            Action::NextPage => text.next_page(),
            Action::PreviousPage => text.previous_page(),
            Action::PageStart => text.jump_to_page_start(geometry),
            Action::SetLevel(level) => {
                if let Err(e) = text.set_current_level(level) {
                    tracing::error!("{:#}", e);
                    self.error = Some(format!("{:#}", e));
                }
            }
            Action::Romanize => {
                let token = text.current_token()?.to_string();
                text.romanization = romanize::romanize(&token, self.romanization, &text.language);
            }
            Action::Speak => {
                let request = ServiceRequest::Speak {
                    token: text.current_token()?.to_string(),
                    language_code: text.language.speech_code.clone(),
                };
                return Some(self.dispatch(request));
            }
            Action::Translate(provider) => {
                let request = ServiceRequest::Translate {
                    provider,
                    token: text.current_token()?.to_string(),
                    source: text.language.translation_code.clone(),
                    target: ui_code.to_string(),
                };
                return Some(self.dispatch(request));
            }
            Action::StrokeOrder => {
                let url = browser::stroke_order_url(text.current_token()?);
                return self.open_url(url);
            }
            Action::WebTranslate => {
                let url = browser::web_translate_url(
                    text.current_token()?,
                    &text.language.translation_code,
                    ui_code,
                );
                return self.open_url(url);
            }
            Action::Export(kind) => {
                let levels = text.knowledge.levels().clone();
                let language = text.language.id.clone();
                self.export(&levels, &language, kind);
            }
            _ => {}
        }
        None
    }

    fn open_url(
        &mut self,
        url: Result<reqwest::Url, crate::services::ServiceError>,
    ) -> Option<Effect> {
        match url {
            Ok(url) => Some(self.dispatch(ServiceRequest::OpenUrl { url: url.to_string() })),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    fn dispatch(&mut self, request: ServiceRequest) -> Effect {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.pending.insert(request.kind(), id);
        Effect::Dispatch { id, request }
    }

    fn export(&mut self, levels: &LevelMap, language: &str, kind: ExportKind) {
        let result = match kind {
            ExportKind::Plain => {
                export::export_dictionary(levels, language, self.ui_language, &self.languages_root)
            }
            ExportKind::WithReadings => export::export_alt_dictionary(
                levels,
                language,
                self.ui_language,
                &self.languages_root,
                self.romanization,
            ),
        };

        match result {
            Ok(path) => {
                self.notice =
                    Some(format!("{}{}", self.ui_language.strings().exported, path.display()));
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                self.notice = None;
                self.error = Some(format!("{:#}", e));
            }
        }
    }

    /// Take in the result of a service request
    pub fn handle_service_event(&mut self, event: ServiceEvent) {
        if self.pending.get(&event.kind) != Some(&event.id) {
            tracing::debug!("Ignoring stale result for request {}", event.id);
            return;
        }
        self.pending.remove(&event.kind);

        match event.kind {
            ServiceKind::Translation => {
                if let Some(text) = self.text.as_mut() {
                    text.translation = event.translation.unwrap_or_default();
                }
                self.error = event.error;
            }
            ServiceKind::Speech => self.error = event.error,
            ServiceKind::Browser => {
                if event.error.is_some() {
                    self.error = event.error;
                }
            }
        }
    }

    /// Whether a request of `kind` is still awaiting its result
    pub fn is_pending(&self, kind: ServiceKind) -> bool {
        self.pending.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeLevel;
    use crate::library::DocumentEntry;
    use crate::services::TranslationProvider;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        state: AppState,
    }

    /// Languages {spanish, mandarin} and one document per language
    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let languages = dir.path().join("languages");
        let texts = dir.path().join("texts");
        fs::create_dir_all(languages.join("spanish")).unwrap();
        fs::create_dir_all(languages.join("mandarin")).unwrap();
        fs::create_dir_all(&texts).unwrap();
        fs::write(texts.join("zh.txt"), "我们学习中文。").unwrap();
        fs::write(texts.join("es.txt"), "Hola, ¿qué tal?").unwrap();

        let mut catalog = Catalog::scan(&languages, &texts);
        catalog.languages.sort();
        catalog.documents.sort_by(|a, b| a.name.cmp(&b.name));

        let mut state = AppState::new(catalog, UiLanguage::English, languages);
        state.refresh_geometry(Geometry::new(2, 2), (80, 24));
        Fixture { _dir: dir, state }
    }

    fn open_mandarin(state: &mut AppState) {
        // languages sorted: [mandarin, spanish]; documents: [es.txt, zh.txt]
        state.apply(Action::Select);
        assert_eq!(state.screen, Screen::DocumentPicker);
        state.apply(Action::Down);
        state.apply(Action::Select);
        assert_eq!(state.screen, Screen::Reader);
    }

    #[test]
    fn starts_on_language_picker() {
        let f = fixture();
        assert_eq!(f.state.screen, Screen::LanguagePicker);
        assert!(f.state.text.is_none());
    }

    #[test]
    fn mandarin_document_is_tokenized_per_character() {
        let mut f = fixture();
        open_mandarin(&mut f.state);
        let text = f.state.text.as_ref().unwrap();
        assert_eq!(text.tokens(), ["我", "们", "学", "习", "中", "文"]);
        assert_eq!(text.page_count(), 2);
    }

    #[test]
    fn setting_level_persists_for_language() {
        let mut f = fixture();
        open_mandarin(&mut f.state);
        f.state.apply(Action::SetLevel(KnowledgeLevel::Known));

        let reloaded = KnowledgeStore::load(&f.state.languages_root, "mandarin");
        let mut expected = LevelMap::new();
        expected.insert("我".to_string(), KnowledgeLevel::Known);
        assert_eq!(reloaded.levels(), &expected);
    }

    #[test]
    fn back_from_reader_discards_text_and_error() {
        let mut f = fixture();
        open_mandarin(&mut f.state);
        f.state.error = Some("boom".into());

        assert_eq!(f.state.apply(Action::Back), Some(Effect::CancelAll));
        assert_eq!(f.state.screen, Screen::DocumentPicker);
        assert!(f.state.text.is_none());
        assert!(f.state.error.is_none());
        assert!(f.state.current_language.is_some());
    }

    #[test]
    fn back_from_document_picker_clears_language() {
        let mut f = fixture();
        f.state.apply(Action::Select);
        f.state.apply(Action::Back);
        assert_eq!(f.state.screen, Screen::LanguagePicker);
        assert!(f.state.current_language.is_none());
    }

    #[test]
    fn quit_from_any_screen() {
        let mut f = fixture();
        assert_eq!(f.state.apply(Action::Quit), Some(Effect::Quit));
        open_mandarin(&mut f.state);
        assert_eq!(f.state.apply(Action::Quit), Some(Effect::Quit));
    }

    #[test]
    fn picker_selection_is_clamped() {
        let mut f = fixture();
        f.state.apply(Action::Up);
        assert_eq!(f.state.language_picker.selected_index, 0);
        for _ in 0..5 {
            f.state.apply(Action::Down);
        }
        assert_eq!(f.state.language_picker.selected_index, 1);
    }

    #[test]
    fn unreadable_document_stays_on_picker_with_error() {
        let mut f = fixture();
        f.state.catalog.documents.push(DocumentEntry {
            path: f.state.languages_root.join("missing.txt"),
            name: "missing.txt".into(),
        });
        f.state.apply(Action::Select);
        for _ in 0..2 {
            f.state.apply(Action::Down);
        }
        f.state.apply(Action::Select);
        assert_eq!(f.state.screen, Screen::DocumentPicker);
        assert!(f.state.error.is_some());
    }

    #[test]
    fn opening_a_document_clears_earlier_load_error() {
        let mut f = fixture();
        f.state.catalog.documents.insert(
            0,
            DocumentEntry {
                path: f.state.languages_root.join("missing.txt"),
                name: "missing.txt".into(),
            },
        );
        f.state.apply(Action::Select);
        f.state.apply(Action::Select);
        assert_eq!(f.state.screen, Screen::DocumentPicker);
        assert!(f.state.error.is_some());

        // documents: [missing.txt, es.txt, zh.txt]
        f.state.apply(Action::Down);
        f.state.apply(Action::Select);
        assert_eq!(f.state.screen, Screen::Reader);
        assert!(f.state.error.is_none());
    }

    #[test]
    fn export_notice_does_not_outlive_its_screen() {
        let mut f = fixture();
        f.state.apply(Action::Select);
        f.state.apply(Action::Export(ExportKind::Plain));
        assert!(f.state.notice.is_some());

        f.state.apply(Action::Back);
        assert_eq!(f.state.screen, Screen::LanguagePicker);
        assert!(f.state.notice.is_none());

        f.state.apply(Action::Select);
        f.state.apply(Action::Export(ExportKind::Plain));
        f.state.apply(Action::Down);
        f.state.apply(Action::Select);
        assert_eq!(f.state.screen, Screen::Reader);
        assert!(f.state.notice.is_none());
    }

    #[test]
    fn translation_result_updates_text_and_clears_error() {
        let mut f = fixture();
        open_mandarin(&mut f.state);
        f.state.error = Some("old".into());

        let effect = f.state.apply(Action::Translate(TranslationProvider::Google));
        let Some(Effect::Dispatch { id, request }) = effect else {
            panic!("expected dispatch, got {:?}", effect);
        };
        assert_eq!(
            request,
            ServiceRequest::Translate {
                provider: TranslationProvider::Google,
                token: "我".into(),
                source: "zh-CN".into(),
                target: "en".into(),
            }
        );
        assert!(f.state.is_pending(ServiceKind::Translation));

        f.state.handle_service_event(ServiceEvent {
            id,
            kind: ServiceKind::Translation,
            translation: Some("I".into()),
            error: None,
        });
        assert_eq!(f.state.text.as_ref().unwrap().translation, "I");
        assert!(f.state.error.is_none());
        assert!(!f.state.is_pending(ServiceKind::Translation));
    }

    #[test]
    fn superseded_result_is_ignored() {
        let mut f = fixture();
        open_mandarin(&mut f.state);

        let Some(Effect::Dispatch { id: first, .. }) =
            f.state.apply(Action::Translate(TranslationProvider::Google))
        else {
            panic!("expected dispatch");
        };
        f.state.apply(Action::Right);
        f.state.apply(Action::Translate(TranslationProvider::MyMemory));

        f.state.handle_service_event(ServiceEvent {
            id: first,
            kind: ServiceKind::Translation,
            translation: Some("stale".into()),
            error: None,
        });
        assert_eq!(f.state.text.as_ref().unwrap().translation, "");
    }

    #[test]
    fn service_error_replaces_previous_error() {
        let mut f = fixture();
        open_mandarin(&mut f.state);
        f.state.error = Some("first".into());

        let Some(Effect::Dispatch { id, .. }) = f.state.apply(Action::Speak) else {
            panic!("expected dispatch");
        };
        f.state.handle_service_event(ServiceEvent {
            id,
            kind: ServiceKind::Speech,
            translation: None,
            error: Some("second".into()),
        });
        assert_eq!(f.state.error.as_deref(), Some("second"));
    }

    #[test]
    fn stroke_order_opens_url() {
        let mut f = fixture();
        open_mandarin(&mut f.state);
        let effect = f.state.apply(Action::StrokeOrder);
        assert!(matches!(
            effect,
            Some(Effect::Dispatch { request: ServiceRequest::OpenUrl { ref url }, .. })
                if url.starts_with("https://www.strokeorder.com/chinese/")
        ));
    }

    #[test]
    fn romanize_uses_bundled_table() {
        let mut f = fixture();
        open_mandarin(&mut f.state);
        f.state.apply(Action::Romanize);
        assert_eq!(f.state.text.as_ref().unwrap().romanization, "wǒ");
    }

    #[test]
    fn export_from_reader_and_picker_match() {
        let mut f = fixture();
        open_mandarin(&mut f.state);
        f.state.apply(Action::SetLevel(KnowledgeLevel::SemiKnown));
        f.state.apply(Action::Export(ExportKind::Plain));
        let path = f.state.languages_root.join("mandarin").join(export::DICTIONARY_FILE);
        let from_reader = fs::read(&path).unwrap();

        f.state.apply(Action::Back);
        f.state.apply(Action::Export(ExportKind::Plain));
        let from_picker = fs::read(&path).unwrap();

        assert_eq!(from_reader, from_picker);
        assert!(f.state.notice.is_some());
    }

    #[test]
    fn resize_resets_out_of_range_page() {
        let mut f = fixture();
        open_mandarin(&mut f.state);
        f.state.apply(Action::NextPage);
        assert_eq!(f.state.text.as_ref().unwrap().current_page(), 1);

        f.state.refresh_geometry(Geometry::new(5, 5), (120, 40));
        let text = f.state.text.as_ref().unwrap();
        assert_eq!(text.page_count(), 1);
        assert_eq!(text.current_page(), 0);
    }
}
