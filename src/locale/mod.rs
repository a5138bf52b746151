//! Interface language string tables

use std::fs;
use std::path::Path;

use crate::knowledge::KnowledgeLevel;

/// Language the interface is displayed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiLanguage {
    #[default]
    English,
    Italian,
    Spanish,
}

/// All user-visible labels for one interface language
#[derive(Debug)]
pub struct Strings {
    pub languages_title: &'static str,
    pub quit_hint: &'static str,
    pub current_language: &'static str,
    pub texts_title: &'static str,
    pub open_hint: &'static str,
    pub export_hint: &'static str,
    pub opened_file: &'static str,
    pub cursor: &'static str,
    pub terminal_size: &'static str,
    pub page: &'static str,
    pub pages: &'static str,
    pub translation: &'static str,
    pub romanization: &'static str,
    pub error: &'static str,
    pub reader_help: &'static str,
    pub dictionary_title: &'static str,
    pub exported: &'static str,
    pub level_labels: [&'static str; 4],
}

const ENGLISH: Strings = Strings {
    languages_title: "Languages",
    quit_hint: "Press q to quit.",
    current_language: "Current language: ",
    texts_title: "Texts",
    open_hint: "enter/space: open  b: back  ",
    export_hint: "f: export dictionary  z: export dictionary with readings",
    opened_file: "Opened file: ",
    cursor: " | cursor: ",
    terminal_size: "Terminal size:",
    page: "Page:",
    pages: "Pages:",
    translation: "Translation:",
    romanization: "Romanization:",
    error: "Error: ",
    reader_help: "0-3 level  4 listen  5/9 translate  6 romanize  7 strokes  8 web  a/d page  m page start  f/z export  b back",
    dictionary_title: "Dictionary",
    exported: "Exported ",
    level_labels: ["neutral", "not known", "semi-known", "known"],
};

const ITALIAN: Strings = Strings {
    languages_title: "Lingue",
    quit_hint: "Premi q per uscire.",
    current_language: "Lingua attuale: ",
    texts_title: "Testi",
    open_hint: "invio/spazio: apri  b: indietro  ",
    export_hint: "f: esporta dizionario  z: esporta dizionario con letture",
    opened_file: "File aperto: ",
    cursor: " | cursore: ",
    terminal_size: "Dimensioni terminale:",
    page: "Pagina:",
    pages: "Pagine:",
    translation: "Traduzione:",
    romanization: "Romanizzazione:",
    error: "Errore: ",
    reader_help: "0-3 livello  4 ascolta  5/9 traduci  6 romanizza  7 tratti  8 web  a/d pagina  m inizio pagina  f/z esporta  b indietro",
    dictionary_title: "Dizionario",
    exported: "Esportato ",
    level_labels: ["neutro", "sconosciuto", "semi-conosciuto", "conosciuto"],
};

const SPANISH: Strings = Strings {
    languages_title: "Idiomas",
    quit_hint: "Pulsa q para salir.",
    current_language: "Idioma actual: ",
    texts_title: "Textos",
    open_hint: "intro/espacio: abrir  b: atrás  ",
    export_hint: "f: exportar diccionario  z: exportar diccionario con lecturas",
    opened_file: "Archivo abierto: ",
    cursor: " | cursor: ",
    terminal_size: "Tamaño del terminal:",
    page: "Página:",
    pages: "Páginas:",
    translation: "Traducción:",
    romanization: "Romanización:",
    error: "Error: ",
    reader_help: "0-3 nivel  4 escuchar  5/9 traducir  6 romanizar  7 trazos  8 web  a/d página  m inicio de página  f/z exportar  b atrás",
    dictionary_title: "Diccionario",
    exported: "Exportado ",
    level_labels: ["neutral", "desconocido", "semiconocido", "conocido"],
};

impl UiLanguage {
    /// Resolve a language code; unrecognized codes fall back to English
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "it" => Self::Italian,
            "es" => Self::Spanish,
            "en" => Self::English,
            other => {
                tracing::warn!("Unknown interface language {:?}, using English", other);
                Self::English
            }
        }
    }

    /// Read the interface language file. All whitespace is stripped; a missing
    /// or unreadable file gives the default.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let code: String = contents.chars().filter(|c| !c.is_whitespace()).collect();
                Self::from_code(&code)
            }
            Err(e) => {
                tracing::warn!("Cannot read interface language from {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Code used as the translation target
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Italian => "it",
            Self::Spanish => "es",
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Self::English => &ENGLISH,
            Self::Italian => &ITALIAN,
            Self::Spanish => &SPANISH,
        }
    }
}

impl Strings {
    pub fn level_label(&self, level: KnowledgeLevel) -> &'static str {
        self.level_labels[level.as_i64() as usize]
    }
}
