//! Study language metadata
//!
//! Language identifiers are directory names under the languages root. This
//! table maps the common ones to their script class and to the codes used by
//! the speech and translation services.

/// How a language separates words in writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// No whitespace between words; tokenized per character
    Cjk,
    /// Words separated by whitespace
    Spaced,
}

/// Resolved metadata for a study language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Directory name the language was selected by
    pub id: String,
    /// Script class used by the tokenizer
    pub script: Script,
    /// Code passed to text-to-speech
    pub speech_code: String,
    /// Code passed to translation providers
    pub translation_code: String,
    /// Whether the bundled romanization table applies
    pub romanized: bool,
}

/// (name, script, speech code, translation code, romanized)
const KNOWN_LANGUAGES: &[(&str, Script, &str, &str, bool)] = &[
    ("mandarin", Script::Cjk, "zh-CN", "zh-CN", true),
    ("chinese", Script::Cjk, "zh-CN", "zh-CN", true),
    ("cantonese", Script::Cjk, "zh-HK", "zh-TW", false),
    ("japanese", Script::Cjk, "ja", "ja", false),
    ("korean", Script::Spaced, "ko", "ko", false),
    ("english", Script::Spaced, "en", "en", false),
    ("spanish", Script::Spaced, "es", "es", false),
    ("french", Script::Spaced, "fr", "fr", false),
    ("german", Script::Spaced, "de", "de", false),
    ("italian", Script::Spaced, "it", "it", false),
    ("portuguese", Script::Spaced, "pt", "pt", false),
    ("russian", Script::Spaced, "ru", "ru", false),
    ("dutch", Script::Spaced, "nl", "nl", false),
    ("greek", Script::Spaced, "el", "el", false),
    ("turkish", Script::Spaced, "tr", "tr", false),
    ("polish", Script::Spaced, "pl", "pl", false),
    ("swedish", Script::Spaced, "sv", "sv", false),
    ("arabic", Script::Spaced, "ar", "ar", false),
];

impl Language {
    /// Resolve a language identifier. Unknown identifiers are treated as
    /// space-delimited and use the identifier itself as service code.
    pub fn from_id(id: &str) -> Self {
        let key = id.trim().to_lowercase();

        match KNOWN_LANGUAGES.iter().find(|(name, ..)| *name == key) {
            Some(&(_, script, speech, translation, romanized)) => Self {
                id: id.to_string(),
                script,
                speech_code: speech.to_string(),
                translation_code: translation.to_string(),
                romanized,
            },
            None => Self {
                id: id.to_string(),
                script: Script::Spaced,
                speech_code: key.clone(),
                translation_code: key,
                romanized: false,
            },
        }
    }
}
