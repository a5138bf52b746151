//! Romanized readings from the bundled character table

use std::collections::HashMap;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;

use crate::language::Language;

/// Bundled hanzi to pinyin table, first reading is the most common one
const HANZI_JSON: &str = include_str!("../../assets/hanzi.json");

/// The bundled table, parsed on first use and kept for the process lifetime
pub static HANZI: Lazy<RomanizationTable> = Lazy::new(|| {
    RomanizationTable::from_json(HANZI_JSON).unwrap_or_else(|e| {
        tracing::error!("Bundled romanization table is invalid: {:#}", e);
        RomanizationTable::default()
    })
});

/// Script unit to romanized readings
#[derive(Debug, Clone, Default)]
pub struct RomanizationTable {
    readings: HashMap<String, Vec<String>>,
}

impl RomanizationTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let readings: HashMap<String, Vec<String>> =
            serde_json::from_str(json).with_context(|| "Failed to parse romanization table")?;
        Ok(Self { readings })
    }

    /// Primary reading of a single unit
    pub fn reading(&self, unit: &str) -> Option<&str> {
        self.readings.get(unit).and_then(|r| r.first()).map(String::as_str)
    }

    /// Reading of a whole token, unit by unit.
    ///
    /// Units missing from the table are passed through unchanged; `None` if
    /// no unit matched at all.
    pub fn romanize_units(&self, token: &str) -> Option<String> {
        let mut matched = false;
        let parts: Vec<String> = token
            .chars()
            .map(|c| {
                let mut buf = [0u8; 4];
                match self.reading(c.encode_utf8(&mut buf)) {
                    Some(reading) => {
                        matched = true;
                        reading.to_string()
                    }
                    None => c.to_string(),
                }
            })
            .collect();

        matched.then(|| parts.join(" "))
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Romanize `token` for display. Languages without a table give an empty string.
pub fn romanize(token: &str, table: &RomanizationTable, language: &Language) -> String {
    if !language.romanized {
        return String::new();
    }
    table.romanize_units(token).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RomanizationTable {
        RomanizationTable::from_json(r#"{"你": ["nǐ"], "好": ["hǎo", "hào"]}"#).unwrap()
    }

    #[test]
    fn bundled_table_loads() {
        assert!(!HANZI.is_empty());
        assert_eq!(HANZI.reading("我"), Some("wǒ"));
    }

    #[test]
    fn first_reading_wins() {
        assert_eq!(table().reading("好"), Some("hǎo"));
    }

    #[test]
    fn multi_unit_token_is_joined() {
        assert_eq!(table().romanize_units("你好"), Some("nǐ hǎo".to_string()));
    }

    #[test]
    fn unmatched_units_pass_through() {
        assert_eq!(table().romanize_units("你X"), Some("nǐ X".to_string()));
        assert_eq!(table().romanize_units("XY"), None);
    }

    #[test]
    fn only_romanized_languages_get_readings() {
        let t = table();
        assert_eq!(romanize("你", &t, &Language::from_id("mandarin")), "nǐ");
        assert_eq!(romanize("你", &t, &Language::from_id("japanese")), "");
        assert_eq!(romanize("hola", &t, &Language::from_id("spanish")), "");
    }
}
