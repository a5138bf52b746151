//! Dictionary export
//!
//! Writes every rated token of a language to a plain list, optionally
//! annotated with romanized readings. Output is sorted by token so that
//! exporting unchanged levels twice produces identical files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::knowledge::LevelMap;
use crate::locale::UiLanguage;
use crate::romanize::RomanizationTable;

/// Export file for the plain dictionary
pub const DICTIONARY_FILE: &str = "dictionary.txt";
/// Export file for the dictionary with readings
pub const ALT_DICTIONARY_FILE: &str = "dictionary_alt.txt";

/// Which export to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Plain,
    WithReadings,
}

impl ExportKind {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Plain => DICTIONARY_FILE,
            Self::WithReadings => ALT_DICTIONARY_FILE,
        }
    }
}

/// Write the plain dictionary for `language`
pub fn export_dictionary(
    levels: &LevelMap,
    language: &str,
    ui: UiLanguage,
    languages_root: &Path,
) -> Result<PathBuf> {
    let contents = render_dictionary(levels, language, ui, None);
    write_export(languages_root, language, ExportKind::Plain, &contents)
}

/// Write the dictionary for `language`, annotating entries with readings from `table`
pub fn export_alt_dictionary(
    levels: &LevelMap,
    language: &str,
    ui: UiLanguage,
    languages_root: &Path,
    table: &RomanizationTable,
) -> Result<PathBuf> {
    let contents = render_dictionary(levels, language, ui, Some(table));
    write_export(languages_root, language, ExportKind::WithReadings, &contents)
}

/// Format the export file contents
pub fn render_dictionary(
    levels: &LevelMap,
    language: &str,
    ui: UiLanguage,
    table: Option<&RomanizationTable>,
) -> String {
    let strings = ui.strings();
    let mut out = format!("{} - {}\n\n", strings.dictionary_title, language);

    for (token, level) in levels {
        let label = strings.level_label(*level);
        match table.and_then(|t| t.romanize_units(token)) {
            Some(reading) => out.push_str(&format!("- {} [{}] : {}\n", token, reading, label)),
            None => out.push_str(&format!("- {} : {}\n", token, label)),
        }
    }

    out
}

fn write_export(
    languages_root: &Path,
    language: &str,
    kind: ExportKind,
    contents: &str,
) -> Result<PathBuf> {
    let dir = languages_root.join(language);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create export directory {:?}", dir))?;

    let path = dir.join(kind.file_name());
    fs::write(&path, contents).with_context(|| format!("Failed to write export to {:?}", path))?;

    tracing::info!("Exported {} entries to {:?}", contents.lines().count().saturating_sub(2), path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeLevel;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn levels() -> LevelMap {
        let mut levels = LevelMap::new();
        levels.insert("好".to_string(), KnowledgeLevel::Known);
        levels.insert("你".to_string(), KnowledgeLevel::NotKnown);
        levels.insert("龘".to_string(), KnowledgeLevel::Neutral);
        levels
    }

    fn table() -> RomanizationTable {
        RomanizationTable::from_json(r#"{"你": ["nǐ"], "好": ["hǎo"]}"#).unwrap()
    }

    #[test]
    fn plain_export_lists_every_rated_token() {
        let out = render_dictionary(&levels(), "mandarin", UiLanguage::English, None);
        assert_eq!(
            out,
            "Dictionary - mandarin\n\n- 你 : not known\n- 好 : known\n- 龘 : neutral\n"
        );
    }

    #[test]
    fn alt_export_adds_readings_where_known() {
        let t = table();
        let out = render_dictionary(&levels(), "mandarin", UiLanguage::English, Some(&t));
        assert!(out.contains("- 你 [nǐ] : not known\n"));
        assert!(out.contains("- 好 [hǎo] : known\n"));
        assert!(out.contains("- 龘 : neutral\n"));
    }

    #[test]
    fn export_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = export_dictionary(&levels(), "mandarin", UiLanguage::Italian, dir.path()).unwrap();
        let first = fs::read(&path).unwrap();
        let path = export_dictionary(&levels(), "mandarin", UiLanguage::Italian, dir.path()).unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(path, dir.path().join("mandarin").join(DICTIONARY_FILE));
    }

    #[test]
    fn alt_export_goes_to_its_own_file() {
        let dir = TempDir::new().unwrap();
        let path = export_alt_dictionary(
            &levels(),
            "mandarin",
            UiLanguage::English,
            dir.path(),
            &table(),
        )
        .unwrap();
        assert_eq!(path, dir.path().join("mandarin").join(ALT_DICTIONARY_FILE));
        assert!(fs::read_to_string(path).unwrap().contains("[nǐ]"));
    }

    #[test]
    fn export_overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        let mut levels = levels();
        export_dictionary(&levels, "mandarin", UiLanguage::English, dir.path()).unwrap();
        levels.clear();
        let path = export_dictionary(&levels, "mandarin", UiLanguage::English, dir.path()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "Dictionary - mandarin\n\n");
    }
}
