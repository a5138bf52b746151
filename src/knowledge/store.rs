//! Knowledge level persistence
//!
//! One JSON file per study language, rewritten in full after every change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::level::KnowledgeLevel;

/// File name of the persisted mapping inside a language directory
pub const LEVELS_FILE: &str = "levels.json";

/// Token to level mapping for a single language
pub type LevelMap = BTreeMap<String, KnowledgeLevel>;

/// In-memory knowledge mapping bound to its on-disk file
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    /// Language the mapping belongs to
    language: String,
    /// Where the mapping is persisted
    path: PathBuf,
    /// Current levels, keyed by token
    levels: LevelMap,
}

impl KnowledgeStore {
    /// Load the mapping for `language`; missing or unreadable files yield an empty store
    pub fn load(languages_root: &Path, language: &str) -> Self {
        let path = levels_path(languages_root, language);
        let levels = load_levels(&path);
        Self { language: language.to_string(), path, levels }
    }

    /// Set the level of `token` and immediately rewrite the persisted file
    pub fn set_level(&mut self, token: &str, level: KnowledgeLevel) -> Result<()> {
        self.levels.insert(token.to_string(), level);
        tracing::debug!("{}: {} -> {}", self.language, token, level.as_i64());
        self.save()
    }

    /// Level of `token`, if it has ever been rated
    pub fn level(&self, token: &str) -> Option<KnowledgeLevel> {
        self.levels.get(token).copied()
    }

    pub fn levels(&self) -> &LevelMap {
        &self.levels
    }

    /// Write the full mapping, replacing the previous file in one rename
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create language directory {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(&self.levels)
            .with_context(|| "Failed to serialize knowledge levels")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write knowledge levels to {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace knowledge levels at {:?}", self.path))?;

        Ok(())
    }
}

/// Path of the persisted mapping for `language`
pub fn levels_path(languages_root: &Path, language: &str) -> PathBuf {
    languages_root.join(language).join(LEVELS_FILE)
}

/// Read a persisted mapping. Never fails: problems are logged and treated as empty.
pub fn load_levels(path: &Path) -> LevelMap {
    if !path.exists() {
        return LevelMap::new();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("Failed to read knowledge levels from {:?}: {}", path, e);
            return LevelMap::new();
        }
    };

    let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&contents) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Failed to parse knowledge levels in {:?}: {}", path, e);
            return LevelMap::new();
        }
    };

    raw.into_iter()
        .filter_map(|(token, value)| {
            let level = value.as_i64().and_then(|n| KnowledgeLevel::try_from(n).ok());
            if level.is_none() {
                tracing::warn!("Dropping invalid level {} for {:?} in {:?}", value, token, path);
            }
            level.map(|level| (token, level))
        })
        .collect()
}
