//! The open study text: tokens, cursor, pages and knowledge levels

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::pagination::{Geometry, Pagination};
use super::tokenizer::tokenize;
use crate::knowledge::{KnowledgeLevel, KnowledgeStore};
use crate::language::Language;

/// A document opened for study
#[derive(Debug, Clone)]
pub struct Text {
    /// Source document
    pub path: PathBuf,
    /// Study language the document is read in
    pub language: Language,
    /// Tokens in reading order
    tokens: Vec<String>,
    /// Index of the token under the cursor
    cursor: usize,
    /// Page currently displayed
    current_page: usize,
    /// Pages for the most recent geometry
    pagination: Pagination,
    /// Levels for this language, persisted on change
    pub knowledge: KnowledgeStore,
    /// Last translation fetched for a token
    pub translation: String,
    /// Last romanization computed for a token
    pub romanization: String,
}

impl Text {
    /// Read and tokenize `path`, loading the persisted levels for `language`
    pub fn load(path: &Path, language: Language, languages_root: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read document {:?}", path))?;
        let content = String::from_utf8_lossy(&bytes);
        let tokens = tokenize(&content, language.script);
        let knowledge = KnowledgeStore::load(languages_root, &language.id);

        tracing::info!("Opened {:?}: {} tokens in {}", path, tokens.len(), language.id);

        Ok(Self::from_parts(path.to_path_buf(), language, tokens, knowledge))
    }

    /// Build a text from already tokenized content
    pub fn from_parts(
        path: PathBuf,
        language: Language,
        tokens: Vec<String>,
        knowledge: KnowledgeStore,
    ) -> Self {
        Self {
            path,
            language,
            tokens,
            cursor: 0,
            current_page: 0,
            pagination: Pagination::default(),
            knowledge,
            translation: String::new(),
            romanization: String::new(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    /// Token index range of the displayed page
    pub fn current_page_range(&self) -> Option<Range<usize>> {
        self.pagination.page(self.current_page)
    }

    /// Token under the cursor
    pub fn current_token(&self) -> Option<&str> {
        self.tokens.get(self.cursor).map(String::as_str)
    }

    /// Bring pages in line with `geometry` and re-validate the current page
    pub fn repaginate(&mut self, geometry: Geometry) {
        if self.pagination.refresh(self.tokens.len(), geometry.capacity()) {
            tracing::debug!(
                "Repaginated {:?}: {} pages of {}",
                self.path,
                self.pagination.page_count(),
                geometry.capacity()
            );
        }
        if self.current_page >= self.pagination.page_count() {
            self.current_page = 0;
        }
    }

    /// Move one token back
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move one token forward
    pub fn move_right(&mut self) {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
    }

    /// Move one line back; blocked if it would go before the first token
    pub fn move_up(&mut self, words_per_line: usize) {
        if self.cursor > 0 && self.cursor >= words_per_line {
            self.cursor -= words_per_line;
        }
    }

    /// Move one line forward; blocked if it would reach or pass the last token
    pub fn move_down(&mut self, words_per_line: usize) {
        let len = self.tokens.len();
        if self.cursor + 1 < len && self.cursor + words_per_line + 1 < len {
            self.cursor += words_per_line;
        }
    }

    pub fn next_page(&mut self) {
        if self.current_page + 1 < self.pagination.page_count() {
            self.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.current_page > 0 {
            self.current_page -= 1;
        }
    }

    /// Put the cursor on the first token of the displayed page
    pub fn jump_to_page_start(&mut self, geometry: Geometry) {
        self.cursor = self.current_page * geometry.capacity();
    }

    /// Rate the token under the cursor and persist the mapping
    pub fn set_current_level(&mut self, level: KnowledgeLevel) -> Result<()> {
        let Some(token) = self.tokens.get(self.cursor) else {
            return Ok(());
        };
        self.knowledge.set_level(token, level)
    }

    /// Level of the token at `index`
    pub fn level_at(&self, index: usize) -> Option<KnowledgeLevel> {
        self.tokens.get(index).and_then(|t| self.knowledge.level(t))
    }
}
