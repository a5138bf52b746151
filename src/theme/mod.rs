//! Theming system for Lingo

mod tokyo_night;

pub use tokyo_night::TOKYO_NIGHT;

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::knowledge::KnowledgeLevel;

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub error: Color,
    pub info: Color,

    // Knowledge levels
    pub level_not_known: Color,
    pub level_semi_known: Color,
    pub level_known: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub cursor: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}

impl Theme {
    /// Look up a built-in theme
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "tokyo night" | "tokyo-night" => Some(Self::tokyo_night()),
            _ => None,
        }
    }

    /// Style for a token at the given level. Neutral and unrated tokens are plain.
    pub fn level_style(&self, level: Option<KnowledgeLevel>) -> Style {
        let base = Style::default().fg(self.fg_primary);
        match level {
            Some(KnowledgeLevel::NotKnown) => base.fg(self.level_not_known),
            Some(KnowledgeLevel::SemiKnown) => base.fg(self.level_semi_known),
            Some(KnowledgeLevel::Known) => base.fg(self.level_known),
            Some(KnowledgeLevel::Neutral) | None => base,
        }
    }

    /// Style for the token under the cursor
    pub fn cursor_style(&self) -> Style {
        Style::default().fg(self.bg_primary).bg(self.cursor).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_tokyo_night() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Tokyo Night");
    }

    #[test]
    fn neutral_renders_like_unrated() {
        let theme = Theme::default();
        assert_eq!(theme.level_style(Some(KnowledgeLevel::Neutral)), theme.level_style(None));
        assert_ne!(theme.level_style(Some(KnowledgeLevel::Known)), theme.level_style(None));
    }

    #[test]
    fn lookup_by_name() {
        assert!(Theme::by_name("tokyo night").is_some());
        assert!(Theme::by_name("solarized").is_none());
    }
}
