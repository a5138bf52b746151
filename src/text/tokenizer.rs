//! Language-aware splitting of raw text into study tokens

use unicode_segmentation::UnicodeSegmentation;

use crate::language::Script;

/// Split `content` into tokens according to the script class.
///
/// CJK scripts are split per grapheme, keeping only graphemes that carry a
/// letter or digit. Space-delimited scripts are split on whitespace with
/// surrounding punctuation trimmed from each word.
pub fn tokenize(content: &str, script: Script) -> Vec<String> {
    match script {
        Script::Cjk => tokenize_graphemes(content),
        Script::Spaced => tokenize_words(content),
    }
}

fn tokenize_graphemes(content: &str) -> Vec<String> {
    content.graphemes(true).filter(|g| is_meaningful(g)).map(str::to_string).collect()
}

fn tokenize_words(content: &str) -> Vec<String> {
    content
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// A grapheme is worth studying if it contains a letter or digit
fn is_meaningful(grapheme: &str) -> bool {
    grapheme.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cjk_splits_per_character() {
        let tokens = tokenize("我爱你。\n你好！", Script::Cjk);
        assert_eq!(tokens, vec!["我", "爱", "你", "你", "好"]);
    }

    #[test]
    fn cjk_drops_whitespace_and_punctuation() {
        let tokens = tokenize(" 「中文」，  ", Script::Cjk);
        assert_eq!(tokens, vec!["中", "文"]);
    }

    #[test]
    fn spaced_strips_surrounding_punctuation() {
        let tokens = tokenize("¡Hola, amigo! ¿Qué tal?", Script::Spaced);
        assert_eq!(tokens, vec!["Hola", "amigo", "Qué", "tal"]);
    }

    #[test]
    fn spaced_keeps_inner_apostrophes_and_hyphens() {
        let tokens = tokenize("l'uomo non-stop", Script::Spaced);
        assert_eq!(tokens, vec!["l'uomo", "non-stop"]);
    }

    #[test]
    fn spaced_drops_pure_punctuation() {
        let tokens = tokenize("uno -- dos ... *** tres", Script::Spaced);
        assert_eq!(tokens, vec!["uno", "dos", "tres"]);
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("", Script::Cjk).is_empty());
        assert!(tokenize("   \n\t", Script::Spaced).is_empty());
    }
}
