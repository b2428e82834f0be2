//! Query Normalizer
//!
//! Folds text to the form every comparison in the pipeline uses
//! (lowercase, no diacritics) and splits it into whitespace tokens.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folded query plus its tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub folded: String,
    pub tokens: Vec<String>,
}

impl NormalizedQuery {
    pub fn new(raw: &str) -> Self {
        let folded = fold(raw);
        let tokens = folded.split_whitespace().map(str::to_string).collect();
        Self { folded, tokens }
    }

    /// Tokens long enough to take part in matching
    pub fn matchable_tokens(&self, min_len: usize) -> Vec<&str> {
        self.tokens
            .iter()
            .map(String::as_str)
            .filter(|t| t.chars().count() >= min_len)
            .collect()
    }
}

/// Lowercase and strip diacritics ("Plomería" -> "plomeria")
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Fold then split on whitespace, dropping empty tokens
pub fn tokenize(text: &str) -> Vec<String> {
    NormalizedQuery::new(text).tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_accents() {
        assert_eq!(fold("Plomería"), "plomeria");
        assert_eq!(fold("CERRAJERÍA Ñandú"), "cerrajeria nandu");
        assert_eq!(fold("Reparación de Fugas"), "reparacion de fugas");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  Canilla  que   gotea "), vec!["canilla", "que", "gotea"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_matchable_tokens() {
        let q = NormalizedQuery::new("pl de luz gasista");
        assert_eq!(q.matchable_tokens(3), vec!["luz", "gasista"]);
    }

    #[test]
    fn test_combining_sequence() {
        // "e" followed by U+0301 combining acute
        assert_eq!(fold("cafe\u{301}"), "cafe");
    }
}
