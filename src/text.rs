//! # Text Normalization Module
//!
//! ## Purpose
//! Normalization pipeline shared by every scorer: lowercasing, punctuation
//! stripping, whitespace tokenization, and Spanish stop-word filtering.
//!
//! ## Input/Output Specification
//! - **Input**: Raw query or document text (Spanish)
//! - **Output**: Normalized text, token sequences, keyword sets
//! - **Determinism**: Pure functions of the input text, no side effects
//!
//! Empty or whitespace-only input yields an empty token sequence. Callers
//! must treat that as "no signal", not as an error.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Tokens at or below this length carry too little signal and are dropped
/// during keyword extraction.
pub const MIN_TOKEN_LENGTH: usize = 3;

/// Fixed Spanish stop-word set used by keyword extraction.
pub const SPANISH_STOPWORDS: &[&str] = &[
    "el", "la", "de", "que", "y", "a", "en", "un", "es", "se", "no", "te", "lo", "le", "da", "su",
    "por", "son", "con", "para", "como", "pero", "sus", "del", "al", "me", "mi", "tu", "si", "yo",
    "he", "ha",
];

fn stopwords() -> &'static HashSet<&'static str> {
    static STOPWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOPWORDS.get_or_init(|| SPANISH_STOPWORDS.iter().copied().collect())
}

fn strip_regex() -> &'static Regex {
    static STRIP: OnceLock<Regex> = OnceLock::new();
    // Keep word characters, whitespace, and Spanish accented letters
    STRIP.get_or_init(|| Regex::new(r"[^\w\sáéíóúñü]").unwrap())
}

/// Normalize raw text: NFC unicode normalization, lowercasing, and removal of
/// characters other than alphanumerics, whitespace, and accented letters.
pub fn normalize(text: &str) -> String {
    let lowered = text.nfc().collect::<String>().to_lowercase();
    strip_regex().replace_all(&lowered, "").trim().to_string()
}

/// Split normalized text on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(|t| t.to_string())
        .collect()
}

/// Tokens that carry signal: longer than [`MIN_TOKEN_LENGTH`] - 1 characters
/// and not in the stop-word set. Duplicates are preserved, so term frequency
/// survives for the vector scorer.
pub fn content_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() >= MIN_TOKEN_LENGTH && !stopwords().contains(t.as_str()))
        .collect()
}

/// Derived keyword set for the keyword scorer: content tokens with duplicates
/// removed, keeping the first occurrence order for determinism.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    content_tokens(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
