//! # Keyword Similarity Module
//!
//! ## Purpose
//! Overlap-based similarity between a query's keyword set and a topic's
//! keyword set, used by the topic classifier.
//!
//! ## Input/Output Specification
//! - **Input**: Normalized query keywords, per-topic keyword lists
//! - **Output**: Similarity score in [0, 1] per topic; best-topic selection
//!
//! A query token matches when it is a substring of, or contains, a topic
//! keyword. This bidirectional partial match is a deliberately lenient proxy
//! for morphological variation in Spanish ("pensión" matching "pensiones"):
//! a full stemmer is out of scope. Short tokens could over-match, which the
//! three-character minimum in `text::extract_keywords` mitigates; the residual
//! false-positive risk is an accepted lexical-approximation policy.

use crate::topics::Topic;

/// Similarity between query keywords and a topic keyword list.
///
/// Score = matching query tokens / total query tokens. Either side empty
/// yields 0.0 (defined, not an error).
pub fn keyword_similarity(query_tokens: &[String], topic_keywords: &[&str]) -> f32 {
    if query_tokens.is_empty() || topic_keywords.is_empty() {
        return 0.0;
    }

    let matches = query_tokens
        .iter()
        .filter(|token| {
            topic_keywords
                .iter()
                .any(|kw| kw.contains(token.as_str()) || token.contains(kw))
        })
        .count();

    matches as f32 / query_tokens.len() as f32
}

/// Select the best-scoring topic for the given query keywords.
///
/// Only a strictly greater score replaces the current best, so the first
/// topic in taxonomy order wins ties. This tie-break must be preserved for
/// determinism. Returns `None` when no topic scores above zero.
pub fn best_topic(topics: &[Topic], query_tokens: &[String]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;

    for (index, topic) in topics.iter().enumerate() {
        let score = keyword_similarity(query_tokens, topic.keywords);
        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((index, score));
        }
    }

    best
}
