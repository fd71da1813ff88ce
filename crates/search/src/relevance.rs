//! Similarity scoring between query and candidate text.
//!
//! A pair of already-normalized strings is scored by the first matching tier:
//!
//! | tier        | score                                   |
//! |-------------|-----------------------------------------|
//! | exact       | `1.0`                                   |
//! | substring   | `0.8`                                   |
//! | word overlap| `0.5 + 0.3 × matched / query words`     |
//! | fuzzy       | `0.6 × (1 − distance / max_len)`        |
//!
//! Raw strings are scored as the best pair across their normalized variants.

use crate::fuzzy::normalized_similarity;
use crate::lexicon::Lexicon;

/// Match tiers, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    /// Edit-distance only
    Fuzzy,
    /// At least one query word overlaps a candidate word
    WordOverlap,
    /// One string contains the other
    Substring,
    /// Identical strings
    Exact,
}

/// Score for a substring match.
pub const SUBSTRING_SCORE: f64 = 0.8;
/// Base score for a word-overlap match.
pub const WORD_OVERLAP_BASE: f64 = 0.5;
/// Share of the word-overlap score scaled by the fraction of matched words.
pub const WORD_OVERLAP_SPAN: f64 = 0.3;
/// Scale applied to edit-distance similarity.
pub const FUZZY_SCALE: f64 = 0.6;

/// Classify a pair of normalized strings and score it.
///
/// Strings are compared as given; callers lowercase them beforehand.
pub fn score_pair(query: &str, candidate: &str) -> (MatchKind, f64) {
    if query == candidate {
        return (MatchKind::Exact, 1.0);
    }

    if !query.is_empty()
        && !candidate.is_empty()
        && (candidate.contains(query) || query.contains(candidate))
    {
        return (MatchKind::Substring, SUBSTRING_SCORE);
    }

    let candidate_words: Vec<&str> = candidate.split_whitespace().collect();
    let query_words: Vec<&str> = query.split_whitespace().collect();
    let matched = query_words
        .iter()
        .filter(|q| {
            candidate_words
                .iter()
                .any(|c| c.contains(**q) || q.contains(*c))
        })
        .count();

    if matched > 0 {
        let ratio = matched as f64 / query_words.len() as f64;
        return (MatchKind::WordOverlap, WORD_OVERLAP_BASE + WORD_OVERLAP_SPAN * ratio);
    }

    (MatchKind::Fuzzy, FUZZY_SCALE * normalized_similarity(query, candidate))
}

/// Best score across every query-variant × candidate-variant pair.
///
/// Stops as soon as an exact pair is found since nothing scores higher.
pub fn best_score(query_variants: &[String], candidate_variants: &[String]) -> f64 {
    let mut best = 0.0_f64;

    for query in query_variants {
        for candidate in candidate_variants {
            let (kind, score) = score_pair(query, candidate);
            if kind == MatchKind::Exact {
                return 1.0;
            }
            best = best.max(score);
        }
    }

    best
}

/// Similarity of two raw strings under a lexicon, in `[0, 1]`.
///
/// # Example
/// ```
/// use medina_search::{similarity, Lexicon};
///
/// let lexicon = Lexicon::tunisian();
/// assert_eq!(similarity(&lexicon, "Nabeul", "نابل"), 1.0);
/// assert_eq!(similarity(&lexicon, "pottery", "Pottery Workshop"), 1.0);
/// ```
pub fn similarity(lexicon: &Lexicon, query: &str, candidate: &str) -> f64 {
    best_score(&lexicon.normalize(query), &lexicon.normalize(candidate))
}
