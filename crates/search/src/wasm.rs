//! WASM bindings for listing search.

use crate::{SearchEngine, SearchOptions, SearchableRecord};
use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

static ENGINE: Lazy<SearchEngine> = Lazy::new(SearchEngine::default);

/// Similarity (0-1) between two strings across scripts and dialects.
#[wasm_bindgen]
pub fn similarity_score(query: &str, text: &str) -> f64 {
    ENGINE.similarity(query, text)
}

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}

/// Detected language tags for a text, comma separated.
#[wasm_bindgen]
pub fn detect_language_codes(text: &str) -> String {
    crate::detect_languages(text)
        .iter()
        .map(|language| language.code())
        .collect::<Vec<_>>()
        .join(",")
}

/// Rank listings and return their ids as JSON.
///
/// # Arguments
/// * `query` - Search query
/// * `records_json` - JSON array of records with `id`, `title`, `titleAlt`, ...
/// * `options_json` - JSON search options; empty string for defaults
///
/// # Returns
/// JSON array of ids in ranked order. Malformed JSON and rejected options
/// are thrown as errors, so `[]` always means no match.
#[wasm_bindgen]
pub fn search_listings(query: &str, records_json: &str, options_json: &str) -> Result<String, JsValue> {
    rank_listings_json(&ENGINE, query, records_json, options_json).map_err(|e| JsValue::from_str(&e))
}

fn rank_listings_json(
    engine: &SearchEngine,
    query: &str,
    records_json: &str,
    options_json: &str,
) -> Result<String, String> {
    let records: Vec<SearchableRecord> =
        serde_json::from_str(records_json).map_err(|e| format!("JSON parse error: {e}"))?;

    let options: SearchOptions = if options_json.trim().is_empty() {
        SearchOptions::default()
    } else {
        serde_json::from_str(options_json).map_err(|e| format!("JSON parse error: {e}"))?
    };

    let results = engine
        .rank(&records, query, Some(&options))
        .map_err(|e| format!("E{}: {e}", e.code() as u32))?;
    let ids: Vec<&str> = results.iter().map(|record| record.id.as_str()).collect();

    serde_json::to_string(&ids).map_err(|e| format!("JSON serialize error: {e}"))
}
