//! Multi-language fuzzy search for Medina listings.
//!
//! Ranks accommodations, guides, artisans and events against free-text
//! queries in Arabic (Modern Standard and Tunisian dialect), French or
//! English, optionally narrowed by region, category and price.
//!
//! This crate provides:
//! - Language detection and Arabic normalization (tashkeel, transliteration)
//! - Tunisian dialect and cross-language variant expansion
//! - Tiered similarity scoring with Levenshtein fallback
//! - Weighted multi-field ranking and structured filters
//! - A runtime-extensible lexicon
//!
//! # Example
//!
//! ```
//! use medina_search::{FilterCriteria, SearchEngine, SearchableRecord};
//!
//! let engine = SearchEngine::default();
//! let records = vec![
//!     SearchableRecord::new("1").with_title("Oasis Heritage Resort").with_location("Tozeur").with_attribute("price", 30000),
//!     SearchableRecord::new("2").with_title("Desert Adventure Guide").with_location("توزر").with_attribute("price", 5000),
//! ];
//!
//! let filters = FilterCriteria::new().with_region("Tozeur").with_min_price(10000.0);
//! let results = engine.rank_with_filters(&records, "heritage", &filters, None).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].id, "1");
//! ```

mod engine;
mod error;
mod filter;
mod fuzzy;
mod language;
mod lexicon;
mod normalize;
mod options;
mod rank;
mod record;
mod relevance;

#[cfg(feature = "wasm")]
mod wasm;

pub use engine::SearchEngine;
pub use error::{Result, SearchError, SearchErrorCode};
pub use filter::REGION_SIMILARITY_CUTOFF;
pub use fuzzy::{levenshtein_distance, normalized_similarity};
pub use language::{detect_languages, Language};
pub use lexicon::{DialectEntry, LanguagePack, Lexicon, MergeStats};
pub use normalize::{contains_arabic, strip_diacritics};
pub use options::{FilterCriteria, SearchOptions};
pub use record::{FieldValue, SearchableRecord};
pub use relevance::{best_score, score_pair, similarity, MatchKind};
