//! Search engine facade.
//!
//! [`SearchEngine`] owns the lexicon and default options. Lexicon updates are
//! copy-on-write: readers take a snapshot `Arc` and release the lock before
//! scoring, so concurrent `rank` calls never wait on each other and a
//! registration never changes the tables under a running call.

use crate::error::Result;
use crate::filter::apply_filters;
use crate::language::detect_languages;
use crate::lexicon::{LanguagePack, Lexicon, MergeStats};
use crate::options::{FilterCriteria, SearchOptions};
use crate::rank::{rank, record_relevance};
use crate::record::SearchableRecord;
use medina_core::config::Config;
use std::sync::{Arc, PoisonError, RwLock};

/// Multi-language search engine over caller-supplied records.
#[derive(Debug)]
pub struct SearchEngine {
    lexicon: RwLock<Arc<Lexicon>>,
    defaults: SearchOptions,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(Lexicon::tunisian())
    }
}

impl SearchEngine {
    /// Creates an engine over a lexicon with default options.
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: RwLock::new(Arc::new(lexicon)),
            defaults: SearchOptions::default(),
        }
    }

    /// Builds an engine from loaded configuration.
    ///
    /// Defaults come from `[search]`; every `[[languages]]` pack is merged
    /// into the built-in lexicon in file order.
    pub fn from_config(config: &Config) -> Result<Self> {
        let defaults = SearchOptions::from(config.schema.search.clone());
        defaults.validate()?;

        let mut lexicon = Lexicon::tunisian();
        for pack in &config.schema.languages {
            let stats = lexicon.register(pack);
            log_merge(&pack.code, stats);
        }

        Ok(Self {
            lexicon: RwLock::new(Arc::new(lexicon)),
            defaults,
        })
    }

    /// Replace the default options.
    pub fn with_defaults(mut self, defaults: SearchOptions) -> Result<Self> {
        defaults.validate()?;
        self.defaults = defaults;
        Ok(self)
    }

    /// Options used when a call passes none.
    pub fn defaults(&self) -> &SearchOptions {
        &self.defaults
    }

    /// Snapshot of the current lexicon.
    pub fn lexicon(&self) -> Arc<Lexicon> {
        Arc::clone(&self.lexicon.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Rank records against a free-text query.
    ///
    /// Returns the matching records, most relevant first. Scores are not
    /// exposed; see [`SearchEngine::relevance`] for diagnostics.
    ///
    /// # Example
    /// ```
    /// use medina_search::{SearchEngine, SearchableRecord};
    ///
    /// let engine = SearchEngine::default();
    /// let records = vec![
    ///     SearchableRecord::new("1").with_title("Pottery Workshop").with_location("Nabeul"),
    ///     SearchableRecord::new("2").with_title("Weaving Class").with_location("Kairouan"),
    /// ];
    ///
    /// let results = engine.rank(&records, "فخار", None).unwrap();
    /// assert_eq!(results[0].id, "1");
    /// ```
    pub fn rank<'r>(
        &self,
        records: &'r [SearchableRecord],
        query: &str,
        options: Option<&SearchOptions>,
    ) -> Result<Vec<&'r SearchableRecord>> {
        let options = options.unwrap_or(&self.defaults);
        options.validate()?;

        let lexicon = self.lexicon();
        tracing::debug!(
            records = records.len(),
            languages = ?detect_languages(query),
            limit = options.limit,
            threshold = options.threshold,
            "Searching"
        );

        let candidates: Vec<&SearchableRecord> = records.iter().collect();
        Ok(rank(&lexicon, &candidates, query, options))
    }

    /// Filter by structured criteria, then rank the survivors.
    ///
    /// A blank query with a region filter lists every record in that region,
    /// in input order, up to `limit`.
    pub fn rank_with_filters<'r>(
        &self,
        records: &'r [SearchableRecord],
        query: &str,
        filters: &FilterCriteria,
        options: Option<&SearchOptions>,
    ) -> Result<Vec<&'r SearchableRecord>> {
        let options = options.unwrap_or(&self.defaults);
        options.validate()?;
        filters.validate()?;

        let lexicon = self.lexicon();
        let filtered = apply_filters(&lexicon, records, filters);
        tracing::debug!(
            records = records.len(),
            filtered = filtered.len(),
            "Applied filters"
        );

        Ok(rank(&lexicon, &filtered, query, options))
    }

    /// Merge a language pack into the lexicon.
    ///
    /// Invalid entries are skipped. Calls already running keep the tables
    /// they started with.
    pub fn register_language(&self, pack: &LanguagePack) {
        let mut guard = self.lexicon.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = Lexicon::clone(&guard);
        let stats = updated.register(pack);
        *guard = Arc::new(updated);
        drop(guard);

        log_merge(&pack.code, stats);
    }

    /// Relevance a record would receive for a query.
    pub fn relevance(&self, record: &SearchableRecord, query: &str, options: Option<&SearchOptions>) -> f64 {
        let options = options.unwrap_or(&self.defaults);
        let lexicon = self.lexicon();
        record_relevance(&lexicon, record, &lexicon.normalize(query), options)
    }

    /// Similarity of two strings under the current lexicon.
    pub fn similarity(&self, query: &str, candidate: &str) -> f64 {
        crate::relevance::similarity(&self.lexicon(), query, candidate)
    }

    /// Normalized forms of a string under the current lexicon.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        self.lexicon().normalize(text)
    }
}

fn log_merge(code: &str, stats: MergeStats) {
    tracing::debug!(
        language = %code,
        transliteration = stats.transliteration,
        variations = stats.variations,
        reverse_patterns = stats.reverse_patterns,
        ignored = stats.ignored,
        "Registered language"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use std::collections::BTreeMap;
    use std::thread;

    fn ids(results: &[&SearchableRecord]) -> Vec<String> {
        results.iter().map(|r| r.id.clone()).collect()
    }

    fn berber_pack() -> LanguagePack {
        LanguagePack {
            code: "ber".to_string(),
            variations: BTreeMap::from([(
                "ⴰⵎⴰⵣⵉⵖ".to_string(),
                vec!["amazigh".to_string(), "berber".to_string()],
            )]),
            reverse_patterns: BTreeMap::from([("amazigh".to_string(), "ⴰⵎⴰⵣⵉⵖ".to_string())]),
            ..Default::default()
        }
    }

    fn village() -> Vec<SearchableRecord> {
        vec![
            SearchableRecord::new("tamezret").with_title("ⴰⵎⴰⵣⵉⵖ Village Stay"),
            SearchableRecord::new("sfax").with_title("Heritage Tour").with_location("Sfax"),
        ]
    }

    #[test]
    fn test_invalid_options_fail_fast() {
        let engine = SearchEngine::default();
        let options = SearchOptions::default().with_threshold(1.5);

        let records = village();
        let err = engine.rank(&records, "tour", Some(&options)).unwrap_err();
        assert!(matches!(err, SearchError::InvalidOption(_)));
    }

    #[test]
    fn test_invalid_price_bound_fails_fast() {
        let engine = SearchEngine::default();
        let filters = FilterCriteria::new().with_min_price(f64::NAN);

        assert!(engine.rank_with_filters(&village(), "", &filters, None).is_err());
    }

    #[test]
    fn test_register_language_enables_cross_script_match() {
        let engine = SearchEngine::default();
        let records = village();

        assert!(engine.rank(&records, "amazigh", None).unwrap().is_empty());

        engine.register_language(&berber_pack());

        let results = engine.rank(&records, "amazigh", None).unwrap();
        assert_eq!(ids(&results), vec!["tamezret"]);
    }

    #[test]
    fn test_register_language_ignores_invalid_entries() {
        let engine = SearchEngine::default();
        let before = engine.lexicon();

        engine.register_language(&LanguagePack {
            code: "xx".to_string(),
            transliteration: BTreeMap::from([(String::new(), "x".to_string())]),
            ..Default::default()
        });

        assert_eq!(*engine.lexicon(), *before);
    }

    #[test]
    fn test_snapshot_unaffected_by_registration() {
        let engine = SearchEngine::default();
        let snapshot = engine.lexicon();

        engine.register_language(&berber_pack());

        assert!(snapshot.reverse_pattern("amazigh").is_none());
        assert_eq!(engine.lexicon().reverse_pattern("amazigh"), Some("ⴰⵎⴰⵣⵉⵖ"));
    }

    #[test]
    fn test_concurrent_reads_during_registration() {
        let engine = Arc::new(SearchEngine::default());
        let records = Arc::new(village());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                let records = Arc::clone(&records);
                thread::spawn(move || {
                    for _ in 0..20 {
                        let results = engine.rank(&records, "Sfax", None).unwrap();
                        assert_eq!(results[0].id, "sfax");
                    }
                })
            })
            .collect();

        engine.register_language(&berber_pack());

        for reader in readers {
            reader.join().unwrap();
        }
        assert!(engine.lexicon().reverse_pattern("amazigh").is_some());
    }

    #[test]
    fn test_from_config() {
        let config = Config::from_toml_str(
            r#"
            [search]
            limit = 1
            fields = ["title"]

            [[languages]]
            code = "ber"
            [languages.variations]
            "ⴰⵎⴰⵣⵉⵖ" = ["amazigh", "berber"]
            "#,
        )
        .unwrap();

        let engine = SearchEngine::from_config(&config).unwrap();
        assert_eq!(engine.defaults().limit, 1);
        assert_eq!(engine.defaults().fields, vec!["title"]);

        let records = village();
        let results = engine.rank(&records, "Amazigh", None).unwrap();
        assert_eq!(ids(&results), vec!["tamezret"]);
    }

    #[test]
    fn test_with_defaults_validates() {
        assert!(SearchEngine::default()
            .with_defaults(SearchOptions::default().with_limit(0))
            .is_err());
    }

    #[test]
    fn test_browse_region_with_empty_query() {
        let engine = SearchEngine::default();
        let records = vec![
            SearchableRecord::new("a").with_title("Desert Stars Camp").with_location("Douz"),
            SearchableRecord::new("b").with_title("Dar Khaled").with_location("Tozeur"),
            SearchableRecord::new("c").with_title("Oasis Heritage Resort").with_location_alt("توزر"),
        ];
        let filters = FilterCriteria::new().with_region("Tozeur");

        let results = engine
            .rank_with_filters(&records, "", &filters, Some(&SearchOptions::browse(20)))
            .unwrap();
        assert_eq!(ids(&results), vec!["b", "c"]);
    }

    #[test]
    fn test_diagnostics() {
        let engine = SearchEngine::default();
        let record = SearchableRecord::new("1").with_title("Pottery Workshop");

        assert_eq!(engine.similarity("Nabeul", "نابل"), 1.0);
        assert_eq!(engine.normalize("Sfax"), vec!["sfax", "safaqis", "صفاقس"]);
        assert_eq!(engine.relevance(&record, "pottery", None), 1.0);
        assert_eq!(engine.relevance(&SearchableRecord::new("2"), "pottery", None), 0.0);
    }
}
