//! Weighted multi-field ranking.
//!
//! Each configured field present on a record adds its weight to the record's
//! maximum possible score and `weight × similarity` to its total; list fields
//! add once per element. Relevance is `total / max_possible`, or 0 when the
//! record has none of the fields.

use crate::lexicon::Lexicon;
use crate::options::SearchOptions;
use crate::record::{FieldValue, SearchableRecord};
use crate::relevance::best_score;

/// Relevance of one record against precomputed query variants.
pub(crate) fn record_relevance(
    lexicon: &Lexicon,
    record: &SearchableRecord,
    query_variants: &[String],
    options: &SearchOptions,
) -> f64 {
    let mut total_score = 0.0;
    let mut max_possible_score = 0.0;

    for field in &options.fields {
        let Some(value) = record.field(field) else {
            continue;
        };

        let weight = options.weight_for(field);
        max_possible_score += weight;

        match value {
            FieldValue::Text(text) => {
                total_score += weight * best_score(query_variants, &lexicon.normalize(&text));
            }
            FieldValue::List(items) => {
                for item in &items {
                    total_score += weight * best_score(query_variants, &lexicon.normalize(item));
                }
            }
        }
    }

    if max_possible_score > 0.0 {
        total_score / max_possible_score
    } else {
        0.0
    }
}

/// Rank records against a query.
///
/// A blank query returns the first `limit` records in input order. Otherwise
/// records below `threshold` are dropped and the rest sorted by descending
/// relevance; the sort is stable, so ties keep their input order.
pub(crate) fn rank<'r>(
    lexicon: &Lexicon,
    records: &[&'r SearchableRecord],
    query: &str,
    options: &SearchOptions,
) -> Vec<&'r SearchableRecord> {
    if query.trim().is_empty() {
        return records.iter().copied().take(options.limit).collect();
    }

    let query_variants = lexicon.normalize(query);

    let mut scored = score_all(lexicon, records, &query_variants, options);
    let scored_count = scored.len();

    scored.retain(|(_, relevance)| *relevance >= options.threshold);
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(options.limit);

    tracing::debug!(
        candidates = scored_count,
        query_variants = query_variants.len(),
        returned = scored.len(),
        "Ranked records"
    );

    scored.into_iter().map(|(record, _)| record).collect()
}

fn score_all<'r>(
    lexicon: &Lexicon,
    records: &[&'r SearchableRecord],
    query_variants: &[String],
    options: &SearchOptions,
) -> Vec<(&'r SearchableRecord, f64)> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        records
            .par_iter()
            .map(|&record| (record, record_relevance(lexicon, record, query_variants, options)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        records
            .iter()
            .map(|&record| (record, record_relevance(lexicon, record, query_variants, options)))
            .collect()
    }
}
