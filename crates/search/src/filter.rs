//! Structured pre-filtering by region, category and price.

use crate::lexicon::Lexicon;
use crate::options::FilterCriteria;
use crate::record::SearchableRecord;
use crate::relevance::similarity;

/// Region similarity a location must exceed when it does not contain the term.
pub const REGION_SIMILARITY_CUTOFF: f64 = 0.7;

/// Keep the records satisfying every criterion that is set.
///
/// Region and category terms are expanded with [`Lexicon::normalize`], so an
/// Arabic region matches a Latin location and the reverse.
pub(crate) fn apply_filters<'r>(
    lexicon: &Lexicon,
    records: &'r [SearchableRecord],
    criteria: &FilterCriteria,
) -> Vec<&'r SearchableRecord> {
    let mut filtered: Vec<&SearchableRecord> = records.iter().collect();

    if let Some(region) = criteria.region() {
        let variants = lexicon.normalize(region);
        filtered.retain(|record| matches_region(lexicon, record, &variants));
        tracing::trace!(region = %region, remaining = filtered.len(), "Applied region filter");
    }

    if let Some(category) = criteria.category() {
        let variants = lexicon.normalize(category);
        filtered.retain(|record| matches_category(record, &variants));
        tracing::trace!(category = %category, remaining = filtered.len(), "Applied category filter");
    }

    if criteria.min_price.is_some() || criteria.max_price.is_some() {
        filtered.retain(|record| within_price(record, criteria.min_price, criteria.max_price));
        tracing::trace!(remaining = filtered.len(), "Applied price filter");
    }

    filtered
}

fn matches_region(lexicon: &Lexicon, record: &SearchableRecord, variants: &[String]) -> bool {
    let locations: Vec<String> = [record.location.as_deref(), record.location_alt.as_deref()]
        .into_iter()
        .flatten()
        .filter(|l| !l.is_empty())
        .map(str::to_lowercase)
        .collect();

    variants.iter().any(|variant| {
        locations.iter().any(|location| {
            (!variant.is_empty() && location.contains(variant.as_str()))
                || similarity(lexicon, variant, location) > REGION_SIMILARITY_CUTOFF
        })
    })
}

fn matches_category(record: &SearchableRecord, variants: &[String]) -> bool {
    let kind = record.kind().map(str::to_lowercase);
    let tags: Vec<String> = record
        .tags
        .iter()
        .chain(record.tags_alt.iter())
        .flatten()
        .map(|tag| tag.to_lowercase())
        .collect();

    variants.iter().filter(|v| !v.is_empty()).any(|variant| {
        kind.as_deref().is_some_and(|k| k.contains(variant.as_str()))
            || tags.iter().any(|tag| tag.contains(variant.as_str()))
    })
}

fn within_price(record: &SearchableRecord, min: Option<f64>, max: Option<f64>) -> bool {
    let Some(price) = record.price() else {
        return false;
    };

    min.is_none_or(|min| price >= min) && max.is_none_or(|max| price <= max)
}
