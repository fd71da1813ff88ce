//! Ranking options and structured filters.

use crate::error::{Result, SearchError};
use medina_core::config::SearchSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for one ranking call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Minimum relevance (0-1) for a record to be returned
    pub threshold: f64,
    /// Maximum number of results
    pub limit: usize,
    /// Field names examined, in order
    pub fields: Vec<String>,
    /// Relative importance per field; fields not listed weigh 1
    pub weights: BTreeMap<String, f64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchSettings::default().into()
    }
}

impl From<SearchSettings> for SearchOptions {
    fn from(settings: SearchSettings) -> Self {
        Self {
            threshold: settings.threshold,
            limit: settings.limit,
            fields: settings.fields,
            weights: settings.weights,
        }
    }
}

impl SearchOptions {
    /// Header search-bar preset: few results over titles, locations and type.
    pub fn quick_lookup() -> Self {
        Self {
            threshold: 0.2,
            limit: 8,
            fields: ["title", "titleAlt", "location", "locationAlt", "type"]
                .into_iter()
                .map(String::from)
                .collect(),
            weights: [
                ("title", 3.0),
                ("titleAlt", 3.0),
                ("location", 2.0),
                ("locationAlt", 2.0),
                ("type", 1.0),
            ]
            .into_iter()
            .map(|(field, weight)| (field.to_string(), weight))
            .collect(),
        }
    }

    /// Region browsing preset: default fields with a stricter threshold.
    pub fn browse(limit: usize) -> Self {
        Self {
            threshold: 0.3,
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Replace the examined fields.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_weight(mut self, field: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(field.into(), weight);
        self
    }

    /// Weight for a field, defaulting to 1.
    pub fn weight_for(&self, field: &str) -> f64 {
        self.weights.get(field).copied().unwrap_or(1.0)
    }

    /// Reject values with no sane interpretation.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::InvalidOption(format!(
                "threshold must be between 0 and 1, got {}",
                self.threshold
            )));
        }

        if self.limit == 0 {
            return Err(SearchError::InvalidOption("limit must be at least 1".to_string()));
        }

        if let Some((field, weight)) = self
            .weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(SearchError::InvalidOption(format!(
                "weight for `{field}` must be a positive number, got {weight}"
            )));
        }

        Ok(())
    }
}

/// Structured pre-filter applied before ranking.
///
/// Every criterion that is set must hold (AND semantics).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Region matched fuzzily against `location` / `locationAlt`
    pub region: Option<String>,
    /// Category matched against the `type` attribute and tags
    pub category: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
}

impl FilterCriteria {
    /// Criteria with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_min_price(mut self, min_price: f64) -> Self {
        self.min_price = Some(min_price);
        self
    }

    #[must_use]
    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// True when no criterion would narrow the collection.
    pub fn is_empty(&self) -> bool {
        self.region().is_none()
            && self.category().is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Region term, if set and not blank.
    pub fn region(&self) -> Option<&str> {
        non_blank(self.region.as_deref())
    }

    /// Category term, if set and not blank.
    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Reject price bounds that cannot be compared.
    pub fn validate(&self) -> Result<()> {
        for (name, bound) in [("minPrice", self.min_price), ("maxPrice", self.max_price)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(SearchError::InvalidOption(format!(
                        "{name} must be a finite number, got {value}"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
