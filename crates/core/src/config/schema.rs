//! Configuration schema definitions
//!
//! Search defaults and lexicon extensions, as read from TOML.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Ranking defaults applied when the caller passes no options
    #[serde(default)]
    pub search: SearchSettings,

    /// Language packs merged into the built-in lexicon, in file order
    #[serde(default)]
    pub languages: Vec<LanguageConfig>,
}

impl ConfigSchema {
    /// Check every value the engine would otherwise reject at call time.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()
    }
}

/// Ranking defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Minimum relevance (0-1) a record needs to be returned
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Fields examined for every record, in order
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Relative importance per field; unlisted fields weigh 1
    #[serde(default = "default_weights")]
    pub weights: BTreeMap<String, f64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            limit: default_limit(),
            fields: default_fields(),
            weights: default_weights(),
        }
    }
}

impl SearchSettings {
    fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::invalid_config_value(
                "search.threshold",
                format!("threshold must be between 0 and 1, got {}", self.threshold),
            ));
        }

        if self.limit == 0 {
            return Err(Error::invalid_config_value(
                "search.limit",
                "limit must be at least 1",
            ));
        }

        for (field, weight) in &self.weights {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(Error::invalid_config_value(
                    &format!("search.weights.{field}"),
                    format!("weight must be a positive number, got {weight}"),
                ));
            }
        }

        Ok(())
    }
}

fn default_threshold() -> f64 {
    0.2
}

fn default_limit() -> usize {
    20
}

fn default_fields() -> Vec<String> {
    vec![
        "title",
        "titleAlt",
        "description",
        "descriptionAlt",
        "location",
        "locationAlt",
        "tags",
        "tagsAlt",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_weights() -> BTreeMap<String, f64> {
    [
        ("title", 3.0),
        ("titleAlt", 3.0),
        ("description", 2.0),
        ("descriptionAlt", 2.0),
        ("location", 1.5),
        ("locationAlt", 1.5),
        ("tags", 1.0),
        ("tagsAlt", 1.0),
    ]
    .into_iter()
    .map(|(field, weight)| (field.to_string(), weight))
    .collect()
}

/// Lexicon extension for one language or dialect
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LanguageConfig {
    /// Language code, e.g. `ber`
    pub code: String,

    /// Single-character source letters mapped to a Latin approximation
    #[serde(default)]
    pub transliteration: BTreeMap<String, String>,

    /// Native term mapped to its Latin equivalents
    #[serde(default)]
    pub variations: BTreeMap<String, Vec<String>>,

    /// Latin pattern mapped to the native term it should add
    #[serde(default)]
    pub reverse_patterns: BTreeMap<String, String>,
}
