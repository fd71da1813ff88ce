//! Transliteration and dialect tables.
//!
//! A [`Lexicon`] holds the three tables every normalization step reads:
//!
//! - Arabic letter → Latin approximation
//! - Arabic term → Latin equivalents (city names, crafts, heritage vocabulary)
//! - Latin pattern → Arabic term
//!
//! The built-in tables cover Tunisian listing vocabulary. Further languages
//! and dialects are merged in with [`Lexicon::register`]; merging only adds or
//! overwrites, it never removes.

use medina_core::config::LanguageConfig;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Lexicon extension for one language or dialect.
///
/// Shares its shape with the `[[languages]]` configuration section.
pub type LanguagePack = LanguageConfig;

/// One dialect entry: a native term and its Latin equivalents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectEntry {
    /// Native-script term, e.g. `نابل`
    pub term: String,
    /// Lowercased Latin equivalents; the first one is the canonical spelling
    pub equivalents: Vec<String>,
}

/// Counts reported by a registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Transliteration rules added or overwritten
    pub transliteration: usize,
    /// Dialect entries added or overwritten
    pub variations: usize,
    /// Reverse patterns added or overwritten
    pub reverse_patterns: usize,
    /// Entries skipped for empty or invalid keys
    pub ignored: usize,
}

/// Normalization tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    pub(crate) transliteration: HashMap<char, String>,
    pub(crate) variations: Vec<DialectEntry>,
    pub(crate) reverse_patterns: Vec<(String, String)>,
}

const ARABIC_TO_LATIN: &[(char, &str)] = &[
    ('ا', "a"), ('أ', "a"), ('إ', "i"), ('آ', "aa"),
    ('ب', "b"), ('ت', "t"), ('ث', "th"), ('ج', "j"),
    ('ح', "h"), ('خ', "kh"), ('د', "d"), ('ذ', "dh"),
    ('ر', "r"), ('ز', "z"), ('س', "s"), ('ش', "sh"),
    ('ص', "s"), ('ض', "d"), ('ط', "t"), ('ظ', "z"),
    ('ع', "a"), ('غ', "gh"), ('ف', "f"), ('ق', "q"),
    ('ك', "k"), ('ل', "l"), ('م', "m"), ('ن', "n"),
    ('ه', "h"), ('و', "w"), ('ي', "y"), ('ى', "a"),
    ('ة', "a"), ('ء', "a"),
];

const TUNISIAN_VARIATIONS: &[(&str, &[&str])] = &[
    ("نابل", &["nabeul"]),
    ("قيروان", &["kairouan", "kairouane", "qayrawan"]),
    ("صفاقس", &["sfax", "safaqis"]),
    ("توزر", &["tozeur"]),
    ("دوز", &["douz"]),
    ("تونس", &["tunis", "tunisia", "tunisie"]),
    ("فخار", &["pottery", "ceramics", "poterie"]),
    ("نسيج", &["weaving", "textile", "tissage"]),
    ("نحاس", &["copper", "cuivre"]),
    ("زيتون", &["olive", "olivewood", "olivier"]),
    ("حرفي", &["artisan", "craftsman"]),
    ("تراث", &["heritage", "patrimoine"]),
    ("صحراء", &["desert", "sahara", "désert"]),
];

const LATIN_TO_ARABIC: &[(&str, &str)] = &[
    ("nabeul", "نابل"),
    ("kairouan", "قيروان"),
    ("sfax", "صفاقس"),
    ("tozeur", "توزر"),
    ("douz", "دوز"),
    ("tunis", "تونس"),
    ("pottery", "فخار"),
    ("weaving", "نسيج"),
    ("copper", "نحاس"),
    ("olive", "زيتون"),
    ("artisan", "حرفي"),
    ("heritage", "تراث"),
    ("desert", "صحراء"),
];

static TUNISIAN: Lazy<Lexicon> = Lazy::new(|| Lexicon {
    transliteration: ARABIC_TO_LATIN
        .iter()
        .map(|(letter, latin)| (*letter, (*latin).to_string()))
        .collect(),
    variations: TUNISIAN_VARIATIONS
        .iter()
        .map(|(term, equivalents)| DialectEntry {
            term: (*term).to_string(),
            equivalents: equivalents.iter().map(|e| (*e).to_string()).collect(),
        })
        .collect(),
    reverse_patterns: LATIN_TO_ARABIC
        .iter()
        .map(|(latin, arabic)| ((*latin).to_string(), (*arabic).to_string()))
        .collect(),
});

impl Default for Lexicon {
    fn default() -> Self {
        TUNISIAN.clone()
    }
}

impl Lexicon {
    /// Built-in Arabic / Tunisian dialect tables.
    pub fn tunisian() -> Self {
        Self::default()
    }

    /// Lexicon with no entries at all.
    pub fn empty() -> Self {
        Self {
            transliteration: HashMap::new(),
            variations: Vec::new(),
            reverse_patterns: Vec::new(),
        }
    }

    /// Latin approximation registered for a letter.
    pub fn transliteration_for(&self, letter: char) -> Option<&str> {
        self.transliteration.get(&letter).map(String::as_str)
    }

    /// Dialect entries in registration order.
    pub fn variations(&self) -> &[DialectEntry] {
        &self.variations
    }

    /// Arabic term a Latin pattern maps to.
    pub fn reverse_pattern(&self, latin: &str) -> Option<&str> {
        self.reverse_patterns
            .iter()
            .find(|(pattern, _)| pattern == latin)
            .map(|(_, arabic)| arabic.as_str())
    }

    /// Merge a language pack into the tables.
    ///
    /// Existing keys are overwritten in place and new keys appended, so
    /// iteration order stays stable. Entries with empty keys, multi-character
    /// transliteration keys, or variations without a usable Latin form are
    /// skipped.
    pub fn register(&mut self, pack: &LanguagePack) -> MergeStats {
        let mut stats = MergeStats::default();

        for (source, latin) in &pack.transliteration {
            let mut chars = source.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => {
                    self.transliteration.insert(letter, latin.clone());
                    stats.transliteration += 1;
                }
                _ => {
                    tracing::debug!(language = %pack.code, key = %source, "Ignoring transliteration rule");
                    stats.ignored += 1;
                }
            }
        }

        for (term, equivalents) in &pack.variations {
            let equivalents: Vec<String> = equivalents
                .iter()
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect();
            let term = term.trim();

            if term.is_empty() || equivalents.is_empty() {
                tracing::debug!(language = %pack.code, term = %term, "Ignoring dialect entry");
                stats.ignored += 1;
                continue;
            }

            match self.variations.iter_mut().find(|entry| entry.term == term) {
                Some(entry) => entry.equivalents = equivalents,
                None => self.variations.push(DialectEntry {
                    term: term.to_string(),
                    equivalents,
                }),
            }
            stats.variations += 1;
        }

        for (latin, native) in &pack.reverse_patterns {
            let latin = latin.trim().to_lowercase();
            let native = native.trim();

            if latin.is_empty() || native.is_empty() {
                tracing::debug!(language = %pack.code, pattern = %latin, "Ignoring reverse pattern");
                stats.ignored += 1;
                continue;
            }

            match self.reverse_patterns.iter_mut().find(|(pattern, _)| *pattern == latin) {
                Some((_, existing)) => *existing = native.to_string(),
                None => self.reverse_patterns.push((latin, native.to_string())),
            }
            stats.reverse_patterns += 1;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn pack() -> LanguagePack {
        LanguagePack {
            code: "ber".to_string(),
            transliteration: BTreeMap::from([("ⴰ".to_string(), "a".to_string())]),
            variations: BTreeMap::from([(
                "ⴰⵎⴰⵣⵉⵖ".to_string(),
                vec!["Amazigh".to_string(), "berber".to_string()],
            )]),
            reverse_patterns: BTreeMap::from([("amazigh".to_string(), "ⴰⵎⴰⵣⵉⵖ".to_string())]),
        }
    }

    #[test]
    fn test_builtin_tables() {
        let lexicon = Lexicon::tunisian();
        assert_eq!(lexicon.transliteration_for('ش'), Some("sh"));
        assert_eq!(lexicon.reverse_pattern("tozeur"), Some("توزر"));
        assert_eq!(lexicon.variations()[0].term, "نابل");
        assert_eq!(lexicon.variations()[0].equivalents, vec!["nabeul"]);
    }

    #[test]
    fn test_register_adds_entries() {
        let mut lexicon = Lexicon::tunisian();
        let before = lexicon.variations().len();

        let stats = lexicon.register(&pack());

        assert_eq!(stats, MergeStats { transliteration: 1, variations: 1, reverse_patterns: 1, ignored: 0 });
        assert_eq!(lexicon.transliteration_for('ⴰ'), Some("a"));
        assert_eq!(lexicon.variations().len(), before + 1);
        // Latin equivalents are stored lowercased
        assert_eq!(lexicon.variations().last().unwrap().equivalents[0], "amazigh");
        assert_eq!(lexicon.reverse_pattern("amazigh"), Some("ⴰⵎⴰⵣⵉⵖ"));
    }

    #[test]
    fn test_register_overwrites_in_place() {
        let mut lexicon = Lexicon::tunisian();
        let position = lexicon.variations().iter().position(|e| e.term == "توزر").unwrap();

        let update = LanguagePack {
            code: "ar-tn".to_string(),
            variations: BTreeMap::from([(
                "توزر".to_string(),
                vec!["tozeur".to_string(), "touzeur".to_string()],
            )]),
            ..Default::default()
        };
        lexicon.register(&update);

        assert_eq!(lexicon.variations()[position].equivalents, vec!["tozeur", "touzeur"]);
        assert_eq!(lexicon.variations().len(), Lexicon::tunisian().variations().len());
    }

    #[test]
    fn test_register_ignores_invalid_keys() {
        let mut lexicon = Lexicon::tunisian();
        let invalid = LanguagePack {
            code: "xx".to_string(),
            transliteration: BTreeMap::from([
                (String::new(), "a".to_string()),
                ("ab".to_string(), "b".to_string()),
            ]),
            variations: BTreeMap::from([
                (String::new(), vec!["x".to_string()]),
                ("ⵣ".to_string(), vec![]),
                ("ⵣⵣ".to_string(), vec!["  ".to_string()]),
            ]),
            reverse_patterns: BTreeMap::from([(" ".to_string(), "ⵣ".to_string())]),
        };

        let stats = lexicon.register(&invalid);

        assert_eq!(stats.ignored, 6);
        assert_eq!(stats.transliteration + stats.variations + stats.reverse_patterns, 0);
        assert_eq!(lexicon, Lexicon::tunisian());
    }

    #[test]
    fn test_empty_lexicon() {
        let lexicon = Lexicon::empty();
        assert!(lexicon.variations().is_empty());
        assert_eq!(lexicon.transliteration_for('ب'), None);
    }
}
