//! Language detection for query and listing text.

use crate::normalize::contains_arabic;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Languages the engine recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Arabic, Modern Standard or Tunisian dialect
    Ar,
    /// French
    Fr,
    /// English
    En,
}

impl Language {
    /// Every supported language, in detection order.
    pub const ALL: [Language; 3] = [Language::Ar, Language::Fr, Language::En];

    /// Two-letter language tag.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// Word boundaries are ASCII: accented letters count as separators.
static FRENCH_STOP_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?-u:\b)(et|le|la|les|de|du|des|dans|pour|avec|sur|sous|par|chez)(?-u:\b)").unwrap()
});

static ENGLISH_STOP_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?-u:\b)(the|and|or|but|in|on|at|to|for|of|with|by)(?-u:\b)").unwrap()
});

/// Detect the probable languages of a text fragment.
///
/// Arabic is recognized by script, French and English by common stop-words.
/// When nothing matches, every supported language is returned, so the result
/// is never empty.
///
/// # Example
/// ```
/// use medina_search::{detect_languages, Language};
///
/// assert_eq!(detect_languages("فخار نابل"), vec![Language::Ar]);
/// assert_eq!(detect_languages("atelier de poterie"), vec![Language::Fr]);
/// assert_eq!(detect_languages("Nabeul").len(), 3);
/// ```
pub fn detect_languages(text: &str) -> Vec<Language> {
    let mut languages = Vec::with_capacity(3);

    if contains_arabic(text) {
        languages.push(Language::Ar);
    }
    if FRENCH_STOP_WORDS.is_match(text) {
        languages.push(Language::Fr);
    }
    if ENGLISH_STOP_WORDS.is_match(text) {
        languages.push(Language::En);
    }

    if languages.is_empty() {
        return Language::ALL.to_vec();
    }
    languages
}
