//! Text normalization: diacritics, transliteration and dialect variants.
//!
//! Every comparison the engine makes goes through [`Lexicon::normalize`],
//! which turns one input string into the set of forms it should be compared
//! as. All returned sets are deduplicated and keep first-seen order, so the
//! output is reproducible for a given lexicon.

use crate::lexicon::Lexicon;
use std::borrow::Cow;

/// Returns true if the text contains any Arabic-block code point.
#[inline]
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(is_arabic)
}

#[inline]
fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

#[inline]
fn is_diacritic(c: char) -> bool {
    ('\u{064B}'..='\u{065F}').contains(&c) || c == '\u{0670}'
}

/// Remove Arabic tashkeel marks.
///
/// Returns the input borrowed when there is nothing to strip, so callers can
/// check `matches!(result, Cow::Borrowed(_))` to learn whether anything changed.
///
/// # Example
/// ```
/// use medina_search::strip_diacritics;
/// use std::borrow::Cow;
///
/// assert_eq!(strip_diacritics("نَابِل"), "نابل");
/// assert!(matches!(strip_diacritics("نابل"), Cow::Borrowed(_)));
/// ```
pub fn strip_diacritics(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_diacritic) {
        Cow::Owned(text.chars().filter(|c| !is_diacritic(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Token separators: whitespace, zero-width (non-)joiners, no-break space
/// and common punctuation.
#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '\u{200C}' | '\u{200D}' | '\u{00A0}' | ',' | '.' | ';' | ':' | '!' | '?' | '(' | ')'
                | '[' | ']' | '{' | '}' | '\'' | '"'
        )
}

fn push_unique(forms: &mut Vec<String>, form: String) {
    if !forms.contains(&form) {
        forms.push(form);
    }
}

impl Lexicon {
    /// Map each letter to its Latin approximation.
    ///
    /// Characters without a rule pass through unchanged. Runs of whitespace
    /// are collapsed to one space and the result is trimmed. Lossy by
    /// construction: several letters share a Latin form.
    pub fn transliterate(&self, text: &str) -> String {
        let mapped: String = text
            .chars()
            .map(|c| match self.transliteration.get(&c) {
                Some(latin) => Cow::Borrowed(latin.as_str()),
                None => Cow::Owned(c.to_string()),
            })
            .collect();

        mapped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// True if any character of `text` has a transliteration rule.
    pub fn has_transliteration(&self, text: &str) -> bool {
        text.chars().any(|c| self.transliteration.contains_key(&c))
    }

    /// Expand a term into its known dialect and cross-language variants.
    ///
    /// The lowercased input comes first. A dialect entry fires when the text
    /// contains its native term or its canonical Latin spelling, and adds the
    /// native term plus every Latin equivalent. Text with a transliteration
    /// rule for any of its letters also yields its transliteration; text matching a reverse pattern yields the
    /// mapped native term.
    pub fn expand_dialect_variants(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut variants = vec![lower.clone()];

        for entry in &self.variations {
            let canonical = entry.equivalents.first().map_or("", String::as_str);
            let fires = text.contains(entry.term.as_str())
                || (!canonical.is_empty() && lower.contains(canonical));

            if fires {
                for equivalent in &entry.equivalents {
                    push_unique(&mut variants, equivalent.clone());
                }
                push_unique(&mut variants, entry.term.clone());
            }
        }

        if self.has_transliteration(text) {
            let stripped = strip_diacritics(text);
            push_unique(&mut variants, self.transliterate(&stripped).to_lowercase());
        }

        for (latin, native) in &self.reverse_patterns {
            if lower.contains(latin.as_str()) {
                push_unique(&mut variants, native.clone());
            }
        }

        variants
    }

    /// All forms a string should be compared as.
    ///
    /// Union of the trimmed lowercase text, its diacritic-free form, its
    /// transliteration when any letter has a rule, and the dialect variants
    /// of both the raw and diacritic-free text.
    ///
    /// # Example
    /// ```
    /// use medina_search::Lexicon;
    ///
    /// let forms = Lexicon::tunisian().normalize("Nabeul");
    /// assert_eq!(forms, vec!["nabeul".to_string(), "نابل".to_string()]);
    /// ```
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let mut forms = vec![text.trim().to_lowercase()];

        let stripped = strip_diacritics(text);
        let changed = matches!(stripped, Cow::Owned(_));

        if changed {
            push_unique(&mut forms, stripped.trim().to_lowercase());
        }

        if self.has_transliteration(text) {
            push_unique(&mut forms, self.transliterate(&stripped).to_lowercase());
        }

        for variant in self.expand_dialect_variants(text) {
            push_unique(&mut forms, variant);
        }

        if changed {
            for variant in self.expand_dialect_variants(&stripped) {
                push_unique(&mut forms, variant);
            }
        }

        forms
    }

    /// Split text into lowercase tokens, each followed by its normalized forms.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut tokens = Vec::new();

        for token in lower.split(is_separator).filter(|t| !t.is_empty()) {
            push_unique(&mut tokens, token.to_string());
            for form in self.normalize(token) {
                push_unique(&mut tokens, form);
            }
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::tunisian()
    }

    #[test]
    fn test_contains_arabic() {
        assert!(contains_arabic("Dar دار"));
        assert!(!contains_arabic("Dar Khaled"));
        assert!(!contains_arabic(""));
    }

    #[test]
    fn test_strip_diacritics_removes_tashkeel() {
        assert_eq!(strip_diacritics("تُرَاث"), "تراث");
        // superscript alef
        assert_eq!(strip_diacritics("هٰذا"), "هذا");
    }

    #[test]
    fn test_strip_diacritics_preserves_identity() {
        assert!(matches!(strip_diacritics("Pottery"), Cow::Borrowed(_)));
        assert!(matches!(strip_diacritics("فخار"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_transliterate_letters() {
        assert_eq!(lexicon().transliterate("نابل"), "nabl");
        assert_eq!(lexicon().transliterate("شمس"), "shms");
    }

    #[test]
    fn test_transliterate_passes_latin_through() {
        assert_eq!(lexicon().transliterate("Dar خالد"), "Dar khald");
    }

    #[test]
    fn test_transliterate_collapses_whitespace() {
        assert_eq!(lexicon().transliterate("  دار \t خالد  "), "dar khald");
    }

    #[test]
    fn test_expand_from_arabic() {
        let variants = lexicon().expand_dialect_variants("قيروان");
        assert_eq!(
            variants,
            vec!["قيروان", "kairouan", "kairouane", "qayrawan", "qyrwan"]
        );
    }

    #[test]
    fn test_expand_from_latin() {
        let variants = lexicon().expand_dialect_variants("Sfax");
        assert_eq!(variants, vec!["sfax", "safaqis", "صفاقس"]);
    }

    #[test]
    fn test_expand_matches_inside_longer_text() {
        let variants = lexicon().expand_dialect_variants("Pottery Workshop");
        assert!(variants.contains(&"pottery workshop".to_string()));
        assert!(variants.contains(&"poterie".to_string()));
        assert!(variants.contains(&"فخار".to_string()));
    }

    #[test]
    fn test_expand_unknown_term() {
        assert_eq!(lexicon().expand_dialect_variants("Hammamet"), vec!["hammamet"]);
    }

    #[test]
    fn test_normalize_latin() {
        assert_eq!(lexicon().normalize("  Tozeur "), vec!["tozeur", "  tozeur ", "توزر"]);
    }

    #[test]
    fn test_normalize_vocalized_arabic_reaches_dialect_table() {
        let forms = lexicon().normalize("نَابِل");
        assert_eq!(forms[0], "نَابِل");
        assert!(forms.contains(&"نابل".to_string()));
        assert!(forms.contains(&"nabl".to_string()));
        assert!(forms.contains(&"nabeul".to_string()));
    }

    #[test]
    fn test_normalize_is_deduplicated() {
        let forms = lexicon().normalize("nabeul");
        let mut unique = forms.clone();
        unique.dedup();
        assert_eq!(forms, unique);
        assert_eq!(forms, vec!["nabeul", "نابل"]);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation_and_joiners() {
        let tokens = lexicon().tokenize("Dar Khaled, Tozeur\u{200C}oasis");
        assert_eq!(&tokens[..2], &["dar".to_string(), "khaled".to_string()]);
        assert!(tokens.contains(&"tozeur".to_string()));
        assert!(tokens.contains(&"توزر".to_string()));
        assert!(tokens.contains(&"oasis".to_string()));
        assert!(!tokens.iter().any(|t| t.contains(',')));
    }

    #[test]
    fn test_registered_script_is_transliterated() {
        let mut lexicon = lexicon();
        assert_eq!(lexicon.normalize("ⴰⵣⵓⵍ"), vec!["ⴰⵣⵓⵍ"]);

        lexicon.register(&crate::lexicon::LanguagePack {
            code: "ber".to_string(),
            transliteration: [("ⴰ", "a"), ("ⵣ", "z"), ("ⵓ", "u"), ("ⵍ", "l")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        });

        assert!(lexicon.has_transliteration("ⴰⵣⵓⵍ"));
        assert!(!lexicon.has_transliteration("azul"));
        assert_eq!(lexicon.normalize("ⴰⵣⵓⵍ"), vec!["ⴰⵣⵓⵍ", "azul"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(lexicon().tokenize("  ,;  ").is_empty());
    }
}
