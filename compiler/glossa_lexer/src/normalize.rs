//! Greek accent and case folding for keyword matching.
//!
//! Glossa keywords match regardless of letter case and regardless of the
//! tonos/dialytika accents Greek typists may or may not produce, so
//! `ΠΡΌΓΡΑΜΜΑ`, `Πρόγραμμα`, and `προγραμμα` all classify as the same
//! keyword. Folding affects classification only: the token's lexeme and
//! span always show the text as typed.
//!
//! Final sigma needs care: lowercasing `ΤΕΛΟΣ` by char gives `τελοσ` (no
//! positional sigma handling), while a typist writes `τέλος`. Folding
//! `ς` to `σ` (as Unicode simple case folding does) makes both meet at one
//! canonical spelling, so the keyword tables store `σ` throughout.

use std::borrow::Cow;

/// Fold one character to its canonical form: strip tonos/dialytika, fold
/// final sigma, lowercase.
fn fold_char(c: char) -> char {
    match c {
        'ά' | 'Ά' => 'α',
        'έ' | 'Έ' => 'ε',
        'ή' | 'Ή' => 'η',
        'ί' | 'Ί' | 'ϊ' | 'ΐ' | 'Ϊ' => 'ι',
        'ό' | 'Ό' => 'ο',
        'ύ' | 'Ύ' | 'ϋ' | 'ΰ' | 'Ϋ' => 'υ',
        'ώ' | 'Ώ' => 'ω',
        'ς' => 'σ',
        c if c.is_uppercase() => c.to_lowercase().next().unwrap_or(c),
        c => c,
    }
}

/// Fold a word to its canonical form for keyword lookup.
///
/// Borrows when the word is already canonical, which covers the common
/// case of identifiers and unaccented lowercase keywords.
pub fn normalize(word: &str) -> Cow<'_, str> {
    if word.chars().all(|c| fold_char(c) == c) {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(word.chars().map(fold_char).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::normalize;
    use std::borrow::Cow;

    #[test]
    fn canonical_word_borrows() {
        assert!(matches!(normalize("προγραμμα"), Cow::Borrowed(_)));
        assert!(matches!(normalize("x2"), Cow::Borrowed(_)));
    }

    #[test]
    fn accents_are_stripped() {
        assert_eq!(normalize("πρόγραμμα"), "προγραμμα");
        assert_eq!(normalize("αλλιώς_αν"), "αλλιωσ_αν");
    }

    #[test]
    fn case_is_folded() {
        assert_eq!(normalize("ΠΡΟΓΡΑΜΜΑ"), "προγραμμα");
        assert_eq!(normalize("Αν"), "αν");
        assert_eq!(normalize("DIV"), "div");
    }

    #[test]
    fn uppercase_accents_are_stripped() {
        assert_eq!(normalize("ΠΡΌΓΡΑΜΜΑ"), "προγραμμα");
        assert_eq!(normalize("Ή"), "η");
    }

    #[test]
    fn final_sigma_folds_to_sigma() {
        // τέλος (typed) and ΤΕΛΟΣ (lowercased per char) must meet.
        assert_eq!(normalize("τέλος"), "τελοσ");
        assert_eq!(normalize("ΤΕΛΟΣ"), "τελοσ");
    }

    #[test]
    fn long_keyword_with_mixed_forms() {
        assert_eq!(
            normalize("Τέλος_Προγράμματος"),
            "τελοσ_προγραμματοσ"
        );
    }

    #[test]
    fn dialytika_forms_fold() {
        assert_eq!(normalize("προϊόν"), "προιον");
        assert_eq!(normalize("ΰϋΐϊ"), "υυιι");
    }

    #[test]
    fn non_greek_passes_through() {
        assert_eq!(normalize("x_42"), "x_42");
        assert_eq!(normalize("café"), "café");
    }
}
