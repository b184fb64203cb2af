//! Keyword tables for Glossa.
//!
//! Three disjoint sets over **canonical** spellings (lowercased,
//! accent-stripped, `ς` folded to `σ` — see [`crate::normalize`]):
//!
//! 1. **Operator keywords** — logical/arithmetic words (`και`, `η`, `οχι`,
//!    `div`, `mod`). Checked first so they never fall through to the
//!    structural table.
//! 2. **Type keywords** — declaration types, singular and plural forms.
//! 3. **Structural keywords** — everything else: program/block delimiters,
//!    statements, control flow, boolean literals.
//!
//! Membership is whole-word only: a word is a keyword exactly when its
//! entire canonical form appears in a table. `καιρός` (canonical
//! `καιροσ`) is an identifier even though it starts with `και`.
//!
//! The tables are plain `matches!` expressions: no allocation, no runtime
//! initialization, and rustc compiles the string matches into efficient
//! length-and-prefix dispatch.

/// Is `canonical` an operator keyword (`TokenKind::OperatorKeyword`)?
pub(crate) fn is_operator_keyword(canonical: &str) -> bool {
    matches!(canonical, "και" | "η" | "οχι" | "div" | "mod")
}

/// Is `canonical` a type keyword (`TokenKind::TypeKeyword`)?
///
/// Singular forms appear in variable declarations, plurals in the
/// ΜΕΤΑΒΛΗΤΕΣ section header rows.
pub(crate) fn is_type_keyword(canonical: &str) -> bool {
    matches!(
        canonical,
        "ακεραια"
            | "ακεραιεσ"
            | "πραγματικη"
            | "πραγματικεσ"
            | "χαρακτηρασ"
            | "χαρακτηρεσ"
            | "λογικη"
            | "λογικεσ"
    )
}

/// Is `canonical` a structural keyword (`TokenKind::Keyword`)?
pub(crate) fn is_structural_keyword(canonical: &str) -> bool {
    matches!(
        canonical,
        // Program frame and sections
        "προγραμμα"
            | "αρχη"
            | "τελοσ_προγραμματοσ"
            | "σταθερεσ"
            | "μεταβλητεσ"
            // Subprograms
            | "διαδικασια"
            | "τελοσ_διαδικασιασ"
            | "συναρτηση"
            | "τελοσ_συναρτησησ"
            | "καλεσε"
            // Statements
            | "γραψε"
            | "διαβασε"
            // Selection
            | "αν"
            | "τοτε"
            | "αλλιωσ"
            | "αλλιωσ_αν"
            | "τελοσ_αν"
            | "επιλεξε"
            | "περιπτωση"
            | "τελοσ_επιλογων"
            // Iteration
            | "οσο"
            | "επαναλαβε"
            | "τελοσ_επαναληψησ"
            | "αρχη_επαναληψησ"
            | "μεχρισ_οτου"
            | "για"
            | "απο"
            | "μεχρι"
            | "με"
            | "βημα"
            | "με_βημα"
            // Boolean literals
            | "αληθησ"
            | "ψευδησ"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_keywords() {
        for word in ["και", "η", "οχι", "div", "mod"] {
            assert!(is_operator_keyword(word), "{word}");
        }
        assert!(!is_operator_keyword("καιροσ"));
        assert!(!is_operator_keyword("ηλικια"));
    }

    #[test]
    fn type_keywords_cover_singular_and_plural() {
        assert!(is_type_keyword("ακεραια"));
        assert!(is_type_keyword("ακεραιεσ"));
        assert!(is_type_keyword("χαρακτηρασ"));
        assert!(!is_type_keyword("ακεραιοσ"));
    }

    #[test]
    fn structural_keywords() {
        assert!(is_structural_keyword("προγραμμα"));
        assert!(is_structural_keyword("τελοσ_προγραμματοσ"));
        assert!(is_structural_keyword("μεχρισ_οτου"));
        assert!(is_structural_keyword("ψευδησ"));
        assert!(!is_structural_keyword("εμβαδον"));
    }

    #[test]
    fn tables_are_disjoint() {
        for word in ["και", "η", "οχι", "div", "mod"] {
            assert!(!is_type_keyword(word));
            assert!(!is_structural_keyword(word));
        }
        for word in ["ακεραια", "λογικεσ"] {
            assert!(!is_operator_keyword(word));
            assert!(!is_structural_keyword(word));
        }
    }

    #[test]
    fn tables_store_canonical_forms_only() {
        // Accented or final-sigma spellings never appear in the tables;
        // callers normalize first.
        assert!(!is_structural_keyword("πρόγραμμα"));
        assert!(!is_structural_keyword("τέλος_προγράμματος"));
        assert!(!is_operator_keyword("ή"));
    }
}
