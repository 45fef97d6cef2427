//! Locale-style comparison of concept names.
//!
//! Names are compared the way a Spanish-speaking reader expects: accents and
//! case are ignored first, then unaccented sorts before accented, then
//! lowercase before uppercase. The final fallback on the raw string keeps the
//! order total.
//!
//! `ñ` is a letter of its own, sorting after every `n` and before `o`, so
//! "Anual" comes before "Año".

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compares two strings ignoring accents and case, with deterministic tie-breaks.
///
/// # Example
///
/// ```
/// use payroll_export::export::locale_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(locale_cmp("Cesantía", "comisión"), Ordering::Less);
/// assert_eq!(locale_cmp("Ámbito", "Bono"), Ordering::Less);
/// assert_eq!(locale_cmp("bono", "Bono"), Ordering::Less);
/// assert_eq!(locale_cmp("Anual", "Año"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        // lowercase first
        .then_with(|| b.cmp(a))
}

/// Combining tilde; after an `n` it marks an `ñ`.
const COMBINING_TILDE: char = '\u{0303}';

/// Appended to `n` to place `ñ` after every `n` sequence.
const ENYE_MARKER: char = char::MAX;

fn primary_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    let mut chars = s.nfd().flat_map(char::to_lowercase).peekable();
    while let Some(c) = chars.next() {
        if c == 'n' && chars.peek() == Some(&COMBINING_TILDE) {
            chars.next();
            key.push('n');
            key.push(ENYE_MARKER);
        } else if !is_combining_mark(c) {
            key.push(c);
        }
    }
    key
}

fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| locale_cmp(a, b));
        names
    }

    #[test]
    fn test_case_is_ignored_at_first_level() {
        assert_eq!(
            sorted(vec!["seguro", "Bono", "aporte"]),
            vec!["aporte", "Bono", "seguro"]
        );
    }

    #[test]
    fn test_accents_are_ignored_at_first_level() {
        assert_eq!(
            sorted(vec!["Retención ISR", "Regalía", "Rebaja"]),
            vec!["Rebaja", "Regalía", "Retención ISR"]
        );
    }

    #[test]
    fn test_unaccented_before_accented() {
        assert_eq!(locale_cmp("Pension", "Pensión"), Ordering::Less);
    }

    #[test]
    fn test_lowercase_before_uppercase() {
        assert_eq!(locale_cmp("afp", "AFP"), Ordering::Less);
    }

    #[test]
    fn test_enye_sorts_after_n() {
        assert_eq!(locale_cmp("Año", "Anual"), Ordering::Greater);
        assert_eq!(
            sorted(vec!["Ocaso", "Ñandú", "Nube", "nómina"]),
            vec!["nómina", "Nube", "Ñandú", "Ocaso"]
        );
    }

    #[test]
    fn test_decomposed_enye_matches_composed() {
        assert_eq!(primary_key("An\u{0303}o"), primary_key("Año"));
    }

    #[test]
    fn test_equal_strings_compare_equal() {
        assert_eq!(locale_cmp("Seguro", "Seguro"), Ordering::Equal);
    }

    #[test]
    fn test_order_is_antisymmetric() {
        let pairs = [("Bono", "bono"), ("Pensión", "Pension"), ("A", "B")];
        for (a, b) in pairs {
            assert_eq!(locale_cmp(a, b), locale_cmp(b, a).reverse());
        }
    }
}
