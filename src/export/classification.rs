//! Concept column ordering.
//!
//! Columns are ordered by a multi-key comparison where each key only breaks
//! ties left by the previous one:
//!
//! 1. Base salary (type code 0) first.
//! 2. Income before deduction.
//! 3. Names containing the salary keyword (default "Salario",
//!    case-insensitive) first.
//! 4. Locale-style comparison of the name ([`locale_cmp`]).

use std::cmp::Ordering;

use crate::models::{ConceptMeta, Factor};

use super::collation::locale_cmp;

/// Compares two concepts for column order.
pub fn compare_concepts(a: &ConceptMeta, b: &ConceptMeta, salary_keyword: &str) -> Ordering {
    b.is_base_salary()
        .cmp(&a.is_base_salary())
        .then_with(|| factor_rank(a.factor).cmp(&factor_rank(b.factor)))
        .then_with(|| {
            mentions_keyword(&b.name, salary_keyword)
                .cmp(&mentions_keyword(&a.name, salary_keyword))
        })
        .then_with(|| locale_cmp(&a.name, &b.name))
}

/// Returns concept names in column order.
///
/// The result depends only on the set of `(name, type_id, factor)` values
/// given, never on their input order.
///
/// # Example
///
/// ```
/// use payroll_export::export::order_concepts;
/// use payroll_export::models::{ConceptMeta, Factor};
///
/// let meta = |name: &str, type_id, factor| ConceptMeta {
///     name: name.to_string(),
///     type_id: Some(type_id),
///     factor,
///     employer_paid: false,
/// };
///
/// let order = order_concepts(
///     &[
///         meta("Seguro", 5, Factor::Deduction),
///         meta("Bono", 10, Factor::Income),
///         meta("Salario Navideño", 12, Factor::Income),
///         meta("Salario Base", 0, Factor::Income),
///     ],
///     "Salario",
/// );
/// assert_eq!(order, vec!["Salario Base", "Salario Navideño", "Bono", "Seguro"]);
/// ```
pub fn order_concepts(concepts: &[ConceptMeta], salary_keyword: &str) -> Vec<String> {
    sort_concepts(concepts, salary_keyword)
        .into_iter()
        .map(|meta| meta.name.clone())
        .collect()
}

/// Sorts concept metadata into column order.
pub(crate) fn sort_concepts<'a>(
    concepts: &'a [ConceptMeta],
    salary_keyword: &str,
) -> Vec<&'a ConceptMeta> {
    let mut ordered: Vec<&ConceptMeta> = concepts.iter().collect();
    ordered.sort_by(|a, b| compare_concepts(a, b, salary_keyword));
    ordered
}

fn factor_rank(factor: Factor) -> u8 {
    match factor {
        Factor::Income => 0,
        Factor::Deduction => 1,
    }
}

fn mentions_keyword(name: &str, keyword: &str) -> bool {
    !keyword.is_empty() && name.to_lowercase().contains(&keyword.to_lowercase())
}
