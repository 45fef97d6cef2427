//! Filtering of payroll lines for the on-screen detail table.

use crate::models::PayrollLine;

/// Returns the lines shown in the detail table.
///
/// Zero-amount and employer-paid lines are always hidden. When `query` is
/// non-blank, a line is kept if the query appears (case-insensitive) in the
/// employee name, employee code or concept name, or literally in the
/// national id.
pub fn filter_detail_lines(lines: &[PayrollLine], query: Option<&str>) -> Vec<PayrollLine> {
    let needle = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    lines
        .iter()
        .filter(|line| line.is_primary())
        .filter(|line| match &needle {
            None => true,
            Some(needle) => matches_query(line, needle),
        })
        .cloned()
        .collect()
}

fn matches_query(line: &PayrollLine, needle: &str) -> bool {
    let contains_folded =
        |value: &Option<String>| value.as_deref().is_some_and(|v| v.to_lowercase().contains(needle));

    contains_folded(&line.employee_name)
        || contains_folded(&line.employee_code)
        || line.concept_name.to_lowercase().contains(needle)
        || line
            .national_id
            .as_deref()
            .is_some_and(|id| id.contains(needle))
}
