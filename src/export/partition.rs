//! Splitting of an input snapshot into the payroll and analysis partitions.

use crate::models::PayrollLine;

/// The three disjoint groups every input line falls into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinePartition {
    /// Non-zero, employee-paid lines: the payroll sheet.
    pub primary: Vec<PayrollLine>,
    /// Employer-paid lines of any amount: the analysis sheet.
    pub analysis: Vec<PayrollLine>,
    /// Zero-amount employee-paid lines, shown on neither sheet.
    pub excluded: Vec<PayrollLine>,
}

impl LinePartition {
    /// Returns true if neither sheet has any line.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.analysis.is_empty()
    }
}

/// Partitions lines, preserving their relative order within each group.
///
/// # Example
///
/// ```
/// use payroll_export::export::partition_lines;
/// use payroll_export::models::{Factor, PayrollLine};
/// use rust_decimal::Decimal;
///
/// let line = |amount, employer_paid| PayrollLine {
///     line_id: None,
///     employee_id: Some("E-1".to_string()),
///     employee_name: None,
///     employee_code: None,
///     national_id: None,
///     concept_name: "Bono".to_string(),
///     concept_type_id: Some(10),
///     factor: Factor::Income,
///     amount: Decimal::new(amount, 0),
///     employer_paid,
///     project: None,
///     application_date: None,
///     reference: None,
/// };
///
/// let partition = partition_lines(&[line(200, false), line(200, true), line(0, false)]);
/// assert_eq!(partition.primary.len(), 1);
/// assert_eq!(partition.analysis.len(), 1);
/// assert_eq!(partition.excluded.len(), 1);
/// ```
pub fn partition_lines(lines: &[PayrollLine]) -> LinePartition {
    let mut partition = LinePartition::default();
    for line in lines {
        if line.employer_paid {
            partition.analysis.push(line.clone());
        } else if line.amount.is_zero() {
            partition.excluded.push(line.clone());
        } else {
            partition.primary.push(line.clone());
        }
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Factor;
    use rust_decimal::Decimal;

    fn create_line(line_id: &str, amount: i64, employer_paid: bool) -> PayrollLine {
        PayrollLine {
            line_id: Some(line_id.to_string()),
            employee_id: Some("E-1".to_string()),
            employee_name: None,
            employee_code: None,
            national_id: None,
            concept_name: "Concepto".to_string(),
            concept_type_id: Some(3),
            factor: Factor::Income,
            amount: Decimal::new(amount, 0),
            employer_paid,
            project: None,
            application_date: None,
            reference: None,
        }
    }

    #[test]
    fn test_zero_amount_employer_paid_line_goes_to_analysis() {
        let partition = partition_lines(&[create_line("a", 0, true)]);
        assert_eq!(partition.analysis.len(), 1);
        assert!(partition.excluded.is_empty());
    }

    #[test]
    fn test_negative_amount_is_primary() {
        let partition = partition_lines(&[create_line("a", -25, false)]);
        assert_eq!(partition.primary.len(), 1);
    }

    #[test]
    fn test_every_line_lands_in_exactly_one_group() {
        let lines = vec![
            create_line("a", 100, false),
            create_line("b", 0, false),
            create_line("c", 30, true),
            create_line("d", 0, true),
            create_line("e", 5, false),
        ];
        let partition = partition_lines(&lines);

        let mut ids: Vec<String> = partition
            .primary
            .iter()
            .chain(&partition.analysis)
            .chain(&partition.excluded)
            .filter_map(|l| l.line_id.clone())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_relative_order_preserved() {
        let lines = vec![
            create_line("a", 1, false),
            create_line("b", 1, true),
            create_line("c", 2, false),
        ];
        let partition = partition_lines(&lines);
        let primary: Vec<_> = partition
            .primary
            .iter()
            .filter_map(|l| l.line_id.as_deref())
            .collect();
        assert_eq!(primary, vec!["a", "c"]);
    }

    #[test]
    fn test_only_zero_lines_is_empty() {
        let partition = partition_lines(&[create_line("a", 0, false)]);
        assert!(partition.is_empty());
    }
}
