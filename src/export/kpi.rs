//! Headline figures for a payroll transaction.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::models::PayrollLine;

use super::totals::{add_amount, calculate_totals};

/// Employee label used when a transaction-wide figure overflows.
const ALL_EMPLOYEES: &str = "all employees";

/// Summary figures of a payroll transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollKpis {
    /// Distinct employees with at least one line.
    pub employees: usize,
    /// Lines in the snapshot.
    pub lines: usize,
    /// Employee-paid income.
    pub total_income: Decimal,
    /// Employee-paid deductions.
    pub total_deductions: Decimal,
    /// Income minus deductions.
    pub net_pay: Decimal,
    /// Sum of employer-paid lines.
    pub employer_paid_total: Decimal,
}

/// Computes the KPI figures for a snapshot of lines.
///
/// Income, deductions and net pay follow the same rule as the payroll sheet
/// totals, so the KPI net always equals the sum of the sheet's net column.
///
/// # Errors
///
/// - [`ExportError::MissingIdentity`] for a line with neither an employee id
///   nor a name.
/// - [`ExportError::AmountOverflow`] when a figure leaves the decimal range.
pub fn summarize_kpis(lines: &[PayrollLine]) -> ExportResult<PayrollKpis> {
    let mut employees = HashSet::new();
    for (line_index, line) in lines.iter().enumerate() {
        let key = line
            .employee_key()
            .ok_or_else(|| ExportError::MissingIdentity {
                line_index,
                message: "neither employee_id nor employee_name is set".to_string(),
            })?;
        employees.insert(key);
    }

    let totals = calculate_totals(lines)?;
    let employer_paid_total = lines
        .iter()
        .filter(|line| line.employer_paid)
        .try_fold(Decimal::ZERO, |sum, line| add_amount(sum, line))?;
    let net_pay = totals
        .net_pay()
        .ok_or_else(|| ExportError::AmountOverflow {
            employee_key: ALL_EMPLOYEES.to_string(),
            concept: "net pay".to_string(),
        })?;

    Ok(PayrollKpis {
        employees: employees.len(),
        lines: lines.len(),
        total_income: totals.total_income,
        total_deductions: totals.total_deductions,
        net_pay,
        employer_paid_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Factor;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_line(employee_id: &str, factor: Factor, amount: &str, employer_paid: bool) -> PayrollLine {
        PayrollLine {
            line_id: None,
            employee_id: Some(employee_id.to_string()),
            employee_name: None,
            employee_code: None,
            national_id: None,
            concept_name: "Concepto".to_string(),
            concept_type_id: Some(3),
            factor,
            amount: dec(amount),
            employer_paid,
            project: None,
            application_date: None,
            reference: None,
        }
    }

    #[test]
    fn test_kpis_over_mixed_lines() {
        let lines = vec![
            create_line("E-1", Factor::Income, "1000", false),
            create_line("E-1", Factor::Deduction, "100", false),
            create_line("E-2", Factor::Income, "800.50", false),
            create_line("E-2", Factor::Income, "150", true),
        ];
        let kpis = summarize_kpis(&lines).unwrap();

        assert_eq!(kpis.employees, 2);
        assert_eq!(kpis.lines, 4);
        assert_eq!(kpis.total_income, dec("1800.50"));
        assert_eq!(kpis.total_deductions, dec("100"));
        assert_eq!(kpis.net_pay, dec("1700.50"));
        assert_eq!(kpis.employer_paid_total, dec("150"));
    }

    #[test]
    fn test_kpis_for_empty_snapshot_are_zero() {
        let kpis = summarize_kpis(&[]).unwrap();
        assert_eq!(kpis.employees, 0);
        assert_eq!(kpis.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_kpis_reject_line_without_identity() {
        let mut line = create_line("E-1", Factor::Income, "1", false);
        line.employee_id = None;
        assert!(matches!(
            summarize_kpis(&[line]),
            Err(ExportError::MissingIdentity { .. })
        ));
    }

    #[test]
    fn test_employer_paid_total_out_of_range_is_an_error() {
        let lines = vec![
            create_line("E-1", Factor::Income, "79228162514264337593543950335", true),
            create_line("E-2", Factor::Income, "1", true),
        ];

        match summarize_kpis(&lines) {
            Err(ExportError::AmountOverflow {
                employee_key,
                concept,
            }) => {
                assert_eq!(employee_key, "id:E-2");
                assert_eq!(concept, "Concepto");
            }
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_net_pay_out_of_range_is_an_error() {
        let lines = vec![
            create_line("E-1", Factor::Income, "79228162514264337593543950335", false),
            create_line("E-2", Factor::Deduction, "-1", false),
        ];

        match summarize_kpis(&lines) {
            Err(ExportError::AmountOverflow { employee_key, .. }) => {
                assert_eq!(employee_key, ALL_EMPLOYEES);
            }
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }
}
