//! Income, deduction and net pay totals.
//!
//! Only employee-paid lines count. Employer-paid lines are still shown in
//! concept columns but never move an employee's net pay. Every sum is
//! checked; leaving the decimal range is an [`ExportError::AmountOverflow`].

use rust_decimal::Decimal;

use crate::error::{ExportError, ExportResult};
use crate::models::{EmployeeTotals, Factor, PayrollLine};

/// Adds a single line to running totals.
///
/// Employer-paid lines are ignored.
///
/// # Errors
///
/// Returns [`ExportError::AmountOverflow`] if a total leaves the decimal range.
pub fn accumulate_totals(totals: &mut EmployeeTotals, line: &PayrollLine) -> ExportResult<()> {
    if line.employer_paid {
        return Ok(());
    }
    let total = match line.factor {
        Factor::Income => &mut totals.total_income,
        Factor::Deduction => &mut totals.total_deductions,
    };
    *total = add_amount(*total, line)?;
    Ok(())
}

/// Adds the line's amount to `sum`, blaming the line's employee and concept
/// on overflow.
pub(crate) fn add_amount(sum: Decimal, line: &PayrollLine) -> ExportResult<Decimal> {
    sum.checked_add(line.amount)
        .ok_or_else(|| ExportError::AmountOverflow {
            employee_key: line
                .employee_key()
                .map(|key| key.to_string())
                .unwrap_or_default(),
            concept: line.concept_name.clone(),
        })
}

/// Computes totals over a set of lines.
///
/// # Example
///
/// ```
/// use payroll_export::export::calculate_totals;
/// use payroll_export::models::{Factor, PayrollLine};
/// use rust_decimal::Decimal;
///
/// let line = |concept: &str, factor, amount| PayrollLine {
///     line_id: None,
///     employee_id: Some("E-1".to_string()),
///     employee_name: None,
///     employee_code: None,
///     national_id: None,
///     concept_name: concept.to_string(),
///     concept_type_id: Some(1),
///     factor,
///     amount: Decimal::new(amount, 0),
///     employer_paid: false,
///     project: None,
///     application_date: None,
///     reference: None,
/// };
///
/// let totals = calculate_totals(&[
///     line("Salario Base", Factor::Income, 1000),
///     line("Seguro", Factor::Deduction, 100),
/// ])
/// .unwrap();
/// assert_eq!(totals.net_pay(), Some(Decimal::new(900, 0)));
/// ```
pub fn calculate_totals<'a, I>(lines: I) -> ExportResult<EmployeeTotals>
where
    I: IntoIterator<Item = &'a PayrollLine>,
{
    let mut totals = EmployeeTotals::default();
    for line in lines {
        accumulate_totals(&mut totals, line)?;
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_line(factor: Factor, amount: &str, employer_paid: bool) -> PayrollLine {
        PayrollLine {
            line_id: None,
            employee_id: Some("E-1".to_string()),
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
    fn test_income_and_deductions_are_split_by_factor() {
        let totals = calculate_totals(&[
            create_line(Factor::Income, "1000.00", false),
            create_line(Factor::Income, "250.50", false),
            create_line(Factor::Deduction, "100.25", false),
        ])
        .unwrap();

        assert_eq!(totals.total_income, dec("1250.50"));
        assert_eq!(totals.total_deductions, dec("100.25"));
        assert_eq!(totals.net_pay(), Some(dec("1150.25")));
    }

    #[test]
    fn test_employer_paid_lines_do_not_count() {
        let totals = calculate_totals(&[
            create_line(Factor::Income, "1000", false),
            create_line(Factor::Income, "200", true),
            create_line(Factor::Deduction, "75", true),
        ])
        .unwrap();

        assert_eq!(totals.total_income, dec("1000"));
        assert_eq!(totals.total_deductions, Decimal::ZERO);
        assert_eq!(totals.net_pay(), Some(dec("1000")));
    }

    #[test]
    fn test_zero_amount_line_leaves_totals_unchanged() {
        let totals = calculate_totals(&[
            create_line(Factor::Income, "500", false),
            create_line(Factor::Deduction, "0", false),
        ])
        .unwrap();
        assert_eq!(totals.total_deductions, Decimal::ZERO);
        assert_eq!(totals.net_pay(), Some(dec("500")));
    }

    #[test]
    fn test_empty_input_gives_zero_totals() {
        let totals = calculate_totals(Vec::<PayrollLine>::new().iter()).unwrap();
        assert_eq!(totals, EmployeeTotals::default());
    }

    #[test]
    fn test_total_out_of_range_is_an_error() {
        let result = calculate_totals(&[
            create_line(Factor::Deduction, "79228162514264337593543950335", false),
            create_line(Factor::Deduction, "1", false),
        ]);

        match result {
            Err(ExportError::AmountOverflow {
                employee_key,
                concept,
            }) => {
                assert_eq!(employee_key, "id:E-1");
                assert_eq!(concept, "Concepto");
            }
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_employer_paid_amounts_never_overflow_totals() {
        let totals = calculate_totals(&[
            create_line(Factor::Income, "79228162514264337593543950335", true),
            create_line(Factor::Income, "1", false),
        ])
        .unwrap();
        assert_eq!(totals.total_income, dec("1"));
    }
}
