//! Per-employee aggregate models.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeKey;

/// Identity and informational fields of an employee, copied from the first
/// line seen for that employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeIdentity {
    /// The key the employee's lines were grouped by.
    pub key: EmployeeKey,
    /// The employee's internal code.
    pub code: Option<String>,
    /// The employee's full name.
    pub name: Option<String>,
    /// The employee's national identity number.
    pub national_id: Option<String>,
    /// Date the first line was applied.
    pub application_date: Option<NaiveDate>,
    /// Transaction reference of the first line.
    pub reference: Option<String>,
    /// Project or location of the first line.
    pub project: Option<String>,
}

/// Income and deduction totals for one employee.
///
/// Only employee-paid lines contribute. Net pay is derived, never stored.
///
/// # Example
///
/// ```
/// use payroll_export::models::EmployeeTotals;
/// use rust_decimal::Decimal;
///
/// let totals = EmployeeTotals {
///     total_income: Decimal::new(1000, 0),
///     total_deductions: Decimal::new(100, 0),
/// };
/// assert_eq!(totals.net_pay(), Some(Decimal::new(900, 0)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotals {
    /// Sum of income lines.
    pub total_income: Decimal,
    /// Sum of deduction lines.
    pub total_deductions: Decimal,
}

impl EmployeeTotals {
    /// Returns income minus deductions, or `None` if the difference does not
    /// fit in a decimal.
    pub fn net_pay(&self) -> Option<Decimal> {
        self.total_income.checked_sub(self.total_deductions)
    }
}

/// All lines of one employee within a single export run, summed per concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAggregate {
    /// Identity copied from the first-seen line.
    pub identity: EmployeeIdentity,
    /// Summed amount per concept name. Column order is imposed separately.
    pub columns: BTreeMap<String, Decimal>,
    /// Income and deduction totals.
    pub totals: EmployeeTotals,
}

impl EmployeeAggregate {
    /// Returns the summed amount for a concept, or zero if the employee has none.
    pub fn amount_for(&self, concept: &str) -> Decimal {
        self.columns.get(concept).copied().unwrap_or(Decimal::ZERO)
    }
}
