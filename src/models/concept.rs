//! Payroll concept metadata.

use serde::{Deserialize, Serialize};

use super::Factor;

/// Type code the payroll database uses for base salary.
pub(crate) const BASE_SALARY_TYPE_ID: i64 = 0;

/// The category a concept column falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptCategory {
    /// Base salary (type code 0).
    BaseSalary,
    /// Any other income concept.
    Income,
    /// A deduction from the employee's pay.
    Deduction,
    /// A cost borne by the employer; never part of net pay.
    EmployerPaid,
}

/// Metadata of a concept as first observed in an export run.
///
/// # Example
///
/// ```
/// use payroll_export::models::{ConceptCategory, ConceptMeta, Factor};
///
/// let meta = ConceptMeta {
///     name: "Seguro".to_string(),
///     type_id: Some(5),
///     factor: Factor::Deduction,
///     employer_paid: false,
/// };
/// assert_eq!(meta.category(), ConceptCategory::Deduction);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptMeta {
    /// The concept label.
    pub name: String,
    /// The concept type code, if the concept is catalogued.
    pub type_id: Option<i64>,
    /// Income or deduction.
    pub factor: Factor,
    /// Whether the first line carrying this concept was employer-paid.
    pub employer_paid: bool,
}

impl ConceptMeta {
    /// Returns true for the base salary type.
    pub fn is_base_salary(&self) -> bool {
        self.type_id == Some(BASE_SALARY_TYPE_ID)
    }

    /// Classifies the concept.
    pub fn category(&self) -> ConceptCategory {
        if self.employer_paid {
            ConceptCategory::EmployerPaid
        } else if self.is_base_salary() {
            ConceptCategory::BaseSalary
        } else {
            match self.factor {
                Factor::Income => ConceptCategory::Income,
                Factor::Deduction => ConceptCategory::Deduction,
            }
        }
    }
}
