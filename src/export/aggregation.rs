//! Grouping of payroll lines by employee.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{ExportError, ExportResult};
use crate::models::{
    ConceptMeta, EmployeeAggregate, EmployeeIdentity, EmployeeKey, EmployeeTotals, PayrollLine,
};

use super::totals::{accumulate_totals, add_amount};

/// The result of grouping a set of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// One aggregate per employee, in first-seen order.
    pub employees: Vec<EmployeeAggregate>,
    /// Each distinct concept with the metadata of the first line that carried it,
    /// in first-seen order.
    pub concepts: Vec<ConceptMeta>,
}

/// Groups lines by employee, summing amounts per concept name.
///
/// Identity fields (code, name, national id, date, reference, project) come
/// from the first line seen for each employee. Concept names are literal,
/// case-sensitive keys. Totals follow [`accumulate_totals`].
///
/// # Errors
///
/// Returns [`ExportError::MissingIdentity`] for a line with neither an
/// employee id nor a name, and [`ExportError::AmountOverflow`] when a sum
/// leaves the decimal range.
///
/// # Example
///
/// ```
/// use payroll_export::export::aggregate_lines;
/// use payroll_export::models::{Factor, PayrollLine};
/// use rust_decimal::Decimal;
///
/// let overtime = PayrollLine {
///     line_id: None,
///     employee_id: Some("E-1".to_string()),
///     employee_name: Some("Ana Pérez".to_string()),
///     employee_code: None,
///     national_id: None,
///     concept_name: "Horas Extra".to_string(),
///     concept_type_id: Some(4),
///     factor: Factor::Income,
///     amount: Decimal::new(50, 0),
///     employer_paid: false,
///     project: None,
///     application_date: None,
///     reference: None,
/// };
///
/// let aggregation = aggregate_lines(&[overtime.clone(), overtime]).unwrap();
/// assert_eq!(aggregation.employees.len(), 1);
/// assert_eq!(aggregation.employees[0].amount_for("Horas Extra"), Decimal::new(100, 0));
/// ```
pub fn aggregate_lines(lines: &[PayrollLine]) -> ExportResult<Aggregation> {
    let mut employees: Vec<EmployeeAggregate> = Vec::new();
    let mut positions: HashMap<EmployeeKey, usize> = HashMap::new();
    let mut concepts: Vec<ConceptMeta> = Vec::new();
    let mut seen_concepts: HashSet<&str> = HashSet::new();

    for (line_index, line) in lines.iter().enumerate() {
        let key = line
            .employee_key()
            .ok_or_else(|| ExportError::MissingIdentity {
                line_index,
                message: "neither employee_id nor employee_name is set".to_string(),
            })?;

        let position = match positions.get(&key) {
            Some(&position) => position,
            None => {
                if key.is_name_fallback() {
                    warn!(employee_key = %key, "Employee grouped by name; distinct employees sharing this name will be merged");
                }
                employees.push(new_aggregate(key.clone(), line));
                positions.insert(key, employees.len() - 1);
                employees.len() - 1
            }
        };

        let aggregate = &mut employees[position];
        let column = aggregate
            .columns
            .entry(line.concept_name.clone())
            .or_insert(Decimal::ZERO);
        *column = add_amount(*column, line)?;
        accumulate_totals(&mut aggregate.totals, line)?;

        if seen_concepts.insert(line.concept_name.as_str()) {
            concepts.push(ConceptMeta {
                name: line.concept_name.clone(),
                type_id: line.concept_type_id,
                factor: line.factor,
                employer_paid: line.employer_paid,
            });
        }
    }

    Ok(Aggregation {
        employees,
        concepts,
    })
}

fn new_aggregate(key: EmployeeKey, line: &PayrollLine) -> EmployeeAggregate {
    EmployeeAggregate {
        identity: EmployeeIdentity {
            key,
            code: line.employee_code.clone(),
            name: line.employee_name.clone(),
            national_id: line.national_id.clone(),
            application_date: line.application_date,
            reference: line.reference.clone(),
            project: line.project.clone(),
        },
        columns: Default::default(),
        totals: EmployeeTotals::default(),
    }
}
