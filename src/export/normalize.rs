//! Validation of query records into typed payroll lines.
//!
//! Everything malformed is rejected here, before any grouping happens, so
//! the later stages never see a line without an identity or with an
//! undefined factor.

use tracing::{debug, warn};

use crate::config::{ExportConfig, IdentityPolicy};
use crate::error::{ExportError, ExportResult};
use crate::models::{EmployeeKey, Factor, PayrollLine, PayrollLineRecord, employee_key_of};

/// Converts query records into validated [`PayrollLine`]s.
///
/// A record is rejected (and with it the whole run) when:
/// - it has neither an employee id nor a name ([`ExportError::MissingIdentity`])
/// - it has no employee id and the identity policy is
///   [`IdentityPolicy::RequireId`] ([`ExportError::MissingIdentity`])
/// - its factor is missing or not 1 or -1 ([`ExportError::AmbiguousFactor`])
///
/// A missing or empty concept name becomes the configured missing label
/// (`"S/N"` by default).
///
/// # Example
///
/// ```
/// use payroll_export::config::ExportConfig;
/// use payroll_export::export::normalize_records;
/// use payroll_export::models::PayrollLineRecord;
///
/// let record: PayrollLineRecord = serde_json::from_str(
///     r#"{"employee_id": "E-1", "concept_type_id": 3, "factor": 1, "amount": "10"}"#,
/// ).unwrap();
///
/// let lines = normalize_records(vec![record], &ExportConfig::default()).unwrap();
/// assert_eq!(lines[0].concept_name, "S/N");
/// ```
pub fn normalize_records(
    records: Vec<PayrollLineRecord>,
    config: &ExportConfig,
) -> ExportResult<Vec<PayrollLine>> {
    let mut lines = Vec::with_capacity(records.len());
    let mut name_fallbacks = 0usize;

    for (line_index, record) in records.into_iter().enumerate() {
        let key = employee_key_of(&record.employee_id, &record.employee_name).ok_or_else(|| {
            ExportError::MissingIdentity {
                line_index,
                message: "neither employee_id nor employee_name is set".to_string(),
            }
        })?;

        if let EmployeeKey::Name(name) = &key {
            if config.identity_policy == IdentityPolicy::RequireId {
                return Err(ExportError::MissingIdentity {
                    line_index,
                    message: format!("employee '{}' has no employee_id", name),
                });
            }
            name_fallbacks += 1;
        }

        let concept_name = record
            .concept_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| config.concepts.missing_label.clone());

        let factor = record.factor.and_then(Factor::from_value).ok_or_else(|| {
            ExportError::AmbiguousFactor {
                employee_key: key.to_string(),
                concept: concept_name.clone(),
                factor: record.factor,
            }
        })?;

        lines.push(PayrollLine {
            line_id: record.line_id,
            employee_id: record.employee_id,
            employee_name: record.employee_name,
            employee_code: record.employee_code,
            national_id: record.national_id,
            concept_name,
            concept_type_id: record.concept_type_id,
            factor,
            amount: record.amount,
            employer_paid: record.employer_paid,
            project: record.project,
            application_date: record.application_date,
            reference: record.reference,
        });
    }

    if name_fallbacks > 0 {
        warn!(
            lines = name_fallbacks,
            "Lines without employee_id grouped by employee name"
        );
    }
    debug!(lines = lines.len(), "Normalized payroll records");

    Ok(lines)
}
