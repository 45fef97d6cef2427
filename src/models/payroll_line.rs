//! Payroll line models.
//!
//! [`PayrollLineRecord`] is the loosely-shaped row handed over by the query
//! source. [`PayrollLine`] is the validated form every export stage works on.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Sign convention of a payroll concept.
///
/// Serialized as the integer the payroll database uses: `1` for income and
/// `-1` for deduction.
///
/// # Example
///
/// ```
/// use payroll_export::models::Factor;
///
/// assert_eq!(Factor::from_value(1), Some(Factor::Income));
/// assert_eq!(Factor::from_value(-1), Some(Factor::Deduction));
/// assert_eq!(Factor::from_value(0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Factor {
    /// The concept adds to the employee's pay.
    Income,
    /// The concept is withheld from the employee's pay.
    Deduction,
}

impl Factor {
    /// Maps a raw factor value to a [`Factor`], if it is one of the two defined values.
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Factor::Income),
            -1 => Some(Factor::Deduction),
            _ => None,
        }
    }

    /// Returns the raw factor value.
    pub fn value(self) -> i64 {
        match self {
            Factor::Income => 1,
            Factor::Deduction => -1,
        }
    }
}

impl TryFrom<i64> for Factor {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Factor::from_value(value).ok_or_else(|| format!("factor must be 1 or -1, got {}", value))
    }
}

impl From<Factor> for i64 {
    fn from(factor: Factor) -> Self {
        factor.value()
    }
}

/// The key lines are grouped by.
///
/// The id is preferred; the name is only used when a line carries no id.
/// Keeping the two apart means a name-keyed employee can never be merged
/// into an id-keyed one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EmployeeKey {
    /// Keyed by the employee id.
    Id(String),
    /// Keyed by the employee name because no id was present.
    Name(String),
}

impl EmployeeKey {
    /// Returns true if this key fell back to the employee name.
    pub fn is_name_fallback(&self) -> bool {
        matches!(self, EmployeeKey::Name(_))
    }
}

impl fmt::Display for EmployeeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeKey::Id(id) => write!(f, "id:{}", id),
            EmployeeKey::Name(name) => write!(f, "name:{}", name),
        }
    }
}

/// A validated payroll line: one employee x concept occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// Source line identifier, if the query source provides one.
    #[serde(default)]
    pub line_id: Option<String>,
    /// The employee id.
    pub employee_id: Option<String>,
    /// The employee's full name.
    pub employee_name: Option<String>,
    /// The employee's internal code.
    pub employee_code: Option<String>,
    /// The employee's national identity number.
    pub national_id: Option<String>,
    /// The concept label; repeated labels are summed.
    pub concept_name: String,
    /// The concept type code. `0` is base salary; `None` when the line has
    /// no catalogued concept.
    #[serde(default)]
    pub concept_type_id: Option<i64>,
    /// Whether the concept is income or a deduction.
    pub factor: Factor,
    /// Signed line amount.
    pub amount: Decimal,
    /// True when the cost is absorbed by the employer.
    pub employer_paid: bool,
    /// Project or location label, informational only.
    #[serde(default)]
    pub project: Option<String>,
    /// Date the line was applied.
    #[serde(default)]
    pub application_date: Option<NaiveDate>,
    /// Transaction reference.
    #[serde(default)]
    pub reference: Option<String>,
}

impl PayrollLine {
    /// Returns the grouping key for this line, or `None` when the line has
    /// neither an id nor a name.
    ///
    /// Blank strings count as absent.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_export::models::{EmployeeKey, Factor, PayrollLine};
    /// use rust_decimal::Decimal;
    ///
    /// let line = PayrollLine {
    ///     line_id: None,
    ///     employee_id: Some("  ".to_string()),
    ///     employee_name: Some("Ana Pérez".to_string()),
    ///     employee_code: None,
    ///     national_id: None,
    ///     concept_name: "Salario Base".to_string(),
    ///     concept_type_id: Some(0),
    ///     factor: Factor::Income,
    ///     amount: Decimal::new(1000, 0),
    ///     employer_paid: false,
    ///     project: None,
    ///     application_date: None,
    ///     reference: None,
    /// };
    /// assert_eq!(line.employee_key(), Some(EmployeeKey::Name("Ana Pérez".to_string())));
    /// ```
    pub fn employee_key(&self) -> Option<EmployeeKey> {
        employee_key_of(&self.employee_id, &self.employee_name)
    }

    /// Returns true if the line belongs on the payroll sheet: non-zero and
    /// paid by the employee.
    pub fn is_primary(&self) -> bool {
        !self.amount.is_zero() && !self.employer_paid
    }
}

/// Derives the grouping key from an optional id and name.
pub(crate) fn employee_key_of(id: &Option<String>, name: &Option<String>) -> Option<EmployeeKey> {
    if let Some(id) = non_blank(id) {
        return Some(EmployeeKey::Id(id.to_string()));
    }
    non_blank(name).map(|name| EmployeeKey::Name(name.to_string()))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A payroll line as delivered by the query source.
///
/// Field aliases accept the column names of the payroll database views, so
/// rows can be forwarded without renaming. Validation into a
/// [`PayrollLine`] happens in [`crate::export::normalize_records`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollLineRecord {
    /// Source line identifier.
    #[serde(default)]
    pub line_id: Option<String>,
    /// The employee id.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The employee's full name.
    #[serde(default, alias = "empleado")]
    pub employee_name: Option<String>,
    /// The employee's internal code.
    #[serde(default, alias = "codigo")]
    pub employee_code: Option<String>,
    /// The employee's national identity number.
    #[serde(default, alias = "cedula")]
    pub national_id: Option<String>,
    /// The concept label.
    #[serde(default, alias = "concepto")]
    pub concept_name: Option<String>,
    /// The concept type code; null for lines without a catalogued concept.
    #[serde(default, alias = "concepto_tipo_id")]
    pub concept_type_id: Option<i64>,
    /// The raw factor value; anything but 1 or -1, including null, is
    /// rejected during validation.
    #[serde(default)]
    pub factor: Option<i64>,
    /// Signed line amount.
    #[serde(alias = "monto")]
    pub amount: Decimal,
    /// Employer-paid flag, as a boolean or as 0/1.
    #[serde(
        default,
        alias = "company_paid",
        deserialize_with = "deserialize_employer_paid"
    )]
    pub employer_paid: bool,
    /// Project or location label.
    #[serde(default, alias = "Proyecto")]
    pub project: Option<String>,
    /// Date the line was applied; a full timestamp is accepted and truncated to its date.
    #[serde(
        default,
        alias = "fecha_aplicacion",
        deserialize_with = "deserialize_optional_date"
    )]
    pub application_date: Option<NaiveDate>,
    /// Transaction reference.
    #[serde(default, alias = "referencia")]
    pub reference: Option<String>,
}

fn deserialize_employer_paid<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(flag)) => Ok(flag),
        Some(Flag::Int(0)) => Ok(false),
        Some(Flag::Int(1)) => Ok(true),
        Some(Flag::Int(other)) => Err(D::Error::custom(format!(
            "employer_paid must be 0 or 1, got {}",
            other
        ))),
    }
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => {
            let date_part = text.get(..10).unwrap_or(text);
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid date '{}': {}", text, e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_line() -> PayrollLine {
        PayrollLine {
            line_id: Some("ln_001".to_string()),
            employee_id: Some("E-17".to_string()),
            employee_name: Some("Ana Pérez".to_string()),
            employee_code: Some("0017".to_string()),
            national_id: Some("001-1234567-8".to_string()),
            concept_name: "Salario Base".to_string(),
            concept_type_id: Some(0),
            factor: Factor::Income,
            amount: dec("1000.00"),
            employer_paid: false,
            project: None,
            application_date: None,
            reference: None,
        }
    }

    #[test]
    fn test_factor_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Factor::Income).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Factor::Deduction).unwrap(), "-1");
    }

    #[test]
    fn test_factor_rejects_unknown_value() {
        let result: Result<Factor, _> = serde_json::from_str("2");
        assert!(result.is_err());
        assert!(Factor::try_from(0).is_err());
    }

    #[test]
    fn test_employee_key_prefers_id() {
        let line = create_test_line();
        assert_eq!(line.employee_key(), Some(EmployeeKey::Id("E-17".to_string())));
    }

    #[test]
    fn test_employee_key_falls_back_to_name() {
        let mut line = create_test_line();
        line.employee_id = None;
        let key = line.employee_key().unwrap();
        assert!(key.is_name_fallback());
        assert_eq!(key.to_string(), "name:Ana Pérez");
    }

    #[test]
    fn test_employee_key_none_without_identity() {
        let mut line = create_test_line();
        line.employee_id = None;
        line.employee_name = Some("".to_string());
        assert_eq!(line.employee_key(), None);
    }

    #[test]
    fn test_id_and_name_keys_never_collide() {
        let by_id = EmployeeKey::Id("Ana".to_string());
        let by_name = EmployeeKey::Name("Ana".to_string());
        assert_ne!(by_id, by_name);
    }

    #[test]
    fn test_is_primary() {
        let mut line = create_test_line();
        assert!(line.is_primary());

        line.amount = Decimal::ZERO;
        assert!(!line.is_primary());

        line.amount = dec("50");
        line.employer_paid = true;
        assert!(!line.is_primary());
    }

    #[test]
    fn test_deserialize_record_with_source_column_names() {
        let json = r#"{
            "line_id": "ln_9",
            "employee_id": "E-17",
            "empleado": "Ana Pérez",
            "codigo": "0017",
            "cedula": "001-1234567-8",
            "concepto": "Seguro",
            "concepto_tipo_id": 5,
            "factor": -1,
            "monto": 100.5,
            "company_paid": 0,
            "Proyecto": "Planta Norte",
            "fecha_aplicacion": "2026-01-15T00:00:00.000Z",
            "referencia": "NOM-2026-01"
        }"#;

        let record: PayrollLineRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.employee_name.as_deref(), Some("Ana Pérez"));
        assert_eq!(record.concept_name.as_deref(), Some("Seguro"));
        assert_eq!(record.concept_type_id, Some(5));
        assert_eq!(record.factor, Some(-1));
        assert_eq!(record.amount, dec("100.5"));
        assert!(!record.employer_paid);
        assert_eq!(record.project.as_deref(), Some("Planta Norte"));
        assert_eq!(
            record.application_date,
            Some(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_deserialize_record_with_string_amount_and_bool_flag() {
        let json = r#"{
            "employee_name": "Luis Gómez",
            "concept_name": "Bono",
            "concept_type_id": 10,
            "factor": 1,
            "amount": "200.00",
            "employer_paid": true
        }"#;

        let record: PayrollLineRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount, dec("200.00"));
        assert!(record.employer_paid);
        assert_eq!(record.employee_id, None);
        assert_eq!(record.application_date, None);
    }

    #[test]
    fn test_deserialize_record_rejects_invalid_employer_paid() {
        let json = r#"{
            "employee_id": "E-1",
            "concept_type_id": 1,
            "factor": 1,
            "amount": 1,
            "company_paid": 2
        }"#;

        let result: Result<PayrollLineRecord, _> = serde_json::from_str(json);
        assert!(result.unwrap_err().to_string().contains("employer_paid"));
    }

    #[test]
    fn test_deserialize_record_rejects_invalid_date() {
        let json = r#"{
            "employee_id": "E-1",
            "concept_type_id": 1,
            "factor": 1,
            "amount": 1,
            "application_date": "15/01/2026"
        }"#;

        let result: Result<PayrollLineRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_record_without_catalogued_concept() {
        let json = r#"{
            "employee_id": "E-1",
            "empleado": "Ana",
            "concepto": null,
            "concepto_tipo_id": null,
            "factor": null,
            "monto": 25,
            "company_paid": 0
        }"#;

        let record: PayrollLineRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.concept_name, None);
        assert_eq!(record.concept_type_id, None);
        assert_eq!(record.factor, None);
        assert_eq!(record.amount, dec("25"));
    }

    #[test]
    fn test_deserialize_record_requires_amount() {
        let json = r#"{
            "employee_id": "E-1",
            "concept_type_id": 1,
            "factor": 1
        }"#;

        let result: Result<PayrollLineRecord, _> = serde_json::from_str(json);
        assert!(result.unwrap_err().to_string().contains("missing field"));
    }

    #[test]
    fn test_payroll_line_serialization() {
        let line = create_test_line();
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"factor\":1"));
        assert!(json.contains("\"amount\":\"1000.00\""));
        assert!(json.contains("\"concept_name\":\"Salario Base\""));
    }
}
