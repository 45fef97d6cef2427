//! Configuration types for payroll export.
//!
//! These structures are deserialized from `export.yaml`. Every field has a
//! default, so a partial file (or no file at all) yields a working
//! configuration.

use serde::Deserialize;

/// How lines without an employee id are grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityPolicy {
    /// Group by employee name when the id is missing.
    #[default]
    FallbackToName,
    /// Reject any line without an employee id.
    RequireId,
}

/// Sheet tab names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    /// Name of the employee-paid sheet.
    pub payroll: String,
    /// Name of the employer-paid sheet.
    pub analysis: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            payroll: "Nómina Principal".to_string(),
            analysis: "Análisis - Otros Conceptos".to_string(),
        }
    }
}

/// Labels of the fixed leading and trailing columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    /// Employee code column.
    pub code: String,
    /// Employee name column.
    pub name: String,
    /// National id column.
    pub national_id: String,
    /// Application date column.
    pub date: String,
    /// Transaction reference column.
    pub reference: String,
    /// Project column.
    pub project: String,
    /// Total income column.
    pub total_income: String,
    /// Total deductions column.
    pub total_deductions: String,
    /// Net pay column.
    pub net_pay: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            code: "Código".to_string(),
            name: "Empleado".to_string(),
            national_id: "Cédula".to_string(),
            date: "Fecha".to_string(),
            reference: "Referencia".to_string(),
            project: "Proyecto".to_string(),
            total_income: "Total Ingresos".to_string(),
            total_deductions: "Total Deducciones".to_string(),
            net_pay: "Neto a Pagar".to_string(),
        }
    }
}

impl ColumnLabels {
    /// Returns the leading identity column labels in output order.
    pub fn leading(&self) -> [&str; 6] {
        [
            &self.code,
            &self.name,
            &self.national_id,
            &self.date,
            &self.reference,
            &self.project,
        ]
    }

    /// Returns the totals column labels in output order.
    pub fn totals(&self) -> [&str; 3] {
        [&self.total_income, &self.total_deductions, &self.net_pay]
    }
}

/// Concept naming rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConceptRules {
    /// Label used for lines without a concept name.
    pub missing_label: String,
    /// Concepts containing this word (case-insensitive) sort first in their bucket.
    pub salary_keyword: String,
}

impl Default for ConceptRules {
    fn default() -> Self {
        Self {
            missing_label: "S/N".to_string(),
            salary_keyword: "Salario".to_string(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name prefix.
    pub file_prefix: String,
    /// How many leading characters of the transaction id go into the file name.
    pub transaction_id_chars: usize,
    /// `chrono` format string for the date column.
    pub date_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_prefix: "nomina_detallada".to_string(),
            transaction_id_chars: 8,
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

/// The complete export configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Sheet tab names.
    pub sheets: SheetNames,
    /// Fixed column labels.
    pub columns: ColumnLabels,
    /// Concept naming rules.
    pub concepts: ConceptRules,
    /// Output file settings.
    pub output: OutputConfig,
    /// Grouping policy for lines without an employee id.
    pub identity_policy: IdentityPolicy,
}
