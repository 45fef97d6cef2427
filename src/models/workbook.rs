//! Abstract workbook models.
//!
//! A [`PayrollWorkbook`] is a list of sheets, each a header row plus ordered
//! rows of cells. Binding it to a file format is done by
//! [`crate::export::write_xlsx`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ConceptCategory;

/// A single cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Free text (identity columns).
    Text(String),
    /// A currency amount.
    Amount(Decimal),
}

impl CellValue {
    /// Returns the amount if this is an amount cell.
    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            CellValue::Amount(amount) => Some(*amount),
            CellValue::Text(_) => None,
        }
    }

    /// Returns the text if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            CellValue::Amount(_) => None,
        }
    }
}

/// Which partition a sheet was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    /// Employee-paid, non-zero lines, with totals columns.
    Payroll,
    /// Employer-paid lines, without totals.
    Analysis,
}

/// One sheet of the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet tab name.
    pub name: String,
    /// Which partition this sheet holds.
    pub kind: SheetKind,
    /// Column headers, in output order.
    pub headers: Vec<String>,
    /// Concept columns only, in classifier order.
    pub concept_columns: Vec<String>,
    /// Category of each entry in `concept_columns`.
    pub concept_categories: Vec<ConceptCategory>,
    /// One row per employee; every row has `headers.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Returns the position of a header.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Returns the cell at `row` under `header`.
    pub fn cell(&self, row: usize, header: &str) -> Option<&CellValue> {
        let column = self.column_index(header)?;
        self.rows.get(row)?.get(column)
    }
}

/// Line counts of an export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    /// Lines in the input snapshot.
    pub input_lines: usize,
    /// Lines placed on the payroll sheet.
    pub payroll_lines: usize,
    /// Lines placed on the analysis sheet.
    pub analysis_lines: usize,
    /// Zero-amount employee-paid lines left out of both sheets.
    pub excluded_lines: usize,
    /// Distinct employees across both sheets.
    pub employees: usize,
}

/// The result of an export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollWorkbook {
    /// The payroll transaction the lines belong to.
    pub transaction_id: String,
    /// Deterministic file name derived from the transaction id.
    pub file_name: String,
    /// Non-empty sheets, payroll first.
    pub sheets: Vec<Sheet>,
    /// Line counts.
    pub summary: ExportSummary,
}

impl PayrollWorkbook {
    /// Returns the sheet of the given kind, if it was produced.
    pub fn sheet(&self, kind: SheetKind) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.kind == kind)
    }
}
