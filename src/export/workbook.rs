//! Building the two-sheet payroll workbook.
//!
//! The payroll sheet holds employee-paid, non-zero lines and ends with the
//! totals columns. The analysis sheet holds employer-paid lines and has no
//! totals. Each sheet is aggregated and ordered on its own. A sheet with no
//! rows is left out, and a run with nothing to show is an error rather than
//! an empty workbook.

use std::collections::HashSet;
use std::fmt::Write;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};
use crate::models::{
    CellValue, EmployeeAggregate, ExportSummary, PayrollLine, PayrollLineRecord, PayrollWorkbook,
    Sheet, SheetKind,
};

use super::aggregation::aggregate_lines;
use super::classification::sort_concepts;
use super::normalize::normalize_records;
use super::partition::partition_lines;

/// Exports a snapshot of payroll lines for one transaction.
///
/// # Errors
///
/// - [`ExportError::EmptyInput`] when `lines` is empty or every line is a
///   zero-amount employee-paid line.
/// - [`ExportError::MissingIdentity`] from aggregation.
/// - [`ExportError::AmountOverflow`] when a column sum or total leaves the
///   decimal range.
///
/// # Example
///
/// ```
/// use payroll_export::config::ExportConfig;
/// use payroll_export::export::export_payroll;
/// use payroll_export::models::{Factor, PayrollLine, SheetKind};
/// use rust_decimal::Decimal;
///
/// let line = |concept: &str, type_id, factor, amount| PayrollLine {
///     line_id: None,
///     employee_id: Some("E-1".to_string()),
///     employee_name: Some("Ana Pérez".to_string()),
///     employee_code: Some("0017".to_string()),
///     national_id: None,
///     concept_name: concept.to_string(),
///     concept_type_id: Some(type_id),
///     factor,
///     amount: Decimal::new(amount, 0),
///     employer_paid: false,
///     project: None,
///     application_date: None,
///     reference: None,
/// };
///
/// let workbook = export_payroll(
///     "3f9a2c1e-77aa-4b1c-9d0e-5c2b8e4f1a00",
///     &[
///         line("Salario Base", 0, Factor::Income, 1000),
///         line("Seguro", 5, Factor::Deduction, 100),
///     ],
///     &ExportConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(workbook.file_name, "nomina_detallada_3f9a2c1e.xlsx");
/// let payroll = workbook.sheet(SheetKind::Payroll).unwrap();
/// assert_eq!(payroll.concept_columns, vec!["Salario Base", "Seguro"]);
/// assert_eq!(
///     payroll.cell(0, "Neto a Pagar").unwrap().as_amount(),
///     Some(Decimal::new(900, 0))
/// );
/// ```
pub fn export_payroll(
    transaction_id: &str,
    lines: &[PayrollLine],
    config: &ExportConfig,
) -> ExportResult<PayrollWorkbook> {
    let start_time = Instant::now();

    if lines.is_empty() {
        return Err(ExportError::EmptyInput {
            transaction_id: transaction_id.to_string(),
        });
    }

    let partition = partition_lines(lines);
    if partition.is_empty() {
        return Err(ExportError::EmptyInput {
            transaction_id: transaction_id.to_string(),
        });
    }

    let mut sheets = Vec::with_capacity(2);
    let mut employees = HashSet::new();

    for (kind, sheet_lines) in [
        (SheetKind::Payroll, &partition.primary),
        (SheetKind::Analysis, &partition.analysis),
    ] {
        if let Some((sheet, aggregates)) = build_sheet(sheet_lines, kind, config)? {
            employees.extend(aggregates.into_iter().map(|a| a.identity.key));
            sheets.push(sheet);
        }
    }

    let summary = ExportSummary {
        input_lines: lines.len(),
        payroll_lines: partition.primary.len(),
        analysis_lines: partition.analysis.len(),
        excluded_lines: partition.excluded.len(),
        employees: employees.len(),
    };

    info!(
        transaction_id = %transaction_id,
        input_lines = summary.input_lines,
        payroll_lines = summary.payroll_lines,
        analysis_lines = summary.analysis_lines,
        excluded_lines = summary.excluded_lines,
        employees = summary.employees,
        sheets = sheets.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Payroll export built"
    );

    Ok(PayrollWorkbook {
        transaction_id: transaction_id.to_string(),
        file_name: file_name_for(transaction_id, config),
        sheets,
        summary,
    })
}

/// Validates raw query records and exports them.
///
/// See [`normalize_records`] and [`export_payroll`].
pub fn export_records(
    transaction_id: &str,
    records: Vec<PayrollLineRecord>,
    config: &ExportConfig,
) -> ExportResult<PayrollWorkbook> {
    let lines = normalize_records(records, config)?;
    export_payroll(transaction_id, &lines, config)
}

/// Builds one sheet from the lines of a single partition.
///
/// Returns `None` when there are no lines. The aggregates are returned
/// alongside the sheet so callers can inspect per-employee totals.
pub fn build_sheet(
    lines: &[PayrollLine],
    kind: SheetKind,
    config: &ExportConfig,
) -> ExportResult<Option<(Sheet, Vec<EmployeeAggregate>)>> {
    if lines.is_empty() {
        return Ok(None);
    }

    let aggregation = aggregate_lines(lines)?;
    let ordered = sort_concepts(&aggregation.concepts, &config.concepts.salary_keyword);
    let concept_columns: Vec<String> = ordered.iter().map(|meta| meta.name.clone()).collect();
    let concept_categories = ordered.iter().map(|meta| meta.category()).collect();
    let with_totals = kind == SheetKind::Payroll;

    let labels = &config.columns;
    let mut headers: Vec<String> = labels.leading().iter().map(|l| l.to_string()).collect();
    headers.extend(concept_columns.iter().cloned());
    if with_totals {
        headers.extend(labels.totals().iter().map(|l| l.to_string()));
    }

    let rows = aggregation
        .employees
        .iter()
        .map(|employee| build_row(employee, &concept_columns, with_totals, config))
        .collect::<ExportResult<Vec<_>>>()?;

    let name = match kind {
        SheetKind::Payroll => config.sheets.payroll.clone(),
        SheetKind::Analysis => config.sheets.analysis.clone(),
    };

    debug!(
        sheet = %name,
        rows = aggregation.employees.len(),
        concepts = concept_columns.len(),
        "Sheet built"
    );

    Ok(Some((
        Sheet {
            name,
            kind,
            headers,
            concept_columns,
            concept_categories,
            rows,
        },
        aggregation.employees,
    )))
}

fn build_row(
    employee: &EmployeeAggregate,
    concept_columns: &[String],
    with_totals: bool,
    config: &ExportConfig,
) -> ExportResult<Vec<CellValue>> {
    let identity = &employee.identity;
    let text = |value: &Option<String>| CellValue::Text(value.clone().unwrap_or_default());
    let date = identity
        .application_date
        .map(|d| format_date(d, &config.output.date_format))
        .unwrap_or_default();

    let mut row = vec![
        text(&identity.code),
        text(&identity.name),
        text(&identity.national_id),
        CellValue::Text(date),
        text(&identity.reference),
        text(&identity.project),
    ];
    row.extend(
        concept_columns
            .iter()
            .map(|concept| CellValue::Amount(employee.amount_for(concept))),
    );
    if with_totals {
        let net_pay = employee
            .totals
            .net_pay()
            .ok_or_else(|| ExportError::AmountOverflow {
                employee_key: identity.key.to_string(),
                concept: config.columns.net_pay.clone(),
            })?;
        row.push(CellValue::Amount(employee.totals.total_income));
        row.push(CellValue::Amount(employee.totals.total_deductions));
        row.push(CellValue::Amount(net_pay));
    }
    Ok(row)
}

/// Formats a date with the configured pattern, falling back to ISO 8601 when
/// the pattern cannot render it.
fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", date.format(pattern)).is_err() {
        return date.to_string();
    }
    rendered
}

/// Derives the download file name from the transaction id.
///
/// Only the first `transaction_id_chars` characters are used; anything other
/// than ASCII letters, digits, `-` and `_` is replaced with `_`.
pub fn file_name_for(transaction_id: &str, config: &ExportConfig) -> String {
    let id: String = transaction_id
        .chars()
        .take(config.output.transaction_id_chars)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}.xlsx", config.output.file_prefix, id)
}
