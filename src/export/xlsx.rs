//! Writing a [`PayrollWorkbook`] as an `.xlsx` file.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::models::{CellValue, PayrollWorkbook};

/// Number format applied to amount cells.
const AMOUNT_FORMAT: &str = "#,##0.00";

/// Narrowest column width, in characters.
const MIN_COLUMN_WIDTH: f64 = 10.0;

/// Renders the workbook into an in-memory `.xlsx` file.
///
/// The header row is bold and frozen; amounts are written as numbers so
/// they can be summed in the spreadsheet.
///
/// # Errors
///
/// Returns [`ExportError::Spreadsheet`] when the workbook cannot be written
/// or an amount does not fit in an `f64`.
pub fn write_xlsx(workbook: &PayrollWorkbook) -> ExportResult<Vec<u8>> {
    let mut xlsx = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format(AMOUNT_FORMAT);

    for sheet in &workbook.sheets {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, header) in sheet.headers.iter().enumerate() {
            let col = column_number(col)?;
            worksheet.write_string_with_format(0, col, header, &header_format)?;
            worksheet.set_column_width(col, column_width(header))?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        for (row_index, row) in sheet.rows.iter().enumerate() {
            let row_number = u32::try_from(row_index + 1).map_err(|_| ExportError::Spreadsheet {
                message: format!("sheet '{}' has too many rows", sheet.name),
            })?;

            for (col, cell) in row.iter().enumerate() {
                let col = column_number(col)?;
                match cell {
                    CellValue::Text(text) => {
                        worksheet.write_string(row_number, col, text)?;
                    }
                    CellValue::Amount(amount) => {
                        worksheet.write_number_with_format(
                            row_number,
                            col,
                            amount_to_f64(*amount)?,
                            &amount_format,
                        )?;
                    }
                }
            }
        }
    }

    let buffer = xlsx.save_to_buffer()?;
    debug!(
        file_name = %workbook.file_name,
        bytes = buffer.len(),
        "Workbook serialized"
    );
    Ok(buffer)
}

fn column_number(col: usize) -> ExportResult<u16> {
    u16::try_from(col).map_err(|_| ExportError::Spreadsheet {
        message: format!("column {} is out of range", col),
    })
}

fn column_width(header: &str) -> f64 {
    (header.chars().count() as f64 + 2.0).max(MIN_COLUMN_WIDTH)
}

fn amount_to_f64(amount: Decimal) -> ExportResult<f64> {
    amount.to_f64().ok_or_else(|| ExportError::Spreadsheet {
        message: format!("amount {} cannot be written as a number", amount),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConceptCategory, ExportSummary, Sheet, SheetKind};
    use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
    use std::io::Cursor;

    fn create_test_workbook() -> PayrollWorkbook {
        PayrollWorkbook {
            transaction_id: "tx".to_string(),
            file_name: "nomina_detallada_tx.xlsx".to_string(),
            sheets: vec![Sheet {
                name: "Nómina Principal".to_string(),
                kind: SheetKind::Payroll,
                headers: vec!["Empleado".to_string(), "Salario Base".to_string()],
                concept_columns: vec!["Salario Base".to_string()],
                concept_categories: vec![ConceptCategory::BaseSalary],
                rows: vec![vec![
                    CellValue::Text("Ana Pérez".to_string()),
                    CellValue::Amount(Decimal::new(100050, 2)),
                ]],
            }],
            summary: ExportSummary::default(),
        }
    }

    #[test]
    fn test_written_workbook_reads_back() {
        let bytes = write_xlsx(&create_test_workbook()).unwrap();

        let mut reader: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.sheet_names(), vec!["Nómina Principal".to_string()]);

        let range = reader.worksheet_range("Nómina Principal").unwrap();
        let rows: Vec<&[Data]> = range.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Data::String("Empleado".to_string()));
        assert_eq!(rows[1][0], Data::String("Ana Pérez".to_string()));
        assert_eq!(rows[1][1], Data::Float(1000.5));
    }

    #[test]
    fn test_output_is_a_zip_container() {
        let bytes = write_xlsx(&create_test_workbook()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_column_width_has_minimum() {
        assert_eq!(column_width("Fecha"), MIN_COLUMN_WIDTH);
        assert_eq!(column_width("Total Deducciones"), 19.0);
    }

    #[test]
    fn test_column_number_out_of_range() {
        assert!(column_number(70_000).is_err());
    }
}
