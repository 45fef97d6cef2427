//! Core data models for the Payroll Export Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod aggregate;
mod concept;
mod payroll_line;
mod workbook;

pub use aggregate::{EmployeeAggregate, EmployeeIdentity, EmployeeTotals};
pub use concept::{ConceptCategory, ConceptMeta};
pub use payroll_line::{EmployeeKey, Factor, PayrollLine, PayrollLineRecord};
pub(crate) use payroll_line::employee_key_of;
pub use workbook::{CellValue, ExportSummary, PayrollWorkbook, Sheet, SheetKind};
