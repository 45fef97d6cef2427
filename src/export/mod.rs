//! Export logic for the Payroll Export Engine.
//!
//! This module contains the stages of a payroll export: validation of query
//! records, partitioning into payroll and analysis lines, aggregation by
//! employee, concept ordering, totals, sheet building and `.xlsx`
//! serialization, plus the detail-table filter and transaction KPIs.

mod aggregation;
mod classification;
mod collation;
mod detail;
mod kpi;
mod normalize;
mod partition;
mod totals;
mod workbook;
mod xlsx;

pub use aggregation::{Aggregation, aggregate_lines};
pub use classification::{compare_concepts, order_concepts};
pub use collation::locale_cmp;
pub use detail::filter_detail_lines;
pub use kpi::{PayrollKpis, summarize_kpis};
pub use normalize::normalize_records;
pub use partition::{LinePartition, partition_lines};
pub use totals::{accumulate_totals, calculate_totals};
pub use workbook::{build_sheet, export_payroll, export_records, file_name_for};
pub use xlsx::write_xlsx;
