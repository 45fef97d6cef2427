//! HTTP API module for the Payroll Export Engine.
//!
//! This module exposes the export pipeline over REST: workbook download,
//! workbook preview, transaction KPIs and the detail-table search.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ExportRequest, KpiRequest, SearchRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
