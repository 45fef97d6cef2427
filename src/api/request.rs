//! Request types for the Payroll Export Engine API.

use serde::{Deserialize, Serialize};

use crate::models::PayrollLineRecord;

/// Request body for `/export` and `/export/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// The payroll transaction the lines belong to.
    pub transaction_id: String,
    /// The transaction's line snapshot, in any order.
    pub lines: Vec<PayrollLineRecord>,
}

/// Request body for `/kpis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiRequest {
    /// The transaction's line snapshot.
    pub lines: Vec<PayrollLineRecord>,
}

/// Request body for `/lines/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The transaction's line snapshot.
    pub lines: Vec<PayrollLineRecord>,
    /// Free-text search; blank or absent shows every visible line.
    #[serde(default)]
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_deserialize_export_request_with_view_column_names() {
        let json = r#"{
            "transaction_id": "8f2c41d0-9b7e-4c11-a2d4-3f5e6a7b8c9d",
            "lines": [
                {
                    "employee_id": "E-1",
                    "empleado": "Ana Pérez",
                    "cedula": "402-0000042-1",
                    "concepto": "Salario Base",
                    "concepto_tipo_id": 0,
                    "factor": 1,
                    "monto": "1000.00",
                    "company_paid": 0,
                    "fecha_aplicacion": "2026-01-31T00:00:00"
                }
            ]
        }"#;

        let request: ExportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.lines.len(), 1);
        let line = &request.lines[0];
        assert_eq!(line.employee_name.as_deref(), Some("Ana Pérez"));
        assert_eq!(line.amount, Decimal::new(100000, 2));
        assert!(!line.employer_paid);
    }

    #[test]
    fn test_search_request_query_is_optional() {
        let request: SearchRequest = serde_json::from_str(r#"{"lines": []}"#).unwrap();
        assert!(request.query.is_none());
    }

    #[test]
    fn test_export_request_requires_transaction_id() {
        let result: Result<ExportRequest, _> = serde_json::from_str(r#"{"lines": []}"#);
        assert!(result.is_err());
    }
}
