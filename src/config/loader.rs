//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the export
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};

use crate::error::{ExportError, ExportResult};

use super::types::ExportConfig;

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "export.yaml";

/// Longest sheet name a workbook accepts.
const MAX_SHEET_NAME_CHARS: usize = 31;

/// Characters a sheet name may not contain.
const INVALID_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Loads and provides access to the export configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── export.yaml   # Sheet names, column labels, identity policy
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_export::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Payroll sheet: {}", loader.config().sheets.payroll);
/// # Ok::<(), payroll_export::error::ExportError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ExportConfig,
}

impl ConfigLoader {
    /// Loads configuration from `export.yaml` in the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - the file is missing
    /// - the file contains invalid YAML
    /// - a sheet name or the date format is unusable
    pub fn load<P: AsRef<Path>>(path: P) -> ExportResult<Self> {
        let file_path = path.as_ref().join(CONFIG_FILE_NAME);
        let path_str = file_path.display().to_string();

        let content = fs::read_to_string(&file_path).map_err(|_| ExportError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content).map_err(|message| ExportError::ConfigParseError {
            path: path_str,
            message,
        })?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: ExportConfig) -> ExportResult<Self> {
        validate(&config).map_err(|message| ExportError::ConfigParseError {
            path: "<inline>".to_string(),
            message,
        })?;
        Ok(Self { config })
    }

    fn parse(content: &str) -> Result<ExportConfig, String> {
        let config: ExportConfig = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        validate(&config)?;
        Ok(config)
    }

    /// Returns the underlying export configuration.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }
}

fn validate(config: &ExportConfig) -> Result<(), String> {
    validate_sheet_name(&config.sheets.payroll)?;
    validate_sheet_name(&config.sheets.analysis)?;
    if config.sheets.payroll == config.sheets.analysis {
        return Err(format!(
            "sheet names must differ, both are '{}'",
            config.sheets.payroll
        ));
    }

    if StrftimeItems::new(&config.output.date_format).any(|item| matches!(item, Item::Error)) {
        return Err(format!(
            "invalid date format '{}'",
            config.output.date_format
        ));
    }

    if config.output.transaction_id_chars == 0 {
        return Err("transaction_id_chars must be at least 1".to_string());
    }

    Ok(())
}

fn validate_sheet_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("sheet name must not be empty".to_string());
    }
    if name.chars().count() > MAX_SHEET_NAME_CHARS {
        return Err(format!(
            "sheet name '{}' is longer than {} characters",
            name, MAX_SHEET_NAME_CHARS
        ));
    }
    if let Some(c) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
        return Err(format!("sheet name '{}' contains '{}'", name, c));
    }
    Ok(())
}
