//! Configuration loading for the Payroll Export Engine.
//!
//! The export itself needs no configuration; this module only lets a
//! deployment override sheet names, column labels, the date format and the
//! identity policy from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_export::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Analysis sheet: {}", config.config().sheets.analysis);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{
    ColumnLabels, ConceptRules, ExportConfig, IdentityPolicy, OutputConfig, SheetNames,
};
