//! File I/O for ensemble configurations and results.
//!
//! Configurations and full reports are stored as JSON; per-step curves can
//! additionally be exported as CSV for plotting tools.

pub mod csv;
pub mod json;

pub use csv::{curves_file_name, write_curves_csv};
pub use json::{MaterialReport, read_config, read_reports, write_config, write_reports};
