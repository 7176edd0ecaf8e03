//! Core module - fundamental types and utilities

pub mod config;
pub mod defect_log;
pub mod identity;

pub use config::Config;
pub use defect_log::{DefectError, DefectFilter, DefectLog, DefectSummary, ParetoEntry};
pub use identity::{DefectId, IdParseError};
