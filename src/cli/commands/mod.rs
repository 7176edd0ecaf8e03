//! Command implementations

pub mod calc;
pub mod defect;
pub mod file;
pub mod stats;
