//! SigmaHub Quality Toolkit
//!
//! Six Sigma quality tools for the terminal: descriptive statistics and a
//! normality screen for spreadsheet columns, DPMO / sigma level and process
//! capability calculators, and a defect log.
//!
//! The numeric engine in [`stats`] is free of I/O and state; [`data`] turns
//! CSV files into samples for it, and [`cli`] wires everything to the `shq`
//! binary.

pub mod cli;
pub mod core;
pub mod data;
pub mod entities;
pub mod stats;
pub mod yaml;
