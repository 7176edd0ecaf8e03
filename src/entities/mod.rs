//! Entity type definitions

pub mod defect;

pub use defect::{Defect, DefectCategory, DefectDraft, DefectSeverity, DefectStatus};
