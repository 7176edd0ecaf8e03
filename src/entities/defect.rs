//! Defect record for the quality defect log
//!
//! A defect is a free-form nonconformity record: where it happened, what
//! was observed, how severe it is, and the root-cause/corrective-action
//! follow-up. Categories follow the 6M (Ishikawa) grouping.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::identity::DefectId;

/// How serious a defect is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefectSeverity {
    /// Safety or function lost
    Critical,
    /// Function degraded
    Major,
    /// Cosmetic or minor deviation
    Minor,
    /// Noted for follow-up, not a nonconformity yet
    Observation,
}

impl DefectSeverity {
    pub fn all() -> &'static [DefectSeverity] {
        &[
            DefectSeverity::Critical,
            DefectSeverity::Major,
            DefectSeverity::Minor,
            DefectSeverity::Observation,
        ]
    }
}

impl std::fmt::Display for DefectSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefectSeverity::Critical => write!(f, "critical"),
            DefectSeverity::Major => write!(f, "major"),
            DefectSeverity::Minor => write!(f, "minor"),
            DefectSeverity::Observation => write!(f, "observation"),
        }
    }
}

impl FromStr for DefectSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" | "crit" | "crítico" | "critico" => Ok(DefectSeverity::Critical),
            "major" | "mayor" => Ok(DefectSeverity::Major),
            "minor" | "menor" => Ok(DefectSeverity::Minor),
            "observation" | "obs" | "observación" | "observacion" => {
                Ok(DefectSeverity::Observation)
            }
            _ => Err(format!("Unknown defect severity: {}", s)),
        }
    }
}

/// Where a defect is in its correction workflow
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DefectStatus {
    #[default]
    Open,
    /// Root cause under analysis
    Analysis,
    /// Corrective action in progress
    Correction,
    /// Correction being verified
    Verification,
    Closed,
}

impl DefectStatus {
    pub fn all() -> &'static [DefectStatus] {
        &[
            DefectStatus::Open,
            DefectStatus::Analysis,
            DefectStatus::Correction,
            DefectStatus::Verification,
            DefectStatus::Closed,
        ]
    }
}

impl std::fmt::Display for DefectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefectStatus::Open => write!(f, "open"),
            DefectStatus::Analysis => write!(f, "analysis"),
            DefectStatus::Correction => write!(f, "correction"),
            DefectStatus::Verification => write!(f, "verification"),
            DefectStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for DefectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" | "abierto" => Ok(DefectStatus::Open),
            "analysis" | "analyzing" | "en análisis" | "en analisis" => Ok(DefectStatus::Analysis),
            "correction" | "correcting" | "en corrección" | "en correccion" => {
                Ok(DefectStatus::Correction)
            }
            "verification" | "verifying" | "verificación" | "verificacion" => {
                Ok(DefectStatus::Verification)
            }
            "closed" | "cerrado" => Ok(DefectStatus::Closed),
            _ => Err(format!("Unknown defect status: {}", s)),
        }
    }
}

/// 6M cause category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefectCategory {
    Material,
    Machine,
    Method,
    Manpower,
    Measurement,
    Environment,
}

impl DefectCategory {
    pub fn all() -> &'static [DefectCategory] {
        &[
            DefectCategory::Material,
            DefectCategory::Machine,
            DefectCategory::Method,
            DefectCategory::Manpower,
            DefectCategory::Measurement,
            DefectCategory::Environment,
        ]
    }
}

impl std::fmt::Display for DefectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefectCategory::Material => write!(f, "material"),
            DefectCategory::Machine => write!(f, "machine"),
            DefectCategory::Method => write!(f, "method"),
            DefectCategory::Manpower => write!(f, "manpower"),
            DefectCategory::Measurement => write!(f, "measurement"),
            DefectCategory::Environment => write!(f, "environment"),
        }
    }
}

impl FromStr for DefectCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "material" | "materials" => Ok(DefectCategory::Material),
            "machine" | "machinery" | "maquinaria" => Ok(DefectCategory::Machine),
            "method" | "método" | "metodo" => Ok(DefectCategory::Method),
            "manpower" | "people" | "labor" | "mano de obra" => Ok(DefectCategory::Manpower),
            "measurement" | "medición" | "medicion" => Ok(DefectCategory::Measurement),
            "environment" | "medio ambiente" => Ok(DefectCategory::Environment),
            _ => Err(format!("Unknown defect category: {}", s)),
        }
    }
}

/// A logged defect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defect {
    /// Unique identifier (DEF-ULID)
    pub id: DefectId,

    /// Date the defect was logged
    pub date: NaiveDate,

    /// Process or line where the defect was found
    #[serde(default)]
    pub process: String,

    /// What was observed
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<DefectSeverity>,

    #[serde(default)]
    pub status: DefectStatus,

    /// Person responsible for the follow-up
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub assigned_to: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<DefectCategory>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root_cause: String,

    /// Corrective action
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action: String,
}

/// Field values for creating or updating a defect
///
/// `None` means "leave unchanged" on update and "use the default" on create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefectDraft {
    pub date: Option<NaiveDate>,
    pub process: Option<String>,
    pub description: Option<String>,
    pub severity: Option<DefectSeverity>,
    pub status: Option<DefectStatus>,
    pub assigned_to: Option<String>,
    pub category: Option<DefectCategory>,
    pub root_cause: Option<String>,
    pub action: Option<String>,
}

impl DefectDraft {
    pub fn is_empty(&self) -> bool {
        *self == DefectDraft::default()
    }
}

impl Defect {
    /// Create a defect with a fresh ID, dated today unless the draft says otherwise
    pub fn from_draft(draft: DefectDraft) -> Self {
        Self {
            id: DefectId::new(),
            date: draft.date.unwrap_or_else(|| Local::now().date_naive()),
            process: draft.process.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            severity: draft.severity,
            status: draft.status.unwrap_or_default(),
            assigned_to: draft.assigned_to.unwrap_or_default(),
            category: draft.category,
            root_cause: draft.root_cause.unwrap_or_default(),
            action: draft.action.unwrap_or_default(),
        }
    }

    /// Apply the fields set in `draft`; the ID never changes
    pub fn apply(&mut self, draft: DefectDraft) {
        if let Some(date) = draft.date {
            self.date = date;
        }
        if let Some(process) = draft.process {
            self.process = process;
        }
        if let Some(description) = draft.description {
            self.description = description;
        }
        if draft.severity.is_some() {
            self.severity = draft.severity;
        }
        if let Some(status) = draft.status {
            self.status = status;
        }
        if let Some(assigned_to) = draft.assigned_to {
            self.assigned_to = assigned_to;
        }
        if draft.category.is_some() {
            self.category = draft.category;
        }
        if let Some(root_cause) = draft.root_cause {
            self.root_cause = root_cause;
        }
        if let Some(action) = draft.action {
            self.action = action;
        }
    }

    /// Case-insensitive match against the free-text fields
    pub fn matches_text(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [
            &self.process,
            &self.description,
            &self.assigned_to,
            &self.root_cause,
            &self.action,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
