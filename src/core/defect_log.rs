//! Defect log: ordered collection of defects with CRUD, lookup and summary
//!
//! The log lives in memory; [`DefectLog::load`] and [`DefectLog::save`] move
//! it to and from a plain-text YAML file between CLI invocations.
//!
//! Defects can be referenced three ways:
//! - full ID: `DEF-01J5...`
//! - unique ID prefix: `DEF-01J5` (case-insensitive)
//! - short ID: `DEF@3` (1-based position in the log)

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::entities::defect::{
    Defect, DefectCategory, DefectDraft, DefectSeverity, DefectStatus,
};
use crate::yaml::{parse_yaml, YamlError};

/// Short ID prefix (`DEF@N`)
pub const SHORT_ID_PREFIX: &str = "DEF@";

#[derive(Debug, Error, Diagnostic)]
pub enum DefectError {
    #[error("No defect found matching '{0}'")]
    NotFound(String),

    #[error("'{reference}' matches {count} defects; use more of the ID")]
    Ambiguous { reference: String, count: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("Failed to serialize defect log: {0}")]
    Serialize(#[from] serde_yml::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Filter applied when listing defects. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct DefectFilter {
    pub statuses: Option<Vec<DefectStatus>>,
    pub severities: Option<Vec<DefectSeverity>>,
    pub category: Option<DefectCategory>,
    pub process: Option<String>,
    pub search: Option<String>,
}

impl DefectFilter {
    pub fn matches(&self, defect: &Defect) -> bool {
        if let Some(ref statuses) = self.statuses {
            if !statuses.contains(&defect.status) {
                return false;
            }
        }
        if let Some(ref severities) = self.severities {
            match defect.severity {
                Some(s) if severities.contains(&s) => {}
                _ => return false,
            }
        }
        if let Some(category) = self.category {
            if defect.category != Some(category) {
                return false;
            }
        }
        if let Some(ref process) = self.process {
            if !defect.process.eq_ignore_ascii_case(process) {
                return false;
            }
        }
        if let Some(ref term) = self.search {
            if !defect.matches_text(term) {
                return false;
            }
        }
        true
    }
}

/// One row of the category Pareto ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoEntry {
    /// Category name, or `"uncategorized"`
    pub category: String,
    pub count: usize,
    pub percent: f64,
    pub cumulative_percent: f64,
}

/// Counts for the defect dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefectSummary {
    pub total: usize,
    /// Every status in workflow order, including zero counts
    pub by_status: Vec<(DefectStatus, usize)>,
    /// Every severity, most severe first, including zero counts
    pub by_severity: Vec<(DefectSeverity, usize)>,
    /// Defects with no severity recorded
    pub unrated: usize,
    /// Categories with at least one defect, descending by count
    pub pareto: Vec<ParetoEntry>,
}

impl DefectSummary {
    /// Defects not yet closed
    pub fn open_count(&self) -> usize {
        self.by_status
            .iter()
            .filter(|(s, _)| *s != DefectStatus::Closed)
            .map(|(_, n)| n)
            .sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefectLog {
    #[serde(default)]
    defects: Vec<Defect>,
}

impl DefectLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a log from a YAML file. A missing file is an empty log.
    pub fn load(path: &Path) -> Result<Self, DefectError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(YamlError::Io)?;
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(parse_yaml(&content, &path.display().to_string())?)
    }

    /// Write the log as YAML, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), DefectError> {
        let content = serde_yml::to_string(self)?;
        let write_err = |source| DefectError::Write {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)
    }

    pub fn len(&self) -> usize {
        self.defects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Defect> {
        self.defects.iter()
    }

    /// Short ID (`DEF@N`) for the defect at `index`
    pub fn short_id(index: usize) -> String {
        format!("{}{}", SHORT_ID_PREFIX, index + 1)
    }

    /// Append a new defect built from `draft` and return it
    pub fn create(&mut self, draft: DefectDraft) -> &Defect {
        self.defects.push(Defect::from_draft(draft));
        let last = self.defects.len() - 1;
        &self.defects[last]
    }

    /// Position of the defect a reference points to
    pub fn resolve(&self, reference: &str) -> Result<usize, DefectError> {
        let reference = reference.trim();

        if let Some(n) = reference
            .get(..SHORT_ID_PREFIX.len())
            .filter(|p| p.eq_ignore_ascii_case(SHORT_ID_PREFIX))
            .and_then(|_| reference[SHORT_ID_PREFIX.len()..].parse::<usize>().ok())
        {
            return if n >= 1 && n <= self.defects.len() {
                Ok(n - 1)
            } else {
                Err(DefectError::NotFound(reference.to_string()))
            };
        }

        if let Some(idx) = self
            .defects
            .iter()
            .position(|d| d.id.to_string().eq_ignore_ascii_case(reference))
        {
            return Ok(idx);
        }

        let needle = reference.to_uppercase();
        let matches: Vec<usize> = self
            .defects
            .iter()
            .enumerate()
            .filter(|(_, d)| !needle.is_empty() && d.id.to_string().starts_with(&needle))
            .map(|(i, _)| i)
            .collect();

        match matches.len() {
            0 => Err(DefectError::NotFound(reference.to_string())),
            1 => Ok(matches[0]),
            count => Err(DefectError::Ambiguous {
                reference: reference.to_string(),
                count,
            }),
        }
    }

    pub fn get(&self, reference: &str) -> Result<&Defect, DefectError> {
        let idx = self.resolve(reference)?;
        Ok(&self.defects[idx])
    }

    /// Apply `draft` to an existing defect; its ID is kept
    pub fn update(&mut self, reference: &str, draft: DefectDraft) -> Result<&Defect, DefectError> {
        let idx = self.resolve(reference)?;
        self.defects[idx].apply(draft);
        Ok(&self.defects[idx])
    }

    /// Remove a defect and return it
    pub fn delete(&mut self, reference: &str) -> Result<Defect, DefectError> {
        let idx = self.resolve(reference)?;
        Ok(self.defects.remove(idx))
    }

    /// Defects matching `filter`, paired with their log position
    pub fn filter<'a>(
        &'a self,
        filter: &'a DefectFilter,
    ) -> impl Iterator<Item = (usize, &'a Defect)> + 'a {
        self.defects
            .iter()
            .enumerate()
            .filter(move |(_, d)| filter.matches(d))
    }

    pub fn summary(&self) -> DefectSummary {
        let total = self.defects.len();

        let by_status = DefectStatus::all()
            .iter()
            .map(|s| (*s, self.defects.iter().filter(|d| d.status == *s).count()))
            .collect();

        let by_severity = DefectSeverity::all()
            .iter()
            .map(|s| {
                let n = self.defects.iter().filter(|d| d.severity == Some(*s)).count();
                (*s, n)
            })
            .collect();

        let unrated = self.defects.iter().filter(|d| d.severity.is_none()).count();

        let mut counts: Vec<(String, usize)> = DefectCategory::all()
            .iter()
            .map(|c| {
                let n = self.defects.iter().filter(|d| d.category == Some(*c)).count();
                (c.to_string(), n)
            })
            .collect();
        counts.push((
            "uncategorized".to_string(),
            self.defects.iter().filter(|d| d.category.is_none()).count(),
        ));
        counts.retain(|(_, n)| *n > 0);
        // Stable sort keeps the 6M order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let mut running = 0usize;
        let pareto = counts
            .into_iter()
            .map(|(category, count)| {
                running += count;
                ParetoEntry {
                    category,
                    count,
                    percent: count as f64 / total as f64 * 100.0,
                    cumulative_percent: running as f64 / total as f64 * 100.0,
                }
            })
            .collect();

        DefectSummary {
            total,
            by_status,
            by_severity,
            unrated,
            pareto,
        }
    }
}
