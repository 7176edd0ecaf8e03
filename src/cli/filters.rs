//! Filter enums for defect list commands

use clap::ValueEnum;

use crate::entities::{DefectSeverity, DefectStatus};

/// Status filter for `defect list`
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Open only
    Open,
    /// Root cause analysis only
    Analysis,
    /// Correction in progress only
    Correction,
    /// Verification only
    Verification,
    /// Closed only
    Closed,
    /// Everything not closed - default
    #[default]
    Active,
    /// All statuses including closed
    All,
}

impl StatusFilter {
    /// Check if a status matches this filter
    pub fn matches(&self, status: &DefectStatus) -> bool {
        match self {
            StatusFilter::Open => *status == DefectStatus::Open,
            StatusFilter::Analysis => *status == DefectStatus::Analysis,
            StatusFilter::Correction => *status == DefectStatus::Correction,
            StatusFilter::Verification => *status == DefectStatus::Verification,
            StatusFilter::Closed => *status == DefectStatus::Closed,
            StatusFilter::Active => *status != DefectStatus::Closed,
            StatusFilter::All => true,
        }
    }

    /// Statuses selected by this filter, or `None` for no restriction
    pub fn statuses(&self) -> Option<Vec<DefectStatus>> {
        match self {
            StatusFilter::All => None,
            _ => Some(
                DefectStatus::all()
                    .iter()
                    .copied()
                    .filter(|s| self.matches(s))
                    .collect(),
            ),
        }
    }
}

/// Severity filter for `defect list`
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum SeverityFilter {
    /// Critical only
    Critical,
    /// Major only
    Major,
    /// Minor only
    Minor,
    /// Observations only
    Observation,
    /// Critical and major only
    Urgent,
    /// All severities, including unrated - default
    #[default]
    All,
}

impl SeverityFilter {
    /// Check if a severity matches this filter
    pub fn matches(&self, severity: &DefectSeverity) -> bool {
        match self {
            SeverityFilter::Critical => *severity == DefectSeverity::Critical,
            SeverityFilter::Major => *severity == DefectSeverity::Major,
            SeverityFilter::Minor => *severity == DefectSeverity::Minor,
            SeverityFilter::Observation => *severity == DefectSeverity::Observation,
            SeverityFilter::Urgent => {
                *severity == DefectSeverity::Critical || *severity == DefectSeverity::Major
            }
            SeverityFilter::All => true,
        }
    }

    /// Severities selected by this filter, or `None` for no restriction
    pub fn severities(&self) -> Option<Vec<DefectSeverity>> {
        match self {
            SeverityFilter::All => None,
            _ => Some(
                DefectSeverity::all()
                    .iter()
                    .copied()
                    .filter(|s| self.matches(s))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::Open.matches(&DefectStatus::Open));
        assert!(!StatusFilter::Open.matches(&DefectStatus::Analysis));

        assert!(StatusFilter::Active.matches(&DefectStatus::Open));
        assert!(StatusFilter::Active.matches(&DefectStatus::Verification));
        assert!(!StatusFilter::Active.matches(&DefectStatus::Closed));

        assert!(StatusFilter::All.matches(&DefectStatus::Closed));
    }

    #[test]
    fn test_status_filter_statuses() {
        assert_eq!(StatusFilter::All.statuses(), None);
        assert_eq!(
            StatusFilter::Closed.statuses(),
            Some(vec![DefectStatus::Closed])
        );
        assert_eq!(StatusFilter::Active.statuses().unwrap().len(), 4);
    }

    #[test]
    fn test_severity_filter_matches() {
        assert!(SeverityFilter::Urgent.matches(&DefectSeverity::Critical));
        assert!(SeverityFilter::Urgent.matches(&DefectSeverity::Major));
        assert!(!SeverityFilter::Urgent.matches(&DefectSeverity::Minor));
        assert!(SeverityFilter::All.matches(&DefectSeverity::Observation));
    }

    #[test]
    fn test_severity_filter_severities() {
        assert_eq!(SeverityFilter::All.severities(), None);
        assert_eq!(
            SeverityFilter::Urgent.severities(),
            Some(vec![DefectSeverity::Critical, DefectSeverity::Major])
        );
    }
}
