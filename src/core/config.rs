//! Layered configuration
//!
//! Settings are read from, in increasing priority:
//! 1. the user config file (`<config dir>/shq/config.yaml`)
//! 2. the project config file (`.shq/config.yaml` in the working directory)
//!
//! Command-line flags and `SHQ_*` environment variables override both; that
//! last layer is applied by the CLI.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::yaml::{parse_yaml_file, YamlError};

/// Project-local config file, relative to the working directory
pub const LOCAL_CONFIG_FILE: &str = ".shq/config.yaml";

/// Defect log used when nothing else is configured
pub const DEFAULT_DEFECTS_FILE: &str = "defects.yaml";

/// Width of terminal histogram bars
pub const DEFAULT_HISTOGRAM_WIDTH: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the defect log file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defects_file: Option<PathBuf>,

    /// Default output format name (auto, table, json, yaml, csv)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Bar width for terminal histograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram_width: Option<usize>,

    /// Assignee filled in for new defects when none is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_assignee: Option<String>,
}

impl Config {
    /// Load and merge the user and project config files
    ///
    /// Unreadable or malformed files are reported on stderr and skipped, so a
    /// broken config never blocks a calculation.
    pub fn load() -> Self {
        let mut config = Config::default();
        for path in Self::search_paths() {
            match Self::load_file(&path) {
                Ok(Some(layer)) => config.merge(layer),
                Ok(None) => {}
                Err(e) => eprintln!(
                    "{} Ignoring config {}: {}",
                    console::style("⚠").yellow(),
                    path.display(),
                    e
                ),
            }
        }
        config
    }

    /// Config files in merge order (lowest priority first)
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dirs) = ProjectDirs::from("", "", "shq") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }
        paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
        paths
    }

    /// Read one config file; `Ok(None)` when it does not exist
    pub fn load_file(path: &Path) -> Result<Option<Config>, YamlError> {
        if !path.exists() {
            return Ok(None);
        }
        parse_yaml_file(path).map(Some)
    }

    /// Overlay the fields set in `other`
    pub fn merge(&mut self, other: Config) {
        if other.defects_file.is_some() {
            self.defects_file = other.defects_file;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.histogram_width.is_some() {
            self.histogram_width = other.histogram_width;
        }
        if other.default_assignee.is_some() {
            self.default_assignee = other.default_assignee;
        }
    }

    pub fn defects_path(&self) -> PathBuf {
        self.defects_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEFECTS_FILE))
    }

    pub fn histogram_width(&self) -> usize {
        self.histogram_width
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_HISTOGRAM_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.defects_path(), PathBuf::from("defects.yaml"));
        assert_eq!(config.histogram_width(), DEFAULT_HISTOGRAM_WIDTH);
    }

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let mut base = Config {
            defects_file: Some(PathBuf::from("global.yaml")),
            format: Some("json".to_string()),
            ..Default::default()
        };
        base.merge(Config {
            format: Some("yaml".to_string()),
            histogram_width: Some(30),
            ..Default::default()
        });
        assert_eq!(base.defects_path(), PathBuf::from("global.yaml"));
        assert_eq!(base.format.as_deref(), Some("yaml"));
        assert_eq!(base.histogram_width(), 30);
    }

    #[test]
    fn test_zero_histogram_width_falls_back() {
        let config = Config {
            histogram_width: Some(0),
            ..Default::default()
        };
        assert_eq!(config.histogram_width(), DEFAULT_HISTOGRAM_WIDTH);
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        assert_eq!(Config::load_file(&path).unwrap(), None);

        std::fs::write(&path, "defects_file: qa/defects.yaml\ndefault_assignee: Ines\n").unwrap();
        let config = Config::load_file(&path).unwrap().unwrap();
        assert_eq!(config.defects_path(), PathBuf::from("qa/defects.yaml"));
        assert_eq!(config.default_assignee.as_deref(), Some("Ines"));

        std::fs::write(&path, "histogram_width: [oops").unwrap();
        assert!(Config::load_file(&path).is_err());
    }
}
