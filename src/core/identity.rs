//! Defect identifiers
//!
//! IDs have the form `DEF-<ULID>`: sortable by creation time and unique
//! without a central counter.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Prefix shared by every defect ID
pub const DEFECT_PREFIX: &str = "DEF";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("Invalid defect ID format: {0} (expected DEF-<ULID>)")]
    InvalidFormat(String),

    #[error("Invalid ULID in defect ID: {0}")]
    InvalidUlid(String),
}

/// Unique identifier of a defect record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefectId(Ulid);

impl DefectId {
    /// Generate a fresh ID
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for DefectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DefectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", DEFECT_PREFIX, self.0)
    }
}

impl FromStr for DefectId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, rest) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::InvalidFormat(s.to_string()))?;
        if !prefix.eq_ignore_ascii_case(DEFECT_PREFIX) {
            return Err(IdParseError::InvalidFormat(s.to_string()));
        }
        Ulid::from_string(rest)
            .map(DefectId)
            .map_err(|_| IdParseError::InvalidUlid(rest.to_string()))
    }
}

impl Serialize for DefectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DefectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parse_round_trip() {
        let id = DefectId::new();
        let text = id.to_string();
        assert!(text.starts_with("DEF-"));
        assert_eq!(text.len(), 30);
        assert_eq!(text.parse::<DefectId>().unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_wrong_prefix() {
        let ulid = Ulid::new();
        assert!(matches!(
            format!("REQ-{}", ulid).parse::<DefectId>(),
            Err(IdParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "DEF-not-a-ulid".parse::<DefectId>(),
            Err(IdParseError::InvalidUlid(_))
        ));
        assert!("plain".parse::<DefectId>().is_err());
    }
}
