use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::AppError;

/// Store-assigned pathway identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathwayId(pub u64);

/// Store-assigned module identifier, unique across all pathways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub u64);

impl fmt::Display for PathwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PathwayId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(PathwayId)
            .map_err(|_| AppError::InvalidInput(format!("'{}' is not a pathway id", s)))
    }
}

impl FromStr for ModuleId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ModuleId)
            .map_err(|_| AppError::InvalidInput(format!("'{}' is not a module id", s)))
    }
}

/// A validated learner identifier supplied by the surrounding application.
///
/// Guarantees:
/// - Non-empty
/// - Contains only alphanumeric characters, `-`, `_`, `.` or `@`
/// - Not `.` or `..`
///
/// The identifier doubles as a lock-file name in the filesystem store, so the
/// character set is deliberately narrow.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LearnerId(String);

impl LearnerId {
    pub fn new(value: &str) -> Result<Self, AppError> {
        let trimmed = value.trim();
        let valid_chars = trimmed
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '@'));

        if trimmed.is_empty() || !valid_chars || trimmed == "." || trimmed == ".." {
            return Err(AppError::InvalidLearnerId(value.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LearnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LearnerId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LearnerId::new(s)
    }
}

impl<'de> Deserialize<'de> for LearnerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LearnerId::new(&s).map_err(serde::de::Error::custom)
    }
}
