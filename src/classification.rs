//! Classification tags
//!
//! The semantic tag attached to every recognized substring. Ordinals are
//! persisted in user settings, so variants may only ever be appended.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Semantic tag of a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Classification {
    /// The command token itself (`\brief`)
    Command = 0,
    /// Note-like keywords (`\note`, `\todo`)
    Note = 1,
    /// Warning-like keywords (`\warning`, `\bug`)
    Warning = 2,
    /// Exception names after `\throws`
    Exceptions = 3,
    Parameter1 = 4,
    Parameter2 = 5,
    /// Free-standing titles (`\par Title`, `\ref x "title"`)
    Title = 6,
    EmphasisMinor = 7,
    EmphasisMajor = 8,
    Strikethrough = 9,
    InlineCode = 10,
    /// Validated `{...}`/`[...]` option right after a command
    ParameterClamped = 11,
    Generic1 = 12,
    Generic2 = 13,
    Generic3 = 14,
    Generic4 = 15,
    Generic5 = 16,
}

impl Classification {
    pub const ALL: [Classification; 17] = [
        Classification::Command,
        Classification::Note,
        Classification::Warning,
        Classification::Exceptions,
        Classification::Parameter1,
        Classification::Parameter2,
        Classification::Title,
        Classification::EmphasisMinor,
        Classification::EmphasisMajor,
        Classification::Strikethrough,
        Classification::InlineCode,
        Classification::ParameterClamped,
        Classification::Generic1,
        Classification::Generic2,
        Classification::Generic3,
        Classification::Generic4,
        Classification::Generic5,
    ];

    /// Persisted ordinal
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Command => "command",
            Classification::Note => "note",
            Classification::Warning => "warning",
            Classification::Exceptions => "exceptions",
            Classification::Parameter1 => "parameter1",
            Classification::Parameter2 => "parameter2",
            Classification::Title => "title",
            Classification::EmphasisMinor => "emphasis-minor",
            Classification::EmphasisMajor => "emphasis-major",
            Classification::Strikethrough => "strikethrough",
            Classification::InlineCode => "inline-code",
            Classification::ParameterClamped => "parameter-clamped",
            Classification::Generic1 => "generic1",
            Classification::Generic2 => "generic2",
            Classification::Generic3 => "generic3",
            Classification::Generic4 => "generic4",
            Classification::Generic5 => "generic5",
        }
    }
}

impl TryFrom<u32> for Classification {
    type Error = ConfigError;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Classification::ALL
            .get(value as usize)
            .copied()
            .ok_or(ConfigError::InvalidClassification(value))
    }
}

impl From<Classification> for u32 {
    fn from(value: Classification) -> Self {
        value.ordinal()
    }
}

impl std::str::FromStr for Classification {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Classification::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized || c.as_str().replace('-', "") == normalized)
            .ok_or_else(|| ConfigError::UnknownClassificationName(s.to_string()))
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
