//! Configuration versions and migration of persisted command lists

use serde::{Deserialize, Serialize};

use super::{default_entry, CommandConfigEntry, DEFAULT_ENTRIES};
use crate::classification::Classification;
use crate::error::ConfigError;

/// Version of a persisted command configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ConfigVersion {
    /// Initial release
    V1 = 1,
    /// Leading option parameter for commands taking `{...}`/`[...]`
    V2 = 2,
    /// Header file and header name parameters for `\class` and its kin
    V3 = 3,
}

impl ConfigVersion {
    pub const LATEST: ConfigVersion = ConfigVersion::V3;

    pub fn number(self) -> u32 {
        self as u32
    }
}

impl Default for ConfigVersion {
    fn default() -> Self {
        ConfigVersion::LATEST
    }
}

impl TryFrom<u32> for ConfigVersion {
    type Error = ConfigError;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(ConfigVersion::V1),
            2 => Ok(ConfigVersion::V2),
            3 => Ok(ConfigVersion::V3),
            other => Err(ConfigError::UnsupportedVersion(other)),
        }
    }
}

impl From<ConfigVersion> for u32 {
    fn from(value: ConfigVersion) -> Self {
        value.number()
    }
}

impl std::fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// Listed in V1 but never real commands
const RETIRED_IN_V2: &[&str] = &["params", "returnvalue"];

/// Commands that gained a leading `ParameterClamped` parameter in V2
const CLAMPED_IN_V2: &[&str] = &[
    "param",
    "code",
    "fileinfo",
    "inheritancegraph",
    "tableofcontents",
    "include",
    "includelineno",
    "includedoc",
    "dontinclude",
    "example",
    "snippet",
    "snippetlineno",
    "snippetdoc",
    "htmlonly",
    "htmlinclude",
    "image",
];

/// Commands that gained trailing header parameters in V3
const HEADERS_IN_V3: &[&str] = &["class", "struct", "union", "interface", "protocol", "category"];

/// Bring `entries` written by `version` up to the latest version and add
/// defaults for every command the list does not mention.
pub fn migrate(entries: &[CommandConfigEntry], version: ConfigVersion) -> Vec<CommandConfigEntry> {
    let mut migrated: Vec<CommandConfigEntry> = entries.to_vec();

    if version < ConfigVersion::V2 {
        migrated.retain(|entry| !RETIRED_IN_V2.contains(&entry.command.as_str()));
        for entry in &mut migrated {
            graft_clamped_option(entry);
        }
    }
    if version < ConfigVersion::V3 {
        for entry in &mut migrated {
            graft_header_parameters(entry);
        }
    }

    let missing: Vec<CommandConfigEntry> = DEFAULT_ENTRIES
        .iter()
        .filter(|default| !migrated.iter().any(|e| e.command == default.command))
        .cloned()
        .collect();
    if !missing.is_empty() {
        tracing::debug!(count = missing.len(), "adding default entries for unlisted commands");
    }
    migrated.extend(missing);
    migrated
}

fn graft_clamped_option(entry: &mut CommandConfigEntry) {
    if !CLAMPED_IN_V2.contains(&entry.command.as_str()) {
        return;
    }
    let Some(default) = default_entry(&entry.command) else {
        return;
    };
    if entry.parameter_classifications.len() + 1 == default.parameter_classifications.len() {
        entry
            .parameter_classifications
            .insert(0, Classification::ParameterClamped);
    }
}

fn graft_header_parameters(entry: &mut CommandConfigEntry) {
    if !HEADERS_IN_V3.contains(&entry.command.as_str()) {
        return;
    }
    let Some(default) = default_entry(&entry.command) else {
        return;
    };
    let defaults = &default.parameter_classifications;
    if entry.parameter_classifications.len() + 2 == defaults.len() {
        entry
            .parameter_classifications
            .extend_from_slice(&defaults[defaults.len() - 2..]);
    }
}
