//! # Command Registry
//!
//! The authoritative table of recognized commands. The built-in table is
//! derived once from a literal list; user configurations go through the
//! same pipeline:
//!
//! 1. migrate the persisted list to the latest [`ConfigVersion`]
//! 2. validate it (unknown commands, duplicates, parameter counts)
//! 3. expand every entry into a single-command group
//! 4. regroup entries with identical shape and classifications
//! 5. order groups deterministically
//!
//! A [`CommandTable`] is immutable; a configuration change derives a new one.

mod defaults;
pub mod help;
pub mod migrate;

pub use help::{help_for, HelpEntry};
pub use migrate::{migrate, ConfigVersion};

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::classification::Classification;
use crate::error::ConfigError;
use crate::matchers::MatcherKind;

use defaults::DEFAULT_ROWS;

/// Commands sharing one pattern shape and one classification list.
/// `classifications[0]` tags the command token, `classifications[i]` the
/// *i*-th parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandGroup {
    pub keywords: Vec<String>,
    pub matcher: MatcherKind,
    pub classifications: Vec<Classification>,
}

impl CommandGroup {
    pub fn parameter_count(&self) -> usize {
        self.classifications.len().saturating_sub(1)
    }

    pub fn command_classification(&self) -> Classification {
        self.classifications
            .first()
            .copied()
            .unwrap_or(Classification::Command)
    }
}

/// One persisted command setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandConfigEntry {
    pub command: String,
    pub command_classification: Classification,
    #[serde(default)]
    pub parameter_classifications: Vec<Classification>,
}

impl CommandConfigEntry {
    pub fn classifications(&self) -> Vec<Classification> {
        std::iter::once(self.command_classification)
            .chain(self.parameter_classifications.iter().copied())
            .collect()
    }
}

/// Ordered command groups plus a keyword index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    groups: Vec<CommandGroup>,
    index: HashMap<String, usize>,
}

impl CommandTable {
    fn new(groups: Vec<CommandGroup>) -> Self {
        let index = groups
            .iter()
            .enumerate()
            .flat_map(|(i, g)| g.keywords.iter().map(move |k| (k.clone(), i)))
            .collect();
        Self { groups, index }
    }

    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    /// The group a command (without marker) belongs to
    pub fn group_of(&self, command: &str) -> Option<&CommandGroup> {
        self.index.get(command).map(|&i| &self.groups[i])
    }

    pub fn contains(&self, command: &str) -> bool {
        self.index.contains_key(command)
    }

    /// All commands, alphabetically
    pub fn commands(&self) -> Vec<&str> {
        let mut commands: Vec<&str> = self.index.keys().map(String::as_str).collect();
        commands.sort_unstable();
        commands
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        default_groups().clone()
    }
}

/// Built-in entries, one per command, sorted by command
static DEFAULT_ENTRIES: LazyLock<Vec<CommandConfigEntry>> = LazyLock::new(|| {
    let mut entries: Vec<CommandConfigEntry> = DEFAULT_ROWS
        .iter()
        .flat_map(|row| {
            row.keywords.iter().map(|keyword| CommandConfigEntry {
                command: keyword.to_string(),
                command_classification: row.classifications[0],
                parameter_classifications: row.classifications[1..].to_vec(),
            })
        })
        .collect();
    entries.sort_by(|a, b| a.command.cmp(&b.command));
    entries
});

static DEFAULT_KINDS: LazyLock<HashMap<&'static str, MatcherKind>> = LazyLock::new(|| {
    DEFAULT_ROWS
        .iter()
        .flat_map(|row| row.keywords.iter().map(|k| (*k, row.kind)))
        .collect()
});

static DEFAULT_TABLE: LazyLock<CommandTable> = LazyLock::new(|| {
    let groups = expand(&DEFAULT_ENTRIES);
    CommandTable::new(regroup(groups))
});

fn default_entry(command: &str) -> Option<&'static CommandConfigEntry> {
    DEFAULT_ENTRIES
        .binary_search_by(|e| e.command.as_str().cmp(command))
        .ok()
        .map(|i| &DEFAULT_ENTRIES[i])
}

/// The built-in table, regrouped and ordered
pub fn default_groups() -> &'static CommandTable {
    &DEFAULT_TABLE
}

pub fn is_known_command(command: &str) -> bool {
    DEFAULT_KINDS.contains_key(command)
}

/// Derive the command table for a persisted configuration. Any violation
/// aborts the derivation.
pub fn derive_groups(
    user_config: &[CommandConfigEntry],
    version: ConfigVersion,
) -> Result<CommandTable, ConfigError> {
    let entries = migrate(user_config, version);
    validate(&entries)?;
    let table = CommandTable::new(regroup(expand(&entries)));
    tracing::debug!(
        version = %version,
        commands = table.len(),
        groups = table.groups().len(),
        "derived command table"
    );
    Ok(table)
}

fn validate(entries: &[CommandConfigEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for entry in entries {
        let Some(default) = default_entry(&entry.command) else {
            return Err(ConfigError::UnknownCommand(entry.command.clone()));
        };
        if !seen.insert(entry.command.as_str()) {
            return Err(ConfigError::DuplicateCommand(entry.command.clone()));
        }
        let expected = default.parameter_classifications.len();
        let found = entry.parameter_classifications.len();
        if expected != found {
            return Err(ConfigError::ParameterCountMismatch {
                command: entry.command.clone(),
                expected,
                found,
            });
        }
    }
    Ok(())
}

/// One single-command group per validated entry
fn expand(entries: &[CommandConfigEntry]) -> Vec<CommandGroup> {
    entries
        .iter()
        .filter_map(|entry| {
            let matcher = *DEFAULT_KINDS.get(entry.command.as_str())?;
            Some(CommandGroup {
                keywords: vec![entry.command.clone()],
                matcher,
                classifications: entry.classifications(),
            })
        })
        .collect()
}

/// Merge groups with equal shape and classifications, then order them by
/// (parameter count, group size descending, first command)
fn regroup(groups: Vec<CommandGroup>) -> Vec<CommandGroup> {
    let mut merged: HashMap<(MatcherKind, Vec<Classification>), Vec<String>> = HashMap::new();
    for group in groups {
        merged
            .entry((group.matcher, group.classifications))
            .or_default()
            .extend(group.keywords);
    }

    let mut result: Vec<CommandGroup> = merged
        .into_iter()
        .map(|((matcher, classifications), mut keywords)| {
            keywords.sort();
            CommandGroup {
                keywords,
                matcher,
                classifications,
            }
        })
        .collect();
    result.sort_by(|a, b| {
        a.parameter_count()
            .cmp(&b.parameter_count())
            .then_with(|| b.keywords.len().cmp(&a.keywords.len()))
            .then_with(|| a.keywords.cmp(&b.keywords))
    });
    result
}

/// Inverse of expansion: one entry per command, sorted by command
pub fn to_config_list(groups: &[CommandGroup]) -> Vec<CommandConfigEntry> {
    let mut entries: Vec<CommandConfigEntry> = groups
        .iter()
        .flat_map(|group| {
            group.keywords.iter().map(|keyword| CommandConfigEntry {
                command: keyword.clone(),
                command_classification: group.command_classification(),
                parameter_classifications: group.classifications[1..].to_vec(),
            })
        })
        .collect();
    entries.sort_by(|a, b| a.command.cmp(&b.command));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_groups_cover_every_row() {
        let table = default_groups();
        let row_count: usize = DEFAULT_ROWS.iter().map(|r| r.keywords.len()).sum();
        assert_eq!(table.len(), row_count);
        assert_eq!(table.groups().len(), DEFAULT_ROWS.len());
    }

    #[test]
    fn test_groups_are_ordered() {
        let groups = default_groups().groups();
        for pair in groups.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.parameter_count() <= b.parameter_count());
            if a.parameter_count() == b.parameter_count() {
                assert!(a.keywords.len() >= b.keywords.len());
            }
        }
        for group in groups {
            let mut sorted = group.keywords.clone();
            sorted.sort();
            assert_eq!(sorted, group.keywords);
        }
    }

    #[test]
    fn test_lookup() {
        let table = default_groups();
        let param = table.group_of("param").unwrap();
        assert_eq!(param.matcher, MatcherKind::ParamDirection);
        assert!(table.group_of("unknownxyz").is_none());
        assert!(is_known_command("brief"));
        assert!(!is_known_command("params"));
    }

    #[test]
    fn test_user_classification_splits_group() {
        let config = vec![CommandConfigEntry {
            command: "todo".to_string(),
            command_classification: Classification::Warning,
            parameter_classifications: vec![],
        }];
        let table = derive_groups(&config, ConfigVersion::LATEST).unwrap();
        let todo = table.group_of("todo").unwrap();
        assert!(todo.keywords.contains(&"bug".to_string()));
        assert!(!table.group_of("note").unwrap().keywords.contains(&"todo".to_string()));
    }

    #[test]
    fn test_validation_errors() {
        let unknown = vec![CommandConfigEntry {
            command: "bogus".to_string(),
            command_classification: Classification::Command,
            parameter_classifications: vec![],
        }];
        assert_eq!(
            derive_groups(&unknown, ConfigVersion::LATEST),
            Err(ConfigError::UnknownCommand("bogus".to_string()))
        );

        let brief = CommandConfigEntry {
            command: "brief".to_string(),
            command_classification: Classification::Command,
            parameter_classifications: vec![],
        };
        assert_eq!(
            derive_groups(&[brief.clone(), brief], ConfigVersion::LATEST),
            Err(ConfigError::DuplicateCommand("brief".to_string()))
        );

        let mismatch = vec![CommandConfigEntry {
            command: "ref".to_string(),
            command_classification: Classification::Command,
            parameter_classifications: vec![Classification::Parameter1],
        }];
        assert_eq!(
            derive_groups(&mismatch, ConfigVersion::LATEST),
            Err(ConfigError::ParameterCountMismatch {
                command: "ref".to_string(),
                expected: 2,
                found: 1,
            })
        );
    }
}
