//! # Settings
//!
//! The persisted user settings and the stores the engine reads them from.
//! Settings are JSON with camelCase keys:
//!
//! ```json
//! {
//!   "version": 3,
//!   "flavors": { "doubleSlash": false },
//!   "markdown": true,
//!   "commands": [
//!     { "command": "todo", "commandClassification": 2, "parameterClassifications": [] }
//!   ]
//! }
//! ```
//!
//! A file without `version` was written before versioning existed and is
//! read as version 1. An empty `commands` list means the built-in table.

pub mod store;

pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::extract::CommentFlavor;
use crate::registry::{derive_groups, CommandConfigEntry, CommandTable, ConfigVersion};

fn default_version() -> ConfigVersion {
    ConfigVersion::V1
}

fn default_markdown() -> bool {
    true
}

/// Per-flavor enable switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlavorToggles {
    pub triple_slash: bool,
    pub double_slash_exclamation: bool,
    /// Plain `//` comments are mostly not documentation
    pub double_slash: bool,
    pub slash_star_star: bool,
    pub slash_star_exclamation: bool,
    pub slash_star: bool,
}

impl Default for FlavorToggles {
    fn default() -> Self {
        Self {
            double_slash: false,
            ..Self::all_enabled()
        }
    }
}

impl FlavorToggles {
    pub fn all_enabled() -> Self {
        Self {
            triple_slash: true,
            double_slash_exclamation: true,
            double_slash: true,
            slash_star_star: true,
            slash_star_exclamation: true,
            slash_star: true,
        }
    }

    pub fn is_enabled(&self, flavor: CommentFlavor) -> bool {
        match flavor {
            CommentFlavor::TripleSlash => self.triple_slash,
            CommentFlavor::DoubleSlashExclamation => self.double_slash_exclamation,
            CommentFlavor::DoubleSlash => self.double_slash,
            CommentFlavor::SlashStarStar => self.slash_star_star,
            CommentFlavor::SlashStarExclamation => self.slash_star_exclamation,
            CommentFlavor::SlashStar => self.slash_star,
            CommentFlavor::Unknown => false,
        }
    }

    pub fn set(&mut self, flavor: CommentFlavor, enabled: bool) {
        let slot = match flavor {
            CommentFlavor::TripleSlash => &mut self.triple_slash,
            CommentFlavor::DoubleSlashExclamation => &mut self.double_slash_exclamation,
            CommentFlavor::DoubleSlash => &mut self.double_slash,
            CommentFlavor::SlashStarStar => &mut self.slash_star_star,
            CommentFlavor::SlashStarExclamation => &mut self.slash_star_exclamation,
            CommentFlavor::SlashStar => &mut self.slash_star,
            CommentFlavor::Unknown => return,
        };
        *slot = enabled;
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Version the command list was written with
    #[serde(default = "default_version")]
    pub version: ConfigVersion,

    #[serde(default)]
    pub flavors: FlavorToggles,

    /// Markdown emphasis, strikethrough and inline code
    #[serde(default = "default_markdown")]
    pub markdown: bool,

    /// Per-command classifications; missing commands use the defaults
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandConfigEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: ConfigVersion::LATEST,
            flavors: FlavorToggles::default(),
            markdown: default_markdown(),
            commands: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings as pretty JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(path).ok())
            .unwrap_or_default()
    }

    /// `<config dir>/doxyspan/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("doxyspan").join("settings.json"))
    }

    /// Command table for these settings
    pub fn command_table(&self) -> std::result::Result<CommandTable, ConfigError> {
        derive_groups(&self.commands, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Classification;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.version, ConfigVersion::V1);
        assert!(settings.markdown);
        assert!(!settings.flavors.double_slash);
        assert!(settings.flavors.triple_slash);
        assert!(settings.commands.is_empty());
    }

    #[test]
    fn test_partial_flavors() {
        let settings: Settings =
            serde_json::from_str(r#"{"version": 2, "flavors": {"slashStar": false}}"#).unwrap();
        assert!(!settings.flavors.is_enabled(CommentFlavor::SlashStar));
        assert!(settings.flavors.is_enabled(CommentFlavor::SlashStarStar));
        assert!(!settings.flavors.is_enabled(CommentFlavor::DoubleSlash));
    }

    #[test]
    fn test_invalid_classification_is_rejected() {
        let json = r#"{"commands": [{"command": "brief", "commandClassification": 40}]}"#;
        assert!(serde_json::from_str::<Settings>(json).is_err());
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        assert!(serde_json::from_str::<Settings>(r#"{"version": 9}"#).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = Settings::default();
        settings.markdown = false;
        settings.commands.push(CommandConfigEntry {
            command: "note".to_string(),
            command_classification: Classification::Warning,
            parameter_classifications: vec![],
        });
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        let table = loaded.command_table().unwrap();
        assert_eq!(
            table.group_of("note").unwrap().command_classification(),
            Classification::Warning
        );
    }

    #[test]
    fn test_toggle_set() {
        let mut toggles = FlavorToggles::default();
        toggles.set(CommentFlavor::DoubleSlash, true);
        assert_eq!(toggles, FlavorToggles::all_enabled());
        toggles.set(CommentFlavor::Unknown, true);
        assert!(!toggles.is_enabled(CommentFlavor::Unknown));
    }
}
