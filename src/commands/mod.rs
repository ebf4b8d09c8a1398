//! CLI command implementations
//!
//! Each command is in its own submodule and exposes an options struct plus
//! an `execute_*` function.

pub mod config;
pub mod highlight;
pub mod hover;
pub mod list;
pub mod scan;

pub use config::{execute_config, ConfigOptions, ConfigSubcommand};
pub use highlight::{execute_highlight, HighlightOptions};
pub use hover::{execute_hover, HoverOptions, Position};
pub use list::{execute_list, ListOptions};
pub use scan::{execute_scan, ScanOptions, ScanReport};

use std::path::Path;
use std::sync::Arc;

use console::Style;

use crate::classification::Classification;
use crate::config::Settings;
use crate::engine::Engine;
use crate::extract::TreeSitterOracle;
use crate::text::TextSnapshot;

/// Settings from `path`, or defaults when the file does not exist
pub fn load_settings(path: Option<&Path>) -> crate::Result<Settings> {
    match path {
        Some(path) if path.exists() => Settings::load(path),
        Some(_) => Ok(Settings::default()),
        None => Ok(Settings::load_or_default()),
    }
}

/// Read a source file and build an engine for it
pub fn open_source(path: &Path, settings: Settings) -> crate::Result<(Engine, TextSnapshot)> {
    let text = std::fs::read_to_string(path)?;
    let oracle = TreeSitterOracle::for_path(path)?;
    let engine = Engine::with_settings(Arc::new(oracle), settings)?;
    Ok((engine, TextSnapshot::new(text, 1)))
}

/// Terminal style for a classification
pub fn classification_style(classification: Classification) -> Style {
    match classification {
        Classification::Command => Style::new().blue().bold(),
        Classification::Note => Style::new().green().bold(),
        Classification::Warning => Style::new().red().bold(),
        Classification::Exceptions => Style::new().magenta(),
        Classification::Parameter1 => Style::new().cyan(),
        Classification::Parameter2 => Style::new().cyan().dim(),
        Classification::Title => Style::new().white().bold(),
        Classification::EmphasisMinor => Style::new().italic(),
        Classification::EmphasisMajor => Style::new().bold(),
        Classification::Strikethrough => Style::new().strikethrough(),
        Classification::InlineCode => Style::new().yellow(),
        Classification::ParameterClamped => Style::new().magenta().dim(),
        Classification::Generic1 => Style::new().color256(208),
        Classification::Generic2 => Style::new().color256(141),
        Classification::Generic3 => Style::new().color256(37),
        Classification::Generic4 => Style::new().color256(167),
        Classification::Generic5 => Style::new().color256(109),
    }
}
