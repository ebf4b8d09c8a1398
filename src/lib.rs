#![forbid(unsafe_code)]

//! # doxyspan
//!
//! Classification of Doxygen and Javadoc style documentation comments for
//! editor tooling.
//!
//! The engine finds the comments in a buffer (comment boundaries come from
//! a [`CommentOracle`]), determines their flavor (`///`, `/**`, `//!`, ...)
//! and splits their text into classified fragments: command tokens such as
//! `\brief` or `@param`, their parameters, titles, and markdown emphasis.
//! Highlighters, completion and hover providers consume the result.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use doxyspan::{Engine, Settings, TextSnapshot, TreeSitterOracle};
//!
//! fn main() -> anyhow::Result<()> {
//!     let source = std::fs::read_to_string("widget.cpp")?;
//!     let oracle = TreeSitterOracle::for_path("widget.cpp")?;
//!     let mut engine = Engine::with_settings(Arc::new(oracle), Settings::load_or_default())?;
//!
//!     let snapshot = TextSnapshot::new(source, 1);
//!     for span in engine.highlight(&snapshot, snapshot.full_range())? {
//!         println!("{} {}", span.range, span.classification);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod classification;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod extract;
pub mod matchers;
pub mod parse;
pub mod registry;
pub mod text;

// Re-exports
pub use cache::ClassificationCache;
pub use classification::Classification;
pub use config::{FileSettingsStore, FlavorToggles, MemorySettingsStore, Settings, SettingsStore};
pub use engine::{
    ClassifiedSpan, CommandDescription, CompletionItem, DescriptionPart, Engine, EngineSnapshot,
    HoverInfo,
};
pub use error::{ConfigError, Error, Result};
pub use events::{DirtyFlag, Notifier, Subscription};
pub use extract::{
    CommentExtractor, CommentFlavor, CommentOracle, CommentSpan, FixedOracle, Language,
    TreeSitterOracle,
};
pub use matchers::{Fragment, FragmentGroup, FragmentMatcher, MatcherKind};
pub use parse::CommentParser;
pub use registry::{
    default_groups, derive_groups, is_known_command, to_config_list, CommandConfigEntry,
    CommandGroup, CommandTable, ConfigVersion,
};
pub use text::{Revision, TextRange, TextSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
