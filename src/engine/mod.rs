//! # Engine
//!
//! Ties extraction, parsing and caching together for one buffer consumer
//! (a highlighter, a completion or hover provider).
//!
//! The active configuration lives in an immutable [`EngineSnapshot`]. A
//! settings change builds a complete new snapshot and swaps the `Arc`; if
//! the new settings are invalid the previous snapshot stays active and the
//! error is returned from the query that noticed the change.
//!
//! Notifications from the settings store and from the comment oracle may
//! arrive on any thread. They only raise dirty flags, which the engine
//! consumes at the start of its next query.

mod describe;

pub use describe::{CommandDescription, CompletionItem, DescriptionPart};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::ClassificationCache;
use crate::classification::Classification;
use crate::config::{FlavorToggles, MemorySettingsStore, Settings, SettingsStore};
use crate::error::Result;
use crate::events::{DirtyFlag, Subscription};
use crate::extract::{CommentExtractor, CommentOracle, CommentSpan};
use crate::matchers::FragmentGroup;
use crate::parse::CommentParser;
use crate::registry::CommandTable;
use crate::text::{TextRange, TextSnapshot};

/// Complete, self-consistent configuration of an engine
pub struct EngineSnapshot {
    settings: Settings,
    table: CommandTable,
    parser: CommentParser,
}

impl EngineSnapshot {
    /// Derive the command table and build its parser
    pub fn build(settings: Settings) -> Result<Self> {
        let table = settings.command_table()?;
        let parser = CommentParser::new(&table, settings.markdown)?;
        Ok(Self {
            settings,
            table,
            parser,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn parser(&self) -> &CommentParser {
        &self.parser
    }

    pub fn flavors(&self) -> &FlavorToggles {
        &self.settings.flavors
    }
}

/// A classified range of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassifiedSpan {
    pub range: TextRange,
    pub classification: Classification,
}

/// What a hover provider shows for a command occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverInfo {
    pub group: FragmentGroup,
    pub description: CommandDescription,
}

pub struct Engine {
    store: Arc<dyn SettingsStore>,
    config: Arc<EngineSnapshot>,
    extractor: CommentExtractor,
    cache: ClassificationCache,
    settings_dirty: DirtyFlag,
    oracle_dirty: DirtyFlag,
    _subscriptions: [Subscription; 2],
}

impl Engine {
    /// Engine reading its configuration from `store`. Fails when the
    /// current settings are invalid, since there is no previous
    /// configuration to fall back to.
    pub fn new(oracle: Arc<dyn CommentOracle>, store: Arc<dyn SettingsStore>) -> Result<Self> {
        let config = Arc::new(EngineSnapshot::build(store.settings())?);
        let settings_dirty = DirtyFlag::new();
        let oracle_dirty = DirtyFlag::new();
        let subscriptions = [
            settings_dirty.subscribe_to(store.changed()),
            oracle_dirty.subscribe_to(oracle.reclassified()),
        ];
        Ok(Self {
            store,
            config,
            extractor: CommentExtractor::new(oracle),
            cache: ClassificationCache::new(),
            settings_dirty,
            oracle_dirty,
            _subscriptions: subscriptions,
        })
    }

    /// Engine with fixed settings
    pub fn with_settings(oracle: Arc<dyn CommentOracle>, settings: Settings) -> Result<Self> {
        Self::new(oracle, Arc::new(MemorySettingsStore::new(settings)))
    }

    /// The active configuration
    pub fn snapshot(&self) -> Arc<EngineSnapshot> {
        self.config.clone()
    }

    /// `(hits, misses)` of the classification cache
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }

    /// Rebuild the configuration from the store. On failure the previous
    /// configuration stays active.
    pub fn reload_settings(&mut self) -> Result<()> {
        self.settings_dirty.take();
        match EngineSnapshot::build(self.store.settings()) {
            Ok(config) => {
                tracing::debug!(commands = config.table.len(), "configuration reloaded");
                self.config = Arc::new(config);
                self.cache.invalidate();
                Ok(())
            }
            Err(e) => {
                tracing::error!("rejected settings, keeping previous configuration: {e}");
                Err(e)
            }
        }
    }

    fn refresh(&mut self) -> Result<()> {
        if self.oracle_dirty.take() {
            self.cache.invalidate();
        }
        if self.settings_dirty.is_raised() {
            self.reload_settings()?;
        }
        Ok(())
    }

    /// Flavored comment pieces of the lines touched by `range`
    pub fn comment_spans(&mut self, snapshot: &TextSnapshot, range: TextRange) -> Result<Vec<CommentSpan>> {
        self.refresh()?;
        Ok(self.extractor.split_into_comments(snapshot, range))
    }

    /// Fragment groups of the comments on the lines touched by `range`,
    /// sorted by start offset
    pub fn fragment_groups(&mut self, snapshot: &TextSnapshot, range: TextRange) -> Result<Vec<FragmentGroup>> {
        self.refresh()?;
        if let Some(groups) = self.cache.get(snapshot.revision(), range) {
            return Ok(groups.to_vec());
        }
        tracing::debug!(range = %range, revision = snapshot.revision(), "classification cache miss");

        let config = self.config.clone();
        let groups: Vec<FragmentGroup> = self
            .extractor
            .split_into_comments(snapshot, range)
            .iter()
            .flat_map(|span| config.parser.parse_span(snapshot, span, config.flavors()))
            .collect();
        self.cache.put(snapshot.revision(), range, groups.clone());
        Ok(groups)
    }

    /// Classified fragments intersecting `range`
    pub fn highlight(&mut self, snapshot: &TextSnapshot, range: TextRange) -> Result<Vec<ClassifiedSpan>> {
        let groups = self.fragment_groups(snapshot, range)?;
        Ok(groups
            .iter()
            .flat_map(|group| group.fragments.iter())
            .filter(|fragment| fragment.range().intersects(&range))
            .map(|fragment| ClassifiedSpan {
                range: fragment.range(),
                classification: fragment.classification,
            })
            .collect())
    }

    /// The command occurrence at `position` with its description.
    /// Markdown and other non-command groups have no hover.
    pub fn hover(&mut self, snapshot: &TextSnapshot, position: usize) -> Result<Option<HoverInfo>> {
        let groups = self.fragment_groups(snapshot, snapshot.line_range(position))?;
        let Some(group) = groups.into_iter().find(|g| g.contains(position)) else {
            return Ok(None);
        };
        let token = snapshot.slice(group.command().range());
        let description = token
            .strip_prefix(|c: char| c == '\\' || c == '@')
            .and_then(|command| self.config.describe(command));
        Ok(description.map(|description| HoverInfo { group, description }))
    }

    /// Description of `command` (without marker) under the active table
    pub fn describe(&mut self, command: &str) -> Result<Option<CommandDescription>> {
        self.refresh()?;
        Ok(self.config.describe(command))
    }

    /// Every command in alphabetical order, labelled with `\`
    pub fn completions(&mut self) -> Result<Vec<CompletionItem>> {
        self.refresh()?;
        Ok(self.config.completions('\\'))
    }

    /// Completions for a caret right after a typed marker inside an
    /// enabled comment; `None` anywhere else
    pub fn completions_at(&mut self, snapshot: &TextSnapshot, position: usize) -> Result<Option<Vec<CompletionItem>>> {
        self.refresh()?;
        let Some(marker) = typed_marker(snapshot.text(), position) else {
            return Ok(None);
        };
        let enabled = self
            .extractor
            .flavor_at(snapshot, position)
            .is_some_and(|flavor| self.config.flavors().is_enabled(flavor));
        if !enabled {
            return Ok(None);
        }
        Ok(Some(self.config.completions(marker)))
    }
}

/// The marker right before `position`, unless it is escaped by another one
fn typed_marker(text: &str, position: usize) -> Option<char> {
    let before = text.get(..position)?;
    let marker = before.chars().next_back().filter(|c| *c == '\\' || *c == '@')?;
    let run = before
        .chars()
        .rev()
        .take_while(|c| *c == '\\' || *c == '@')
        .count();
    (run % 2 == 1).then_some(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FixedOracle;
    use pretty_assertions::assert_eq;

    fn engine_for(text: &str, comments: &[(usize, usize)]) -> (Engine, TextSnapshot) {
        let tokens = comments
            .iter()
            .map(|&(s, e)| TextRange::from_bounds(s, e))
            .collect();
        let engine = Engine::with_settings(Arc::new(FixedOracle::new(tokens)), Settings::default()).unwrap();
        (engine, TextSnapshot::new(text, 1))
    }

    #[test]
    fn test_typed_marker() {
        assert_eq!(typed_marker("/// \\", 5), Some('\\'));
        assert_eq!(typed_marker("/// @", 5), Some('@'));
        assert_eq!(typed_marker("/// \\\\", 6), None);
        assert_eq!(typed_marker("/// x", 5), None);
        assert_eq!(typed_marker("", 0), None);
    }

    #[test]
    fn test_highlight_clips_to_range() {
        let text = "/// \\brief one\n/// \\note two";
        let (mut engine, snapshot) = engine_for(text, &[(0, 14), (15, text.len())]);
        let spans = engine.highlight(&snapshot, TextRange::new(15, 13)).unwrap();
        assert_eq!(
            spans,
            vec![ClassifiedSpan {
                range: TextRange::new(19, 5),
                classification: Classification::Note,
            }]
        );
    }

    #[test]
    fn test_cache_is_used() {
        let text = "/// \\brief one";
        let (mut engine, snapshot) = engine_for(text, &[(0, text.len())]);
        let range = snapshot.full_range();
        let first = engine.fragment_groups(&snapshot, range).unwrap();
        let second = engine.fragment_groups(&snapshot, range).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.cache_stats(), (1, 1));
    }

    #[test]
    fn test_hover_on_command() {
        let text = "/// \\brief one";
        let (mut engine, snapshot) = engine_for(text, &[(0, text.len())]);
        let hover = engine.hover(&snapshot, 10).unwrap().unwrap();
        assert_eq!(hover.description.command, "brief");
        assert_eq!(hover.group.start_offset(), 4);
        assert!(engine.hover(&snapshot, 13).unwrap().is_none());
    }

    #[test]
    fn test_positions_inside_multibyte_characters() {
        let text = "/// Größe \\p x";
        let (mut engine, snapshot) = engine_for(text, &[(0, text.len())]);
        assert!(engine.hover(&snapshot, 7).unwrap().is_none());
        assert!(engine.highlight(&snapshot, TextRange::new(7, 1)).unwrap().is_empty());
        assert!(engine.completions_at(&snapshot, 7).unwrap().is_none());
        let hover = engine.hover(&snapshot, 13).unwrap().unwrap();
        assert_eq!(hover.description.command, "p");
    }

    #[test]
    fn test_completions_at() {
        let text = "int a; /// @";
        let (mut engine, snapshot) = engine_for(text, &[(7, text.len())]);
        let items = engine.completions_at(&snapshot, text.len()).unwrap().unwrap();
        assert!(items.iter().any(|item| item.label == "@param"));
        assert!(engine.completions_at(&snapshot, 5).unwrap().is_none());
    }
}
