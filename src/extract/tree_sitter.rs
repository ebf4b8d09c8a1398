//! Tree-sitter backed comment oracle
//!
//! Parses the whole buffer once per revision and keeps the comment token
//! ranges. Queries for a newer revision re-parse on demand.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use ::tree_sitter::{Node, Parser};

use super::{CommentOracle, Language};
use crate::error::{Error, Result};
use crate::events::Notifier;
use crate::text::{Revision, TextRange, TextSnapshot};

/// Node kinds the bundled grammars use for comments
const COMMENT_KINDS: &[&str] = &["comment", "line_comment", "block_comment"];

struct ParsedState {
    parser: Parser,
    revision: Option<Revision>,
    comments: Vec<TextRange>,
}

pub struct TreeSitterOracle {
    language: Language,
    state: Mutex<ParsedState>,
    reclassified: Notifier<TextRange>,
}

impl TreeSitterOracle {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.grammar())
            .map_err(|e| Error::Oracle(format!("cannot load {language} grammar: {e}")))?;
        Ok(Self {
            language,
            state: Mutex::new(ParsedState {
                parser,
                revision: None,
                comments: Vec::new(),
            }),
            reclassified: Notifier::new(),
        })
    }

    /// Oracle for the language of `path`, detected by extension
    pub fn for_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let language = Language::from_path(path)
            .ok_or_else(|| Error::UnsupportedLanguage(path.display().to_string()))?;
        Self::new(language)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Re-parse `snapshot` and tell subscribers the whole buffer may have
    /// changed classification
    pub fn update(&self, snapshot: &TextSnapshot) -> Result<()> {
        {
            let mut state = self.lock();
            Self::reparse(&mut state, snapshot)?;
        }
        self.reclassified.notify(&snapshot.full_range());
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ParsedState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn reparse(state: &mut ParsedState, snapshot: &TextSnapshot) -> Result<()> {
        let tree = state
            .parser
            .parse(snapshot.text(), None)
            .ok_or_else(|| Error::Oracle("tree-sitter returned no tree".to_string()))?;
        let mut comments = Vec::new();
        collect_comments(tree.root_node(), &mut comments);
        tracing::trace!(
            revision = snapshot.revision(),
            comments = comments.len(),
            "parsed buffer"
        );
        state.comments = comments;
        state.revision = Some(snapshot.revision());
        Ok(())
    }
}

/// Depth-first walk; comment nodes are not descended into
fn collect_comments(root: Node<'_>, out: &mut Vec<TextRange>) {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        let is_comment = COMMENT_KINDS.contains(&node.kind());
        if is_comment {
            out.push(TextRange::from_bounds(node.start_byte(), node.end_byte()));
        }
        if !is_comment && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

impl CommentOracle for TreeSitterOracle {
    fn comment_spans(&self, snapshot: &TextSnapshot, range: TextRange) -> Vec<TextRange> {
        let mut state = self.lock();
        if state.revision != Some(snapshot.revision()) {
            if let Err(e) = Self::reparse(&mut state, snapshot) {
                tracing::warn!("{e}");
                return Vec::new();
            }
        }
        state
            .comments
            .iter()
            .filter_map(|comment| comment.intersection(&range))
            .collect()
    }

    fn reclassified(&self) -> &Notifier<TextRange> {
        &self.reclassified
    }
}
