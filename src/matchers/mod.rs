//! # Fragment Matchers
//!
//! Matching strategies bound to a command group. Given a span of comment
//! text, a matcher produces zero or more [`FragmentGroup`]s with offsets
//! relative to that text.
//!
//! - [`PatternMatcher`]: one compiled pattern per group; capture group *i*
//!   becomes fragment *i* with the group's *i*-th classification.
//! - [`ClampedOptionMatcher`]: a pattern matcher whose leading `{...}` or
//!   `[...]` option is re-validated against an allow-list. An invalid option
//!   is dropped; the rest of the command still classifies.
//! - [`markdown`]: fixed emphasis/code/strikethrough matchers.
//!
//! Hundreds of commands share a few dozen patterns: the registry merges
//! commands with identical shape and classifications before matchers are
//! built, and pattern evaluation is the dominant cost of a parse.

pub mod clamped;
pub mod kind;
pub mod markdown;
pub mod pattern;

pub use clamped::ClampedOptionMatcher;
pub use kind::MatcherKind;
pub use pattern::{PatternMatcher, PrecedingRule};

use serde::{Deserialize, Serialize};

use crate::classification::Classification;
use crate::error::Result;
use crate::registry::CommandGroup;
use crate::text::TextRange;

/// One classified substring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub start_offset: usize,
    pub length: usize,
    pub classification: Classification,
}

impl Fragment {
    pub fn new(start_offset: usize, length: usize, classification: Classification) -> Self {
        Self {
            start_offset,
            length,
            classification,
        }
    }

    pub fn end_offset(&self) -> usize {
        self.start_offset + self.length
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.start_offset, self.length)
    }
}

/// All fragments of one command occurrence; the first one is the command token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FragmentGroup {
    pub fragments: Vec<Fragment>,
}

impl FragmentGroup {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        debug_assert!(!fragments.is_empty());
        Self { fragments }
    }

    pub fn start_offset(&self) -> usize {
        self.fragments.first().map(|f| f.start_offset).unwrap_or(0)
    }

    pub fn end_offset(&self) -> usize {
        self.fragments
            .iter()
            .map(Fragment::end_offset)
            .max()
            .unwrap_or(0)
    }

    pub fn range(&self) -> TextRange {
        TextRange::from_bounds(self.start_offset(), self.end_offset())
    }

    /// Inclusive at the end, so a caret right after the occurrence hits it
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start_offset() && offset <= self.end_offset()
    }

    pub fn overlaps(&self, other: &FragmentGroup) -> bool {
        self.start_offset() < other.end_offset() && other.start_offset() < self.end_offset()
    }

    pub fn command(&self) -> &Fragment {
        &self.fragments[0]
    }

    pub fn shifted(mut self, by: usize) -> Self {
        for fragment in &mut self.fragments {
            fragment.start_offset += by;
        }
        self
    }
}

/// A matching strategy bound to one command group
pub trait FragmentMatcher: Send + Sync {
    /// All occurrences in `text`, offsets relative to `text`
    fn find(&self, text: &str) -> Vec<FragmentGroup>;
}

/// Build the matcher for a command group. The strategy follows from the
/// group's [`MatcherKind`].
pub fn build_matcher(group: &CommandGroup) -> Result<Box<dyn FragmentMatcher>> {
    let base = PatternMatcher::for_group(group)?;
    if group.matcher.is_clamped() {
        Ok(Box::new(ClampedOptionMatcher::new(base)))
    } else {
        Ok(Box::new(base))
    }
}
