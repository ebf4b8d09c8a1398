//! # Comment Parser
//!
//! Runs every command-group matcher (in registry order) and then the
//! markdown matchers over a piece of comment text, and resolves overlaps.
//!
//! Overlap policy: candidates are ordered by start offset, then by matcher
//! rank, and accepted greedily unless they overlap an accepted group. The
//! earliest occurrence wins, so in `\section intro \\cite label` the title
//! swallows the rest of the line; at equal starts the earlier matcher wins.

use crate::config::FlavorToggles;
use crate::error::Result;
use crate::extract::{CommentFlavor, CommentSpan};
use crate::matchers::markdown::markdown_matchers;
use crate::matchers::{build_matcher, FragmentGroup, FragmentMatcher};
use crate::registry::CommandTable;
use crate::text::TextSnapshot;

/// Parser bound to one command table; pure and cheap to share
pub struct CommentParser {
    matchers: Vec<Box<dyn FragmentMatcher>>,
}

impl CommentParser {
    /// Build one matcher per command group, followed by the markdown
    /// matchers when `markdown` is set
    pub fn new(table: &CommandTable, markdown: bool) -> Result<Self> {
        let mut matchers = table
            .groups()
            .iter()
            .map(build_matcher)
            .collect::<Result<Vec<_>>>()?;
        if markdown {
            matchers.extend(markdown_matchers()?);
        }
        tracing::debug!(matchers = matchers.len(), markdown, "built comment parser");
        Ok(Self { matchers })
    }

    /// Parser over explicit matchers; their order is the tie-break rank
    pub fn with_matchers(matchers: Vec<Box<dyn FragmentMatcher>>) -> Self {
        Self { matchers }
    }

    /// Fragment groups of `text`, sorted by start offset and disjoint
    pub fn parse(&self, text: &str) -> Vec<FragmentGroup> {
        let mut candidates: Vec<(usize, FragmentGroup)> = self
            .matchers
            .iter()
            .enumerate()
            .flat_map(|(rank, matcher)| matcher.find(text).into_iter().map(move |g| (rank, g)))
            .collect();
        candidates.sort_by(|(rank_a, a), (rank_b, b)| {
            a.start_offset()
                .cmp(&b.start_offset())
                .then_with(|| rank_a.cmp(rank_b))
        });

        let mut accepted: Vec<FragmentGroup> = Vec::with_capacity(candidates.len());
        let mut frontier = 0;
        for (_, group) in candidates {
            if group.start_offset() < frontier {
                continue;
            }
            frontier = group.end_offset();
            accepted.push(group);
        }
        accepted
    }

    /// Parse one comment piece; offsets are absolute. Disabled and
    /// unknown flavors yield nothing.
    pub fn parse_span(
        &self,
        snapshot: &TextSnapshot,
        span: &CommentSpan,
        flavors: &FlavorToggles,
    ) -> Vec<FragmentGroup> {
        if span.flavor == CommentFlavor::Unknown || !flavors.is_enabled(span.flavor) {
            return Vec::new();
        }
        let text = snapshot.slice(span.range);
        self.parse(text)
            .into_iter()
            .map(|group| group.shifted(span.range.start))
            .collect()
    }
}
