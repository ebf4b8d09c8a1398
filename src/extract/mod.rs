//! # Comment Extractor
//!
//! Turns a buffer range into per-line comment pieces tagged with the
//! flavor of the comment token they belong to. Comment boundaries come from
//! a [`CommentOracle`]; only the flavor is worked out here.
//!
//! A piece continues the comment of its left neighbour when that neighbour
//! is still open: a block comment without its `*/`, or a line comment whose
//! last character is a backslash. The left neighbour is a piece touching it
//! on the same line or, for a piece at column 0, the last piece of the
//! previous non-blank line if that piece reaches the end of its line.
//! Otherwise the piece's own opener (`///`, `/*!`, ...) decides.

pub mod language;
pub mod oracle;
pub mod tree_sitter;

pub use language::Language;
pub use oracle::{CommentOracle, FixedOracle};
pub use self::tree_sitter::TreeSitterOracle;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::events::{DirtyFlag, Subscription};
use crate::text::{Revision, TextRange, TextSnapshot};

/// Lexical style of a comment token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentFlavor {
    /// `///`
    TripleSlash,
    /// `//!`
    DoubleSlashExclamation,
    /// `//`
    DoubleSlash,
    /// `/**`
    SlashStarStar,
    /// `/*!`
    SlashStarExclamation,
    /// `/*`
    SlashStar,
    /// No recognizable opener
    Unknown,
}

impl CommentFlavor {
    /// Every flavor a piece can be parsed as
    pub const KNOWN: [CommentFlavor; 6] = [
        CommentFlavor::TripleSlash,
        CommentFlavor::DoubleSlashExclamation,
        CommentFlavor::DoubleSlash,
        CommentFlavor::SlashStarStar,
        CommentFlavor::SlashStarExclamation,
        CommentFlavor::SlashStar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentFlavor::TripleSlash => "///",
            CommentFlavor::DoubleSlashExclamation => "//!",
            CommentFlavor::DoubleSlash => "//",
            CommentFlavor::SlashStarStar => "/**",
            CommentFlavor::SlashStarExclamation => "/*!",
            CommentFlavor::SlashStar => "/*",
            CommentFlavor::Unknown => "unknown",
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(
            self,
            CommentFlavor::SlashStarStar | CommentFlavor::SlashStarExclamation | CommentFlavor::SlashStar
        )
    }

    pub fn is_line(&self) -> bool {
        matches!(
            self,
            CommentFlavor::TripleSlash | CommentFlavor::DoubleSlashExclamation | CommentFlavor::DoubleSlash
        )
    }

    /// Flavor announced by the start of a comment token. `////` is a plain
    /// line comment, `/**/` an empty plain block comment.
    pub fn from_opener(text: &str) -> Option<CommentFlavor> {
        if text.starts_with("///") && !text.starts_with("////") {
            Some(CommentFlavor::TripleSlash)
        } else if text.starts_with("//!") {
            Some(CommentFlavor::DoubleSlashExclamation)
        } else if text.starts_with("//") {
            Some(CommentFlavor::DoubleSlash)
        } else if text.starts_with("/**/") {
            Some(CommentFlavor::SlashStar)
        } else if text.starts_with("/**") {
            Some(CommentFlavor::SlashStarStar)
        } else if text.starts_with("/*!") {
            Some(CommentFlavor::SlashStarExclamation)
        } else if text.starts_with("/*") {
            Some(CommentFlavor::SlashStar)
        } else {
            None
        }
    }
}

impl std::fmt::Display for CommentFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One per-line comment piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentSpan {
    pub range: TextRange,
    pub flavor: CommentFlavor,
}

impl CommentSpan {
    /// Whether a caret at `position` is inside; the end counts unless the
    /// piece closes a block comment
    pub fn holds_caret(&self, snapshot: &TextSnapshot, position: usize) -> bool {
        if self.range.contains(position) {
            return true;
        }
        position == self.range.end()
            && !(self.flavor.is_block() && snapshot.slice(self.range).trim_end().ends_with("*/"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Resolved {
    flavor: CommentFlavor,
    /// The comment token continues after this piece
    open: bool,
}

impl Resolved {
    const UNKNOWN: Resolved = Resolved {
        flavor: CommentFlavor::Unknown,
        open: false,
    };

    fn of(text: &str, left: Option<Resolved>) -> Resolved {
        if let Some(left) = left.filter(|l| l.open) {
            return Resolved {
                flavor: left.flavor,
                open: stays_open(left.flavor, text, false),
            };
        }
        let text = text.trim_start();
        match CommentFlavor::from_opener(text) {
            Some(flavor) => Resolved {
                flavor,
                open: stays_open(flavor, text, true),
            },
            None => Resolved::UNKNOWN,
        }
    }
}

fn stays_open(flavor: CommentFlavor, text: &str, starts_token: bool) -> bool {
    let text = text.trim_end();
    if flavor.is_block() {
        // "/*/" opens without closing
        let closed = text.ends_with("*/") && (!starts_token || text.len() >= 4);
        !closed
    } else if flavor.is_line() {
        text.ends_with('\\')
    } else {
        false
    }
}

/// Splits buffer ranges into flavored comment pieces, caching per revision
pub struct CommentExtractor {
    oracle: Arc<dyn CommentOracle>,
    revision: Option<Revision>,
    spans: HashMap<TextRange, Vec<CommentSpan>>,
    memo: HashMap<usize, Resolved>,
    dirty: DirtyFlag,
    _reclassified: Subscription,
}

impl CommentExtractor {
    pub fn new(oracle: Arc<dyn CommentOracle>) -> Self {
        let dirty = DirtyFlag::new();
        let subscription = dirty.subscribe_to(oracle.reclassified());
        Self {
            oracle,
            revision: None,
            spans: HashMap::new(),
            memo: HashMap::new(),
            dirty,
            _reclassified: subscription,
        }
    }

    pub fn oracle(&self) -> &Arc<dyn CommentOracle> {
        &self.oracle
    }

    pub fn invalidate(&mut self) {
        self.spans.clear();
        self.memo.clear();
    }

    fn sync(&mut self, snapshot: &TextSnapshot) {
        let reclassified = self.dirty.take();
        if reclassified || self.revision != Some(snapshot.revision()) {
            self.invalidate();
            self.revision = Some(snapshot.revision());
        }
    }

    /// Comment pieces of the lines touched by `range`, in buffer order
    pub fn split_into_comments(&mut self, snapshot: &TextSnapshot, range: TextRange) -> Vec<CommentSpan> {
        self.sync(snapshot);
        if let Some(cached) = self.spans.get(&range) {
            return cached.clone();
        }

        let widened = snapshot.widen_to_lines(range);
        let mut result = Vec::new();
        for token in self.oracle.comment_spans(snapshot, widened) {
            for piece in snapshot.split_lines(token) {
                let resolved = self.resolve(snapshot, piece);
                result.push(CommentSpan {
                    range: piece,
                    flavor: resolved.flavor,
                });
            }
        }
        tracing::trace!(range = %range, pieces = result.len(), "split into comments");
        self.spans.insert(range, result.clone());
        result
    }

    /// Flavor of the comment holding a caret at `position`
    pub fn flavor_at(&mut self, snapshot: &TextSnapshot, position: usize) -> Option<CommentFlavor> {
        self.split_into_comments(snapshot, TextRange::new(position, 0))
            .into_iter()
            .find(|span| span.holds_caret(snapshot, position))
            .map(|span| span.flavor)
    }

    fn resolve(&mut self, snapshot: &TextSnapshot, piece: TextRange) -> Resolved {
        if let Some(resolved) = self.memo.get(&piece.start) {
            return *resolved;
        }

        // Walk left until a memoized piece or the token start.
        let mut chain = vec![piece];
        let mut base = None;
        let mut current = piece;
        while let Some(left) = self.left_neighbour(snapshot, current) {
            if let Some(resolved) = self.memo.get(&left.start) {
                base = Some(*resolved);
                break;
            }
            chain.push(left);
            current = left;
        }

        let mut left = base;
        let mut resolved = Resolved::UNKNOWN;
        for piece in chain.iter().rev() {
            resolved = Resolved::of(snapshot.slice(*piece), left);
            self.memo.insert(piece.start, resolved);
            left = Some(resolved);
        }
        resolved
    }

    fn left_neighbour(&self, snapshot: &TextSnapshot, piece: TextRange) -> Option<TextRange> {
        let line_start = snapshot.line_start(piece.start);
        if piece.start > line_start {
            let before = TextRange::from_bounds(line_start, piece.start);
            return self
                .oracle
                .comment_spans(snapshot, before)
                .last()
                .copied()
                .filter(|span| span.end() == piece.start);
        }

        let mut line = snapshot.previous_line(line_start)?;
        while snapshot.slice(line).trim().is_empty() {
            line = snapshot.previous_line(line.start)?;
        }
        self.oracle
            .comment_spans(snapshot, line)
            .last()
            .copied()
            .filter(|span| span.end() == line.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Oracle tokens are every `//...` to line end and every `/*...*/`,
    /// found by a naive scan (no strings in these fixtures)
    fn tokens(text: &str) -> Vec<TextRange> {
        let bytes = text.as_bytes();
        let mut tokens = Vec::new();
        let mut i = 0;
        while i + 1 < bytes.len() {
            if bytes[i] == b'/' && bytes[i + 1] == b'/' {
                let mut end = i;
                loop {
                    let line_end = text[end..].find('\n').map(|n| end + n).unwrap_or(text.len());
                    let content = text[..line_end].trim_end_matches('\r');
                    if content.ends_with('\\') && line_end < text.len() {
                        end = line_end + 1;
                    } else {
                        end = line_end;
                        break;
                    }
                }
                tokens.push(TextRange::from_bounds(i, end));
                i = end;
            } else if bytes[i] == b'/' && bytes[i + 1] == b'*' {
                let end = text[i + 2..].find("*/").map(|n| i + 2 + n + 2).unwrap_or(text.len());
                tokens.push(TextRange::from_bounds(i, end));
                i = end;
            } else {
                i += 1;
            }
        }
        tokens
    }

    fn split(text: &str) -> Vec<(String, CommentFlavor)> {
        let oracle = Arc::new(FixedOracle::new(tokens(text)));
        let mut extractor = CommentExtractor::new(oracle);
        let snapshot = TextSnapshot::new(text, 1);
        extractor
            .split_into_comments(&snapshot, snapshot.full_range())
            .into_iter()
            .map(|s| (snapshot.slice(s.range).to_string(), s.flavor))
            .collect()
    }

    fn piece(text: &str, flavor: CommentFlavor) -> (String, CommentFlavor) {
        (text.to_string(), flavor)
    }

    #[test]
    fn test_openers() {
        use CommentFlavor::*;
        assert_eq!(CommentFlavor::from_opener("/// x"), Some(TripleSlash));
        assert_eq!(CommentFlavor::from_opener("//// x"), Some(DoubleSlash));
        assert_eq!(CommentFlavor::from_opener("//! x"), Some(DoubleSlashExclamation));
        assert_eq!(CommentFlavor::from_opener("/**/"), Some(SlashStar));
        assert_eq!(CommentFlavor::from_opener("/*** x */"), Some(SlashStarStar));
        assert_eq!(CommentFlavor::from_opener("/*! x */"), Some(SlashStarExclamation));
        assert_eq!(CommentFlavor::from_opener("/* x */"), Some(SlashStar));
        assert_eq!(CommentFlavor::from_opener(" * x"), None);
    }

    #[test]
    fn test_continued_block_comment() {
        let found = split("/** first\n * second\n */\nint x;\n");
        assert_eq!(
            found,
            vec![
                piece("/** first", CommentFlavor::SlashStarStar),
                piece(" * second", CommentFlavor::SlashStarStar),
                piece(" */", CommentFlavor::SlashStarStar),
            ]
        );
    }

    #[test]
    fn test_blank_lines_inside_block() {
        let found = split("/*!\n\n   \n text */");
        assert_eq!(
            found,
            vec![
                piece("/*!", CommentFlavor::SlashStarExclamation),
                piece("   ", CommentFlavor::SlashStarExclamation),
                piece(" text */", CommentFlavor::SlashStarExclamation),
            ]
        );
    }

    #[test]
    fn test_line_comment_inside_block_keeps_block_flavor() {
        let found = split("/*!\n // not a line comment\n*/");
        assert_eq!(found[1], piece(" // not a line comment", CommentFlavor::SlashStarExclamation));
    }

    #[test]
    fn test_backslash_continuation() {
        let found = split("/// doc \\\ncontinued\n// plain\n");
        assert_eq!(
            found,
            vec![
                piece("/// doc \\", CommentFlavor::TripleSlash),
                piece("continued", CommentFlavor::TripleSlash),
                piece("// plain", CommentFlavor::DoubleSlash),
            ]
        );
    }

    #[test]
    fn test_closed_neighbours_do_not_leak() {
        let found = split("/* a */ /// b\n/** c */\n//! d");
        assert_eq!(
            found,
            vec![
                piece("/* a */", CommentFlavor::SlashStar),
                piece("/// b", CommentFlavor::TripleSlash),
                piece("/** c */", CommentFlavor::SlashStarStar),
                piece("//! d", CommentFlavor::DoubleSlashExclamation),
            ]
        );
    }

    #[test]
    fn test_slash_star_slash_stays_open() {
        let found = split("/*/\n open */");
        assert_eq!(found[1].1, CommentFlavor::SlashStar);
    }

    #[test]
    fn test_partial_range_matches_full_split() {
        let text = "int a;\n/**\n * one\n * two\n */\n";
        let oracle = Arc::new(FixedOracle::new(tokens(text)));
        let mut extractor = CommentExtractor::new(oracle);
        let snapshot = TextSnapshot::new(text, 1);
        let offset = text.find("two").unwrap();
        let spans = extractor.split_into_comments(&snapshot, TextRange::new(offset, 1));
        assert_eq!(spans.len(), 1);
        assert_eq!(snapshot.slice(spans[0].range), " * two");
        assert_eq!(spans[0].flavor, CommentFlavor::SlashStarStar);
    }

    #[test]
    fn test_flavor_at() {
        let text = "int a; /// \\\n  more\nint b; /* x */";
        let oracle = Arc::new(FixedOracle::new(tokens(text)));
        let mut extractor = CommentExtractor::new(oracle);
        let snapshot = TextSnapshot::new(text, 1);
        let caret = text.find('\n').unwrap();
        assert_eq!(extractor.flavor_at(&snapshot, caret), Some(CommentFlavor::TripleSlash));
        assert_eq!(extractor.flavor_at(&snapshot, 2), None);
        assert_eq!(extractor.flavor_at(&snapshot, text.len()), None);
    }

    #[test]
    fn test_reclassification_clears_cache() {
        let text = "// a\n";
        let oracle = Arc::new(FixedOracle::new(vec![]));
        let mut extractor = CommentExtractor::new(oracle.clone());
        let snapshot = TextSnapshot::new(text, 1);
        assert!(extractor.split_into_comments(&snapshot, snapshot.full_range()).is_empty());

        oracle.set_tokens(vec![TextRange::new(0, 4)], snapshot.full_range());
        let spans = extractor.split_into_comments(&snapshot, snapshot.full_range());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].flavor, CommentFlavor::DoubleSlash);
    }
}
