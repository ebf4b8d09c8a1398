//! Comment oracle contract
//!
//! The host tokenizer knows where comments are; this crate never lexes the
//! host language itself.

use std::sync::RwLock;

use crate::events::Notifier;
use crate::text::{TextRange, TextSnapshot};

/// Host-side knowledge of comment tokens
pub trait CommentOracle {
    /// Comment spans intersecting `range`, clipped to it, in ascending order
    fn comment_spans(&self, snapshot: &TextSnapshot, range: TextRange) -> Vec<TextRange>;

    /// Fires when the host reclassifies a region after the fact
    fn reclassified(&self) -> &Notifier<TextRange>;

    /// Whether `position` lies in a comment; the end of a span counts
    fn is_inside_comment(&self, snapshot: &TextSnapshot, position: usize) -> bool {
        self.comment_spans(snapshot, snapshot.line_range(position))
            .iter()
            .any(|span| span.start <= position && position <= span.end())
    }
}

/// Oracle over a token list supplied by the host
#[derive(Default)]
pub struct FixedOracle {
    tokens: RwLock<Vec<TextRange>>,
    reclassified: Notifier<TextRange>,
}

impl FixedOracle {
    pub fn new(mut tokens: Vec<TextRange>) -> Self {
        tokens.sort();
        Self {
            tokens: RwLock::new(tokens),
            reclassified: Notifier::new(),
        }
    }

    /// Replace the token list and announce the change for `affected`
    pub fn set_tokens(&self, mut tokens: Vec<TextRange>, affected: TextRange) {
        tokens.sort();
        if let Ok(mut current) = self.tokens.write() {
            *current = tokens;
        }
        self.reclassified.notify(&affected);
    }
}

impl CommentOracle for FixedOracle {
    fn comment_spans(&self, _snapshot: &TextSnapshot, range: TextRange) -> Vec<TextRange> {
        let Ok(tokens) = self.tokens.read() else {
            return Vec::new();
        };
        tokens
            .iter()
            .filter_map(|token| token.intersection(&range))
            .collect()
    }

    fn reclassified(&self) -> &Notifier<TextRange> {
        &self.reclassified
    }
}
