//! Markdown emphasis
//!
//! Fixed matchers, not part of the command registry. Delimiters must sit on
//! word boundaries: `snake_case_name` and `a*b*c` are left alone. The
//! fragment spans the delimiters.

use std::sync::LazyLock;

use regex::Regex;

use super::{FragmentMatcher, PatternMatcher, PrecedingRule};
use crate::classification::Classification;
use crate::error::Result;

/// `(pattern, classification, delimiter)`; capture 1 is the whole emphasis
const MARKDOWN_PATTERNS: [(&str, Classification, char); 6] = [
    (
        r"(\*\*[^\s*](?:[^\r\n*]*[^\s*])?\*\*)(?:[^\w*]|$)",
        Classification::EmphasisMajor,
        '*',
    ),
    (
        r"(__[^\s_](?:[^\r\n_]*[^\s_])?__)(?:[^\w_]|$)",
        Classification::EmphasisMajor,
        '_',
    ),
    (
        r"(\*[^\s*](?:[^\r\n*]*[^\s*])?\*)(?:[^\w*]|$)",
        Classification::EmphasisMinor,
        '*',
    ),
    (
        r"(_[^\s_](?:[^\r\n_]*[^\s_])?_)(?:[^\w_]|$)",
        Classification::EmphasisMinor,
        '_',
    ),
    (
        r"(~~[^\s~](?:[^\r\n~]*[^\s~])?~~)(?:[^\w~]|$)",
        Classification::Strikethrough,
        '~',
    ),
    (
        r"(`[^`\r\n]+`)(?:[^\w`]|$)",
        Classification::InlineCode,
        '`',
    ),
];

static MARKDOWN_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MARKDOWN_PATTERNS
        .iter()
        .map(|(pattern, _, _)| Regex::new(&format!("(?m){pattern}")).unwrap())
        .collect()
});

/// Build the markdown matchers in their fixed order
pub fn markdown_matchers() -> Result<Vec<Box<dyn FragmentMatcher>>> {
    MARKDOWN_PATTERNS
        .iter()
        .zip(MARKDOWN_REGEXES.iter())
        .map(|((_, classification, delimiter), regex)| {
            let matcher = PatternMatcher::new(
                regex.clone(),
                vec![*classification],
                PrecedingRule::NotWordOr(*delimiter),
            )?;
            Ok(Box::new(matcher) as Box<dyn FragmentMatcher>)
        })
        .collect()
}
