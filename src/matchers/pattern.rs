//! Regex-backed matcher
//!
//! The `regex` crate has no lookbehind, so the "not escaped" and "not inside
//! a word" preconditions on the first capture are checked here after each
//! candidate match. A rejected candidate resumes the search one character
//! after the start of the match.

use regex::{Captures, Regex};

use super::{Fragment, FragmentGroup, FragmentMatcher};
use crate::classification::Classification;
use crate::error::{Error, Result};
use crate::registry::CommandGroup;

/// Condition on the text right before capture 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecedingRule {
    /// Not preceded by an odd run of `\` or `@` (`\\cite`, `@\cite`)
    NotEscaped,
    /// Not escaped and not right after the given character
    NotEscapedNorAfter(char),
    /// Not preceded by a word character or the given delimiter
    NotWordOr(char),
}

impl PrecedingRule {
    pub fn admits(&self, text: &str, start: usize) -> bool {
        let before = &text[..start];
        match self {
            PrecedingRule::NotEscaped => !is_escaped(before),
            PrecedingRule::NotEscapedNorAfter(delimiter) => {
                !is_escaped(before) && before.chars().next_back() != Some(*delimiter)
            }
            PrecedingRule::NotWordOr(delimiter) => match before.chars().next_back() {
                None => true,
                Some(c) => !(c.is_alphanumeric() || c == '_' || c == *delimiter),
            },
        }
    }
}

fn is_escaped(before: &str) -> bool {
    let run = before
        .chars()
        .rev()
        .take_while(|c| *c == '\\' || *c == '@')
        .count();
    run % 2 == 1
}

/// One compiled pattern; capture *i* becomes a fragment with classification *i*
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
    classifications: Vec<Classification>,
    preceding: PrecedingRule,
}

impl PatternMatcher {
    pub fn new(
        regex: Regex,
        classifications: Vec<Classification>,
        preceding: PrecedingRule,
    ) -> Result<Self> {
        let captures = regex.captures_len() - 1;
        if captures != classifications.len() {
            return Err(Error::CaptureMismatch {
                captures,
                classifications: classifications.len(),
            });
        }
        Ok(Self {
            regex,
            classifications,
            preceding,
        })
    }

    /// Compile the pattern for a command group
    pub fn for_group(group: &CommandGroup) -> Result<Self> {
        let source = group.matcher.pattern(&group.keywords);
        let regex = Regex::new(&source).map_err(|source| Error::Pattern {
            kind: group.matcher.name(),
            source,
        })?;
        Self::new(regex, group.classifications.clone(), group.matcher.preceding_rule())
    }

    /// Scan `text`, keeping capture `i` only when `keep(i, command, captured)`
    /// holds. Capture 1 (the command) is always kept.
    pub fn find_filtered<F>(&self, text: &str, keep: F) -> Vec<FragmentGroup>
    where
        F: Fn(usize, &str, &str) -> bool,
    {
        let mut groups = Vec::new();
        let mut at = 0;
        while at <= text.len() {
            let Some(caps) = self.regex.captures_at(text, at) else {
                break;
            };
            let whole = caps.get(0).map(|m| m.range()).unwrap_or(at..at);
            let retry = next_char_boundary(text, whole.start);
            let Some(command) = caps.get(1) else {
                at = retry;
                continue;
            };
            if !self.preceding.admits(text, command.start()) {
                at = retry;
                continue;
            }

            let group = self.group_from(&caps, command.as_str(), &keep);
            // Resume after the last fragment; trailing boundaries may start the next match.
            at = group.end_offset().max(retry);
            groups.push(group);
        }
        groups
    }

    fn group_from<F>(&self, caps: &Captures<'_>, command: &str, keep: &F) -> FragmentGroup
    where
        F: Fn(usize, &str, &str) -> bool,
    {
        let fragments = self
            .classifications
            .iter()
            .enumerate()
            .filter_map(|(i, classification)| {
                let index = i + 1;
                let m = caps.get(index)?;
                if m.is_empty() || (index > 1 && !keep(index, command, m.as_str())) {
                    return None;
                }
                Some(Fragment::new(m.start(), m.len(), *classification))
            })
            .collect();
        FragmentGroup::new(fragments)
    }
}

impl FragmentMatcher for PatternMatcher {
    fn find(&self, text: &str) -> Vec<FragmentGroup> {
        self.find_filtered(text, |_, _, _| true)
    }
}

fn next_char_boundary(text: &str, offset: usize) -> usize {
    text[offset..]
        .chars()
        .next()
        .map(|c| offset + c.len_utf8())
        .unwrap_or(text.len() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::MatcherKind;

    fn group(kind: MatcherKind, keywords: &[&str], classifications: &[Classification]) -> CommandGroup {
        CommandGroup {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            matcher: kind,
            classifications: classifications.to_vec(),
        }
    }

    fn spans(groups: &[FragmentGroup], text: &str) -> Vec<Vec<String>> {
        groups
            .iter()
            .map(|g| {
                g.fragments
                    .iter()
                    .map(|f| text[f.start_offset..f.end_offset()].to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_line_start_after_decoration() {
        let matcher = PatternMatcher::for_group(&group(
            MatcherKind::LineStart,
            &["brief"],
            &[Classification::Command],
        ))
        .unwrap();
        let text = "/// \\brief Does X.\n * @brief again\nnot \\brief here";
        let found = matcher.find(text);
        assert_eq!(spans(&found, text), vec![vec!["\\brief"], vec!["@brief"]]);
    }

    #[test]
    fn test_escaped_command_is_skipped() {
        let matcher = PatternMatcher::for_group(&group(
            MatcherKind::InlineWord,
            &["cite"],
            &[Classification::Command, Classification::Parameter1],
        ))
        .unwrap();
        let text = "a \\\\cite x @\\cite y \\\\\\cite z";
        let found = matcher.find(text);
        assert_eq!(spans(&found, text), vec![vec!["\\cite", "z"]]);
    }

    #[test]
    fn test_inline_word_drops_trailing_punctuation() {
        let matcher = PatternMatcher::for_group(&group(
            MatcherKind::InlineWord,
            &["p", "c"],
            &[Classification::Command, Classification::InlineCode],
        ))
        .unwrap();
        let text = "use \\p value, or @c other.";
        let found = matcher.find(text);
        assert_eq!(
            spans(&found, text),
            vec![vec!["\\p", "value"], vec!["@c", "other"]]
        );
    }

    #[test]
    fn test_optional_rest_is_trimmed() {
        let matcher = PatternMatcher::for_group(&group(
            MatcherKind::LineStartOptionalRest,
            &["par"],
            &[Classification::Command, Classification::Title],
        ))
        .unwrap();
        let text = " * \\par  User title  \r\n * \\par\n";
        let found = matcher.find(text);
        assert_eq!(
            spans(&found, text),
            vec![vec!["\\par", "User title"], vec!["\\par"]]
        );
    }

    #[test]
    fn test_symbol_keywords() {
        let matcher = PatternMatcher::for_group(&group(
            MatcherKind::Symbol,
            &["\\", "@", "--", "---", "f$"],
            &[Classification::Command],
        ))
        .unwrap();
        let text = "\\\\ and \\--- and \\f$x\\f$";
        let found = matcher.find(text);
        assert_eq!(
            spans(&found, text),
            vec![vec!["\\\\"], vec!["\\---"], vec!["\\f$"], vec!["\\f$"]]
        );
    }

    #[test]
    fn test_capture_count_mismatch_is_rejected() {
        let regex = Regex::new(r"(\\a)(b)").unwrap();
        assert!(PatternMatcher::new(regex, vec![Classification::Command], PrecedingRule::NotEscaped).is_err());
    }

    #[test]
    fn test_preceding_rule_delimiter() {
        let rule = PrecedingRule::NotEscapedNorAfter('"');
        assert!(rule.admits("a \\x", 2));
        assert!(!rule.admits("\"\\x", 1));
        assert!(!rule.admits("\\\\x", 1));
    }

    #[test]
    fn test_preceding_rule_word() {
        let rule = PrecedingRule::NotWordOr('*');
        assert!(rule.admits("a *b*", 2));
        assert!(!rule.admits("a**b*", 2));
        assert!(!rule.admits("ab*c*", 2));
        assert!(rule.admits("*x*", 0));
    }
}
