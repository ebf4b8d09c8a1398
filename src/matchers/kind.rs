//! Pattern shapes
//!
//! A [`MatcherKind`] names one pattern shape. The compiled pattern is a pure
//! function of the kind and the group's keyword set; capture group 1 is
//! always the command token, the following groups are its parameters in
//! order. "Line start" shapes admit leading whitespace and comment
//! decoration (`///`, `//!`, ` * `, `/**<`) before the command.

use super::PrecedingRule;

/// Line start, optional whitespace and comment decoration
const LINE_START: &str = r"^[ \t]*[/*!<]*[ \t]*";
const MARKER: &str = r"[\\@]";
/// Whitespace or end of line after the command
const BOUNDARY: &str = r"(?:\s|$)";
/// Rest of the line, trimmed on both sides
const REST: &str = r"[^\s](?:[^\r\n]*[^\s])?";
const WORD: &str = r#"(?:"[^"\r\n]*"|[^\s<>"]+)"#;
/// A word not ending in sentence punctuation
const INLINE_WORD: &str = r#"[^\s<>"]*[^\s<>".,;!?]"#;
/// `name`, `Class::member`, `Class.member(args)`, `::global`, `~Dtor`
const REFERENCE: &str = r"(?:::)?~?\w+(?:(?:::|\.|#)~?\w+)*(?:\([^()\r\n]*\))?";
const QUOTED: &str = r#""[^"\r\n]*""#;
/// Header file or name: quoted, angle-bracketed or a plain word
const HEADER: &str = r#"(?:"[^"\r\n]*"|<[^<>\r\n]*>|[^\s<>"]+)"#;
const KEY: &str = r#"[^\s"]+"#;
const PARAM_NAME: &str = r#"[^\s<>"\[\]]+"#;
const FILE: &str = r#"(?:"[^"\r\n]*"|[^\s{"](?:[^\r\n]*[^\s])?)"#;
const FILE_AFTER_BRACKET: &str = r#"(?:"[^"\r\n]*"|[^\s\["](?:[^\r\n]*[^\s])?)"#;
const SNIPPET_FILE: &str = r#"(?:"[^"\r\n]*"|[^\s{"]\S*)"#;
const BRACE_OPTION: &str = r"\{[^{}\r\n]*\}";
const BRACKET_OPTION: &str = r"\[[^\[\]\r\n]*\]";
const SIZE: &str = r"(?:width|height)=\S+(?:[ \t]+(?:width|height)=\S+)?";
const IMAGE_FORMAT: &str = r"(?i:html|latex|docbook|rtf|xml)";

/// Identity of a matcher strategy. Determined by the command, never by
/// user configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatcherKind {
    /// Anywhere, no boundary required: `\\`, `\@`, `\f$`, `\--`
    Symbol,
    /// Anywhere, followed by whitespace: `\n`, `\endcode`
    Standalone,
    /// At line start, no parameter: `\brief`
    LineStart,
    /// At line start, optional rest of line: `\par [title]`
    LineStartOptionalRest,
    /// At line start, required rest of line: `\fn <declaration>`
    LineStartRequiredRest,
    /// At line start, one required word: `\ingroup <name>`
    LineStartWord,
    /// At line start, name plus optional header file and header name:
    /// `\class <name> [<header-file>] [<header-name>]`
    LineStartWordHeader,
    /// At line start, key plus two quoted titles: `\xrefitem <key> "heading" "list title"`
    LineStartKeyTitles,
    /// At line start, word plus optional title: `\section <name> [title]`
    LineStartWordTitle,
    /// Anywhere, one required word: `\p <name>`
    InlineWord,
    /// Anywhere, a word or quoted text; quotes may follow the command
    /// directly: `\qualifier <label> | "(text)"`
    InlineLabel,
    /// Anywhere, reference plus optional quoted text: `\ref <name> ["text"]`
    InlineReference,
    /// At line start, quoted format plus optional rest: `\showdate "<fmt>" [date]`
    QuotedFormat,
    /// At line start, optional caption and size: `\dot ["caption"] [width=..]`
    CaptionSize,
    /// At line start, file, optional caption and size: `\dotfile <file> ["caption"]`
    FileCaptionSize,
    /// `\param[in,out] <name>`
    ParamDirection,
    /// Anywhere, optional `{option}`: `\fileinfo{name}`
    BraceOption,
    /// At line start, optional `{option}` and file: `\include{lineno} <file>`
    BraceOptionRest,
    /// At line start, optional `{option}`, file and block: `\snippet{doc} <file> <block>`
    BraceOptionFileBlock,
    /// At line start, optional `[option]`: `\htmlonly[block]`
    BracketOption,
    /// At line start, optional `[option]` and file: `\htmlinclude[block] <file>`
    BracketOptionRest,
    /// `\image{options} <format> <file> ["caption"]`
    ImageOptions,
}

impl MatcherKind {
    pub fn name(&self) -> &'static str {
        match self {
            MatcherKind::Symbol => "symbol",
            MatcherKind::Standalone => "standalone",
            MatcherKind::LineStart => "line-start",
            MatcherKind::LineStartOptionalRest => "line-start-optional-rest",
            MatcherKind::LineStartRequiredRest => "line-start-required-rest",
            MatcherKind::LineStartWord => "line-start-word",
            MatcherKind::LineStartWordHeader => "line-start-word-header",
            MatcherKind::LineStartKeyTitles => "line-start-key-titles",
            MatcherKind::LineStartWordTitle => "line-start-word-title",
            MatcherKind::InlineWord => "inline-word",
            MatcherKind::InlineLabel => "inline-label",
            MatcherKind::InlineReference => "inline-reference",
            MatcherKind::QuotedFormat => "quoted-format",
            MatcherKind::CaptionSize => "caption-size",
            MatcherKind::FileCaptionSize => "file-caption-size",
            MatcherKind::ParamDirection => "param-direction",
            MatcherKind::BraceOption => "brace-option",
            MatcherKind::BraceOptionRest => "brace-option-rest",
            MatcherKind::BraceOptionFileBlock => "brace-option-file-block",
            MatcherKind::BracketOption => "bracket-option",
            MatcherKind::BracketOptionRest => "bracket-option-rest",
            MatcherKind::ImageOptions => "image-options",
        }
    }

    /// Whether capture 2 is an option validated by an allow-list
    pub fn is_clamped(&self) -> bool {
        matches!(
            self,
            MatcherKind::ParamDirection
                | MatcherKind::BraceOption
                | MatcherKind::BraceOptionRest
                | MatcherKind::BraceOptionFileBlock
                | MatcherKind::BracketOption
                | MatcherKind::BracketOptionRest
                | MatcherKind::ImageOptions
        )
    }

    /// Number of capture groups, i.e. the classification count a group of
    /// this kind must carry
    pub fn capture_count(&self) -> usize {
        match self {
            MatcherKind::Symbol | MatcherKind::Standalone | MatcherKind::LineStart => 1,
            MatcherKind::LineStartOptionalRest
            | MatcherKind::LineStartRequiredRest
            | MatcherKind::LineStartWord
            | MatcherKind::InlineWord
            | MatcherKind::InlineLabel
            | MatcherKind::BraceOption
            | MatcherKind::BracketOption => 2,
            MatcherKind::LineStartWordTitle
            | MatcherKind::InlineReference
            | MatcherKind::QuotedFormat
            | MatcherKind::CaptionSize
            | MatcherKind::ParamDirection
            | MatcherKind::BraceOptionRest
            | MatcherKind::BracketOptionRest => 3,
            MatcherKind::LineStartWordHeader
            | MatcherKind::LineStartKeyTitles
            | MatcherKind::FileCaptionSize
            | MatcherKind::BraceOptionFileBlock => 4,
            MatcherKind::ImageOptions => 5,
        }
    }

    /// Condition on the text before the command token
    pub fn preceding_rule(&self) -> PrecedingRule {
        match self {
            // `"\fileinfo{full}"` is not parsed as a command
            MatcherKind::BraceOption => PrecedingRule::NotEscapedNorAfter('"'),
            _ => PrecedingRule::NotEscaped,
        }
    }

    /// Pattern source for the given keywords (without marker characters)
    pub fn pattern(&self, keywords: &[String]) -> String {
        let cmd = format!("({MARKER}{})", keyword_alternation(keywords));
        let body = match self {
            MatcherKind::Symbol => cmd,
            MatcherKind::Standalone => format!("{cmd}{BOUNDARY}"),
            MatcherKind::LineStart => format!("{LINE_START}{cmd}{BOUNDARY}"),
            MatcherKind::LineStartOptionalRest => {
                format!(r"{LINE_START}{cmd}(?:[ \t]+({REST}))?[ \t\r]*$")
            }
            MatcherKind::LineStartRequiredRest => format!(r"{LINE_START}{cmd}[ \t]+({REST})"),
            MatcherKind::LineStartWord => format!(r"{LINE_START}{cmd}[ \t]+({WORD})"),
            MatcherKind::LineStartWordHeader => format!(
                r"{LINE_START}{cmd}[ \t]+({WORD})(?:[ \t]+({HEADER})(?:[ \t]+({HEADER}))?)?"
            ),
            MatcherKind::LineStartKeyTitles => format!(
                r"{LINE_START}{cmd}[ \t]+({KEY})(?:[ \t]+({QUOTED})(?:[ \t]+({QUOTED}))?)?"
            ),
            MatcherKind::LineStartWordTitle => {
                format!(r"{LINE_START}{cmd}[ \t]+({WORD})(?:[ \t]+({REST}))?")
            }
            MatcherKind::InlineWord => format!(r"{cmd}[ \t]+({INLINE_WORD})"),
            MatcherKind::InlineLabel => {
                format!(r"{cmd}(?:[ \t]+|\b)({QUOTED}|{INLINE_WORD})")
            }
            MatcherKind::InlineReference => {
                format!(r"{cmd}[ \t]+({REFERENCE})(?:[ \t]+({QUOTED}))?")
            }
            MatcherKind::QuotedFormat => {
                format!(r"{LINE_START}{cmd}[ \t]+({QUOTED})(?:[ \t]+({REST}))?")
            }
            MatcherKind::CaptionSize => {
                format!(r"{LINE_START}{cmd}(?:[ \t]+({QUOTED}))?(?:[ \t]+({SIZE}))?{BOUNDARY}")
            }
            MatcherKind::FileCaptionSize => format!(
                r#"{LINE_START}{cmd}[ \t]+({QUOTED}|[^\s"]+)(?:[ \t]+({QUOTED}))?(?:[ \t]+({SIZE}))?{BOUNDARY}"#
            ),
            // A malformed argument still leaves the command token
            MatcherKind::ParamDirection => format!(
                r"{LINE_START}{cmd}(?:(?:[ \t]*({BRACKET_OPTION}))?[ \t]+({PARAM_NAME})|\b)"
            ),
            MatcherKind::BraceOption => format!(r"{cmd}(?:({BRACE_OPTION})|{BOUNDARY})"),
            MatcherKind::BraceOptionRest => {
                format!(r"{LINE_START}{cmd}({BRACE_OPTION})?(?:[ \t]+({FILE}))?{BOUNDARY}")
            }
            MatcherKind::BraceOptionFileBlock => format!(
                r"{LINE_START}{cmd}({BRACE_OPTION})?(?:[ \t]+({SNIPPET_FILE})(?:[ \t]+({REST}))?)?{BOUNDARY}"
            ),
            MatcherKind::BracketOption => {
                format!(r"{LINE_START}{cmd}({BRACKET_OPTION})?{BOUNDARY}")
            }
            MatcherKind::BracketOptionRest => format!(
                r"{LINE_START}{cmd}({BRACKET_OPTION})?(?:[ \t]+({FILE_AFTER_BRACKET}))?{BOUNDARY}"
            ),
            MatcherKind::ImageOptions => format!(
                r#"{LINE_START}{cmd}({BRACE_OPTION})?[ \t]+({IMAGE_FORMAT})(?:[ \t]+({QUOTED}|[^\s"]+)(?:[ \t]+({QUOTED}))?)?{BOUNDARY}"#
            ),
        };
        format!("(?m){body}")
    }
}

impl std::fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Longest keywords first so `\em` is not shadowed by `\e`
fn keyword_alternation(keywords: &[String]) -> String {
    let mut sorted: Vec<&str> = keywords.iter().map(String::as_str).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let escaped: Vec<String> = sorted.iter().map(|k| regex::escape(k)).collect();
    format!("(?:{})", escaped.join("|"))
}
