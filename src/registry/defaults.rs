//! Built-in command table
//!
//! The literal list the default groups are derived from. Each row binds a
//! set of commands to a pattern shape and the classifications of the command
//! token and its parameters. A command appears in exactly one row.

use crate::classification::Classification::{
    self, Command, EmphasisMajor, EmphasisMinor, Exceptions, InlineCode, Note, Parameter1,
    Parameter2, ParameterClamped, Title, Warning,
};
use crate::matchers::MatcherKind;

pub(crate) struct DefaultRow {
    pub kind: MatcherKind,
    pub classifications: &'static [Classification],
    pub keywords: &'static [&'static str],
}

const fn row(
    kind: MatcherKind,
    classifications: &'static [Classification],
    keywords: &'static [&'static str],
) -> DefaultRow {
    DefaultRow {
        kind,
        classifications,
        keywords,
    }
}

pub(crate) const DEFAULT_ROWS: &[DefaultRow] = &[
    row(
        MatcherKind::LineStart,
        &[Command],
        &[
            // sections
            "brief", "short", "details", "sa", "see", "result", "return", "returns", "author",
            "authors", "copyright", "date", "post", "pre", "since", "test", "version",
            // conditionals and blocks
            "else", "endcond", "endif", "parblock", "endparblock",
            // graphs
            "callgraph", "hidecallgraph", "callergraph", "hidecallergraph", "showrefby",
            "hiderefby", "showrefs", "hiderefs", "showinlinesource", "hideinlinesource",
            "includegraph", "hideincludegraph", "includedbygraph", "hideincludedbygraph",
            "directorygraph", "hidedirectorygraph", "collaborationgraph",
            "hidecollaborationgraph", "groupgraph", "hidegroupgraph", "hideinheritancegraph",
            "hideenumvalues",
            // structural markers
            "endinternal", "hideinitializer", "internal", "nosubgrouping", "private",
            "privatesection", "protected", "protectedsection", "public", "publicsection", "pure",
            "showinitializer", "static",
            // lists
            "secreflist", "endsecreflist", "arg", "li",
            // output format blocks
            "docbookonly", "enddocbookonly", "latexonly", "endlatexonly", "manonly",
            "endmanonly", "rtfonly", "endrtfonly", "verbatim", "endverbatim", "xmlonly",
            "endxmlonly", "endhtmlonly", "enddot", "endmsc", "startuml", "enduml",
        ],
    ),
    row(
        MatcherKind::LineStart,
        &[Note],
        &["note", "todo", "remark", "remarks", "invariant", "important"],
    ),
    row(
        MatcherKind::LineStart,
        &[Warning],
        &["warning", "raisewarning", "attention", "bug", "deprecated"],
    ),
    row(
        MatcherKind::Standalone,
        &[Command],
        &["n", "endlink", "endcode", "lineinfo", "showenumvalues"],
    ),
    row(
        MatcherKind::Symbol,
        &[Command],
        &[
            "\\", "@", "&", "$", "#", "<", ">", "%", ".", "?", "=", "::", "|", "--", "---", "{",
            "}", "~", "\"", "f$", "f[", "f]", "f(", "f)", "f{", "f}",
        ],
    ),
    row(
        MatcherKind::LineStartOptionalRest,
        &[Command, Title],
        &["par", "name", "mainpage"],
    ),
    row(
        MatcherKind::LineStartOptionalRest,
        &[Command, Parameter1],
        &["file", "dir", "cond", "overload", "module", "noop"],
    ),
    row(
        MatcherKind::LineStartRequiredRest,
        &[Command, Parameter1],
        &[
            "fn", "var", "typedef", "def", "property", "if", "elseif", "ifnot", "skip",
            "skipline", "until", "line", "verbinclude", "latexinclude", "rtfinclude",
            "maninclude", "docbookinclude", "xmlinclude", "addindex",
        ],
    ),
    row(
        MatcherKind::LineStartWord,
        &[Command, Parameter1],
        &[
            "ingroup", "namespace", "enum", "extends", "implements", "memberof", "relates",
            "related", "relatesalso", "relatedalso", "idlexcept", "concept", "package",
            "headerfile", "tparam", "retval",
        ],
    ),
    row(
        MatcherKind::LineStartWordHeader,
        &[Command, Parameter1, Parameter2, Parameter2],
        &["class", "struct", "union", "interface", "protocol", "category"],
    ),
    row(
        MatcherKind::LineStartKeyTitles,
        &[Command, Parameter1, Title, Title],
        &["xrefitem"],
    ),
    row(
        MatcherKind::LineStartWord,
        &[Command, Exceptions],
        &["exception", "throw", "throws"],
    ),
    row(
        MatcherKind::LineStartWordTitle,
        &[Command, Parameter1, Title],
        &[
            "defgroup", "addtogroup", "weakgroup", "page", "section", "subsection",
            "subsubsection", "paragraph", "subparagraph", "subsubparagraph",
        ],
    ),
    row(
        MatcherKind::InlineWord,
        &[Command, Parameter1],
        &[
            "anchor", "cite", "link", "refitem", "copydoc", "copybrief", "copydetails", "emoji",
            "doxyconfig",
        ],
    ),
    row(MatcherKind::InlineLabel, &[Command, Parameter1], &["qualifier"]),
    row(MatcherKind::InlineWord, &[Command, EmphasisMinor], &["a", "e", "em"]),
    row(MatcherKind::InlineWord, &[Command, EmphasisMajor], &["b"]),
    row(MatcherKind::InlineWord, &[Command, InlineCode], &["c", "p"]),
    row(
        MatcherKind::InlineReference,
        &[Command, Parameter1, Title],
        &["ref", "subpage"],
    ),
    row(
        MatcherKind::ParamDirection,
        &[Command, ParameterClamped, Parameter1],
        &["param"],
    ),
    row(
        MatcherKind::BraceOption,
        &[Command, ParameterClamped],
        &["fileinfo", "inheritancegraph", "tableofcontents", "code"],
    ),
    row(
        MatcherKind::BraceOptionRest,
        &[Command, ParameterClamped, Parameter1],
        &["include", "includelineno", "includedoc", "dontinclude", "example"],
    ),
    row(
        MatcherKind::BraceOptionFileBlock,
        &[Command, ParameterClamped, Parameter1, Parameter2],
        &["snippet", "snippetlineno", "snippetdoc"],
    ),
    row(
        MatcherKind::BracketOption,
        &[Command, ParameterClamped],
        &["htmlonly"],
    ),
    row(
        MatcherKind::BracketOptionRest,
        &[Command, ParameterClamped, Parameter1],
        &["htmlinclude"],
    ),
    row(
        MatcherKind::ImageOptions,
        &[Command, ParameterClamped, Parameter1, Parameter2, Title],
        &["image"],
    ),
    row(MatcherKind::CaptionSize, &[Command, Title, Parameter2], &["dot", "msc"]),
    row(
        MatcherKind::FileCaptionSize,
        &[Command, Parameter1, Title, Parameter2],
        &["dotfile", "mscfile", "diafile", "plantumlfile"],
    ),
    row(
        MatcherKind::QuotedFormat,
        &[Command, Parameter1, Parameter2],
        &["showdate"],
    ),
];
