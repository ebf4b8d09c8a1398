//! Clamped options
//!
//! Several commands take a `{...}` or `[...]` qualifier glued to the command
//! token. The pattern accepts any bracketed text there; this matcher keeps it
//! only when it passes the allow-list of the matched command, so a typo in
//! the option never hides the rest of the command.

use std::sync::LazyLock;

use regex::Regex;

use super::{FragmentGroup, FragmentMatcher, PatternMatcher};

/// Capture index of the option in every clamped shape
const OPTION_CAPTURE: usize = 2;

/// `{item, item, ...}` with possibly empty items
fn brace_list(item: &str) -> String {
    format!(r"^\{{\s*(?:{item})?(?:\s*,\s*(?:{item})?)*\s*\}}$")
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

const INCLUDE_ITEMS: &str = r"lineno|doc|local|strip|nostrip|raise=[0-5]|prefix=[^,{}\s]*";

static PARAM_DIRECTION: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\[\s*(?:in|out|in\s*,\s*out|out\s*,\s*in)\s*\]$"));

static FILE_INFO: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^\{\s*(?:name|extension|filename|directory|full)\s*\}$")
});

static INHERITANCE_GRAPH: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^\{\s*(?:yes|no|true|false|text|graph|builtin)\s*\}$")
});

static TABLE_OF_CONTENTS: LazyLock<Regex> = LazyLock::new(|| {
    let item = r"(?:html|latex|xml|docbook)(?:\s*:\s*[1-6])?";
    compile(&format!(r"(?i)^\{{\s*{item}(?:\s*,\s*{item})*\s*\}}$"))
});

static CODE: LazyLock<Regex> = LazyLock::new(|| compile(r"^\{\.[\w+#-]+\}$"));

static INCLUDE: LazyLock<Regex> = LazyLock::new(|| compile(&brace_list(INCLUDE_ITEMS)));

static DONT_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| compile(&brace_list("lineno|strip|nostrip")));

static INCLUDE_DOC: LazyLock<Regex> =
    LazyLock::new(|| compile(&brace_list(r"raise=[0-5]|prefix=[^,{}\s]*")));

static SNIPPET: LazyLock<Regex> =
    LazyLock::new(|| compile(&brace_list(&format!("{INCLUDE_ITEMS}|trimleft"))));

static HTML_BLOCK: LazyLock<Regex> = LazyLock::new(|| compile(r"^\[\s*block\s*\]$"));

static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!("(?i){}", brace_list(r"inline|anchor:[\w-]+")))
});

/// Allow-list of a command; `None` admits no option at all
fn allow_list(command: &str) -> Option<&'static Regex> {
    let list: &'static LazyLock<Regex> = match command {
        "param" => &PARAM_DIRECTION,
        "fileinfo" => &FILE_INFO,
        "inheritancegraph" => &INHERITANCE_GRAPH,
        "tableofcontents" => &TABLE_OF_CONTENTS,
        "code" => &CODE,
        "include" | "example" => &INCLUDE,
        "dontinclude" => &DONT_INCLUDE,
        "includedoc" | "snippetdoc" => &INCLUDE_DOC,
        "snippet" => &SNIPPET,
        "htmlonly" | "htmlinclude" => &HTML_BLOCK,
        "image" => &IMAGE,
        _ => return None,
    };
    Some(LazyLock::force(list))
}

/// Whether `option` is a valid qualifier for `command` (without marker)
pub fn is_valid_option(command: &str, option: &str) -> bool {
    allow_list(command).is_some_and(|re| re.is_match(option))
}

/// Pattern matcher whose option capture is re-validated per command
#[derive(Debug, Clone)]
pub struct ClampedOptionMatcher {
    inner: PatternMatcher,
}

impl ClampedOptionMatcher {
    pub fn new(inner: PatternMatcher) -> Self {
        Self { inner }
    }
}

impl FragmentMatcher for ClampedOptionMatcher {
    fn find(&self, text: &str) -> Vec<FragmentGroup> {
        self.inner.find_filtered(text, |index, command, captured| {
            if index != OPTION_CAPTURE {
                return true;
            }
            let keyword = command.get(1..).unwrap_or_default();
            let valid = is_valid_option(keyword, captured);
            if !valid {
                tracing::trace!(command = keyword, option = captured, "dropping invalid option");
            }
            valid
        })
    }
}
