//! `doxyspan highlight` - print the classified comments of a file

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::{classification_style, open_source};
use crate::classification::Classification;
use crate::config::Settings;
use crate::engine::ClassifiedSpan;
use crate::text::{TextRange, TextSnapshot};

/// Options for the highlight command
#[derive(Debug, Clone)]
pub struct HighlightOptions {
    /// Source file
    pub file: PathBuf,
    /// Print spans as JSON
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSpan<'a> {
    line: usize,
    column: usize,
    length: usize,
    classification: Classification,
    text: &'a str,
}

/// Execute the highlight command
pub fn execute_highlight(options: HighlightOptions, settings: Settings) -> Result<()> {
    let (mut engine, snapshot) = open_source(&options.file, settings)?;
    let spans = engine.highlight(&snapshot, snapshot.full_range())?;

    if options.json {
        let json: Vec<JsonSpan> = spans
            .iter()
            .map(|span| {
                let (line, column) = snapshot.line_column(span.range.start);
                JsonSpan {
                    line: line + 1,
                    column: column + 1,
                    length: span.range.len,
                    classification: span.classification,
                    text: snapshot.slice(span.range),
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    if spans.is_empty() {
        println!("{} No documentation commands in {}", style("•").dim(), options.file.display());
        return Ok(());
    }

    let mut remaining = spans.as_slice();
    while let Some(first) = remaining.first() {
        let line = snapshot.line_range(first.range.start);
        let count = remaining
            .iter()
            .take_while(|span| span.range.start < line.end() || span.range.start == line.start)
            .count();
        let (on_line, rest) = remaining.split_at(count.max(1));
        let (number, _) = snapshot.line_column(line.start);
        println!("{:>5} {}", style(number + 1).dim(), render_line(&snapshot, line, on_line));
        remaining = rest;
    }
    Ok(())
}

/// The line text with every span styled by its classification
fn render_line(snapshot: &TextSnapshot, line: TextRange, spans: &[ClassifiedSpan]) -> String {
    let mut out = String::new();
    let mut cursor = line.start;
    for span in spans {
        let start = span.range.start.max(cursor);
        let end = span.range.end().min(line.end());
        if start >= end {
            continue;
        }
        out.push_str(snapshot.slice(TextRange::from_bounds(cursor, start)));
        let text = snapshot.slice(TextRange::from_bounds(start, end));
        out.push_str(&classification_style(span.classification).apply_to(text).to_string());
        cursor = end;
    }
    out.push_str(snapshot.slice(TextRange::from_bounds(cursor, line.end().max(cursor))));
    out
}
