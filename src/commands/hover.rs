//! `doxyspan hover` - describe the command at a position

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use console::style;

use super::{classification_style, open_source};
use crate::config::Settings;
use crate::engine::DescriptionPart;

/// One-based `line:column` position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (line, column) = s
            .split_once(':')
            .ok_or_else(|| format!("expected LINE:COLUMN, got '{s}'"))?;
        let parse = |part: &str| match part.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("invalid position '{s}': line and column start at 1")),
        };
        Ok(Position {
            line: parse(line)?,
            column: parse(column)?,
        })
    }
}

/// Options for the hover command
#[derive(Debug, Clone)]
pub struct HoverOptions {
    /// Source file
    pub file: PathBuf,
    /// Position of the caret
    pub position: Position,
    /// Print as JSON
    pub json: bool,
}

/// Execute the hover command
pub fn execute_hover(options: HoverOptions, settings: Settings) -> Result<()> {
    let (mut engine, snapshot) = open_source(&options.file, settings)?;
    let offset = snapshot
        .offset_of(options.position.line - 1, options.position.column - 1)
        .ok_or_else(|| anyhow!("position {}:{} is outside the file", options.position.line, options.position.column))?;

    let Some(hover) = engine.hover(&snapshot, offset)? else {
        if options.json {
            println!("null");
        } else {
            println!("{} No command at {}:{}", style("•").dim(), options.position.line, options.position.column);
        }
        return Ok(());
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&hover)?);
        return Ok(());
    }

    let description = &hover.description;
    let token = snapshot.slice(hover.group.command().range());
    println!(
        "{} {}",
        classification_style(description.classification).apply_to(token),
        description.signature
    );
    for fragment in hover.group.fragments.iter().skip(1) {
        println!(
            "  {} {}",
            style(format!("{:<18}", fragment.classification.as_str())).dim(),
            classification_style(fragment.classification).apply_to(snapshot.slice(fragment.range()))
        );
    }

    let text: String = description
        .parts
        .iter()
        .map(|part| match part {
            DescriptionPart::Text(text) => text.clone(),
            DescriptionPart::Fragment { text, classification } => {
                classification_style(*classification).apply_to(text).to_string()
            }
        })
        .collect();
    println!();
    println!("{text}");
    Ok(())
}
