//! `doxyspan commands` - list the active command table

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::classification_style;
use crate::classification::Classification;
use crate::config::Settings;
use crate::engine::EngineSnapshot;
use crate::registry::help_for;

/// Options for the commands command
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Print as JSON
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonGroup<'a> {
    matcher: &'static str,
    classifications: &'a [Classification],
    commands: Vec<JsonCommand<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonCommand<'a> {
    command: &'a str,
    signature: &'static str,
}

/// Execute the commands command
pub fn execute_list(options: ListOptions, settings: Settings) -> Result<()> {
    let config = EngineSnapshot::build(settings)?;
    let groups = config.table().groups();

    if options.json {
        let json: Vec<JsonGroup> = groups
            .iter()
            .map(|group| JsonGroup {
                matcher: group.matcher.name(),
                classifications: &group.classifications,
                commands: group
                    .keywords
                    .iter()
                    .map(|command| JsonCommand {
                        command,
                        signature: help_for(command).map(|h| h.signature).unwrap_or(""),
                    })
                    .collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for group in groups {
        let classifications: Vec<String> = group
            .classifications
            .iter()
            .map(|c| classification_style(*c).apply_to(c.as_str()).to_string())
            .collect();
        println!(
            "{} {}",
            style(group.matcher.name()).bold(),
            style(format!("[{}]", classifications.join(", "))).dim()
        );
        for command in &group.keywords {
            let signature = help_for(command).map(|h| h.signature).unwrap_or("");
            println!("  \\{command} {signature}");
        }
    }
    println!();
    println!(
        "{} {} commands in {} groups",
        style("✓").green(),
        config.table().len(),
        groups.len()
    );
    Ok(())
}
