//! Command descriptions for completion and hover
//!
//! A description is the help text split into plain text and the command
//! references embedded in it. Each reference is classified the way the
//! active configuration would classify it in a comment.

use serde::{Deserialize, Serialize};

use super::EngineSnapshot;
use crate::classification::Classification;
use crate::registry::help_for;

/// One piece of a structured description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DescriptionPart {
    Text(String),
    /// A command reference such as `\defgroup`
    Fragment {
        text: String,
        classification: Classification,
    },
}

impl DescriptionPart {
    pub fn text(&self) -> &str {
        match self {
            DescriptionPart::Text(text) => text,
            DescriptionPart::Fragment { text, .. } => text,
        }
    }
}

/// Signature and help of one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDescription {
    /// Command name without marker
    pub command: String,
    pub classification: Classification,
    pub signature: String,
    pub parts: Vec<DescriptionPart>,
}

impl CommandDescription {
    /// The help text without classification
    pub fn plain_text(&self) -> String {
        self.parts.iter().map(DescriptionPart::text).collect()
    }
}

/// One completion entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    /// Marker plus command, e.g. `@brief`
    pub label: String,
    pub description: CommandDescription,
}

impl EngineSnapshot {
    /// Description of a command of the active table
    pub fn describe(&self, command: &str) -> Option<CommandDescription> {
        let group = self.table().group_of(command)?;
        let (signature, text) = help_for(command)
            .map(|help| (help.signature, help.text))
            .unwrap_or(("", ""));
        Some(CommandDescription {
            command: command.to_string(),
            classification: group.command_classification(),
            signature: signature.to_string(),
            parts: self.describe_text(text),
        })
    }

    /// Every command in alphabetical order, labelled with `marker`
    pub fn completions(&self, marker: char) -> Vec<CompletionItem> {
        self.table()
            .commands()
            .into_iter()
            .filter_map(|command| self.describe(command))
            .map(|description| CompletionItem {
                label: format!("{marker}{}", description.command),
                description,
            })
            .collect()
    }

    fn describe_text(&self, text: &str) -> Vec<DescriptionPart> {
        let mut parts = Vec::new();
        let mut plain_start = 0;
        let mut cursor = 0;
        while let Some(found) = text[cursor..].find('\\') {
            let start = cursor + found;
            let Some(command) = self.referenced_command(&text[start + 1..]) else {
                cursor = start + 1;
                continue;
            };
            let end = start + 1 + command.len();
            if plain_start < start {
                parts.push(DescriptionPart::Text(text[plain_start..start].to_string()));
            }
            parts.push(DescriptionPart::Fragment {
                text: text[start..end].to_string(),
                classification: self.classify_reference(&text[start..end], command),
            });
            plain_start = end;
            cursor = end;
        }
        if plain_start < text.len() {
            parts.push(DescriptionPart::Text(text[plain_start..].to_string()));
        }
        parts
    }

    /// Longest command of the table at the start of `rest`
    fn referenced_command<'a>(&'a self, rest: &str) -> Option<&'a str> {
        self.table()
            .commands()
            .into_iter()
            .filter(|command| {
                if !rest.starts_with(*command) {
                    return false;
                }
                let ends_in_word = command.chars().last().is_some_and(is_word_char);
                !ends_in_word || !rest[command.len()..].chars().next().is_some_and(is_word_char)
            })
            .max_by_key(|command| command.len())
    }

    fn classify_reference(&self, reference: &str, command: &str) -> Classification {
        self.parser()
            .parse(reference)
            .first()
            .map(|group| *group.command())
            .filter(|token| token.start_offset == 0 && token.length == reference.len())
            .map(|token| token.classification)
            .or_else(|| self.table().group_of(command).map(|g| g.command_classification()))
            .unwrap_or(Classification::Command)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
