//! `doxyspan scan` - command usage statistics for a source tree

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use super::open_source;
use crate::config::Settings;
use crate::extract::Language;

/// Options for the scan command
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Root directory
    pub root: PathBuf,
    /// Glob patterns relative to the root; every supported file when empty
    pub include: Vec<String>,
    /// Number of commands to list
    pub top: usize,
    /// Print the report as JSON
    pub json: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include: Vec::new(),
            top: 20,
            json: false,
        }
    }
}

/// Aggregated scan result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub files: usize,
    pub failed: usize,
    pub comments: usize,
    /// Occurrences per command, without marker
    pub commands: BTreeMap<String, usize>,
}

impl ScanReport {
    fn merge(mut self, other: ScanReport) -> ScanReport {
        self.files += other.files;
        self.failed += other.failed;
        self.comments += other.comments;
        for (command, count) in other.commands {
            *self.commands.entry(command).or_default() += count;
        }
        self
    }

    /// Commands by descending count, then name
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .commands
            .iter()
            .map(|(command, count)| (command.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Supported source files under `root` matching any of `include`
pub fn collect_files(root: &Path, include: &[String]) -> Vec<PathBuf> {
    let patterns: Vec<Pattern> = include
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!("ignoring include pattern '{p}': {e}");
                None
            }
        })
        .collect();
    let match_opts = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| Language::from_path(e.path()).is_some())
        .filter(|e| {
            let relative = e.path().strip_prefix(root).unwrap_or(e.path());
            patterns.is_empty() || patterns.iter().any(|p| p.matches_path_with(relative, match_opts))
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Classify one file and count its commands
pub fn scan_file(path: &Path, settings: Settings) -> crate::Result<ScanReport> {
    let (mut engine, snapshot) = open_source(path, settings)?;
    let range = snapshot.full_range();
    let comments = engine.comment_spans(&snapshot, range)?.len();
    let mut commands = BTreeMap::new();
    for group in engine.fragment_groups(&snapshot, range)? {
        let token = snapshot.slice(group.command().range());
        if let Some(command) = token.strip_prefix(|c: char| c == '\\' || c == '@') {
            *commands.entry(command.to_string()).or_default() += 1;
        }
    }
    Ok(ScanReport {
        files: 1,
        failed: 0,
        comments,
        commands,
    })
}

/// Execute the scan command
pub fn execute_scan(options: ScanOptions, settings: Settings) -> Result<()> {
    // Fail early on invalid settings instead of once per file.
    settings.command_table()?;

    let files = collect_files(&options.root, &options.include);
    if files.is_empty() {
        eprintln!("{} No supported source files under {}", style("✗").red(), options.root.display());
        std::process::exit(1);
    }

    let progress = if options.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(files.len() as u64)
    };
    if let Ok(bar) = ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}") {
        progress.set_style(bar.progress_chars("=> "));
    }

    let report = files
        .par_iter()
        .map(|path| {
            progress.set_message(path.display().to_string());
            let report = scan_file(path, settings.clone()).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "failed to scan: {e}");
                ScanReport {
                    failed: 1,
                    ..ScanReport::default()
                }
            });
            progress.inc(1);
            report
        })
        .reduce(ScanReport::default, ScanReport::merge);
    progress.finish_and_clear();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} Scanned {} files ({} comment lines)",
        style("✓").green(),
        report.files,
        report.comments
    );
    if report.failed > 0 {
        println!("  {} {} files could not be classified", style("!").yellow(), report.failed);
    }
    for (command, count) in report.ranked().into_iter().take(options.top) {
        println!("  {:>7}  \\{}", count, command);
    }
    Ok(())
}
