//! `doxyspan config` - create, show and validate settings files

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use console::style;

use crate::config::Settings;
use crate::registry::{default_groups, to_config_list};

/// Config subcommands
#[derive(Debug, Clone)]
pub enum ConfigSubcommand {
    /// Write default settings
    Init {
        /// Overwrite an existing file
        force: bool,
        /// List every command with its default classifications
        full: bool,
    },
    /// Print the effective settings
    Show,
    /// Check that a settings file yields a valid command table
    Validate { file: Option<PathBuf> },
}

/// Options for the config command
#[derive(Debug, Clone)]
pub struct ConfigOptions {
    /// Settings file; the user config location when absent
    pub path: Option<PathBuf>,
    pub subcommand: ConfigSubcommand,
}

/// Execute the config command
pub fn execute_config(options: ConfigOptions) -> Result<()> {
    let path = options
        .path
        .or_else(Settings::default_path)
        .ok_or_else(|| anyhow!("no configuration directory available; pass --settings"))?;

    match options.subcommand {
        ConfigSubcommand::Init { force, full } => {
            if path.exists() && !force {
                eprintln!("{} {} already exists", style("✗").red(), path.display());
                eprintln!("  Use --force to overwrite");
                std::process::exit(1);
            }
            let mut settings = Settings::default();
            if full {
                settings.commands = to_config_list(default_groups().groups());
            }
            settings.save(&path)?;
            println!("{} Settings written to {}", style("✓").green(), path.display());
        }

        ConfigSubcommand::Show => {
            let settings = if path.exists() {
                Settings::load(&path)?
            } else {
                println!("{} {} does not exist, showing defaults", style("•").dim(), path.display());
                Settings::default()
            };
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }

        ConfigSubcommand::Validate { file } => {
            let file = file.unwrap_or(path);
            let settings = match Settings::load(&file) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("{} {}: {}", style("✗").red(), file.display(), e);
                    std::process::exit(1);
                }
            };
            match settings.command_table() {
                Ok(table) => {
                    println!(
                        "{} {} is valid (version {}, {} commands in {} groups)",
                        style("✓").green(),
                        file.display(),
                        settings.version,
                        table.len(),
                        table.groups().len()
                    );
                }
                Err(e) => {
                    eprintln!("{} {}: {}", style("✗").red(), file.display(), e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
