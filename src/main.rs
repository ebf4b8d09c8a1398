#![forbid(unsafe_code)]
//! doxyspan command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use doxyspan::commands::{
    execute_config, execute_highlight, execute_hover, execute_list, execute_scan, load_settings,
    ConfigOptions, ConfigSubcommand, HighlightOptions, HoverOptions, ListOptions, Position,
    ScanOptions,
};

#[derive(Parser)]
#[command(name = "doxyspan")]
#[command(about = "Classify Doxygen/Javadoc documentation comments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to the user config directory)
    #[arg(short, long, global = true, env = "DOXYSPAN_SETTINGS")]
    settings: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the classified documentation comments of a file
    Highlight {
        /// Source file
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Describe the command at a position
    Hover {
        /// Source file
        file: PathBuf,

        /// One-based LINE:COLUMN
        position: Position,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the active commands with their classifications
    Commands {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count command usage across a source tree
    Scan {
        /// Root directory
        #[arg(default_value = ".")]
        root: PathBuf,

        /// File patterns to include (can specify multiple)
        #[arg(long)]
        include: Vec<String>,

        /// Number of commands to list
        #[arg(long, default_value_t = 20)]
        top: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write default settings
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,

        /// Include every command with its default classifications
        #[arg(long)]
        full: bool,
    },

    /// Print the effective settings
    Show,

    /// Validate a settings file
    Validate {
        /// Settings file to validate (defaults to --settings)
        file: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("doxyspan=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Highlight { file, json } => {
            let settings = load_settings(cli.settings.as_deref())?;
            execute_highlight(HighlightOptions { file, json }, settings)?;
        }

        Commands::Hover { file, position, json } => {
            let settings = load_settings(cli.settings.as_deref())?;
            execute_hover(HoverOptions { file, position, json }, settings)?;
        }

        Commands::Commands { json } => {
            let settings = load_settings(cli.settings.as_deref())?;
            execute_list(ListOptions { json }, settings)?;
        }

        Commands::Scan { root, include, top, json } => {
            let settings = load_settings(cli.settings.as_deref())?;
            let options = ScanOptions {
                root,
                include,
                top,
                json,
            };
            execute_scan(options, settings)?;
        }

        Commands::Config { cmd } => {
            let subcommand = match cmd {
                ConfigCommands::Init { force, full } => ConfigSubcommand::Init { force, full },
                ConfigCommands::Show => ConfigSubcommand::Show,
                ConfigCommands::Validate { file } => ConfigSubcommand::Validate { file },
            };
            execute_config(ConfigOptions {
                path: cli.settings,
                subcommand,
            })?;
        }
    }

    Ok(())
}
