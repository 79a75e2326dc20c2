//! depworld CLI - Consolidate resolved build dependencies into a world map
//!
//! Reads an input bundle (target, package and file definitions plus the
//! package and file edges between them) and prints the consolidated
//! dependency world as records or as a tree.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use config::DepworldConfig;
use depworld_core::explorer::TreeOptions;
use output::{OutputConfig, OutputFormat};

/// Consolidate resolved build dependencies into a single world map.
#[derive(Parser)]
#[command(name = "depworld")]
#[command(author, version)]
#[command(about = "Consolidate resolved build dependencies into a world map")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  depworld build bundle.json                 Print world records as a table
  depworld build bundle.json --format json   Emit records as JSON
  depworld build bundle.json --summary       Show what was kept and dropped
  depworld tree bundle.json -t net6.0        Show one target as a tree")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Emit minified JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    /// Never truncate or wrap table columns
    #[arg(long, global = true)]
    no_truncate: bool,

    /// Table width in columns (defaults to the terminal width)
    #[arg(long, global = true)]
    width: Option<usize>,
}

impl Cli {
    /// Rendering settings shared by every command.
    fn output_config(&self, format: OutputFormat, config: &DepworldConfig) -> OutputConfig {
        let mut output = OutputConfig::auto_detect(format, config.use_color());
        if self.compact {
            output = output.compact();
        }
        if self.no_truncate {
            output = output.without_truncation();
        }
        if let Some(width) = self.width {
            output = output.with_width(width);
        }
        output
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidate an input bundle and print one record per world entry
    #[command(visible_alias = "b")]
    Build {
        /// Input bundle JSON file ("-" reads stdin)
        input: PathBuf,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the consolidation report instead of the records
        #[arg(short, long)]
        summary: bool,
    },

    /// Show the consolidated world as a dependency tree per target
    #[command(visible_alias = "t")]
    Tree {
        /// Input bundle JSON file ("-" reads stdin)
        input: PathBuf,

        /// Only show this target (case-insensitive)
        #[arg(short, long)]
        target: Option<String>,

        /// Maximum depth below each target
        #[arg(short, long)]
        depth: Option<usize>,

        /// Hide dependency ids without a world entry
        #[arg(long)]
        hide_unresolved: bool,

        /// Draw the tree with ASCII characters only
        #[arg(long)]
        ascii: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = DepworldConfig::load(Path::new("."));

    // CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let output_config = cli.output_config(format, &config);
    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        println!();
        return Ok(());
    };

    match command {
        Commands::Build {
            input,
            output,
            summary,
        } => {
            let output_config = output_config.with_ascii(config.tree.ascii);
            commands::build::run(&input, output.as_deref(), summary, output_config)
        }
        Commands::Tree {
            input,
            target,
            depth,
            hide_unresolved,
            ascii,
        } => {
            let options = TreeOptions {
                max_depth: depth.or(config.tree.max_depth),
                hide_unresolved: hide_unresolved || !config.tree.show_unresolved,
            };
            let output_config = output_config.with_ascii(ascii || config.tree.ascii);
            commands::tree::run(&input, target.as_deref(), options, output_config)
        }
    }
}
