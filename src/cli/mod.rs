//! Command-line interface for swmming

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::FlowUnits;

/// swmming - Assemble SWMM input files
///
/// Validate project descriptions written in TOML or JSON and turn them
/// into SWMM 5.2 `.inp` files.
#[derive(Parser, Debug)]
#[command(name = "swmming")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SWMMING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of parallel jobs (default: number of CPUs)
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble project descriptions into .inp files
    Assemble(AssembleArgs),

    /// Check a project for broken references and other problems
    Analyze(AnalyzeArgs),

    /// Show section counts and the digest of the assembled file
    Info(InfoArgs),

    /// Write a minimal .inp file or starter project description
    Template(TemplateArgs),

    /// Import GeoJSON features into a project description
    #[cfg(feature = "gis")]
    Import(ImportArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for the assemble command
#[derive(Parser, Debug, Clone)]
pub struct AssembleArgs {
    /// Project files, or directories searched for *.toml and *.json projects
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Output directory (default: configured output_dir, else current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Assemble even when the analysis reports errors
    #[arg(short, long)]
    pub force: bool,

    /// Overwrite existing files without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print the assembled text instead of writing files
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable pretty output
    Pretty,
    /// JSON output
    Json,
    /// TOML output
    Toml,
}

/// Arguments for the analyze command
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Project file to analyze
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Project file to describe
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Arguments for the template command
#[derive(Parser, Debug)]
pub struct TemplateArgs {
    /// Output file (default: standard output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Project title
    #[arg(long)]
    pub title: Option<String>,

    /// Flow units (CFS, GPM, MGD, CMS, LPS, MLD)
    #[arg(long)]
    pub flow_units: Option<FlowUnits>,

    /// Write a starter project description (TOML) instead of an .inp file
    #[arg(short, long)]
    pub project: bool,
}

/// Arguments for the import command
#[cfg(feature = "gis")]
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// GeoJSON files to import
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Project description to extend and write (default: project.toml)
    #[arg(short, long, default_value = "project.toml")]
    pub output: PathBuf,

    /// Overwrite the output instead of extending it
    #[arg(long)]
    pub replace: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Reset configuration to defaults
    Reset,
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_assemble() {
        let cli = Cli::try_parse_from([
            "swmming", "-v", "assemble", "a.toml", "models/", "-o", "out", "--force",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Assemble(args) => {
                assert_eq!(args.input.len(), 2);
                assert_eq!(args.output, Some(PathBuf::from("out")));
                assert!(args.force);
                assert!(!args.yes);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_template_flow_units() {
        let cli = Cli::try_parse_from(["swmming", "template", "--flow-units", "lps"]).unwrap();
        match cli.command {
            Commands::Template(args) => assert_eq!(args.flow_units, Some(FlowUnits::Lps)),
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Cli::try_parse_from(["swmming", "template", "--flow-units", "gallons"]).is_err());
    }

    #[test]
    fn test_stdout_conflicts_with_output() {
        assert!(Cli::try_parse_from(["swmming", "assemble", "a.toml", "--stdout", "-o", "x"]).is_err());
        assert!(Cli::try_parse_from(["swmming", "-v", "-q", "info", "a.toml"]).is_err());
    }
}
