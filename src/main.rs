//! swmming - Assemble SWMM input files
//!
//! Main entry point for the swmming CLI application.

use std::process::ExitCode;

use console::style;
use tracing_subscriber::EnvFilter;

use swmming::cli::{self, Cli, Commands};
use swmming::config::Config;
use swmming::error::Result;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Set up logging from the CLI flags and the configured level
fn setup_logging(cli: &Cli, config: &Config) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        config.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(config.logging.color)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    // A broken config file must stay fixable through `config reset/init`
    let config = match (&cli.command, Config::load(config_path)) {
        (_, Ok(config)) => config,
        (Commands::Config(_), Err(_)) => Config::default(),
        (_, Err(e)) => return Err(e),
    };

    setup_logging(&cli, &config);

    if !config.logging.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // Set number of parallel jobs
    if let Some(jobs) = cli.jobs.or(config.general.jobs) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    // Dispatch to appropriate command handler
    match &cli.command {
        Commands::Assemble(args) => cli::execute_assemble(args, &config),
        Commands::Analyze(args) => cli::execute_analyze(args),
        Commands::Info(args) => cli::execute_info(args),
        Commands::Template(args) => cli::execute_template(args, &config),
        #[cfg(feature = "gis")]
        Commands::Import(args) => cli::execute_import(args, &config),
        Commands::Config(args) => cli::execute_config(args, config_path),
    }
}
