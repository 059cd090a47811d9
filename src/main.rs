mod cleanup;
mod collector;
mod commands;
mod config;
mod diagnostics;
mod error;
mod grammar;
mod namer;
mod plan;
mod resolver;
mod rewriter;
mod scanner;
mod state;
mod stripper;
mod toolchain;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::PrepareOptions;

/// Environment variable that overrides the log filter.
const LOG_ENV: &str = "ARXIVATE_LOG";

#[derive(Parser)]
#[command(name = "arxivate", about = "Flatten a LaTeX project for arXiv submission", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show per-file debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove toolchain byproducts from a directory
    Clean {
        /// Directory to clean
        dir: PathBuf,
    },
    /// List the files that would be submitted and their flat names
    Plan {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
        /// Main .tex file
        main: PathBuf,
    },
    /// Collect, flatten, strip comments, compile and clean
    Prepare {
        /// Leave toolchain byproducts in the output directory
        #[arg(long)]
        keep_temp: bool,
        /// Main .tex file
        main: PathBuf,
        /// Skip running the typesetting toolchain
        #[arg(long)]
        no_compile: bool,
        /// Output directory [default: <main stem>_submission]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Install the stderr log subscriber. `ARXIVATE_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_err| return EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Clean { dir } => commands::clean(&dir),
        Commands::Plan { json, main } => commands::plan(&main, json),
        Commands::Prepare { keep_temp, main, no_compile, output } => {
            commands::prepare(&main, &PrepareOptions { keep_temp, no_compile, output })
        },
    };

    return match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}
