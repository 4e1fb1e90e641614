//! Influence CLI - generate boards and play scripted games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use influence::Coord;

/// Influence - a territorial-control game on island grids
#[derive(Parser, Debug)]
#[command(name = "influence")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v warn, -vv info, -vvv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a playable island layout
    Generate {
        /// Random seed (default: from the clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Board height
        #[arg(long, default_value = "10")]
        rows: usize,

        /// Board width
        #[arg(long, default_value = "10")]
        columns: usize,

        /// Probability that a cell is water
        #[arg(short, long, default_value = "0.2")]
        emptiness: f64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Play a scripted list of moves on a generated board
    Play {
        /// Scenario file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed (default: from the clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Eliminate factions that lose every island
        #[arg(short, long)]
        knockout: bool,

        /// Faction names, comma separated
        #[arg(long, value_delimiter = ',')]
        factions: Option<Vec<String>>,

        /// JSON file holding a list of [row, column] moves
        #[arg(long)]
        moves: Option<PathBuf>,

        /// A single move as `row,column` (repeatable)
        #[arg(short = 'm', long = "move", value_parser = cli::parse_coord)]
        single_moves: Vec<Coord>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Generate many boards in parallel and report statistics
    Survey {
        /// Number of boards to generate (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each board)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Probability that a cell is water
        #[arg(short, long, default_value = "0.2")]
        emptiness: f64,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Generate {
            seed,
            rows,
            columns,
            emptiness,
            format,
        } => cli::generate::execute(seed, rows, columns, emptiness, format),

        Commands::Play {
            config,
            seed,
            knockout,
            factions,
            moves,
            single_moves,
            format,
        } => cli::play::execute(cli::play::PlayOptions {
            config,
            seed,
            knockout,
            factions,
            moves_file: moves,
            moves: single_moves,
            format,
        }),

        Commands::Survey {
            games,
            seed,
            emptiness,
            threads,
            progress,
            format,
        } => cli::survey::execute(games, seed, emptiness, threads, progress, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
