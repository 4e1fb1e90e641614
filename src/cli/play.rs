//! Play command implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use super::output::{JsonPlayResult, format_play_text};
use super::{CliError, OutputFormat, seed_or_now};
use influence::{Coord, ScenarioConfig, Stencil, generate_board};

/// Arguments of the play command.
#[derive(Debug)]
pub(crate) struct PlayOptions {
    /// Scenario file.
    pub(crate) config: Option<PathBuf>,
    /// Board seed.
    pub(crate) seed: Option<u64>,
    /// Force knockout rules on.
    pub(crate) knockout: bool,
    /// Override the faction list.
    pub(crate) factions: Option<Vec<String>>,
    /// JSON file with a list of `[row, column]` moves.
    pub(crate) moves_file: Option<PathBuf>,
    /// Moves given on the command line, applied after the file's.
    pub(crate) moves: Vec<Coord>,
    /// Output format.
    pub(crate) format: OutputFormat,
}

/// Execute the play command.
///
/// Each move is a claim by whichever faction holds the turn, followed by
/// settling the board.
///
/// # Errors
///
/// Returns an error if the scenario or move list cannot be loaded or no
/// board can be generated.
pub(crate) fn execute(options: PlayOptions) -> Result<(), CliError> {
    let mut scenario = match &options.config {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    if options.knockout {
        scenario.knockout = true;
    }
    if let Some(factions) = options.factions {
        scenario.factions = factions;
    }
    scenario.validate()?;

    let mut moves = match &options.moves_file {
        Some(path) => read_moves(path)?,
        None => Vec::new(),
    };
    moves.extend(options.moves);

    let seed = seed_or_now(options.seed);
    let stencil = Arc::new(Stencil::cross()?);
    let mut engine = generate_board(&scenario.board, &scenario.engine_config(), &stencil, seed)?.engine;

    let mut accepted = 0;
    let mut rejected = 0;
    for position in moves {
        if engine.complete() {
            info!(%position, "play.move_after_completion");
            rejected += 1;
            continue;
        }
        if engine.claim(position, scenario.grow_by)? {
            accepted += 1;
        } else {
            warn!(%position, faction = engine.faction_index(), "play.move_rejected");
            rejected += 1;
        }
        engine.settle(scenario.max_shift_steps)?;
    }

    let snapshot = engine.snapshot();
    match options.format {
        OutputFormat::Text => print!("{}", format_play_text(seed, accepted, rejected, &snapshot)),
        OutputFormat::Json => {
            let result = JsonPlayResult {
                seed,
                accepted,
                rejected,
                state: &snapshot,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

fn read_moves(path: &Path) -> Result<Vec<Coord>, CliError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    let pairs: Vec<(i32, i32)> = serde_json::from_str(&contents)?;
    Ok(pairs.into_iter().map(Coord::from).collect())
}
