//! Generate command implementation.

use std::sync::Arc;

use super::output::{JsonLayout, format_layout_text};
use super::{CliError, OutputFormat, seed_or_now};
use influence::{BoardConfig, EngineConfig, Stencil, generate_board, is_valid_emptiness};

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if no playable layout could be drawn.
pub(crate) fn execute(
    seed: Option<u64>,
    rows: usize,
    columns: usize,
    emptiness: f64,
    format: OutputFormat,
) -> Result<(), CliError> {
    if !is_valid_emptiness(emptiness) {
        return Err(CliError::new(format!(
            "emptiness must be in [0, 1), got {emptiness}"
        )));
    }
    let seed = seed_or_now(seed);
    let board = BoardConfig {
        rows,
        columns,
        emptiness,
        ..BoardConfig::default()
    };
    let stencil = Arc::new(Stencil::cross()?);
    let generated = generate_board(&board, &EngineConfig::new(["a", "b"], false), &stencil, seed)?;

    match format {
        OutputFormat::Text => print!("{}", format_layout_text(seed, &generated)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonLayout::from_board(seed, &generated))?;
            println!("{json}");
        }
    }
    Ok(())
}
