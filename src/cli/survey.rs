//! Survey command implementation.

use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use super::output::{JsonSurveyResult, SurveyStats, format_survey_text};
use super::{CliError, OutputFormat, seed_or_now};
use influence::{BoardConfig, EngineConfig, Stencil, generate_board, is_valid_emptiness};

/// Execute the survey command.
///
/// # Errors
///
/// Returns an error if the parameters are invalid or output fails.
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    emptiness: f64,
    threads: Option<usize>,
    progress: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    if !is_valid_emptiness(emptiness) {
        return Err(CliError::new(format!(
            "emptiness must be in [0, 1), got {emptiness}"
        )));
    }

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_now(seed);
    let board = BoardConfig {
        emptiness,
        ..BoardConfig::default()
    };
    let engine_config = EngineConfig::new(["a", "b"], false);
    let stencil = Arc::new(Stencil::cross()?);

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} boards ({per_sec})")
            .map_err(|e| CliError::new(format!("invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread accumulates its own stats; merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(SurveyStats::default, |mut local, i| {
            let result = generate_board(&board, &engine_config, &stencil, base_seed.wrapping_add(i));
            local.add_result(&result);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(SurveyStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }
    let duration = start.elapsed();

    match format {
        OutputFormat::Text => {
            print!("{}", format_survey_text(&stats, emptiness));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSurveyResult::from_stats(&stats))?;
            println!("{json}");
        }
    }
    Ok(())
}
