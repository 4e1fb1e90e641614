//! Output formatting utilities for CLI.

// Survey averages are computed from integer counters
#![allow(clippy::cast_precision_loss)]

use std::fmt::Write as _;

use influence::{EngineSnapshot, GeneratedBoard, MapGenError};
use serde::Serialize;

/// JSON-serializable generated layout.
#[derive(Debug, Serialize)]
pub(super) struct JsonLayout {
    /// Seed the layout was drawn from.
    pub(super) seed: u64,
    /// Layouts drawn before one was accepted.
    pub(super) attempts: u32,
    /// Board height.
    pub(super) rows: usize,
    /// Board width.
    pub(super) columns: usize,
    /// Number of islands.
    pub(super) islands: usize,
    /// One string per row, `#` for island and `.` for water.
    pub(super) layout: Vec<String>,
}

impl JsonLayout {
    /// Create from a generated board.
    pub(super) fn from_board(seed: u64, board: &GeneratedBoard) -> Self {
        Self {
            seed,
            attempts: board.attempts,
            rows: board.layout.rows(),
            columns: board.layout.columns(),
            islands: board.engine.total_islands(),
            layout: board.layout.to_string().lines().map(String::from).collect(),
        }
    }
}

/// Format a generated layout as human-readable text.
pub(super) fn format_layout_text(seed: u64, board: &GeneratedBoard) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Layout (seed: {seed}, attempts: {})",
        board.attempts
    );
    let _ = writeln!(
        output,
        "  {}x{} board, {} islands\n",
        board.layout.rows(),
        board.layout.columns(),
        board.engine.total_islands()
    );
    let _ = writeln!(output, "{}", board.layout);
    output
}

/// JSON-serializable result of the `play` command.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayResult<'a> {
    /// Seed the board was drawn from.
    pub(super) seed: u64,
    /// Moves accepted by the engine.
    pub(super) accepted: usize,
    /// Moves ignored as illegal.
    pub(super) rejected: usize,
    /// Final engine state.
    pub(super) state: &'a EngineSnapshot,
}

/// Format the outcome of a played game as human-readable text.
pub(super) fn format_play_text(
    seed: u64,
    accepted: usize,
    rejected: usize,
    snapshot: &EngineSnapshot,
) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Game (seed: {seed})");
    let _ = writeln!(
        output,
        "  Moves: {accepted} accepted, {rejected} rejected, {} balance steps",
        snapshot.total_shift_steps
    );
    let status = if snapshot.complete {
        "complete"
    } else if snapshot.critical {
        "critical"
    } else {
        "in progress"
    };
    let _ = writeln!(output, "  Status: {status}\n");
    let _ = writeln!(output, "{}\n", snapshot.render());

    let _ = writeln!(output, "Ratings:");
    for faction in &snapshot.factions {
        let marker = if faction.id == snapshot.current && !snapshot.complete {
            " <- to move"
        } else {
            ""
        };
        let state = if faction.active { "" } else { " [knocked out]" };
        let _ = writeln!(
            output,
            "  {} ({}): {} islands{state}{marker}",
            faction.id, faction.info, faction.control
        );
    }
    output
}

/// Aggregated statistics of a board survey.
#[derive(Debug, Clone, Default)]
pub(super) struct SurveyStats {
    /// Seeds tried.
    pub(super) boards: u64,
    /// Seeds that produced a playable board.
    pub(super) playable: u64,
    /// Seeds that exhausted their attempts.
    pub(super) failures: u64,
    /// Attempts summed over playable boards.
    total_attempts: u64,
    /// Most attempts any playable board needed.
    pub(super) max_attempts: u32,
    /// Islands summed over playable boards.
    total_islands: u64,
    /// Friend counts summed over every island of every playable board.
    total_friends: u64,
}

impl SurveyStats {
    /// Add one generation outcome.
    pub(super) fn add_result(&mut self, result: &Result<GeneratedBoard, MapGenError>) {
        self.boards += 1;
        match result {
            Ok(board) => {
                self.playable += 1;
                self.total_attempts += u64::from(board.attempts);
                self.max_attempts = self.max_attempts.max(board.attempts);
                self.total_islands += board.engine.total_islands() as u64;
                self.total_friends += board
                    .engine
                    .islands()
                    .map(|(_, island)| island.total_friends() as u64)
                    .sum::<u64>();
            }
            Err(_) => self.failures += 1,
        }
    }

    /// Merge another stats instance into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.boards += other.boards;
        self.playable += other.playable;
        self.failures += other.failures;
        self.total_attempts += other.total_attempts;
        self.max_attempts = self.max_attempts.max(other.max_attempts);
        self.total_islands += other.total_islands;
        self.total_friends += other.total_friends;
    }

    /// Average attempts per playable board.
    pub(super) fn avg_attempts(&self) -> f64 {
        ratio(self.total_attempts, self.playable)
    }

    /// Average islands per playable board.
    pub(super) fn avg_islands(&self) -> f64 {
        ratio(self.total_islands, self.playable)
    }

    /// Average friends per island.
    pub(super) fn avg_friends(&self) -> f64 {
        ratio(self.total_friends, self.total_islands)
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// JSON-serializable survey result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSurveyResult {
    /// Seeds tried.
    pub(super) boards: u64,
    /// Seeds that produced a playable board.
    pub(super) playable: u64,
    /// Seeds that exhausted their attempts.
    pub(super) failures: u64,
    /// Average attempts per playable board.
    pub(super) avg_attempts: f64,
    /// Most attempts any playable board needed.
    pub(super) max_attempts: u32,
    /// Average islands per playable board.
    pub(super) avg_islands: f64,
    /// Average friends per island.
    pub(super) avg_friends: f64,
}

impl JsonSurveyResult {
    /// Create from survey statistics.
    pub(super) fn from_stats(stats: &SurveyStats) -> Self {
        Self {
            boards: stats.boards,
            playable: stats.playable,
            failures: stats.failures,
            avg_attempts: stats.avg_attempts(),
            max_attempts: stats.max_attempts,
            avg_islands: stats.avg_islands(),
            avg_friends: stats.avg_friends(),
        }
    }
}

/// Format survey statistics as human-readable text.
pub(super) fn format_survey_text(stats: &SurveyStats, emptiness: f64) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Survey Results ({} boards, emptiness {emptiness})",
        stats.boards
    );
    output.push_str("========================================\n\n");
    let _ = writeln!(
        output,
        "  Playable: {} ({:.1}%)",
        stats.playable,
        ratio(stats.playable, stats.boards) * 100.0
    );
    let _ = writeln!(output, "  Failures: {}", stats.failures);
    let _ = writeln!(
        output,
        "  Attempts: {:.2} avg, {} max",
        stats.avg_attempts(),
        stats.max_attempts
    );
    let _ = writeln!(output, "  Islands:  {:.1} avg", stats.avg_islands());
    let _ = writeln!(output, "  Friends:  {:.2} avg per island", stats.avg_friends());
    output
}
