//! Serializable views of the engine state.

use serde::Serialize;

use crate::game::{FactionId, InfluenceEngine};
use crate::grid::Coord;

/// One faction as seen from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactionSnapshot {
    /// Roster index.
    pub id: FactionId,
    /// Identity payload.
    pub info: String,
    /// Still in play.
    pub active: bool,
    /// Islands owned.
    pub control: u32,
}

/// One island as seen from outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IslandSnapshot {
    /// Board position.
    pub position: Coord,
    /// Current population.
    pub population: u32,
    /// Owning faction, if any.
    pub faction: Option<FactionId>,
    /// Number of friends.
    pub friends: usize,
}

/// Full engine state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    /// Board height.
    pub rows: usize,
    /// Board width.
    pub columns: usize,
    /// Faction whose turn it is.
    pub current: FactionId,
    /// Accepted claims.
    pub total_moves: u32,
    /// Balance steps executed.
    pub total_shift_steps: u32,
    /// Knockout rules in force.
    pub knockout: bool,
    /// At least one island is critical.
    pub critical: bool,
    /// The game has a winner.
    pub complete: bool,
    /// Roster in turn order.
    pub factions: Vec<FactionSnapshot>,
    /// Islands in row-major order.
    pub islands: Vec<IslandSnapshot>,
}

impl EngineSnapshot {
    pub(crate) fn capture(engine: &InfluenceEngine) -> Self {
        let factions = engine
            .factions()
            .iter()
            .enumerate()
            .map(|(id, faction)| FactionSnapshot {
                id,
                info: faction.info.clone(),
                active: faction.active,
                control: faction.control,
            })
            .collect();
        let islands = engine
            .islands()
            .map(|(position, island)| IslandSnapshot {
                position,
                population: island.population(),
                faction: island.faction(),
                friends: island.total_friends(),
            })
            .collect();

        Self {
            rows: engine.board().rows(),
            columns: engine.board().columns(),
            current: engine.faction_index(),
            total_moves: engine.total_moves(),
            total_shift_steps: engine.total_shift_steps(),
            knockout: engine.knockout(),
            critical: engine.critical(),
            complete: engine.complete(),
            factions,
            islands,
        }
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Board as text: one line per row, `.` for water, `population` followed
    /// by the owner's index (or `-` when unowned) for islands.
    #[must_use]
    pub fn render(&self) -> String {
        let mut cells = vec![vec![String::from("."); self.columns]; self.rows];
        for island in &self.islands {
            let owner = island
                .faction
                .map_or_else(|| String::from("-"), |id| id.to_string());
            if let (Ok(row), Ok(column)) = (
                usize::try_from(island.position.row),
                usize::try_from(island.position.column),
            ) && let Some(cell) = cells.get_mut(row).and_then(|line| line.get_mut(column))
            {
                *cell = format!("{}{owner}", island.population);
            }
        }
        let width = cells.iter().flatten().map(String::len).max().unwrap_or(1);
        cells
            .iter()
            .map(|line| {
                line.iter()
                    .map(|cell| format!("{cell:>width$}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
