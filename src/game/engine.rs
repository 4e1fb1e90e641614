//! The turn and state machine of an influence game.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EngineError, TopologyError};
use crate::game::{EngineSnapshot, Faction, FactionId, Island};
use crate::grid::{Coord, TypedGrid};
use crate::topology::{IslandLayout, Stencil};

/// Engine-level game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Faction identities in turn order (at least two).
    pub factions: Vec<String>,
    /// Whether factions that lose every island are eliminated.
    pub knockout: bool,
}

impl EngineConfig {
    /// Create a configuration from faction names and the knockout flag.
    #[must_use]
    pub fn new<S: Into<String>>(factions: impl IntoIterator<Item = S>, knockout: bool) -> Self {
        Self {
            factions: factions.into_iter().map(Into::into).collect(),
            knockout,
        }
    }
}

/// Complete state of an influence game.
///
/// The engine owns the island board and the faction roster. All mutation goes
/// through [`InfluenceEngine::claim`] and [`InfluenceEngine::balance`]; both
/// run to completion and leave the engine in a consistent state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluenceEngine {
    /// Islands by position; empty cells are water.
    board: TypedGrid<Island>,
    /// Neighbor pattern the board was derived from.
    stencil: Arc<Stencil>,
    /// Factions in turn order. Never grows or shrinks.
    factions: Vec<Faction>,
    /// Whether factions are eliminated once they own nothing.
    knockout: bool,
    /// Index of the faction whose turn it is.
    current: FactionId,
    /// Number of accepted claims.
    total_moves: u32,
    /// Number of balance steps executed.
    total_shift_steps: u32,
}

impl InfluenceEngine {
    /// Build a new game from a frozen layout and a frozen stencil.
    ///
    /// Every occupied layout cell becomes an empty, unowned island.
    ///
    /// # Errors
    ///
    /// - [`EngineError::TooFewFactions`] for fewer than two factions
    /// - [`TopologyError::NotFrozen`] if either input is still mutable
    /// - [`TopologyError::NoNeighbors`] if an island has no friend
    /// - [`EngineError::NoIslands`] / [`EngineError::Disconnected`] if the
    ///   islands do not form one connected group
    pub fn new(
        layout: &IslandLayout,
        stencil: Arc<Stencil>,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        if config.factions.len() < 2 {
            return Err(EngineError::TooFewFactions(config.factions.len()));
        }
        if !layout.is_frozen() {
            return Err(TopologyError::NotFrozen("island layout").into());
        }
        if !stencil.is_frozen() {
            return Err(TopologyError::NotFrozen("stencil").into());
        }

        let mut board = TypedGrid::new(layout.rows(), layout.columns())?;
        for key in layout.islands() {
            board.set(key, Island::derive(layout, &stencil, key)?)?;
        }
        check_connected(&board)?;

        let factions = config.factions.iter().map(Faction::new).collect();
        Ok(Self {
            board,
            stencil,
            factions,
            knockout: config.knockout,
            current: 0,
            total_moves: 0,
            total_shift_steps: 0,
        })
    }

    // ==================== MUTATORS ====================

    /// Grow the island at `position` by `amount` on behalf of the current faction.
    ///
    /// Illegal requests are ignored: a finished or critical game, a position
    /// without an island, or an island owned by another faction all leave the
    /// engine untouched and return `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoEligibleFaction`] if no faction can take the
    /// next turn.
    pub fn claim(&mut self, position: Coord, amount: u32) -> Result<bool, EngineError> {
        if !self.can_continue() || !self.may_influence(position) {
            debug!(%position, faction = self.current, "claim.rejected");
            return Ok(false);
        }

        let acting = self.current;
        // Claims reach only unowned or own islands; no other owner loses control.
        if let Some(island) = self.board.get_mut(position)? {
            island.grow(amount, acting, &mut self.factions);
        }
        self.total_moves = self.total_moves.saturating_add(1);
        debug!(%position, amount, faction = acting, moves = self.total_moves, "claim.applied");

        self.advance_turn()?;
        Ok(true)
    }

    /// Resolve every critical island at once.
    ///
    /// Reads the current board and writes a duplicate, which then replaces
    /// the board. Returns `Ok(false)` without touching anything when no
    /// island is critical.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoEligibleFaction`] if no faction can take the
    /// next turn.
    pub fn balance(&mut self) -> Result<bool, EngineError> {
        if !self.critical() {
            return Ok(false);
        }

        let held_before: Vec<u32> = self.factions.iter().map(|f| f.control).collect();
        let mut tomorrow = self.board.duplicate();
        let mut resolved = 0usize;
        for (key, island) in self.board.occupied() {
            if island.is_critical() {
                island.spread(key, &mut tomorrow, &mut self.factions)?;
                resolved += 1;
            }
        }
        self.board = tomorrow;
        self.total_shift_steps = self.total_shift_steps.saturating_add(1);

        if self.knockout {
            for (id, (faction, held)) in self.factions.iter_mut().zip(held_before).enumerate() {
                if faction.active && held > 0 && faction.control == 0 {
                    faction.eliminate();
                    info!(faction = id, info = %faction.info, "faction.knocked_out");
                }
            }
        }
        debug!(resolved, step = self.total_shift_steps, "balance.step");

        self.advance_turn()?;
        Ok(true)
    }

    /// Run [`InfluenceEngine::balance`] until nothing is critical or
    /// `max_steps` steps have run. Returns the number of steps taken.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`InfluenceEngine::balance`].
    pub fn settle(&mut self, max_steps: u32) -> Result<u32, EngineError> {
        let mut steps = 0;
        while steps < max_steps && self.balance()? {
            steps += 1;
        }
        if self.critical() {
            debug!(steps, "settle.step_limit_reached");
        }
        Ok(steps)
    }

    fn may_influence(&self, position: Coord) -> bool {
        match self.board.get(position) {
            Ok(Some(island)) => island.faction().is_none_or(|owner| owner == self.current),
            _ => false,
        }
    }

    /// Hand the turn to the next faction able to move.
    ///
    /// Every other faction is tried in order, then the current one. Does
    /// nothing while the game is complete or critical.
    fn advance_turn(&mut self) -> Result<(), EngineError> {
        if !self.can_continue() {
            if self.complete() {
                info!(
                    winner = self.current,
                    moves = self.total_moves,
                    shifts = self.total_shift_steps,
                    "game.complete"
                );
            }
            return Ok(());
        }

        let start = self.current;
        let count = self.factions.len();
        let neutral = self.total_neutral();
        for step in 1..=count {
            let candidate = (start + step) % count;
            if self.factions[candidate].can_move(neutral) {
                self.current = candidate;
                return Ok(());
            }
        }
        Err(EngineError::NoEligibleFaction { start })
    }

    // ==================== QUERIES ====================

    /// The island board.
    #[must_use]
    pub fn board(&self) -> &TypedGrid<Island> {
        &self.board
    }

    /// The island at `position`, if there is one.
    #[must_use]
    pub fn island(&self, position: Coord) -> Option<&Island> {
        self.board.get(position).ok().flatten()
    }

    /// Iterate over islands in row-major order.
    pub fn islands(&self) -> impl Iterator<Item = (Coord, &Island)> + '_ {
        self.board.occupied()
    }

    /// The neighbor pattern this board was built with.
    #[must_use]
    pub fn stencil(&self) -> &Arc<Stencil> {
        &self.stencil
    }

    /// The faction roster in turn order.
    #[must_use]
    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    /// Whether knockout rules are in force.
    #[must_use]
    pub const fn knockout(&self) -> bool {
        self.knockout
    }

    /// Index of the faction whose turn it is.
    #[must_use]
    pub const fn faction_index(&self) -> FactionId {
        self.current
    }

    /// The faction whose turn it is.
    #[must_use]
    pub fn current_faction(&self) -> &Faction {
        &self.factions[self.current]
    }

    /// Number of accepted claims so far.
    #[must_use]
    pub const fn total_moves(&self) -> u32 {
        self.total_moves
    }

    /// Number of balance steps executed so far.
    #[must_use]
    pub const fn total_shift_steps(&self) -> u32 {
        self.total_shift_steps
    }

    /// At least one island has reached its friend count.
    #[must_use]
    pub fn critical(&self) -> bool {
        self.islands().any(|(_, island)| island.is_critical())
    }

    /// Every faction has had a move and exactly one faction owns islands.
    #[must_use]
    pub fn complete(&self) -> bool {
        self.total_moves as usize >= self.factions.len() && self.total_controlling_factions() == 1
    }

    /// Claims are accepted only when the game is neither complete nor critical.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        !(self.complete() || self.critical())
    }

    /// Whether the current faction is able to influence any island.
    #[must_use]
    pub fn can_move(&self) -> bool {
        self.current_faction().can_move(self.total_neutral())
    }

    /// Indices of factions still in play.
    #[must_use]
    pub fn active_factions(&self) -> Vec<FactionId> {
        self.factions_where(|f| f.active)
    }

    /// Indices of eliminated factions.
    #[must_use]
    pub fn defeated_factions(&self) -> Vec<FactionId> {
        self.factions_where(|f| !f.active)
    }

    /// Indices of factions that own at least one island.
    #[must_use]
    pub fn controlling_factions(&self) -> Vec<FactionId> {
        self.factions_where(|f| f.control > 0)
    }

    /// Number of factions still in play.
    #[must_use]
    pub fn total_active_factions(&self) -> usize {
        self.factions.iter().filter(|f| f.active).count()
    }

    /// Number of factions that own at least one island.
    #[must_use]
    pub fn total_controlling_factions(&self) -> usize {
        self.factions.iter().filter(|f| f.control > 0).count()
    }

    /// Islands owned by each faction, in faction order.
    #[must_use]
    pub fn ratings(&self) -> Vec<u32> {
        self.factions.iter().map(|f| f.control).collect()
    }

    /// Number of islands on the board.
    #[must_use]
    pub fn total_islands(&self) -> usize {
        self.board.occupied_count()
    }

    /// Number of islands without an owner.
    #[must_use]
    pub fn total_neutral(&self) -> usize {
        self.islands()
            .filter(|(_, island)| island.faction().is_none())
            .count()
    }

    /// Number of islands with an owner.
    #[must_use]
    pub fn total_occupied(&self) -> usize {
        self.total_islands() - self.total_neutral()
    }

    /// Sum of every island's population.
    #[must_use]
    pub fn total_population(&self) -> u64 {
        self.islands()
            .map(|(_, island)| u64::from(island.population()))
            .sum()
    }

    /// Capture the full state as a serializable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(self)
    }

    fn factions_where(&self, keep: impl Fn(&Faction) -> bool) -> Vec<FactionId> {
        self.factions
            .iter()
            .enumerate()
            .filter(|(_, faction)| keep(faction))
            .map(|(id, _)| id)
            .collect()
    }
}

/// Breadth-first walk over the friend relation from the first island.
fn check_connected(board: &TypedGrid<Island>) -> Result<(), EngineError> {
    let total = board.occupied_count();
    let Some((origin, _)) = board.occupied().next() else {
        return Err(EngineError::NoIslands);
    };

    let mut reached = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);
    while let Some(position) = queue.pop_front() {
        let Some(island) = board.get(position)? else {
            continue;
        };
        for &friend in island.friends() {
            if reached.insert(friend) {
                queue.push_back(friend);
            }
        }
    }

    if reached.len() == total {
        Ok(())
    } else {
        Err(EngineError::Disconnected {
            reached: reached.len(),
            total,
        })
    }
}
