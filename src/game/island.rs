//! Per-cell simulation state.

use std::sync::Arc;

use crate::error::{GridError, TopologyError};
use crate::game::{Faction, FactionId};
use crate::grid::{Coord, TypedGrid};
use crate::topology::{IslandLayout, Stencil};

/// One occupied cell: its population, its owner and its fixed friend list.
///
/// The owner is an index into the engine's faction roster, never a shared
/// handle. Friend lists are shared between duplicates because topology never
/// changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Island {
    population: u32,
    faction: Option<FactionId>,
    friends: Arc<[Coord]>,
}

impl Island {
    /// Create an empty, unowned island with the given friends.
    #[must_use]
    pub fn new(friends: Vec<Coord>) -> Self {
        Self {
            population: 0,
            faction: None,
            friends: friends.into(),
        }
    }

    /// Derive the island at `key` from a layout and a stencil.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NoNeighbors`] if the stencil yields no friend.
    pub fn derive(layout: &IslandLayout, stencil: &Stencil, key: Coord) -> Result<Self, TopologyError> {
        Ok(Self::new(stencil.friends_of(layout, key)?))
    }

    /// Number of people on this island.
    #[must_use]
    pub const fn population(&self) -> u32 {
        self.population
    }

    /// The faction that owns this island, if any.
    #[must_use]
    pub const fn faction(&self) -> Option<FactionId> {
        self.faction
    }

    /// Coordinates of this island's friends, in stencil order.
    #[must_use]
    pub fn friends(&self) -> &[Coord] {
        &self.friends
    }

    /// Number of friends.
    #[must_use]
    pub fn total_friends(&self) -> usize {
        self.friends.len()
    }

    /// Whether the population has reached the friend count.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.population as usize >= self.friends.len()
    }

    /// Add `immigrants` under `faction`, transferring ownership if needed.
    ///
    /// Returns the previous owner when ownership moved away from it. Knockout
    /// is left to the caller, which decides when eliminations are evaluated.
    pub(crate) fn grow(
        &mut self,
        immigrants: u32,
        faction: FactionId,
        roster: &mut [Faction],
    ) -> Option<FactionId> {
        self.population = self.population.saturating_add(immigrants);
        if self.faction == Some(faction) {
            return None;
        }
        let previous = self.faction.replace(faction);
        if let Some(owner) = previous.and_then(|id| roster.get_mut(id)) {
            owner.lose();
        }
        if let Some(owner) = roster.get_mut(faction) {
            owner.gain();
        }
        previous
    }

    /// Resolve this (pre-step, critical) island onto `tomorrow`.
    ///
    /// The copy at `key` loses one person per friend and is released if it
    /// empties; every friend on `tomorrow` gains one person under this
    /// island's owner. Reads come only from `self`, so islands resolved in
    /// any order produce the same result.
    pub(crate) fn spread(
        &self,
        key: Coord,
        tomorrow: &mut TypedGrid<Island>,
        roster: &mut [Faction],
    ) -> Result<(), GridError> {
        let Some(acting) = self.faction else {
            return Ok(());
        };
        let emigrants = u32::try_from(self.friends.len()).unwrap_or(u32::MAX);

        if let Some(island) = tomorrow.get_mut(key)? {
            island.population = island.population.saturating_sub(emigrants);
            if island.population == 0
                && let Some(owner) = island.faction.take().and_then(|id| roster.get_mut(id))
            {
                owner.lose();
            }
        }

        for &friend in self.friends.iter() {
            if let Some(island) = tomorrow.get_mut(friend)? {
                island.grow(1, acting, roster);
            }
        }
        Ok(())
    }
}
