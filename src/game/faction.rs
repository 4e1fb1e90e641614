//! Faction state management.

use serde::{Deserialize, Serialize};

/// Index of a faction in the engine's roster.
pub type FactionId = usize;

/// State for a single faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    /// Identity payload supplied by the caller (a name, a color, ...).
    pub info: String,
    /// Whether the faction is still playing. Only cleared under knockout.
    pub active: bool,
    /// Number of islands this faction currently owns.
    pub control: u32,
}

impl Faction {
    /// Create an active faction that controls nothing yet.
    #[must_use]
    pub fn new(info: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            active: true,
            control: 0,
        }
    }

    /// Whether this faction may take a turn, given the number of unowned islands.
    #[must_use]
    pub const fn can_move(&self, neutral_islands: usize) -> bool {
        self.active && (self.control > 0 || neutral_islands > 0)
    }

    /// Record one more owned island.
    pub fn gain(&mut self) {
        self.control = self.control.saturating_add(1);
    }

    /// Record the loss of an owned island.
    pub fn lose(&mut self) {
        self.control = self.control.saturating_sub(1);
    }

    /// Remove this faction from play.
    pub fn eliminate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faction_creation() {
        let faction = Faction::new("red");
        assert_eq!(faction.info, "red");
        assert!(faction.active);
        assert_eq!(faction.control, 0);
    }

    #[test]
    fn test_faction_control_bookkeeping() {
        let mut faction = Faction::new("red");
        faction.gain();
        faction.gain();
        faction.lose();
        assert_eq!(faction.control, 1);

        faction.lose();
        faction.lose();
        assert_eq!(faction.control, 0);
    }

    #[test]
    fn test_faction_can_move() {
        let mut faction = Faction::new("red");
        assert!(faction.can_move(3));
        assert!(!faction.can_move(0));

        faction.gain();
        assert!(faction.can_move(0));

        faction.eliminate();
        assert!(!faction.can_move(3));
    }
}
