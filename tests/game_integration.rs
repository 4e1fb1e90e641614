//! Multi-move integration tests for the influence engine.
//!
//! These tests drive complete games through the public API and check the
//! scoring, knockout and completion rules end to end.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use influence::{
    BoardConfig, Coord, EngineConfig, EngineError, GridError, InfluenceEngine, IslandLayout,
    Stencil, StencilEdge, TopologyError, TypedGrid, check_invariants, generate_board,
};

fn cross() -> Arc<Stencil> {
    Arc::new(Stencil::cross().unwrap())
}

fn full_3x3(factions: &[&str], knockout: bool) -> InfluenceEngine {
    let layout = IslandLayout::from_rows(&["###", "###", "###"]).unwrap();
    let config = EngineConfig::new(factions.iter().copied(), knockout);
    InfluenceEngine::new(&layout, cross(), &config).unwrap()
}

#[test]
fn test_two_regions_are_disconnected() {
    let layout = IslandLayout::from_rows(&["##..", "##..", "..##", "..##"]).unwrap();
    let config = EngineConfig::new(["a", "b"], false);
    assert_eq!(
        InfluenceEngine::new(&layout, cross(), &config),
        Err(EngineError::Disconnected {
            reached: 4,
            total: 8
        })
    );
}

#[test]
fn test_stencil_without_first_row_fails_to_freeze() {
    let mut stencil = Stencil::new(3, 3, Coord::new(1, 1)).unwrap();
    stencil.set(Coord::new(1, 0), true).unwrap();
    stencil.set(Coord::new(1, 2), true).unwrap();
    stencil.set(Coord::new(2, 1), true).unwrap();
    assert_eq!(
        stencil.freeze(),
        Err(TopologyError::InvalidStencil {
            edge: StencilEdge::FirstRow
        })
    );
    assert!(!stencil.is_frozen());
}

#[test]
fn test_typed_grid_rejects_foreign_kind() {
    let mut grid: TypedGrid<u32> = TypedGrid::new(2, 2).unwrap();
    assert!(matches!(
        grid.insert_value(Coord::new(0, 0), "seven"),
        Err(GridError::TypeMismatch { .. })
    ));
    assert!(grid.insert_boxed(Coord::new(0, 0), None).is_ok());
    assert!(grid.insert_value(Coord::new(0, 0), 7u32).is_ok());
    assert_eq!(grid.get(Coord::new(0, 0)).unwrap(), Some(&7));
}

#[test]
fn test_overflow_conserves_population() {
    let mut engine = full_3x3(&["a", "b"], false);
    let center = Coord::new(1, 1);
    assert!(engine.claim(center, 4).unwrap());
    assert!(engine.critical());
    assert_eq!(engine.total_population(), 4);

    assert!(engine.balance().unwrap());
    assert_eq!(engine.total_population(), 4);
    for friend in engine.island(center).unwrap().friends().to_vec() {
        assert_eq!(engine.island(friend).unwrap().population(), 1);
    }
    assert_eq!(engine.island(center).unwrap().population(), 0);
    assert!(check_invariants(&engine).is_empty());
}

#[test]
fn test_illegal_claim_is_idempotent() {
    let mut engine = full_3x3(&["a", "b"], false);
    engine.claim(Coord::new(0, 0), 1).unwrap();

    // (0, 0) belongs to a, and it is b's turn
    let before = engine.snapshot().to_json().unwrap();
    assert!(!engine.claim(Coord::new(0, 0), 1).unwrap());
    let once = engine.snapshot().to_json().unwrap();
    assert!(!engine.claim(Coord::new(0, 0), 1).unwrap());
    let twice = engine.snapshot().to_json().unwrap();

    assert_eq!(before, once);
    assert_eq!(once, twice);
}

#[test]
fn test_knockout_skips_eliminated_faction() {
    let mut engine = full_3x3(&["a", "b", "c"], true);

    assert!(engine.claim(Coord::new(0, 0), 1).unwrap());
    assert!(engine.claim(Coord::new(0, 1), 3).unwrap());
    engine.settle(16).unwrap();

    assert!(!engine.factions()[0].active);
    assert_eq!(engine.active_factions(), vec![1, 2]);
    assert_eq!(engine.defeated_factions(), vec![0]);
    assert_eq!(engine.faction_index(), 2);

    assert!(engine.claim(Coord::new(2, 2), 1).unwrap());
    assert_eq!(engine.faction_index(), 1);
    assert!(engine.claim(Coord::new(2, 0), 1).unwrap());
    assert_eq!(engine.faction_index(), 2);
    assert!(check_invariants(&engine).is_empty());
}

#[test]
fn test_two_cell_game_completes() {
    let layout = IslandLayout::from_rows(&["##"]).unwrap();
    // Each cell counts itself and the other as friends
    let stencil = Arc::new(Stencil::from_rows(&["###"], Coord::new(0, 1)).unwrap());
    let config = EngineConfig::new(["a", "b"], false);
    let mut engine = InfluenceEngine::new(&layout, stencil, &config).unwrap();

    assert!(engine.claim(Coord::new(0, 0), 2).unwrap());
    assert!(engine.balance().unwrap());
    // b owns nothing and nothing is neutral, so a keeps the turn
    assert_eq!(engine.faction_index(), 0);

    assert!(engine.claim(Coord::new(0, 1), 1).unwrap());
    assert_eq!(engine.total_moves(), 2);
    assert_eq!(engine.controlling_factions(), vec![0]);
    assert!(engine.complete());
    assert!(!engine.can_continue());

    // Nothing is accepted once the game is over
    assert!(!engine.claim(Coord::new(0, 0), 1).unwrap());
}

#[test]
fn test_generated_game_runs_to_completion() {
    let board = BoardConfig {
        rows: 5,
        columns: 5,
        emptiness: 0.1,
        max_attempts: 64,
    };
    let config = EngineConfig::new(["a", "b"], true);
    let mut engine = generate_board(&board, &config, &cross(), 11).unwrap().engine;
    let positions: Vec<Coord> = engine.islands().map(|(coord, _)| coord).collect();

    // Every faction plays the first island it may influence
    for _ in 0..2000 {
        if engine.complete() {
            break;
        }
        if engine.critical() {
            engine.settle(512).unwrap();
            continue;
        }
        let current = engine.faction_index();
        let target = positions
            .iter()
            .copied()
            .find(|&p| {
                engine
                    .island(p)
                    .is_some_and(|island| island.faction().is_none_or(|owner| owner == current))
            })
            .unwrap();
        assert!(engine.claim(target, 1).unwrap());
        assert!(check_invariants(&engine).is_empty());
    }

    let ratings = engine.ratings();
    if engine.complete() {
        assert_eq!(engine.total_controlling_factions(), 1);
    }
    assert_eq!(
        ratings.iter().map(|&r| r as usize).sum::<usize>(),
        engine.total_occupied()
    );
}
