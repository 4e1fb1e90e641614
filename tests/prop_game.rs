//! Property-based tests for engine mechanics.
//!
//! These tests verify conservation, bookkeeping and bounds properties on
//! random boards and random move sequences.
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_sign_loss)]

use std::sync::Arc;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use influence::{
    BoardConfig, Coord, EngineConfig, Grid, GridError, InfluenceEngine, Stencil, check_invariants,
    generate_board, generate_layout,
};

fn random_engine(seed: u64, knockout: bool, factions: usize) -> InfluenceEngine {
    let board = BoardConfig {
        rows: 6,
        columns: 6,
        emptiness: 0.15,
        max_attempts: 256,
    };
    let names: Vec<String> = (0..factions).map(|i| format!("f{i}")).collect();
    let config = EngineConfig::new(names, knockout);
    let stencil = Arc::new(Stencil::cross().unwrap());
    generate_board(&board, &config, &stencil, seed).unwrap().engine
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A single owner overflowing one island keeps every person: the center
    /// keeps the surplus and each friend gains one person under that owner.
    #[test]
    fn prop_single_owner_balance_conserves(seed in any::<u64>(), pick in 0usize..64, extra in 0u32..4) {
        let mut engine = random_engine(seed, false, 2);
        let positions: Vec<Coord> = engine.islands().map(|(c, _)| c).collect();
        let center = positions[pick % positions.len()];
        let friends = engine.island(center).unwrap().friends().to_vec();
        let amount = u32::try_from(friends.len()).unwrap() + extra;

        prop_assert_eq!(engine.faction_index(), 0);
        prop_assert!(engine.claim(center, amount).unwrap());
        prop_assert!(engine.critical());
        prop_assert_eq!(engine.controlling_factions(), vec![0]);
        let before = engine.total_population();
        prop_assert_eq!(before, u64::from(amount));

        prop_assert!(engine.balance().unwrap());
        prop_assert_eq!(engine.total_population(), before);
        prop_assert_eq!(engine.island(center).unwrap().population(), extra);
        for friend in friends {
            let island = engine.island(friend).unwrap();
            prop_assert_eq!(island.population(), 1);
            prop_assert_eq!(island.faction(), Some(0));
        }
        let violations = check_invariants(&engine);
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    /// Claims add exactly their amount, balance steps move people without
    /// creating or destroying any, and control counters always agree with
    /// the board.
    #[test]
    fn prop_random_play_keeps_invariants(
        seed in any::<u64>(),
        knockout in any::<bool>(),
        factions in 2usize..5,
        picks in prop::collection::vec((0usize..64, 1u32..4), 1..40),
    ) {
        let mut engine = random_engine(seed, knockout, factions);
        let positions: Vec<Coord> = engine.islands().map(|(c, _)| c).collect();

        for (pick, amount) in picks {
            if engine.complete() {
                break;
            }
            if engine.critical() {
                for _ in 0..64 {
                    let before = engine.total_population();
                    if !engine.balance().unwrap() {
                        break;
                    }
                    prop_assert_eq!(engine.total_population(), before);
                    let violations = check_invariants(&engine);
                    prop_assert!(violations.is_empty(), "{:?}", violations);
                }
                continue;
            }
            let before = engine.total_population();
            if engine.claim(positions[pick % positions.len()], amount).unwrap() {
                prop_assert_eq!(engine.total_population(), before + u64::from(amount));
            } else {
                prop_assert_eq!(engine.total_population(), before);
            }
            let violations = check_invariants(&engine);
            prop_assert!(violations.is_empty(), "{:?}", violations);
        }
        let owned: u32 = engine.ratings().iter().sum();
        prop_assert_eq!(owned as usize, engine.total_occupied());
    }

    /// An illegal claim never changes anything.
    #[test]
    fn prop_illegal_claim_is_noop(seed in any::<u64>(), row in -3i32..10, column in -3i32..10) {
        let mut engine = random_engine(seed, false, 2);
        let position = Coord::new(row, column);
        let legal = engine.island(position).is_some();
        prop_assume!(!legal);

        let before = engine.clone();
        prop_assert!(!engine.claim(position, 1).unwrap());
        prop_assert_eq!(engine, before);
    }

    /// Grid access succeeds exactly for in-bounds coordinates.
    #[test]
    fn prop_grid_bounds(rows in 1usize..8, columns in 1usize..8, row in -10i32..10, column in -10i32..10) {
        let mut grid: Grid<u8> = Grid::new(rows, columns).unwrap();
        let coord = Coord::new(row, column);
        let inside = row >= 0 && column >= 0 && (row as usize) < rows && (column as usize) < columns;

        prop_assert_eq!(grid.in_bounds(coord), inside);
        match grid.set(coord, 1) {
            Ok(previous) => {
                prop_assert!(inside);
                prop_assert_eq!(previous, None);
                prop_assert_eq!(grid.get(coord).unwrap(), Some(&1));
            }
            Err(err) => {
                prop_assert!(!inside);
                let is_out_of_bounds = matches!(err, GridError::OutOfBounds { .. });
                prop_assert!(is_out_of_bounds);
            }
        }
    }

    /// Generated layouts are frozen and have the requested shape.
    #[test]
    fn prop_layout_shape(seed in any::<u64>(), rows in 1usize..12, columns in 1usize..12, emptiness in 0.0f64..1.0) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = generate_layout(rows, columns, emptiness, &mut rng).unwrap();
        prop_assert!(layout.is_frozen());
        prop_assert_eq!(layout.rows(), rows);
        prop_assert_eq!(layout.columns(), columns);
        prop_assert!(layout.count_active() <= rows * columns);
    }
}
