//! Board topology.
//!
//! An [`IslandLayout`] marks which cells exist; a [`Stencil`] says which
//! relative offsets count as neighbors ("friends"). Both are frozen before an
//! engine consumes them, and the friend lists derived from them never change.

mod layout;
mod mapgen;
mod stencil;

pub use layout::IslandLayout;
pub use mapgen::{GeneratedBoard, MapGenError, generate_board, generate_layout, is_valid_emptiness};
pub use stencil::Stencil;
