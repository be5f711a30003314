//! Shared types for the fluxgrid engine: grid dimensions and cell coordinates.
//!
//! # Invariants
//! - Grid dimensions are compile-time constants; nothing resizes the grid.
//! - Cells are linearized row-major: `i = y * GRID_WIDTH + x`, y grows downward.

mod types;

pub use types::CellCoord;

/// Number of columns in the simulation grid.
pub const GRID_WIDTH: usize = 50;

/// Number of rows in the simulation grid.
pub const GRID_HEIGHT: usize = 50;

/// Total number of cells in the simulation grid.
pub const CELL_COUNT: usize = GRID_WIDTH * GRID_HEIGHT;

pub fn crate_info() -> &'static str {
    "fluxgrid-common v0.1.0"
}
