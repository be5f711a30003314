use serde::{Deserialize, Serialize};

use crate::{CELL_COUNT, GRID_HEIGHT, GRID_WIDTH};

/// A cell coordinate in the fluid grid. `x` grows east, `y` grows south.
///
/// A `CellCoord` is not guaranteed to lie inside the grid; accessors that take
/// one check bounds and reject out-of-range values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether this coordinate addresses a cell inside the grid.
    pub fn in_bounds(self) -> bool {
        self.x < GRID_WIDTH && self.y < GRID_HEIGHT
    }

    /// Row-major linear index, or `None` outside the grid.
    pub fn index(self) -> Option<usize> {
        self.in_bounds().then(|| self.y * GRID_WIDTH + self.x)
    }

    /// Inverse of [`CellCoord::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self::new(index % GRID_WIDTH, index / GRID_WIDTH))
    }

    /// Neighbor across the east face, or `None` when that face is a wall.
    pub fn east(self) -> Option<Self> {
        let next = Self::new(self.x + 1, self.y);
        next.in_bounds().then_some(next)
    }

    /// Neighbor across the south face, or `None` when that face is a wall.
    pub fn south(self) -> Option<Self> {
        let next = Self::new(self.x, self.y + 1);
        next.in_bounds().then_some(next)
    }

    /// Iterate every in-grid coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = CellCoord> {
        (0..GRID_HEIGHT).flat_map(|y| (0..GRID_WIDTH).map(move |x| CellCoord::new(x, y)))
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
