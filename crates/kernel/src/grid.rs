use fluxgrid_common::{CELL_COUNT, CellCoord, GRID_HEIGHT, GRID_WIDTH};

use crate::error::FluidError;

/// One byte per cell, stored as `rows[y][x]`.
pub type Field = [[u8; GRID_WIDTH]; GRID_HEIGHT];

/// Flow byte meaning "nothing crosses this face".
pub const NEUTRAL_FLOW: u8 = 128;

/// Largest flow magnitude the biased byte encoding can carry in both directions.
pub const MAX_FLOW: u8 = 127;

/// Encode a signed face flow into its biased byte.
///
/// Positive values move mass from a cell toward its east/south neighbor,
/// negative values move it back. Magnitudes beyond [`MAX_FLOW`] are clamped.
pub fn encode_flow(flow: i16) -> u8 {
    let limit = i16::from(MAX_FLOW);
    (i16::from(NEUTRAL_FLOW) + flow.clamp(-limit, limit)) as u8
}

/// Decode a biased flow byte back into a signed transfer.
pub fn decode_flow(byte: u8) -> i16 {
    i16::from(byte) - i16::from(NEUTRAL_FLOW)
}

/// Fixed-size grid state: mass plus the east and south face flows of every cell.
///
/// The three fields are parallel, statically sized byte arrays. The flow
/// fields are scratch for a single step; only `mass` carries state from one
/// step to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluidGrid {
    pub(crate) mass: Field,
    pub(crate) flow_x: Field,
    pub(crate) flow_y: Field,
}

impl Default for FluidGrid {
    fn default() -> Self {
        Self {
            mass: [[0; GRID_WIDTH]; GRID_HEIGHT],
            flow_x: [[NEUTRAL_FLOW; GRID_WIDTH]; GRID_HEIGHT],
            flow_y: [[NEUTRAL_FLOW; GRID_WIDTH]; GRID_HEIGHT],
        }
    }
}

impl FluidGrid {
    /// Create an empty grid: zero mass, neutral flow everywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from a row-major mass buffer of exactly `CELL_COUNT` bytes.
    pub fn from_mass(mass: &[u8]) -> Result<Self, FluidError> {
        if mass.len() != CELL_COUNT {
            return Err(FluidError::InvalidConfiguration(format!(
                "seed buffer holds {} cells, grid needs {CELL_COUNT}",
                mass.len()
            )));
        }
        let mut grid = Self::default();
        for (row, chunk) in grid.mass.iter_mut().zip(mass.chunks_exact(GRID_WIDTH)) {
            row.copy_from_slice(chunk);
        }
        Ok(grid)
    }

    /// Create a grid whose mass is computed per cell.
    pub fn from_fn(mut mass_at: impl FnMut(CellCoord) -> u8) -> Self {
        let mut grid = Self::default();
        for coord in CellCoord::all() {
            grid.mass[coord.y][coord.x] = mass_at(coord);
        }
        grid
    }

    fn checked(x: usize, y: usize) -> Result<CellCoord, FluidError> {
        let coord = CellCoord::new(x, y);
        if coord.in_bounds() {
            Ok(coord)
        } else {
            Err(FluidError::OutOfBounds { x, y })
        }
    }

    /// Mass held by cell `(x, y)`.
    pub fn mass(&self, x: usize, y: usize) -> Result<u8, FluidError> {
        let c = Self::checked(x, y)?;
        Ok(self.mass[c.y][c.x])
    }

    /// Write mass into cell `(x, y)`, clamping to `[0, 255]`. Returns the stored value.
    pub fn set_mass(&mut self, x: usize, y: usize, value: i32) -> Result<u8, FluidError> {
        let c = Self::checked(x, y)?;
        let stored = value.clamp(0, i32::from(u8::MAX)) as u8;
        self.mass[c.y][c.x] = stored;
        Ok(stored)
    }

    /// Raw biased flow across the east face of `(x, y)` from the last step.
    pub fn flow_x(&self, x: usize, y: usize) -> Result<u8, FluidError> {
        let c = Self::checked(x, y)?;
        Ok(self.flow_x[c.y][c.x])
    }

    /// Raw biased flow across the south face of `(x, y)` from the last step.
    pub fn flow_y(&self, x: usize, y: usize) -> Result<u8, FluidError> {
        let c = Self::checked(x, y)?;
        Ok(self.flow_y[c.y][c.x])
    }

    /// Row-major view of the mass field, `i = y * GRID_WIDTH + x`.
    pub fn mass_field(&self) -> &[u8] {
        self.mass.as_flattened()
    }

    /// Sum of mass over every cell.
    pub fn total_mass(&self) -> u32 {
        self.mass_field().iter().map(|&m| u32::from(m)).sum()
    }
}
