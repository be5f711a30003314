//! Mass transport: apply the solved face flows to the mass field.
//!
//! Transfers are summed into a signed delta per cell first, then each cell is
//! clamped once, so the result does not depend on face visiting order.

use fluxgrid_common::{GRID_HEIGHT, GRID_WIDTH};

use crate::grid::{FluidGrid, decode_flow};

impl FluidGrid {
    /// Move mass along `flow_x` / `flow_y`. Returns the total mass carried
    /// across faces (each unit counted once per face it crosses).
    pub(crate) fn transport(&mut self) -> u32 {
        // four faces of at most 127 each per cell, well inside i16
        let mut delta = [[0i16; GRID_WIDTH]; GRID_HEIGHT];
        let mut carried = 0u32;

        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH - 1 {
                let east = decode_flow(self.flow_x[y][x]);
                if east != 0 {
                    delta[y][x] -= east;
                    delta[y][x + 1] += east;
                    carried += u32::from(east.unsigned_abs());
                }
            }
        }

        for y in 0..GRID_HEIGHT - 1 {
            for x in 0..GRID_WIDTH {
                let south = decode_flow(self.flow_y[y][x]);
                if south != 0 {
                    delta[y][x] -= south;
                    delta[y + 1][x] += south;
                    carried += u32::from(south.unsigned_abs());
                }
            }
        }

        for (mass_row, delta_row) in self.mass.iter_mut().zip(delta.iter()) {
            for (m, &d) in mass_row.iter_mut().zip(delta_row.iter()) {
                *m = (i16::from(*m) + d).clamp(0, i16::from(u8::MAX)) as u8;
            }
        }

        carried
    }
}
