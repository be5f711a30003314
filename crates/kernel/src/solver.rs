//! Flow solve: derive every face flow from the current mass field.
//!
//! This pass reads `mass` and writes only `flow_x` / `flow_y`, so all flows in
//! a step come from the same snapshot.

use fluxgrid_common::{GRID_HEIGHT, GRID_WIDTH};

use crate::config::FluidConfig;
use crate::grid::{FluidGrid, NEUTRAL_FLOW, encode_flow};

/// Biased flow byte for the face between a cell holding `a` and a neighbor holding `b`.
///
/// Mass only runs downhill, at most `|a - b| / spread_divisor` (truncated) and
/// never more than `max_exchange` per step.
pub(crate) fn face_flow(a: u8, b: u8, config: &FluidConfig) -> u8 {
    let d = i16::from(a) - i16::from(b);
    if d == 0 {
        return NEUTRAL_FLOW;
    }
    let moved = (d.abs() / i16::from(config.spread_divisor)).min(i16::from(config.max_exchange));
    encode_flow(moved * d.signum())
}

impl FluidGrid {
    /// Recompute `flow_x` and `flow_y` from scratch. Returns the number of
    /// faces carrying a non-neutral flow.
    pub(crate) fn solve_flows(&mut self, config: &FluidConfig) -> usize {
        let mut active = 0;

        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                let a = self.mass[y][x];

                let east = if x + 1 < GRID_WIDTH {
                    face_flow(a, self.mass[y][x + 1], config)
                } else {
                    NEUTRAL_FLOW
                };
                let south = if y + 1 < GRID_HEIGHT {
                    face_flow(a, self.mass[y + 1][x], config)
                } else {
                    NEUTRAL_FLOW
                };

                active += usize::from(east != NEUTRAL_FLOW) + usize::from(south != NEUTRAL_FLOW);
                self.flow_x[y][x] = east;
                self.flow_y[y][x] = south;
            }
        }

        active
    }
}
