use fluxgrid_common::{CellCoord, GRID_HEIGHT, GRID_WIDTH};
use serde::{Deserialize, Serialize};

use crate::config::FluidConfig;
use crate::error::FluidError;
use crate::simulation::Simulation;

/// Named initial mass distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeedPattern {
    /// Zero mass everywhere.
    #[default]
    Empty,
    /// Every cell holds the same mass.
    Uniform(u8),
    /// One cell holds `mass`, all others are empty.
    Spike { at: CellCoord, mass: u8 },
    /// A `size`×`size` square starting at `origin`, clipped to the grid.
    Block {
        origin: CellCoord,
        size: usize,
        mass: u8,
    },
    /// Only the top-left corner cell holds mass.
    Corner { mass: u8 },
}

impl SeedPattern {
    /// Full spike in the middle of the grid.
    pub fn centered_spike() -> Self {
        SeedPattern::Spike {
            at: CellCoord::new(GRID_WIDTH / 2, GRID_HEIGHT / 2),
            mass: u8::MAX,
        }
    }

    /// Initial mass of `coord` under this pattern.
    pub fn mass_at(&self, coord: CellCoord) -> u8 {
        match *self {
            SeedPattern::Empty => 0,
            SeedPattern::Uniform(mass) => mass,
            SeedPattern::Spike { at, mass } => {
                if coord == at {
                    mass
                } else {
                    0
                }
            }
            SeedPattern::Block { origin, size, mass } => {
                let inside = (origin.x..origin.x.saturating_add(size)).contains(&coord.x)
                    && (origin.y..origin.y.saturating_add(size)).contains(&coord.y);
                if inside { mass } else { 0 }
            }
            SeedPattern::Corner { mass } => {
                if coord == CellCoord::new(0, 0) {
                    mass
                } else {
                    0
                }
            }
        }
    }

    /// Build a simulation seeded with this pattern.
    pub fn build(&self, config: FluidConfig) -> Result<Simulation, FluidError> {
        Simulation::from_fn(config, |coord| self.mass_at(coord))
    }
}
