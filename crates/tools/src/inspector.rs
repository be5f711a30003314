use fluxgrid_common::CellCoord;
use fluxgrid_kernel::{FluidError, Simulation, decode_flow};
use serde::Serialize;

/// Field inspector for developer tooling.
///
/// Provides read-only queries against the simulation for debugging,
/// profiling, and CLI output.
pub struct FieldInspector;

impl FieldInspector {
    /// Produce a summary of the mass field.
    pub fn summary(sim: &Simulation) -> FieldSummary {
        let field = sim.mass_field();
        FieldSummary {
            tick: sim.tick(),
            total_mass: sim.total_mass(),
            min_mass: field.iter().copied().min().unwrap_or(0),
            max_mass: field.iter().copied().max().unwrap_or(0),
            wet_cells: field.iter().filter(|&&m| m > 0).count(),
            state_hash: sim.state_hash(),
        }
    }

    /// Mass and decoded face flows of one cell.
    pub fn inspect_cell(sim: &Simulation, coord: CellCoord) -> Result<CellInfo, FluidError> {
        let grid = sim.grid();
        Ok(CellInfo {
            coord,
            mass: grid.mass(coord.x, coord.y)?,
            east: decode_flow(grid.flow_x(coord.x, coord.y)?),
            south: decode_flow(grid.flow_y(coord.x, coord.y)?),
        })
    }

    /// Coordinates of every cell holding any mass, in row-major order.
    pub fn wet_cells(sim: &Simulation) -> Vec<CellCoord> {
        sim.mass_field()
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m > 0)
            .filter_map(|(i, _)| CellCoord::from_index(i))
            .collect()
    }
}

/// Summary of the mass field for the inspector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    pub tick: u64,
    pub total_mass: u32,
    pub min_mass: u8,
    pub max_mass: u8,
    pub wet_cells: usize,
    pub state_hash: u64,
}

impl std::fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Field: tick={} total={} min={} max={} wet_cells={} hash={:#018x}",
            self.tick,
            self.total_mass,
            self.min_mass,
            self.max_mass,
            self.wet_cells,
            self.state_hash
        )
    }
}

/// Detailed info about a single cell. Flows are signed: positive moves mass
/// east (or south) out of this cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellInfo {
    pub coord: CellCoord,
    pub mass: u8,
    pub east: i16,
    pub south: i16,
}

impl std::fmt::Display for CellInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cell {} mass={} east={:+} south={:+}",
            self.coord, self.mass, self.east, self.south
        )
    }
}
