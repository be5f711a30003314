use fluxgrid_common::CellCoord;
use serde::{Deserialize, Serialize};

use crate::config::FluidConfig;
use crate::error::FluidError;
use crate::grid::FluidGrid;

/// An event record produced by every mutation when event recording is enabled.
///
/// Replaying the log over the same starting mass field reproduces the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FluidEvent {
    /// A cell's mass was written from outside the step (seeding, pouring, draining).
    MassSet { coord: CellCoord, old: u8, new: u8 },
    /// Simulation advanced one tick.
    Stepped { tick: u64 },
}

/// What a single step did, for logging and tooling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub tick: u64,
    /// Faces that carried a non-neutral flow.
    pub active_faces: usize,
    /// Mass carried across faces, counted once per face crossed.
    pub carried_mass: u32,
}

/// The authoritative fluid simulation.
///
/// Owns the grid exclusively. The external loop calls [`Simulation::step`]
/// once per frame and samples mass between steps; a step is never observable
/// half done because it holds `&mut self` for its whole duration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Simulation {
    grid: FluidGrid,
    config: FluidConfig,
    tick: u64,
    event_log: Vec<FluidEvent>,
}

impl Simulation {
    /// Create an empty simulation with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty simulation with a validated configuration.
    pub fn with_config(config: FluidConfig) -> Result<Self, FluidError> {
        Self::with_grid(config, FluidGrid::new())
    }

    /// Create a simulation seeded from a row-major mass buffer.
    pub fn from_mass(config: FluidConfig, mass: &[u8]) -> Result<Self, FluidError> {
        Self::with_grid(config, FluidGrid::from_mass(mass)?)
    }

    /// Create a simulation whose initial mass is computed per cell.
    pub fn from_fn(
        config: FluidConfig,
        mass_at: impl FnMut(CellCoord) -> u8,
    ) -> Result<Self, FluidError> {
        Self::with_grid(config, FluidGrid::from_fn(mass_at))
    }

    fn with_grid(config: FluidConfig, grid: FluidGrid) -> Result<Self, FluidError> {
        config.validate()?;
        Ok(Self {
            grid,
            config,
            ..Self::default()
        })
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// Read-only access to the grid, including the last step's flow fields.
    pub fn grid(&self) -> &FluidGrid {
        &self.grid
    }

    /// Mass at `(x, y)` for the renderer.
    pub fn sample(&self, x: usize, y: usize) -> Result<u8, FluidError> {
        self.grid.mass(x, y)
    }

    /// Row-major mass field, `i = y * GRID_WIDTH + x`.
    pub fn mass_field(&self) -> &[u8] {
        self.grid.mass_field()
    }

    pub fn total_mass(&self) -> u32 {
        self.grid.total_mass()
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[FluidEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<FluidEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Overwrite the mass at `(x, y)`, clamped to `[0, 255]`. Returns the stored value.
    pub fn set_mass(&mut self, x: usize, y: usize, value: i32) -> Result<u8, FluidError> {
        let old = self.grid.mass(x, y)?;
        let new = self.grid.set_mass(x, y, value)?;
        tracing::debug!(x, y, old, new, "mass set");
        self.record(FluidEvent::MassSet {
            coord: CellCoord::new(x, y),
            old,
            new,
        });
        Ok(new)
    }

    /// Pour (positive) or drain (negative) mass at `(x, y)`, clamped to `[0, 255]`.
    /// Returns the stored value.
    pub fn inject(&mut self, x: usize, y: usize, amount: i32) -> Result<u8, FluidError> {
        let current = self.grid.mass(x, y)?;
        self.set_mass(x, y, i32::from(current).saturating_add(amount))
    }

    /// Advance the simulation by one tick: solve every face flow from the
    /// current mass, then transport mass along those flows.
    pub fn step(&mut self) -> StepReport {
        let report = self.advance();
        self.record(FluidEvent::Stepped { tick: self.tick });
        report
    }

    fn advance(&mut self) -> StepReport {
        let _span = tracing::trace_span!("fluid_step", tick = self.tick + 1).entered();

        let active_faces = self.grid.solve_flows(&self.config);
        let carried_mass = if active_faces > 0 {
            self.grid.transport()
        } else {
            0
        };
        self.tick += 1;

        tracing::trace!(active_faces, carried_mass, "step complete");
        StepReport {
            tick: self.tick,
            active_faces,
            carried_mass,
        }
    }

    fn record(&mut self, event: FluidEvent) {
        if self.config.record_events {
            self.event_log.push(event);
        }
    }

    /// Reconstruct a simulation from its starting mass field and event log.
    pub fn replay(
        config: FluidConfig,
        origin: &[u8],
        events: &[FluidEvent],
    ) -> Result<Self, FluidError> {
        let mut sim = Self::from_mass(config, origin)?;
        sim.apply_events(events)?;
        Ok(sim)
    }

    /// Re-apply logged events on top of the current state without recording them.
    ///
    /// Every `MassSet` must find its `old` value in the cell and every `Stepped`
    /// must land on its logged tick; a log that does not belong to this state is
    /// rejected at the first event that disagrees.
    pub fn apply_events(&mut self, events: &[FluidEvent]) -> Result<(), FluidError> {
        for event in events {
            match *event {
                FluidEvent::MassSet { coord, old, new } => {
                    let found = self.grid.mass(coord.x, coord.y)?;
                    if found != old {
                        return Err(FluidError::InvalidConfiguration(format!(
                            "event log expects mass {old} at {coord}, found {found}"
                        )));
                    }
                    self.grid.set_mass(coord.x, coord.y, i32::from(new))?;
                }
                FluidEvent::Stepped { tick } => {
                    if tick != self.tick + 1 {
                        return Err(FluidError::InvalidConfiguration(format!(
                            "event log steps to tick {tick}, simulation is at tick {}",
                            self.tick
                        )));
                    }
                    self.advance();
                }
            }
        }
        Ok(())
    }

    /// Deterministic FNV-1a hash over the tick and mass field.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mut mix = |bytes: &[u8]| {
            for &b in bytes {
                h ^= u64::from(b);
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&self.tick.to_le_bytes());
        mix(self.grid.mass_field());
        h
    }
}
