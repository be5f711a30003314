//! Fluid Kernel: authoritative mass field, flow solve, mass transport, deterministic stepping.
//!
//! # Invariants
//! - Every cell's mass stays in `[0, 255]` at all times.
//! - A step computes every face flow from one mass snapshot before any mass moves.
//! - Outer grid faces are walls: no flow crosses them, so total mass is conserved.
//! - `mass(t + 1)` depends only on `mass(t)` and the configuration.

pub mod config;
pub mod error;
pub mod grid;
pub mod seed;
pub mod simulation;
mod solver;
mod transport;

pub use config::FluidConfig;
pub use error::FluidError;
pub use grid::{FluidGrid, NEUTRAL_FLOW, decode_flow, encode_flow};
pub use seed::SeedPattern;
pub use simulation::{FluidEvent, Simulation, StepReport};

pub fn crate_info() -> &'static str {
    "fluxgrid-kernel v0.1.0"
}
