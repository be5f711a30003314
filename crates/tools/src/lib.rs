//! Developer Tooling: field inspector, heatmap dumps, step timing.
//!
//! # Invariants
//! - Tools only read simulation state; they never step or write mass.

mod heatmap;
mod inspector;
mod timer;

pub use heatmap::{HEATMAP_RAMP, heatmap};
pub use inspector::{CellInfo, FieldInspector, FieldSummary};
pub use timer::StepTimer;

pub fn crate_info() -> &'static str {
    "fluxgrid-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
