use fluxgrid_common::{GRID_HEIGHT, GRID_WIDTH};

/// Errors from fluid accessors and construction.
///
/// `step()` never fails; only calls that take caller-supplied coordinates,
/// configuration, or seed buffers can be rejected. A rejected call leaves the
/// simulation untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FluidError {
    #[error("cell ({x}, {y}) is outside the {}x{} grid", GRID_WIDTH, GRID_HEIGHT)]
    OutOfBounds { x: usize, y: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
