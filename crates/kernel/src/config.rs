use serde::{Deserialize, Serialize};

use crate::error::FluidError;
use crate::grid::MAX_FLOW;

/// Faces a cell shares with its neighbors (east, west, north, south).
pub const FACES_PER_CELL: u8 = 4;

/// Solver tuning: how much mass may cross a single face in one step.
///
/// The per-face transfer is `min(|a - b| / spread_divisor, max_exchange)`.
/// With `spread_divisor >= FACES_PER_CELL` the summed outflow of a cell never
/// exceeds its mass and the summed inflow never exceeds its headroom, so a
/// step never needs to clamp and conserves mass exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidConfig {
    /// Upper bound on the mass moved across one face per step.
    pub max_exchange: u8,
    /// Divisor applied to the mass difference across a face.
    ///
    /// Halving the difference (`|d| / 2`) is rejected: a cell draining through
    /// all four faces could then lose twice its mass. Values below
    /// [`FACES_PER_CELL`] fail [`FluidConfig::validate`].
    pub spread_divisor: u8,
    /// Record mass writes and steps into the event log for replay.
    pub record_events: bool,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            max_exchange: 32,
            spread_divisor: FACES_PER_CELL,
            record_events: false,
        }
    }
}

impl FluidConfig {
    /// Check the configuration against the solver's range limits.
    pub fn validate(&self) -> Result<(), FluidError> {
        let reason = if self.max_exchange == 0 {
            Some("max_exchange must be at least 1".to_string())
        } else if self.max_exchange > MAX_FLOW {
            Some(format!(
                "max_exchange {} exceeds the encodable flow limit {MAX_FLOW}",
                self.max_exchange
            ))
        } else if self.spread_divisor < FACES_PER_CELL {
            Some(format!(
                "spread_divisor {} is below the {FACES_PER_CELL} faces a cell drains through",
                self.spread_divisor
            ))
        } else {
            None
        };

        match reason {
            Some(reason) => {
                tracing::warn!(%reason, "rejecting fluid configuration");
                Err(FluidError::InvalidConfiguration(reason))
            }
            None => Ok(()),
        }
    }
}
