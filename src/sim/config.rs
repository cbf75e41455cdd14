//! Model constants for the stream-power integrator.

use serde::{Deserialize, Serialize};

/// Runtime model constants.
///
/// These are plain fields rather than compile-time constants so a caller
/// can run the model with a different parameter set without rebuilding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Erodibility coefficient K in the stream-power law.
    pub erodibility: f64,
    /// Slope exponent n.
    pub slope_exponent: f64,
    /// Drainage-area exponent m.
    pub area_exponent: f64,
    /// Uplift rate U, in elevation units per unit time.
    pub uplift_rate: f64,
    /// Length of one time step.
    pub time_step: f64,
    /// Convergence tolerance of the implicit erosion solve.
    pub tolerance: f64,
    /// Surface area contributed by a single cell.
    pub cell_area: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            erodibility: 2e-6,
            slope_exponent: 2.0,
            area_exponent: 0.8,
            uplift_rate: 2e-3,
            time_step: 1000.0,
            tolerance: 1e-3,
            cell_area: 40_000.0,
        }
    }
}

impl ModelConfig {
    /// Elevation added to every interior cell per step.
    pub fn uplift_per_step(&self) -> f64 {
        self.uplift_rate * self.time_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        let config = ModelConfig::default();
        assert_eq!(config.erodibility, 2e-6);
        assert_eq!(config.slope_exponent, 2.0);
        assert_eq!(config.area_exponent, 0.8);
        assert_eq!(config.uplift_per_step(), 2.0);
        assert_eq!(config.cell_area, 40_000.0);
    }
}
