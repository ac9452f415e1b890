use serde::{Deserialize, Serialize};

use crate::ephemeris::{AyanamsaMode, HouseSystem};
use crate::error::ChartError;
use crate::vedic::dashas::DEFAULT_HORIZON_YEARS;

/// Options threaded through every engine call. Missing keys in a config
/// file fall back to the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub ayanamsa: AyanamsaMode,
    pub house_system: HouseSystem,

    // Rasi combustion additionally requires the Sun's sign.
    pub combust_same_sign: bool,

    pub dasha_horizon_years: f64,
    pub close_pair_orb_deg: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            ayanamsa: AyanamsaMode::Lahiri,
            house_system: HouseSystem::Porphyry,
            combust_same_sign: false,
            dasha_horizon_years: DEFAULT_HORIZON_YEARS,
            close_pair_orb_deg: 6.0,
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.dasha_horizon_years.is_finite() || self.dasha_horizon_years <= 0.0 {
            return Err(ChartError::InvalidConfig {
                message: format!(
                    "dasha_horizon_years must be positive, got {}",
                    self.dasha_horizon_years
                ),
            });
        }
        let orb = self.close_pair_orb_deg;
        if !orb.is_finite() || !(0.0..=30.0).contains(&orb) {
            return Err(ChartError::InvalidConfig {
                message: format!(
                    "close_pair_orb_deg must lie in [0, 30], got {}",
                    self.close_pair_orb_deg
                ),
            });
        }
        Ok(())
    }
}
