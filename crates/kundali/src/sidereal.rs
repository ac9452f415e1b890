//! Tropical to sidereal correction.

use serde::{Serialize, Serializer};

use crate::ephemeris::TropicalLongitudes;
use crate::error::ChartError;
use crate::zodiac::{normalize_degrees, wrap_degrees, Planet, ALL_PLANETS};

/// Subtract the ayanamsa and wrap into `[0, 360)`.
pub fn sidereal_longitude(tropical: f64, ayanamsa: f64) -> Result<f64, ChartError> {
    if !ayanamsa.is_finite() {
        return Err(ChartError::NonFinite { value: ayanamsa });
    }
    normalize_degrees(tropical - ayanamsa)
}

/// Sidereal longitude of every graha. Always complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiderealPositions {
    longitudes: [f64; 9],
}

impl SiderealPositions {
    /// Correct a full set of tropical longitudes. Ketu is placed opposite
    /// Rahu; any Ketu value in the input is ignored.
    pub fn from_tropical(
        tropical: &TropicalLongitudes,
        ayanamsa: f64,
    ) -> Result<Self, ChartError> {
        let mut longitudes = [0.0; 9];
        for planet in ALL_PLANETS.iter().copied().filter(|p| *p != Planet::Ketu) {
            let value = tropical
                .get(&planet)
                .copied()
                .ok_or(ChartError::MissingBody { planet })?;
            longitudes[planet.index()] = sidereal_longitude(value, ayanamsa)?;
        }
        longitudes[Planet::Ketu.index()] = wrap_degrees(longitudes[Planet::Rahu.index()] + 180.0);
        Ok(Self { longitudes })
    }

    /// Positions given directly in sidereal degrees, with Ketu derived
    /// from Rahu. The array follows [`ALL_PLANETS`] order for the first
    /// eight entries.
    pub fn from_sidereal(values: [f64; 8]) -> Result<Self, ChartError> {
        let mut longitudes = [0.0; 9];
        for (slot, value) in longitudes.iter_mut().zip(values) {
            *slot = normalize_degrees(value)?;
        }
        longitudes[Planet::Ketu.index()] = wrap_degrees(longitudes[Planet::Rahu.index()] + 180.0);
        Ok(Self { longitudes })
    }

    pub fn longitude(&self, planet: Planet) -> f64 {
        self.longitudes[planet.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Planet, f64)> + '_ {
        ALL_PLANETS.iter().map(move |p| (*p, self.longitude(*p)))
    }
}

impl Serialize for SiderealPositions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
