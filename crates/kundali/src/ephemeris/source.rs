use std::ops::RangeInclusive;
use thiserror::Error;

use crate::ephemeris::types::{AyanamsaMode, HouseSystem, TropicalHouses, TropicalLongitudes};
use crate::zodiac::Planet;

/// JD of 1800-01-01 00:00 UT.
pub const DEFAULT_MIN_JD: f64 = 2_378_496.5;
/// JD of 2400-01-01 00:00 UT.
pub const DEFAULT_MAX_JD: f64 = 2_597_641.5;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {planet} at JD {jd_ut:.5}: {message}")]
    CalculationFailed {
        planet: Planet,
        jd_ut: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Ayanamsa calculation failed for {mode:?} at JD {jd_ut:.5}: {message}")]
    AyanamsaFailed {
        mode: AyanamsaMode,
        jd_ut: f64,
        message: String,
    },
}

/// Boundary to the astronomical computation service.
///
/// Implementations return tropical values only; every sidereal conversion
/// happens in the engine. A source must report every body it knows about
/// (Sun through Saturn plus Rahu); a gap is treated as a failure upstream.
pub trait EphemerisSource: Send + Sync {
    /// Julian days (UT) the source can answer for.
    fn supported_range(&self) -> RangeInclusive<f64> {
        DEFAULT_MIN_JD..=DEFAULT_MAX_JD
    }

    fn tropical_longitudes(&self, jd_ut: f64) -> Result<TropicalLongitudes, EphemerisError>;

    fn tropical_house_cusps(
        &self,
        jd_ut: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<TropicalHouses, EphemerisError>;

    /// Ayanamsa in degrees for the given mode.
    fn ayanamsa(&self, jd_ut: f64, mode: AyanamsaMode) -> Result<f64, EphemerisError>;
}
