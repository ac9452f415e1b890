use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ChartError;
use crate::zodiac::Planet;

/// Julian day of the Unix epoch.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub const MIN_UTC_OFFSET_HOURS: f64 = -12.0;
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ChartError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ChartError::InvalidMoment {
                message: format!("latitude {lat} outside [-90, 90]"),
            });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ChartError::InvalidMoment {
                message: format!("longitude {lon} outside [-180, 180]"),
            });
        }
        Ok(Self { lat, lon })
    }
}

/// Birth instant and place. Fields are private so a value can only exist
/// after validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthMoment {
    utc: DateTime<Utc>,
    utc_offset_hours: f64,
    location: GeoLocation,
}

impl BirthMoment {
    pub fn new(
        utc: DateTime<Utc>,
        utc_offset_hours: f64,
        location: GeoLocation,
    ) -> Result<Self, ChartError> {
        if !utc_offset_hours.is_finite()
            || !(MIN_UTC_OFFSET_HOURS..=MAX_UTC_OFFSET_HOURS).contains(&utc_offset_hours)
        {
            return Err(ChartError::InvalidMoment {
                message: format!(
                    "utc offset {utc_offset_hours}h outside [{MIN_UTC_OFFSET_HOURS}, {MAX_UTC_OFFSET_HOURS}]"
                ),
            });
        }
        let location = GeoLocation::new(location.lat, location.lon)?;
        Ok(Self {
            utc,
            utc_offset_hours,
            location,
        })
    }

    /// Build from a wall-clock time and an already resolved UTC offset.
    pub fn from_local(
        local: NaiveDateTime,
        utc_offset_hours: f64,
        location: GeoLocation,
    ) -> Result<Self, ChartError> {
        if !utc_offset_hours.is_finite() {
            return Err(ChartError::InvalidMoment {
                message: format!("utc offset {utc_offset_hours} is not finite"),
            });
        }
        let offset = Duration::seconds((utc_offset_hours * 3600.0).round() as i64);
        let naive_utc = local
            .checked_sub_signed(offset)
            .ok_or_else(|| ChartError::InvalidMoment {
                message: format!("{local} shifted by {utc_offset_hours}h overflows"),
            })?;
        Self::new(Utc.from_utc_datetime(&naive_utc), utc_offset_hours, location)
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    pub fn utc_offset_hours(&self) -> f64 {
        self.utc_offset_hours
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    pub fn julian_day_ut(&self) -> f64 {
        julian_day_ut(self.utc)
    }
}

/// Julian day (UT) of a UTC instant.
pub fn julian_day_ut(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// House systems the adapter can be asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseSystem {
    Placidus,
    #[default]
    Porphyry,
}

impl HouseSystem {
    /// Swiss Ephemeris house system letter.
    pub const fn code(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::Porphyry => b'O',
        }
    }

    /// Whether cusps are defined at this geographic latitude. Placidus
    /// breaks down inside the polar circles.
    pub fn supports_latitude(self, lat: f64) -> bool {
        match self {
            HouseSystem::Placidus => lat.abs() < POLAR_CIRCLE_LAT,
            HouseSystem::Porphyry => true,
        }
    }
}

/// 90° minus the mean obliquity of the ecliptic.
pub const POLAR_CIRCLE_LAT: f64 = 90.0 - 23.44;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AyanamsaMode {
    #[default]
    Lahiri,
    Raman,
    Krishnamurti,
    FaganBradley,
    Yukteshwar,
}

/// Tropical longitudes per body as delivered by an ephemeris source.
/// Ketu is never expected here; it is derived from Rahu.
pub type TropicalLongitudes = BTreeMap<Planet, f64>;

/// Tropical cusps 1..12 (index 0 is the first house) and the ascendant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TropicalHouses {
    pub cusps: [f64; 12],
    pub ascendant: f64,
}
