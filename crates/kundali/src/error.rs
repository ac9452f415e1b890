use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ephemeris::EphemerisError;
use crate::zodiac::Planet;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("non-finite angle or quantity: {value}")]
    NonFinite { value: f64 },

    #[error("invalid birth moment: {message}")]
    InvalidMoment { message: String },

    #[error(
        "{datetime} (JD {jd_ut:.5}) is outside the supported ephemeris range JD {min_jd:.1}..={max_jd:.1}"
    )]
    OutOfRange {
        datetime: DateTime<Utc>,
        jd_ut: f64,
        min_jd: f64,
        max_jd: f64,
    },

    #[error("ephemeris returned no longitude for {planet}")]
    MissingBody { planet: Planet },

    #[error("invalid chart configuration: {message}")]
    InvalidConfig { message: String },

    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}
