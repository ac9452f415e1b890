//! Zodiac primitives shared by every engine: the nine grahas, the twelve
//! signs, and circular degree arithmetic on the ecliptic.
//!
//! All longitudes handled by the crate live in `[0, 360)`. Values arriving
//! from outside (ephemeris output, caller input) go through
//! [`normalize_degrees`], which rejects non-finite input; already validated
//! values use [`wrap_degrees`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChartError;

pub const FULL_CIRCLE: f64 = 360.0;
pub const SIGN_SPAN: f64 = 30.0;
pub const ARCSEC_PER_CIRCLE: f64 = 1_296_000.0;

/// The nine grahas used throughout the engine.
///
/// Rahu is the mean lunar node; Ketu is always derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

pub const ALL_PLANETS: [Planet; 9] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
    Planet::Rahu,
    Planet::Ketu,
];

impl Planet {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Planet::Sun => "sun",
            Planet::Moon => "moon",
            Planet::Mars => "mars",
            Planet::Mercury => "mercury",
            Planet::Jupiter => "jupiter",
            Planet::Venus => "venus",
            Planet::Saturn => "saturn",
            Planet::Rahu => "rahu",
            Planet::Ketu => "ketu",
        }
    }

    /// Two-letter chart abbreviation.
    pub const fn code(self) -> &'static str {
        match self {
            Planet::Sun => "Su",
            Planet::Moon => "Mo",
            Planet::Mars => "Ma",
            Planet::Mercury => "Me",
            Planet::Jupiter => "Ju",
            Planet::Venus => "Ve",
            Planet::Saturn => "Sa",
            Planet::Rahu => "Ra",
            Planet::Ketu => "Ke",
        }
    }

    pub const fn is_node(self) -> bool {
        matches!(self, Planet::Rahu | Planet::Ketu)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sign quality, which drives the navamsa starting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Movable,
    Fixed,
    Dual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// 1 for Aries through 12 for Pisces.
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<Sign> {
        match number {
            1..=12 => Some(ALL_SIGNS[usize::from(number - 1)]),
            _ => None,
        }
    }

    /// Sign containing a longitude. The input is wrapped first, so any
    /// finite value maps to a sign.
    pub fn from_longitude(longitude: f64) -> Sign {
        let index = (wrap_degrees(longitude) / SIGN_SPAN).floor() as usize;
        ALL_SIGNS[index.min(11)]
    }

    /// Sign `steps` places further along the zodiac (negative steps go back).
    pub fn offset(self, steps: i32) -> Sign {
        let index = (i32::from(self as u8) + steps).rem_euclid(12) as usize;
        ALL_SIGNS[index]
    }

    pub const fn modality(self) -> Modality {
        match (self as u8) % 3 {
            0 => Modality::Movable,
            1 => Modality::Fixed,
            _ => Modality::Dual,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Longitude at which the sign begins.
    pub fn start_degree(self) -> f64 {
        f64::from(self as u8) * SIGN_SPAN
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrap a finite angle into `[0, 360)`.
///
/// `rem_euclid` can return exactly 360.0 for tiny negative inputs, so that
/// case is folded back to 0.
pub fn wrap_degrees(value: f64) -> f64 {
    let wrapped = value.rem_euclid(FULL_CIRCLE);
    if wrapped >= FULL_CIRCLE {
        0.0
    } else {
        wrapped
    }
}

/// Checked variant of [`wrap_degrees`] for values crossing a boundary.
pub fn normalize_degrees(value: f64) -> Result<f64, ChartError> {
    if !value.is_finite() {
        return Err(ChartError::NonFinite { value });
    }
    Ok(wrap_degrees(value))
}

/// Counter-clockwise arc travelled from `from` to `to`, in `[0, 360)`.
pub fn forward_arc(from: f64, to: f64) -> f64 {
    wrap_degrees(to - from)
}

/// Shortest angular distance between two longitudes, in `[0, 180]`.
pub fn separation(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs().rem_euclid(FULL_CIRCLE);
    diff.min(FULL_CIRCLE - diff)
}

/// Round an absolute longitude to the nearest arc-second.
///
/// Halves round away from zero. A value that rounds up to a full circle
/// comes back as 0.
pub fn round_to_arcsec(longitude: f64) -> f64 {
    let seconds = (longitude * 3600.0).round().rem_euclid(ARCSEC_PER_CIRCLE);
    seconds / 3600.0
}

/// Sign-local degree/minute/second breakdown of a longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDms {
    pub sign: Sign,
    pub degrees: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl SignDms {
    /// Split a longitude into sign and `DD.MM.SS` parts.
    ///
    /// Rounding carries from seconds into minutes and from minutes into
    /// degrees. A degree count that reaches 30 wraps to 0 while the sign
    /// stays the one containing the longitude.
    pub fn from_longitude(longitude: f64) -> SignDms {
        let lon = wrap_degrees(longitude);
        let sign = Sign::from_longitude(lon);
        let within = lon - sign.start_degree();

        let mut degrees = within.floor() as u32;
        let minutes_exact = (within - f64::from(degrees)) * 60.0;
        let mut minutes = minutes_exact.floor() as u32;
        let mut seconds = ((minutes_exact - f64::from(minutes)) * 60.0).round() as u32;

        if seconds >= 60 {
            seconds = 0;
            minutes += 1;
        }
        if minutes >= 60 {
            minutes = 0;
            degrees += 1;
        }
        if degrees >= 30 {
            degrees = 0;
        }

        SignDms {
            sign,
            degrees: degrees as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
        }
    }
}

impl fmt::Display for SignDms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:02}", self.degrees, self.minutes, self.seconds)
    }
}
