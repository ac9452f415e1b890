//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters). Lords cycle through
//! the nine grahas in Vimshottari order.

use serde::Serialize;

use crate::zodiac::{wrap_degrees, Planet};

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (display name, lord)
pub const NAKSHATRA_ORDER: [(&str, Planet); NAKSHATRA_COUNT] = [
    ("Ashwini", Planet::Ketu),
    ("Bharani", Planet::Venus),
    ("Krittika", Planet::Sun),
    ("Rohini", Planet::Moon),
    ("Mrigashira", Planet::Mars),
    ("Ardra", Planet::Rahu),
    ("Punarvasu", Planet::Jupiter),
    ("Pushya", Planet::Saturn),
    ("Ashlesha", Planet::Mercury),
    ("Magha", Planet::Ketu),
    ("Purva Phalguni", Planet::Venus),
    ("Uttara Phalguni", Planet::Sun),
    ("Hasta", Planet::Moon),
    ("Chitra", Planet::Mars),
    ("Swati", Planet::Rahu),
    ("Vishakha", Planet::Jupiter),
    ("Anuradha", Planet::Saturn),
    ("Jyeshtha", Planet::Mercury),
    ("Mula", Planet::Ketu),
    ("Purva Ashadha", Planet::Venus),
    ("Uttara Ashadha", Planet::Sun),
    ("Shravana", Planet::Moon),
    ("Dhanishta", Planet::Mars),
    ("Shatabhisha", Planet::Rahu),
    ("Purva Bhadrapada", Planet::Jupiter),
    ("Uttara Bhadrapada", Planet::Saturn),
    ("Revati", Planet::Mercury),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NakshatraPlacement {
    /// 0-based index, Ashwini = 0.
    pub index: usize,
    pub name: &'static str,
    pub lord: Planet,
    /// 1..=4
    pub pada: u8,
    pub start: f64,
    pub end: f64,
    /// Portion of the nakshatra already traversed, in `[0, 1)`.
    pub progress: f64,
}

pub fn nakshatra_for_longitude(longitude: f64) -> NakshatraPlacement {
    let lon = wrap_degrees(longitude);
    let index = ((lon / NAKSHATRA_SEGMENT_SIZE).floor() as usize).min(NAKSHATRA_COUNT - 1);
    let start = index as f64 * NAKSHATRA_SEGMENT_SIZE;
    let offset = (lon - start).max(0.0);
    let progress = (offset / NAKSHATRA_SEGMENT_SIZE).min(1.0 - f64::EPSILON);
    let pada = ((offset / PADA_SIZE).floor() as u8).min(3) + 1;
    let (name, lord) = NAKSHATRA_ORDER[index];

    NakshatraPlacement {
        index,
        name,
        lord,
        pada,
        start,
        end: start + NAKSHATRA_SEGMENT_SIZE,
        progress,
    }
}
