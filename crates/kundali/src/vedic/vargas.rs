//! Navamsa (D9) divisional chart.
//!
//! Each sign is split into nine parts of 3°20'. Counting starts from the
//! sign itself for movable signs, from the ninth sign for fixed signs, and
//! from the fifth sign for dual signs.

use crate::houses::rasi_house;
use crate::zodiac::{wrap_degrees, Modality, Sign, SIGN_SPAN};

pub const NAVAMSA_DIVISION: u32 = 9;
pub const NAVAMSA_SPAN: f64 = SIGN_SPAN / NAVAMSA_DIVISION as f64;

/// Signs to advance from the rasi sign before counting navamsa parts.
const fn quality_offset(modality: Modality) -> i32 {
    match modality {
        Modality::Movable => 0,
        Modality::Fixed => 8,
        Modality::Dual => 4,
    }
}

/// Navamsa part inside the sign, 0..=8.
pub fn navamsa_pada(longitude: f64) -> u32 {
    let lon = wrap_degrees(longitude);
    let within = lon - Sign::from_longitude(lon).start_degree();
    ((within / NAVAMSA_SPAN).floor() as u32).min(NAVAMSA_DIVISION - 1)
}

pub fn navamsa_sign(longitude: f64) -> Sign {
    let rasi = Sign::from_longitude(longitude);
    let start = rasi.offset(quality_offset(rasi.modality()));
    start.offset(navamsa_pada(longitude) as i32)
}

/// Longitude inside the navamsa chart: the part's position stretched
/// over its whole navamsa sign.
pub fn navamsa_longitude(longitude: f64) -> f64 {
    let lon = wrap_degrees(longitude);
    let within = lon - Sign::from_longitude(lon).start_degree();
    let within_part = within - navamsa_pada(lon) as f64 * NAVAMSA_SPAN;
    let scaled = (within_part * NAVAMSA_DIVISION as f64).clamp(0.0, SIGN_SPAN - f64::EPSILON);
    wrap_degrees(navamsa_sign(lon).start_degree() + scaled)
}

/// Same sign in rasi and navamsa.
pub fn is_vargottama(longitude: f64) -> bool {
    Sign::from_longitude(longitude) == navamsa_sign(longitude)
}

/// House of a longitude in the navamsa chart, counted from the navamsa
/// sign of the ascendant.
pub fn navamsa_house(longitude: f64, ascendant: f64) -> u8 {
    let lagna = navamsa_sign(ascendant);
    rasi_house(navamsa_sign(longitude).start_degree(), lagna)
}
