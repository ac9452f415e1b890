//! Mean ayanamsa model: a J2000 reference value carried forward by the
//! IAU 2006 general precession in longitude.

use crate::ephemeris::types::AyanamsaMode;

pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

impl AyanamsaMode {
    /// Ayanamsa at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            AyanamsaMode::Lahiri => 23.853,
            AyanamsaMode::Raman => 22.370,
            AyanamsaMode::Krishnamurti => 23.850,
            AyanamsaMode::FaganBradley => 24.736,
            AyanamsaMode::Yukteshwar => 22.376,
        }
    }
}

/// Accumulated general precession since J2000, in arcseconds.
pub fn general_precession_arcsec(t_centuries: f64) -> f64 {
    let t = t_centuries;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// Mean ayanamsa in degrees at a Julian day. UT is used in place of TT;
/// the difference is far below arc-second precision for this quantity.
pub fn mean_ayanamsa_deg(mode: AyanamsaMode, jd_ut: f64) -> f64 {
    let t = (jd_ut - J2000_JD) / DAYS_PER_JULIAN_CENTURY;
    mode.reference_j2000_deg() + general_precession_arcsec(t) / 3600.0
}
