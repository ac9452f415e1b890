//! Chalit (bhava) cusps with Sripati begin boundaries.
//!
//! The tropical cusps reported by the ephemeris become the house *mids*
//! after sidereal correction. Each house then begins halfway along the
//! forward arc from the previous mid. Both the mids and the begins are
//! rounded to the arc-second, in two separate passes.

use serde::Serialize;

use crate::error::ChartError;
use crate::sidereal::sidereal_longitude;
use crate::zodiac::{forward_arc, round_to_arcsec, wrap_degrees, Sign, SignDms};

/// Arcs narrower than this are treated as degenerate.
pub const ARC_EPSILON: f64 = 1e-9;

/// Slot for a 1-based house number. Any number wraps onto the circle.
pub(crate) fn slot(house: u8) -> usize {
    (usize::from(house) + 11) % 12
}

/// House number following `house`, cyclically.
pub fn next_house(house: u8) -> u8 {
    house % 12 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseCusps {
    begin: [f64; 12],
    mid: [f64; 12],
}

impl HouseCusps {
    /// Derive cusps from tropical cusps (index 0 is the first house).
    pub fn from_tropical(tropical: &[f64; 12], ayanamsa: f64) -> Result<Self, ChartError> {
        let mut sidereal = [0.0; 12];
        for (out, cusp) in sidereal.iter_mut().zip(tropical) {
            *out = sidereal_longitude(*cusp, ayanamsa)?;
        }
        Ok(Self::from_sidereal(&sidereal))
    }

    /// Derive cusps from already sidereal, finite cusp longitudes.
    pub fn from_sidereal(cusps: &[f64; 12]) -> Self {
        let mid: [f64; 12] = std::array::from_fn(|i| round_to_arcsec(wrap_degrees(cusps[i])));

        let mut begin = [0.0; 12];
        for i in 0..12 {
            let prev = mid[(i + 11) % 12];
            let halfway = wrap_degrees(prev + forward_arc(prev, mid[i]) / 2.0);
            begin[i] = round_to_arcsec(halfway);
        }

        let cusps = Self { begin, mid };
        for house in 1..=12u8 {
            if cusps.arc(house) < ARC_EPSILON {
                log::warn!(
                    "chalit house {house} has a degenerate arc at {:.6}",
                    cusps.begin(house)
                );
            }
        }
        cusps
    }

    pub fn begin(&self, house: u8) -> f64 {
        self.begin[slot(house)]
    }

    pub fn mid(&self, house: u8) -> f64 {
        self.mid[slot(house)]
    }

    /// Exclusive end of a house, i.e. the next house's begin.
    pub fn end(&self, house: u8) -> f64 {
        self.begin(next_house(house))
    }

    /// Width of a house in degrees.
    pub fn arc(&self, house: u8) -> f64 {
        forward_arc(self.begin(house), self.end(house))
    }

    pub fn begins(&self) -> &[f64; 12] {
        &self.begin
    }

    pub fn mids(&self) -> &[f64; 12] {
        &self.mid
    }

    /// Where the mid sits inside its house, from 0 at begin to 1 at end.
    pub fn mid_fraction(&self, house: u8) -> f64 {
        arc_fraction(self.begin(house), self.end(house), self.mid(house))
    }

    pub fn table(&self) -> Vec<ChalitRow> {
        (1..=12u8)
            .map(|house| {
                let begin = SignDms::from_longitude(self.begin(house));
                let mid = SignDms::from_longitude(self.mid(house));
                ChalitRow {
                    bhava: house,
                    begin_sign: begin.sign,
                    begin_dms: begin.to_string(),
                    mid_sign: mid.sign,
                    mid_dms: mid.to_string(),
                }
            })
            .collect()
    }
}

/// Fraction of the forward arc `start -> end` covered up to `point`,
/// clamped to `[0, 1]`. Degenerate arcs are floored at [`ARC_EPSILON`].
pub fn arc_fraction(start: f64, end: f64, point: f64) -> f64 {
    let total = forward_arc(start, end).max(ARC_EPSILON);
    (forward_arc(start, point) / total).clamp(0.0, 1.0)
}

/// One printable line of the Chalit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChalitRow {
    pub bhava: u8,
    pub begin_sign: Sign,
    pub begin_dms: String,
    pub mid_sign: Sign,
    pub mid_dms: String,
}
