//! Placing longitudes into Rasi and Chalit houses.

use serde::Serialize;

use crate::houses::chalit::{arc_fraction, next_house, HouseCusps};
use crate::sidereal::SiderealPositions;
use crate::zodiac::{forward_arc, separation, Planet, Sign};

/// Whole-sign house of a longitude counted from the lagna sign.
pub fn rasi_house(longitude: f64, lagna: Sign) -> u8 {
    let sign = Sign::from_longitude(longitude);
    let offset = (i32::from(sign.number()) - i32::from(lagna.number())).rem_euclid(12);
    offset as u8 + 1
}

/// Chalit house containing a longitude: the house whose begin-to-end arc
/// covers it, begin inclusive and end exclusive.
pub fn chalit_house(longitude: f64, cusps: &HouseCusps) -> u8 {
    if let Some(house) =
        (1..=12u8).find(|&h| forward_arc(cusps.begin(h), longitude) < cusps.arc(h))
    {
        return house;
    }

    // Only reachable when rounding leaves a sliver uncovered: take the
    // closest preceding begin.
    (1..=12u8)
        .min_by(|&a, &b| {
            let arc_a = forward_arc(cusps.begin(a), longitude);
            arc_a.total_cmp(&forward_arc(cusps.begin(b), longitude))
        })
        .unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    Forward,
    Backward,
}

/// Disagreement between the Rasi and Chalit house of a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HouseShift {
    pub direction: ShiftDirection,
    /// Whole degrees between the planet and the crossed boundary.
    pub degrees: u32,
}

/// Classify a shift. `None` when both houses agree.
///
/// A forward shift is measured past the begin of the house after the Rasi
/// house; a backward shift is measured up to the begin of the Rasi house.
/// Jumps of more than one house take the nearer direction.
pub fn classify_shift(
    longitude: f64,
    rasi: u8,
    chalit: u8,
    cusps: &HouseCusps,
) -> Option<HouseShift> {
    if rasi == chalit {
        return None;
    }
    let steps = (i32::from(chalit) - i32::from(rasi)).rem_euclid(12);
    let (direction, arc) = if steps <= 6 {
        (ShiftDirection::Forward, forward_arc(cusps.begin(next_house(rasi)), longitude))
    } else {
        (ShiftDirection::Backward, forward_arc(longitude, cusps.begin(rasi)))
    };
    Some(HouseShift {
        direction,
        degrees: arc.round() as u32,
    })
}

/// Where one planet lands in both house systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPlacement {
    pub planet: Planet,
    pub longitude: f64,
    pub sign: Sign,
    pub rasi_house: u8,
    pub chalit_house: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<HouseShift>,
    /// Position inside the Chalit house, 0 at begin and 1 at end.
    pub house_fraction: f64,
}

pub fn place_planets(
    positions: &SiderealPositions,
    lagna: Sign,
    cusps: &HouseCusps,
) -> Vec<PlanetPlacement> {
    positions
        .iter()
        .map(|(planet, longitude)| {
            let rasi = rasi_house(longitude, lagna);
            let chalit = chalit_house(longitude, cusps);
            PlanetPlacement {
                planet,
                longitude,
                sign: Sign::from_longitude(longitude),
                rasi_house: rasi,
                chalit_house: chalit,
                shift: classify_shift(longitude, rasi, chalit, cusps),
                house_fraction: arc_fraction(cusps.begin(chalit), cusps.end(chalit), longitude),
            }
        })
        .collect()
}

/// Two planets sitting close together inside one Chalit house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePair {
    pub first: Planet,
    pub second: Planet,
    pub house: u8,
    pub separation_deg: u32,
}

/// Every pair of planets within `orb_deg` of each other in the same house,
/// ordered by house and then by position inside it.
pub fn close_pairs(placements: &[PlanetPlacement], orb_deg: f64) -> Vec<ClosePair> {
    let mut pairs = Vec::new();
    for house in 1..=12u8 {
        let mut members: Vec<&PlanetPlacement> =
            placements.iter().filter(|p| p.chalit_house == house).collect();
        members.sort_by(|a, b| a.house_fraction.total_cmp(&b.house_fraction));

        for (i, first) in members.iter().enumerate() {
            for second in &members[i + 1..] {
                let gap = separation(first.longitude, second.longitude);
                if gap <= orb_deg {
                    pairs.push(ClosePair {
                        first: first.planet,
                        second: second.planet,
                        house,
                        separation_deg: gap.round() as u32,
                    });
                }
            }
        }
    }
    pairs
}
