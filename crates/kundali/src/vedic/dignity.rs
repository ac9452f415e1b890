//! Dignity flags for the rasi (D1) and navamsa (D9) charts.

use serde::{Serialize, Serializer};

use crate::chart::ChartConfig;
use crate::sidereal::SiderealPositions;
use crate::vedic::vargas::navamsa_sign;
use crate::zodiac::{separation, Planet, Sign, ALL_PLANETS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Rasi,
    Navamsa,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DignityFlags {
    pub own_sign: bool,
    pub exalted: bool,
    pub debilitated: bool,
    pub combust: bool,
    pub vargottama: bool,
}

pub fn own_signs(planet: Planet) -> &'static [Sign] {
    match planet {
        Planet::Sun => &[Sign::Leo],
        Planet::Moon => &[Sign::Cancer],
        Planet::Mars => &[Sign::Aries, Sign::Scorpio],
        Planet::Mercury => &[Sign::Gemini, Sign::Virgo],
        Planet::Jupiter => &[Sign::Sagittarius, Sign::Pisces],
        Planet::Venus => &[Sign::Taurus, Sign::Libra],
        Planet::Saturn => &[Sign::Capricorn, Sign::Aquarius],
        Planet::Rahu | Planet::Ketu => &[],
    }
}

pub fn exaltation_sign(planet: Planet) -> Option<Sign> {
    match planet {
        Planet::Sun => Some(Sign::Aries),
        Planet::Moon => Some(Sign::Taurus),
        Planet::Mars => Some(Sign::Capricorn),
        Planet::Mercury => Some(Sign::Virgo),
        Planet::Jupiter => Some(Sign::Cancer),
        Planet::Venus => Some(Sign::Pisces),
        Planet::Saturn => Some(Sign::Libra),
        Planet::Rahu | Planet::Ketu => None,
    }
}

/// Always the sign opposite exaltation.
pub fn debilitation_sign(planet: Planet) -> Option<Sign> {
    exaltation_sign(planet).map(|sign| sign.offset(6))
}

/// Maximum distance from the Sun, in degrees, at which a planet is combust.
/// The Sun and the nodes have none.
pub fn combustion_orb(planet: Planet) -> Option<f64> {
    match planet {
        Planet::Moon => Some(12.0),
        Planet::Mars => Some(17.0),
        Planet::Mercury => Some(12.0),
        Planet::Jupiter => Some(11.0),
        Planet::Venus => Some(10.0),
        Planet::Saturn => Some(15.0),
        Planet::Sun | Planet::Rahu | Planet::Ketu => None,
    }
}

/// Rasi combustion: within the orb of the Sun, inclusive. With
/// `same_sign` set the planet must also share the Sun's sign.
pub fn is_combust_rasi(
    planet: Planet,
    longitude: f64,
    sun_longitude: f64,
    same_sign: bool,
) -> bool {
    let Some(orb) = combustion_orb(planet) else {
        return false;
    };
    if separation(longitude, sun_longitude) > orb {
        return false;
    }
    !same_sign || Sign::from_longitude(longitude) == Sign::from_longitude(sun_longitude)
}

/// Navamsa combustion: same navamsa sign as the Sun. No orb applies.
pub fn is_combust_navamsa(planet: Planet, longitude: f64, sun_longitude: f64) -> bool {
    if planet == Planet::Sun || planet.is_node() {
        return false;
    }
    navamsa_sign(longitude) == navamsa_sign(sun_longitude)
}

/// Evaluate one planet in one chart.
pub fn dignity(
    planet: Planet,
    kind: ChartKind,
    positions: &SiderealPositions,
    config: &ChartConfig,
) -> DignityFlags {
    let longitude = positions.longitude(planet);
    let sun = positions.longitude(Planet::Sun);
    let rasi = Sign::from_longitude(longitude);
    let navamsa = navamsa_sign(longitude);

    let (sign, combust) = match kind {
        ChartKind::Rasi => (
            rasi,
            is_combust_rasi(planet, longitude, sun, config.combust_same_sign),
        ),
        ChartKind::Navamsa => (navamsa, is_combust_navamsa(planet, longitude, sun)),
    };

    DignityFlags {
        own_sign: own_signs(planet).contains(&sign),
        exalted: exaltation_sign(planet) == Some(sign),
        debilitated: debilitation_sign(planet) == Some(sign),
        combust,
        vargottama: rasi == navamsa,
    }
}

/// Flags for every planet in both charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DignityTable {
    rasi: [DignityFlags; 9],
    navamsa: [DignityFlags; 9],
}

impl DignityTable {
    pub fn evaluate(positions: &SiderealPositions, config: &ChartConfig) -> Self {
        let rasi = ALL_PLANETS.map(|p| dignity(p, ChartKind::Rasi, positions, config));
        let navamsa = ALL_PLANETS.map(|p| dignity(p, ChartKind::Navamsa, positions, config));
        Self { rasi, navamsa }
    }

    pub fn get(&self, planet: Planet, kind: ChartKind) -> DignityFlags {
        match kind {
            ChartKind::Rasi => self.rasi[planet.index()],
            ChartKind::Navamsa => self.navamsa[planet.index()],
        }
    }
}

#[derive(Serialize)]
struct DignityEntry {
    rasi: DignityFlags,
    navamsa: DignityFlags,
}

impl Serialize for DignityTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(ALL_PLANETS.iter().map(|p| {
            (
                *p,
                DignityEntry {
                    rasi: self.rasi[p.index()],
                    navamsa: self.navamsa[p.index()],
                },
            )
        }))
    }
}
