//! Full chart assembly: one pass from a birth moment to every derived value.

pub mod settings;

pub use settings::ChartConfig;

use std::collections::BTreeMap;

use log::{debug, info};
use serde::Serialize;

use crate::ephemeris::{BirthMoment, EphemerisSource};
use crate::error::ChartError;
use crate::houses::{
    close_pairs, place_planets, ChalitRow, ClosePair, HouseCusps, PlanetPlacement,
};
use crate::sidereal::{sidereal_longitude, SiderealPositions};
use crate::vedic::{
    compute_vimshottari, nakshatra_for_longitude, navamsa_house, navamsa_sign, DignityTable,
    NakshatraPlacement, VimshottariTimeline,
};
use crate::zodiac::{Planet, Sign};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub moment: BirthMoment,
    pub config: ChartConfig,
    pub julian_day_ut: f64,
    pub ayanamsa: f64,
    pub ascendant: f64,
    pub lagna: Sign,
    pub navamsa_lagna: Sign,
    pub positions: SiderealPositions,
    pub cusps: HouseCusps,
    pub chalit_table: Vec<ChalitRow>,
    pub placements: Vec<PlanetPlacement>,
    pub close_pairs: Vec<ClosePair>,
    pub nakshatras: BTreeMap<Planet, NakshatraPlacement>,
    pub dignities: DignityTable,
    pub dasha: VimshottariTimeline,
}

impl Chart {
    pub fn placement(&self, planet: Planet) -> Option<&PlanetPlacement> {
        self.placements.iter().find(|p| p.planet == planet)
    }

    pub fn rasi_house(&self, planet: Planet) -> Option<u8> {
        self.placement(planet).map(|p| p.rasi_house)
    }

    pub fn chalit_house(&self, planet: Planet) -> Option<u8> {
        self.placement(planet).map(|p| p.chalit_house)
    }

    /// House in the navamsa chart, counted from the navamsa lagna.
    pub fn navamsa_house(&self, planet: Planet) -> u8 {
        navamsa_house(self.positions.longitude(planet), self.ascendant)
    }
}

/// Compute a chart. The moment is checked against the source's range
/// before any ephemeris call; any source failure aborts the computation.
pub fn compute_chart(
    moment: &BirthMoment,
    config: &ChartConfig,
    source: &dyn EphemerisSource,
) -> Result<Chart, ChartError> {
    config.validate()?;

    let jd_ut = moment.julian_day_ut();
    let range = source.supported_range();
    if !range.contains(&jd_ut) {
        return Err(ChartError::OutOfRange {
            datetime: moment.utc(),
            jd_ut,
            min_jd: *range.start(),
            max_jd: *range.end(),
        });
    }

    let ayanamsa = source.ayanamsa(jd_ut, config.ayanamsa)?;
    if !ayanamsa.is_finite() {
        return Err(ChartError::NonFinite { value: ayanamsa });
    }
    debug!("JD {jd_ut:.6}: {:?} ayanamsa {ayanamsa:.6}", config.ayanamsa);

    let tropical = source.tropical_longitudes(jd_ut)?;
    let location = moment.location();
    let houses =
        source.tropical_house_cusps(jd_ut, location.lat, location.lon, config.house_system)?;

    let positions = SiderealPositions::from_tropical(&tropical, ayanamsa)?;
    let ascendant = sidereal_longitude(houses.ascendant, ayanamsa)?;
    let lagna = Sign::from_longitude(ascendant);
    let cusps = HouseCusps::from_tropical(&houses.cusps, ayanamsa)?;
    debug!("ascendant {ascendant:.6} in {lagna}, {:?} cusps", config.house_system);

    let placements = place_planets(&positions, lagna, &cusps);
    let pairs = close_pairs(&placements, config.close_pair_orb_deg);
    let nakshatras = positions
        .iter()
        .map(|(planet, lon)| (planet, nakshatra_for_longitude(lon)))
        .collect();
    let dignities = DignityTable::evaluate(&positions, config);
    let dasha = compute_vimshottari(
        moment.utc(),
        positions.longitude(Planet::Moon),
        config.dasha_horizon_years,
    )?;

    info!(
        "chart for {} computed: lagna {lagna}, {} mahadashas",
        moment.utc(),
        dasha.periods.len()
    );

    Ok(Chart {
        moment: *moment,
        config: *config,
        julian_day_ut: jd_ut,
        ayanamsa,
        ascendant,
        lagna,
        navamsa_lagna: navamsa_sign(ascendant),
        positions,
        chalit_table: cusps.table(),
        cusps,
        placements,
        close_pairs: pairs,
        nakshatras,
        dignities,
        dasha,
    })
}
