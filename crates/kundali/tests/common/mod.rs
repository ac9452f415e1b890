#![allow(dead_code)]

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use kundali::ephemeris::{
    AyanamsaMode, BirthMoment, EphemerisError, EphemerisSource, GeoLocation, HouseSystem,
    TropicalHouses, TropicalLongitudes, DEFAULT_MAX_JD, DEFAULT_MIN_JD,
};
use kundali::Planet;

pub const AYANAMSA: f64 = 24.0;

/// In-memory ephemeris answering with canned tropical values.
pub struct FixedEphemeris {
    pub longitudes: TropicalLongitudes,
    pub houses: TropicalHouses,
    pub ayanamsa: f64,
    pub range: RangeInclusive<f64>,
    pub fail_houses: bool,
    pub calls: AtomicUsize,
}

impl FixedEphemeris {
    /// Sidereal layout (after subtracting 24°):
    /// lagna 5° Leo, Sun 10° Aries, Moon 15° Aries, Mercury 18° Aries,
    /// Mars 280°, Jupiter 95°, Venus 338°, Saturn 205°, Rahu 142°.
    pub fn sample() -> Self {
        let sidereal = [
            (Planet::Sun, 10.0),
            (Planet::Moon, 15.0),
            (Planet::Mars, 280.0),
            (Planet::Mercury, 18.0),
            (Planet::Jupiter, 95.0),
            (Planet::Venus, 338.0),
            (Planet::Saturn, 205.0),
            (Planet::Rahu, 142.0),
        ];
        let longitudes = sidereal
            .iter()
            .map(|(p, lon)| (*p, (lon + AYANAMSA) % 360.0))
            .collect();

        // Equal 30° houses with mids at 5° of each sign from Leo onwards.
        let cusps: [f64; 12] =
            std::array::from_fn(|i| (125.0 + 30.0 * i as f64 + AYANAMSA) % 360.0);

        Self {
            longitudes,
            houses: TropicalHouses {
                cusps,
                ascendant: (125.0 + AYANAMSA) % 360.0,
            },
            ayanamsa: AYANAMSA,
            range: DEFAULT_MIN_JD..=DEFAULT_MAX_JD,
            fail_houses: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EphemerisSource for FixedEphemeris {
    fn supported_range(&self) -> RangeInclusive<f64> {
        self.range.clone()
    }

    fn tropical_longitudes(&self, _jd_ut: f64) -> Result<TropicalLongitudes, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.longitudes.clone())
    }

    fn tropical_house_cusps(
        &self,
        _jd_ut: f64,
        _lat: f64,
        _lon: f64,
        _system: HouseSystem,
    ) -> Result<TropicalHouses, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_houses {
            return Err(EphemerisError::HouseCalculationFailed {
                message: "polar latitude".to_string(),
            });
        }
        Ok(self.houses)
    }

    fn ayanamsa(&self, _jd_ut: f64, _mode: AyanamsaMode) -> Result<f64, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.ayanamsa)
    }
}

pub fn sample_moment() -> BirthMoment {
    let local = NaiveDate::from_ymd_opt(1990, 5, 17)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    BirthMoment::from_local(local, 5.5, GeoLocation::new(28.6139, 77.2090).unwrap()).unwrap()
}
