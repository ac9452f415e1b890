use std::env;
use std::path::{Path, PathBuf};

use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

use crate::ephemeris::ayanamsa::mean_ayanamsa_deg;
use crate::ephemeris::source::{EphemerisError, EphemerisSource};
use crate::ephemeris::types::{AyanamsaMode, HouseSystem, TropicalHouses, TropicalLongitudes};
use crate::zodiac::{wrap_degrees, Planet};

pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// SE_FLG_SWIEPH: read the Swiss Ephemeris data files.
const FLG_SWIEPH: i32 = 2;

// Swiss body numbers. 10 is SE_MEAN_NODE; Ketu is derived downstream.
const PLANET_IDS: &[(Planet, u32)] = &[
    (Planet::Sun, 0),
    (Planet::Moon, 1),
    (Planet::Mercury, 2),
    (Planet::Venus, 3),
    (Planet::Mars, 4),
    (Planet::Jupiter, 5),
    (Planet::Saturn, 6),
    (Planet::Rahu, 10),
];

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter. Without an explicit path the
    /// `SWISS_EPHEMERIS_PATH` variable is consulted, then the system default.
    /// Swiss keeps the data path process-wide, so the last adapter created wins.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var(EPHEMERIS_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        // The binding panics on interior NULs, so only clean UTF-8 paths pass.
        let path_str = match path.to_str() {
            Some(s) if !s.contains('\0') => s,
            _ => {
                return Err(EphemerisError::FileNotFound {
                    path: path.display().to_string(),
                    message: "Ephemeris path must be UTF-8 without NUL bytes.".to_string(),
                })
            }
        };
        set_ephe_path(path_str);

        log::debug!("swiss ephemeris data at {}", path.display());
        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    fn calc_longitude(&self, planet: Planet, code: u32, jd_ut: f64) -> Result<f64, EphemerisError> {
        let result = calc_ut(jd_ut, code, FLG_SWIEPH as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet,
                jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        // Swiss silently drops to the Moshier model when data files are
        // missing; the returned flags tell. The mean node is analytic.
        if !planet.is_node() && (result.code & FLG_SWIEPH) == 0 {
            return Err(EphemerisError::CalculationFailed {
                planet,
                jd_ut,
                message: format!(
                    "Swiss Ephemeris data unavailable under {} (flags {:#x})",
                    self.ephemeris_path.display(),
                    result.code
                ),
            });
        }

        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                planet,
                jd_ut,
                message: format!("non-finite longitude {longitude}"),
            });
        }
        Ok(wrap_degrees(longitude))
    }
}

impl EphemerisSource for SwissEphemerisAdapter {
    fn tropical_longitudes(&self, jd_ut: f64) -> Result<TropicalLongitudes, EphemerisError> {
        let mut longitudes = TropicalLongitudes::new();
        for &(planet, code) in PLANET_IDS {
            longitudes.insert(planet, self.calc_longitude(planet, code, jd_ut)?);
        }
        Ok(longitudes)
    }

    fn tropical_house_cusps(
        &self,
        jd_ut: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<TropicalHouses, EphemerisError> {
        // Swiss would fall back to Porphyry here without reporting it.
        if !system.supports_latitude(lat) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("{:?} houses are undefined at latitude {lat}", system),
            });
        }

        let (c, a) = houses_ex(jd_ut, FLG_SWIEPH, lat, lon, system.code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];

        if let Some(bad) = cusp_values
            .iter()
            .chain(std::iter::once(&ascmc.ascendant))
            .find(|v| !v.is_finite())
        {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "non-finite value {bad} for system {:?} at lat {lat}, lon {lon}",
                    system
                ),
            });
        }

        Ok(TropicalHouses {
            cusps: cusp_values.map(wrap_degrees),
            ascendant: wrap_degrees(ascmc.ascendant),
        })
    }

    fn ayanamsa(&self, jd_ut: f64, mode: AyanamsaMode) -> Result<f64, EphemerisError> {
        let value = mean_ayanamsa_deg(mode, jd_ut);
        if !value.is_finite() {
            return Err(EphemerisError::AyanamsaFailed {
                mode,
                jd_ut,
                message: format!("non-finite ayanamsa {value}"),
            });
        }
        Ok(value)
    }
}
