pub mod adapter;
pub mod ayanamsa;
pub mod source;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use source::{EphemerisError, EphemerisSource, DEFAULT_MAX_JD, DEFAULT_MIN_JD};
pub use types::{
    julian_day_ut, AyanamsaMode, BirthMoment, GeoLocation, HouseSystem, TropicalHouses,
    TropicalLongitudes,
};
