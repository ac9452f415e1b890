//! Sidereal chart engine: sidereal correction, Chalit houses, dignities and
//! the Vimshottari dasha timeline, computed over a pluggable ephemeris.

pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod sidereal;
pub mod vedic;
pub mod zodiac;

pub use chart::{compute_chart, Chart, ChartConfig};
pub use ephemeris::{
    AyanamsaMode, BirthMoment, EphemerisError, EphemerisSource, GeoLocation, HouseSystem,
    SwissEphemerisAdapter,
};
pub use error::ChartError;
pub use zodiac::{Planet, Sign};
