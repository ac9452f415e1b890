//! House engines: Chalit cusp derivation and house assignment.

pub mod assignment;
pub mod chalit;

pub use assignment::{
    chalit_house, classify_shift, close_pairs, place_planets, rasi_house, ClosePair, HouseShift,
    PlanetPlacement, ShiftDirection,
};
pub use chalit::{arc_fraction, next_house, ChalitRow, HouseCusps, ARC_EPSILON};
