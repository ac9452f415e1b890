pub mod dashas;
pub mod dignity;
pub mod nakshatra;
pub mod vargas;

pub use dashas::{
    birth_balance, compute_vimshottari, subdivide, vimshottari_years, DashaBalance, DashaLevel,
    DashaPeriod, VimshottariTimeline,
};
pub use dignity::{ChartKind, DignityFlags, DignityTable};
pub use nakshatra::{nakshatra_for_longitude, NakshatraPlacement};
pub use vargas::{is_vargottama, navamsa_house, navamsa_longitude, navamsa_sign};
