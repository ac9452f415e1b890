//! Vimshottari dasha calculations for Vedic astrology.
//!
//! Dashas are time periods ruled by planets, calculated based on the Moon's
//! nakshatra. Each level is split into nine sub-periods, starting from the
//! parent's own lord and proportional to each lord's share of 120 years.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::ChartError;
use crate::vedic::nakshatra::nakshatra_for_longitude;
use crate::zodiac::{normalize_degrees, Planet};

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.2422;
pub const DEFAULT_HORIZON_YEARS: f64 = 100.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

impl DashaLevel {
    pub const fn child(self) -> Option<DashaLevel> {
        match self {
            DashaLevel::Mahadasha => Some(DashaLevel::Antardasha),
            DashaLevel::Antardasha => Some(DashaLevel::Pratyantardasha),
            DashaLevel::Pratyantardasha => None,
        }
    }
}

const VIMSHOTTARI_SEQUENCE: [(Planet, f64); 9] = [
    (Planet::Ketu, 7.0),
    (Planet::Venus, 20.0),
    (Planet::Sun, 6.0),
    (Planet::Moon, 10.0),
    (Planet::Mars, 7.0),
    (Planet::Rahu, 18.0),
    (Planet::Jupiter, 16.0),
    (Planet::Saturn, 19.0),
    (Planet::Mercury, 17.0),
];

fn sequence_index(lord: Planet) -> usize {
    match lord {
        Planet::Ketu => 0,
        Planet::Venus => 1,
        Planet::Sun => 2,
        Planet::Moon => 3,
        Planet::Mars => 4,
        Planet::Rahu => 5,
        Planet::Jupiter => 6,
        Planet::Saturn => 7,
        Planet::Mercury => 8,
    }
}

/// Years allotted to a lord in the 120-year cycle.
pub fn vimshottari_years(lord: Planet) -> f64 {
    VIMSHOTTARI_SEQUENCE[sequence_index(lord)].1
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaPeriod {
    pub lord: Planet,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_days: f64,
    pub level: DashaLevel,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DashaPeriod>,
}

impl DashaPeriod {
    /// Start inclusive, end exclusive.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn offset_by_days(start: DateTime<Utc>, days: f64) -> Result<DateTime<Utc>, ChartError> {
    let millis = (days * MILLIS_PER_DAY).round();
    if !millis.is_finite() {
        return Err(ChartError::NonFinite { value: days });
    }
    start
        .checked_add_signed(Duration::milliseconds(millis as i64))
        .ok_or_else(|| ChartError::InvalidMoment {
            message: format!("{start} plus {days} days is out of range"),
        })
}

/// Split a period into its nine children. Returns an empty list at the
/// deepest level.
///
/// Child durations are exact fractions of the parent's `duration_days`;
/// the last child's end is pinned to the parent's end so millisecond
/// rounding never leaves a gap.
pub fn subdivide(parent: &DashaPeriod) -> Result<Vec<DashaPeriod>, ChartError> {
    let Some(level) = parent.level.child() else {
        return Ok(Vec::new());
    };

    let first = sequence_index(parent.lord);
    let mut children = Vec::with_capacity(VIMSHOTTARI_SEQUENCE.len());
    let mut elapsed_days = 0.0;
    let mut start = parent.start;

    for offset in 0..VIMSHOTTARI_SEQUENCE.len() {
        let (lord, years) = VIMSHOTTARI_SEQUENCE[(first + offset) % VIMSHOTTARI_SEQUENCE.len()];
        let duration_days = parent.duration_days * years / VIMSHOTTARI_TOTAL_YEARS;
        elapsed_days += duration_days;
        let end = if offset + 1 == VIMSHOTTARI_SEQUENCE.len() {
            parent.end
        } else {
            offset_by_days(parent.start, elapsed_days)?
        };

        children.push(DashaPeriod {
            lord,
            start,
            end,
            duration_days,
            level,
            children: Vec::new(),
        });
        start = end;
    }

    Ok(children)
}

fn populate(period: &mut DashaPeriod) -> Result<(), ChartError> {
    period.children = subdivide(period)?;
    for child in &mut period.children {
        populate(child)?;
    }
    Ok(())
}

/// Portion of the first mahadasha still to run at birth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaBalance {
    pub nakshatra_index: usize,
    pub nakshatra: &'static str,
    pub lord: Planet,
    pub elapsed_fraction: f64,
    pub balance_days: f64,
}

pub fn birth_balance(moon_longitude: f64) -> Result<DashaBalance, ChartError> {
    let moon = normalize_degrees(moon_longitude)?;
    let nakshatra = nakshatra_for_longitude(moon);
    let balance_years = vimshottari_years(nakshatra.lord) * (1.0 - nakshatra.progress);
    Ok(DashaBalance {
        nakshatra_index: nakshatra.index,
        nakshatra: nakshatra.name,
        lord: nakshatra.lord,
        elapsed_fraction: nakshatra.progress,
        balance_days: balance_years * VIMSHOTTARI_YEAR_DAYS,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VimshottariTimeline {
    pub birth: DateTime<Utc>,
    pub horizon_end: DateTime<Utc>,
    pub balance: DashaBalance,
    pub periods: Vec<DashaPeriod>,
}

/// Build the three-level timeline from the Moon's sidereal longitude.
///
/// The first mahadasha carries the birth balance; later ones run for their
/// full allotment until `horizon_years` is reached, and the last one is cut
/// at the horizon. Sub-periods always divide the segment actually present.
pub fn compute_vimshottari(
    birth: DateTime<Utc>,
    moon_longitude: f64,
    horizon_years: f64,
) -> Result<VimshottariTimeline, ChartError> {
    if !horizon_years.is_finite() || horizon_years <= 0.0 {
        return Err(ChartError::InvalidConfig {
            message: format!("dasha horizon must be positive, got {horizon_years}"),
        });
    }

    let balance = birth_balance(moon_longitude)?;
    let horizon_days = horizon_years * VIMSHOTTARI_YEAR_DAYS;
    let horizon_end = offset_by_days(birth, horizon_days)?;
    log::debug!(
        "vimshottari from {} ({}, {:.2} days left), horizon {}",
        balance.lord, balance.nakshatra, balance.balance_days, horizon_end
    );

    let mut periods: Vec<DashaPeriod> = Vec::new();
    let mut index = sequence_index(balance.lord);
    let mut elapsed_days = 0.0;
    let mut start = birth;

    loop {
        let (lord, years) = VIMSHOTTARI_SEQUENCE[index % VIMSHOTTARI_SEQUENCE.len()];
        let allotted = if periods.is_empty() {
            balance.balance_days
        } else {
            years * VIMSHOTTARI_YEAR_DAYS
        };
        let remaining = horizon_days - elapsed_days;
        let truncated = allotted >= remaining;
        let duration_days = if truncated { remaining } else { allotted };
        elapsed_days += duration_days;
        let end = if truncated {
            horizon_end
        } else {
            offset_by_days(birth, elapsed_days)?
        };

        let mut period = DashaPeriod {
            lord,
            start,
            end,
            duration_days,
            level: DashaLevel::Mahadasha,
            children: Vec::new(),
        };
        populate(&mut period)?;
        periods.push(period);

        if truncated {
            break;
        }
        start = end;
        index += 1;
    }

    Ok(VimshottariTimeline {
        birth,
        horizon_end,
        balance,
        periods,
    })
}

impl VimshottariTimeline {
    pub fn antardashas(&self) -> impl Iterator<Item = &DashaPeriod> {
        self.periods.iter().flat_map(|maha| maha.children.iter())
    }

    /// Antardashas ending within `[now, now + window]`, ordered by end.
    pub fn upcoming_antardashas(&self, now: DateTime<Utc>, window: Duration) -> Vec<&DashaPeriod> {
        let until = now.checked_add_signed(window);
        let mut upcoming: Vec<&DashaPeriod> = self
            .antardashas()
            .filter(|p| p.end >= now && until.map_or(true, |u| p.end <= u))
            .collect();
        upcoming.sort_by_key(|p| p.end);
        upcoming
    }

    /// The mahadasha, antardasha and pratyantardasha running at `instant`,
    /// outermost first. Empty outside the timeline.
    pub fn active_at(&self, instant: DateTime<Utc>) -> Vec<&DashaPeriod> {
        let mut chain = Vec::new();
        let mut level: &[DashaPeriod] = &self.periods;
        while let Some(period) = level.iter().find(|p| p.contains(instant)) {
            chain.push(period);
            level = period.children.as_slice();
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vedic::nakshatra::NAKSHATRA_SEGMENT_SIZE;
    use chrono::TimeZone;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1990, 5, 17, 5, 0, 0).unwrap()
    }

    #[test]
    fn sequence_totals_120_years() {
        let total: f64 = VIMSHOTTARI_SEQUENCE.iter().map(|(_, y)| y).sum();
        assert_eq!(total, VIMSHOTTARI_TOTAL_YEARS);
        assert_eq!(vimshottari_years(Planet::Venus), 20.0);
    }

    #[test]
    fn balance_for_moon_in_bharani() {
        let balance = birth_balance(15.0).unwrap();
        assert_eq!(balance.nakshatra_index, 1);
        assert_eq!(balance.lord, Planet::Venus);
        let fraction = (15.0 - NAKSHATRA_SEGMENT_SIZE) / NAKSHATRA_SEGMENT_SIZE;
        let expected = 20.0 * (1.0 - fraction) * VIMSHOTTARI_YEAR_DAYS;
        assert!((balance.balance_days - expected).abs() < 1e-6);
    }

    #[test]
    fn balance_on_boundary_is_full_allotment() {
        let balance = birth_balance(NAKSHATRA_SEGMENT_SIZE).unwrap();
        assert_eq!(balance.lord, Planet::Venus);
        assert!((balance.balance_days - 20.0 * VIMSHOTTARI_YEAR_DAYS).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(birth_balance(f64::NAN).is_err());
        assert!(compute_vimshottari(birth(), 15.0, 0.0).is_err());
        assert!(compute_vimshottari(birth(), 15.0, f64::INFINITY).is_err());
    }

    #[test]
    fn children_partition_parent() {
        let timeline = compute_vimshottari(birth(), 15.0, DEFAULT_HORIZON_YEARS).unwrap();
        for maha in &timeline.periods {
            assert_eq!(maha.children.len(), 9);
            assert_eq!(maha.children[0].lord, maha.lord);
            let sum: f64 = maha.children.iter().map(|c| c.duration_days).sum();
            assert!((sum - maha.duration_days).abs() < 1e-6);
            assert_eq!(maha.children[0].start, maha.start);
            assert_eq!(maha.children[8].end, maha.end);

            for antar in &maha.children {
                assert_eq!(antar.children.len(), 9);
                let sum: f64 = antar.children.iter().map(|c| c.duration_days).sum();
                assert!((sum - antar.duration_days).abs() < 1e-6);
                assert_eq!(antar.children[8].end, antar.end);
                assert!(antar.children.iter().all(|p| p.children.is_empty()));
                for pair in antar.children.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                }
            }
        }
    }

    #[test]
    fn timeline_stops_at_horizon() {
        let timeline = compute_vimshottari(birth(), 15.0, DEFAULT_HORIZON_YEARS).unwrap();
        let total: f64 = timeline.periods.iter().map(|p| p.duration_days).sum();
        assert!((total - DEFAULT_HORIZON_YEARS * VIMSHOTTARI_YEAR_DAYS).abs() < 1e-6);

        let first = &timeline.periods[0];
        assert_eq!(first.lord, Planet::Venus);
        assert_eq!(first.start, birth());
        assert_eq!(timeline.periods[1].lord, Planet::Sun);
        assert_eq!(timeline.periods.last().unwrap().end, timeline.horizon_end);
        for pair in timeline.periods.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn short_horizon_truncates_first_period() {
        let timeline = compute_vimshottari(birth(), 15.0, 2.0).unwrap();
        assert_eq!(timeline.periods.len(), 1);
        assert!((timeline.periods[0].duration_days - 2.0 * VIMSHOTTARI_YEAR_DAYS).abs() < 1e-9);
    }

    #[test]
    fn upcoming_antardashas_in_window() {
        let timeline = compute_vimshottari(birth(), 15.0, DEFAULT_HORIZON_YEARS).unwrap();
        let now = birth() + Duration::days(3650);
        let window = Duration::days(3 * 365);
        let upcoming = timeline.upcoming_antardashas(now, window);
        assert!(!upcoming.is_empty());
        for p in &upcoming {
            assert_eq!(p.level, DashaLevel::Antardasha);
            assert!(p.end >= now && p.end <= now + window);
        }
        for pair in upcoming.windows(2) {
            assert!(pair[0].end <= pair[1].end);
        }

        let expected = timeline
            .antardashas()
            .filter(|p| p.end >= now && p.end <= now + window)
            .count();
        assert_eq!(upcoming.len(), expected);
        assert!(timeline.upcoming_antardashas(now, Duration::days(-1)).is_empty());
    }

    #[test]
    fn active_chain_has_three_levels() {
        let timeline = compute_vimshottari(birth(), 15.0, DEFAULT_HORIZON_YEARS).unwrap();
        let instant = birth() + Duration::days(9000);
        let chain = timeline.active_at(instant);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].level, DashaLevel::Mahadasha);
        assert_eq!(chain[2].level, DashaLevel::Pratyantardasha);
        assert!(chain.iter().all(|p| p.contains(instant)));

        let before = birth() - Duration::days(1);
        assert!(timeline.active_at(before).is_empty());
    }
}
