use chrono::{Duration, TimeZone, Utc};
use kundali::vedic::dashas::{DEFAULT_HORIZON_YEARS, VIMSHOTTARI_YEAR_DAYS};
use kundali::vedic::nakshatra::NAKSHATRA_SEGMENT_SIZE;
use kundali::vedic::{birth_balance, compute_vimshottari, subdivide, vimshottari_years, DashaLevel};
use kundali::Planet;

#[test]
fn test_first_balance_on_every_boundary_is_full() {
    for index in 0..27usize {
        let lon = index as f64 * NAKSHATRA_SEGMENT_SIZE;
        let balance = birth_balance(lon).unwrap();
        assert_eq!(balance.nakshatra_index, index);
        let full = vimshottari_years(balance.lord) * VIMSHOTTARI_YEAR_DAYS;
        assert!((balance.balance_days - full).abs() < 1e-6, "index {index}");
    }
}

#[test]
fn test_ketu_start_in_ashwini() {
    let birth = Utc.with_ymd_and_hms(1985, 1, 1, 0, 0, 0).unwrap();
    let timeline = compute_vimshottari(birth, 0.0, DEFAULT_HORIZON_YEARS).unwrap();
    let lords: Vec<Planet> = timeline.periods.iter().map(|p| p.lord).collect();
    assert_eq!(
        &lords[..4],
        &[Planet::Ketu, Planet::Venus, Planet::Sun, Planet::Moon]
    );
    assert!((timeline.periods[0].duration_days - 7.0 * VIMSHOTTARI_YEAR_DAYS).abs() < 1e-9);
}

#[test]
fn test_subdivide_is_reusable_on_any_level() {
    let birth = Utc.with_ymd_and_hms(1985, 1, 1, 0, 0, 0).unwrap();
    let timeline = compute_vimshottari(birth, 200.0, DEFAULT_HORIZON_YEARS).unwrap();
    let antar = &timeline.periods[1].children[3];
    let again = subdivide(antar).unwrap();
    assert_eq!(again, antar.children);
    assert!(subdivide(&antar.children[0]).unwrap().is_empty());
    assert_eq!(again[0].level, DashaLevel::Pratyantardasha);
}

#[test]
fn test_upcoming_query_does_not_mutate() {
    let birth = Utc.with_ymd_and_hms(1985, 1, 1, 0, 0, 0).unwrap();
    let timeline = compute_vimshottari(birth, 123.4, DEFAULT_HORIZON_YEARS).unwrap();
    let snapshot = timeline.clone();
    let now = birth + Duration::days(20 * 365);
    let first = timeline.upcoming_antardashas(now, Duration::days(730)).len();
    let second = timeline.upcoming_antardashas(now, Duration::days(730)).len();
    assert_eq!(first, second);
    assert_eq!(timeline, snapshot);
}
