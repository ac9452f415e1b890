mod common;

use common::{sample_moment, FixedEphemeris};
use kundali::houses::ShiftDirection;
use kundali::vedic::ChartKind;
use kundali::{compute_chart, ChartConfig, ChartError, Planet, Sign};

#[test]
fn test_sidereal_positions_and_lagna() {
    let source = FixedEphemeris::sample();
    let chart = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap();

    assert_eq!(chart.ayanamsa, 24.0);
    assert!((chart.positions.longitude(Planet::Sun) - 10.0).abs() < 1e-9);
    assert!((chart.positions.longitude(Planet::Venus) - 338.0).abs() < 1e-9);
    assert!((chart.positions.longitude(Planet::Ketu) - 322.0).abs() < 1e-9);
    assert_eq!(chart.lagna, Sign::Leo);
    assert_eq!(chart.navamsa_lagna, Sign::Taurus);
}

#[test]
fn test_rasi_and_chalit_houses() {
    let source = FixedEphemeris::sample();
    let chart = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap();

    assert_eq!(chart.rasi_house(Planet::Sun), Some(9));
    assert_eq!(chart.chalit_house(Planet::Sun), Some(9));
    assert_eq!(chart.rasi_house(Planet::Mars), Some(6));
    assert_eq!(chart.rasi_house(Planet::Jupiter), Some(12));
    assert_eq!(chart.chalit_house(Planet::Jupiter), Some(12));

    let saturn = chart.placement(Planet::Saturn).unwrap();
    assert_eq!((saturn.rasi_house, saturn.chalit_house), (3, 4));
    let shift = saturn.shift.unwrap();
    assert_eq!(shift.direction, ShiftDirection::Forward);
    assert_eq!(shift.degrees, 5);

    let rahu = chart.placement(Planet::Rahu).unwrap();
    assert_eq!((rahu.rasi_house, rahu.chalit_house), (1, 2));
    assert_eq!(rahu.shift.unwrap().degrees, 2);

    assert!(chart.placement(Planet::Sun).unwrap().shift.is_none());
}

#[test]
fn test_cusps_partition_and_table() {
    let source = FixedEphemeris::sample();
    let chart = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap();

    let total: f64 = (1..=12).map(|h| chart.cusps.arc(h)).sum();
    assert!((total - 360.0).abs() < 1e-6);
    assert!((chart.cusps.begin(1) - 110.0).abs() < 1e-9);
    assert!((chart.cusps.mid(1) - 125.0).abs() < 1e-9);

    assert_eq!(chart.chalit_table.len(), 12);
    assert_eq!(chart.chalit_table[0].begin_sign, Sign::Cancer);
    assert_eq!(chart.chalit_table[0].begin_dms, "20.00.00");
    assert_eq!(chart.chalit_table[0].mid_dms, "05.00.00");
}

#[test]
fn test_close_pairs_in_ninth_house() {
    let source = FixedEphemeris::sample();
    let chart = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap();

    let ninth: Vec<_> = chart.close_pairs.iter().filter(|p| p.house == 9).collect();
    assert_eq!(ninth.len(), 2);
    assert_eq!((ninth[0].first, ninth[0].second), (Planet::Sun, Planet::Moon));
    assert_eq!(ninth[0].separation_deg, 5);
    assert_eq!((ninth[1].first, ninth[1].second), (Planet::Moon, Planet::Mercury));
    assert_eq!(ninth[1].separation_deg, 3);
}

#[test]
fn test_dignities_in_both_charts() {
    let source = FixedEphemeris::sample();
    let chart = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap();

    assert!(chart.dignities.get(Planet::Sun, ChartKind::Rasi).exalted);
    assert!(chart.dignities.get(Planet::Mercury, ChartKind::Rasi).combust);
    assert!(chart.dignities.get(Planet::Moon, ChartKind::Rasi).combust);
    assert!(chart.dignities.get(Planet::Saturn, ChartKind::Rasi).exalted);
    assert!(chart.dignities.get(Planet::Venus, ChartKind::Navamsa).debilitated);
    assert!(!chart.dignities.get(Planet::Rahu, ChartKind::Rasi).combust);
}

#[test]
fn test_same_sign_combustion_gate() {
    let source = FixedEphemeris::sample();
    let config = ChartConfig {
        combust_same_sign: true,
        ..ChartConfig::default()
    };
    let chart = compute_chart(&sample_moment(), &config, &source).unwrap();
    // Mercury shares Aries with the Sun, so the gate keeps it combust.
    assert!(chart.dignities.get(Planet::Mercury, ChartKind::Rasi).combust);
}

#[test]
fn test_dasha_starts_with_venus() {
    let source = FixedEphemeris::sample();
    let chart = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap();

    assert_eq!(chart.dasha.balance.lord, Planet::Venus);
    assert_eq!(chart.dasha.periods[0].start, sample_moment().utc());
    assert_eq!(chart.nakshatras[&Planet::Moon].name, "Bharani");
}

#[test]
fn test_out_of_range_rejected_before_adapter_call() {
    let mut source = FixedEphemeris::sample();
    source.range = 2_500_000.0..=2_600_000.0;
    let err = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap_err();
    assert!(matches!(err, ChartError::OutOfRange { .. }));
    assert_eq!(source.call_count(), 0);
}

#[test]
fn test_adapter_failure_propagates() {
    let mut source = FixedEphemeris::sample();
    source.fail_houses = true;
    let err = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap_err();
    assert!(matches!(err, ChartError::Ephemeris(_)));
}

#[test]
fn test_missing_body_is_error() {
    let mut source = FixedEphemeris::sample();
    source.longitudes.remove(&Planet::Moon);
    let err = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap_err();
    assert!(matches!(err, ChartError::MissingBody { planet: Planet::Moon }));
}

#[test]
fn test_non_finite_ayanamsa_rejected() {
    let mut source = FixedEphemeris::sample();
    source.ayanamsa = f64::NAN;
    let err = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap_err();
    assert!(matches!(err, ChartError::NonFinite { .. }));
}

#[test]
fn test_chart_serializes_to_json() {
    let source = FixedEphemeris::sample();
    let chart = compute_chart(&sample_moment(), &ChartConfig::default(), &source).unwrap();
    let json = serde_json::to_value(&chart).unwrap();

    assert_eq!(json["lagna"], "leo");
    assert_eq!(json["positions"]["sun"], 10.0);
    assert_eq!(json["dignities"]["sun"]["rasi"]["exalted"], true);
    assert_eq!(json["chalitTable"][0]["bhava"], 1);
    assert_eq!(json["dasha"]["periods"][0]["lord"], "venus");
}
