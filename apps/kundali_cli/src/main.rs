use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use clap::Parser;
use kundali::vedic::DashaPeriod;
use kundali::{compute_chart, BirthMoment, Chart, GeoLocation, SwissEphemerisAdapter};
use serde::Serialize;
use std::path::PathBuf;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

#[derive(Parser, Debug)]
#[command(name = "kundali", author, version, about)]
struct Args {
    /// Local birth date-time, e.g. 1990-05-17T10:30:00.
    #[arg(long)]
    datetime: String,

    /// UTC offset of the local time in hours (e.g. 5.5, -4).
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: f64,

    /// Latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Config file (default: configs/kundali.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Swiss Ephemeris data directory; overrides the config file.
    #[arg(long)]
    ephemeris_path: Option<PathBuf>,

    /// Window for the upcoming antardasha listing, counted from now.
    #[arg(long, default_value_t = 365)]
    upcoming_days: i64,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    chart: &'a Chart,
    generated_at: DateTime<Utc>,
    upcoming_antardashas: Vec<PeriodSummary>,
    active_periods: Vec<PeriodSummary>,
}

/// A dasha period without its nested children.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PeriodSummary {
    lord: kundali::Planet,
    level: kundali::vedic::DashaLevel,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_days: f64,
}

impl From<&DashaPeriod> for PeriodSummary {
    fn from(p: &DashaPeriod) -> Self {
        Self {
            lord: p.lord,
            level: p.level,
            start: p.start,
            end: p.end,
            duration_days: p.duration_days,
        }
    }
}

fn parse_local_datetime(text: &str) -> anyhow::Result<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text.trim(), fmt).ok())
        .ok_or_else(|| {
            anyhow::anyhow!("Could not parse --datetime {text:?}; expected one of {DATETIME_FORMATS:?}")
        })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = kundali_config::load_settings(args.config.as_deref())?;
    let local = parse_local_datetime(&args.datetime)?;
    let location = GeoLocation::new(args.lat, args.lon)?;
    let moment = BirthMoment::from_local(local, args.utc_offset, location)?;
    log::debug!("birth moment {} UTC, JD {:.6}", moment.utc(), moment.julian_day_ut());

    let ephemeris_path = args.ephemeris_path.or(settings.ephemeris_path);
    let adapter = SwissEphemerisAdapter::new(ephemeris_path)
        .context("Swiss Ephemeris is not available")?;
    let chart = compute_chart(&moment, &settings.chart, &adapter)?;

    let now = Utc::now();
    let window = Duration::days(args.upcoming_days.clamp(0, 200 * 366));
    let report = Report {
        chart: &chart,
        generated_at: now,
        upcoming_antardashas: chart
            .dasha
            .upcoming_antardashas(now, window)
            .into_iter()
            .map(PeriodSummary::from)
            .collect(),
        active_periods: chart.dasha.active_at(now).into_iter().map(PeriodSummary::from).collect(),
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
