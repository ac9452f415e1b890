use kundali::ChartConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SEARCH_PATHS: [&str; 2] = ["configs/kundali.toml", "../../configs/kundali.toml"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KundaliSettings {
    pub chart: ChartConfig,
    /// Swiss Ephemeris data directory. `None` leaves the choice to the
    /// adapter (`SWISS_EPHEMERIS_PATH`, then the system default).
    pub ephemeris_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartConfig>,
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
}

/// Try the common relative paths for `configs/kundali.toml`. `Ok(None)`
/// when none exists.
pub fn read_config_toml_text() -> anyhow::Result<Option<String>> {
    for p in &CONFIG_SEARCH_PATHS {
        match fs::read_to_string(p) {
            Ok(text) => return Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => anyhow::bail!("Could not read {p}: {e}"),
        }
    }
    Ok(None)
}

pub fn parse_settings(text: &str) -> anyhow::Result<KundaliSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse kundali.toml: {e}"))?;
    let chart = root.chart.unwrap_or_default();
    chart
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [chart] section: {e}"))?;

    let ephemeris_path = root.ephemeris.unwrap_or_default().path;
    if let Some(path) = &ephemeris_path {
        if !path.exists() {
            anyhow::bail!("ephemeris.path does not exist: {}", path.display());
        }
    }

    Ok(KundaliSettings {
        chart,
        ephemeris_path,
    })
}

/// Load settings from an explicit file, or from the conventional
/// locations. Without any file the defaults apply.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<KundaliSettings> {
    let text = match path {
        Some(p) => Some(
            fs::read_to_string(p)
                .map_err(|e| anyhow::anyhow!("Could not load {}: {e}", p.display()))?,
        ),
        None => read_config_toml_text()?,
    };
    match text {
        Some(text) => parse_settings(&text),
        None => Ok(KundaliSettings::default()),
    }
}
