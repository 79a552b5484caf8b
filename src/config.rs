use std::fs;
use std::path::PathBuf;
use chrono_tz::Tz;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

#[derive(Deserialize)]
#[serde(default)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub timezone: Tz,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            lat: 47.588993,
            lon: -122.306286,
            timezone: chrono_tz::US::Pacific,
        }
    }
}

#[derive(Deserialize)]
pub struct OpenWeather {
    pub api_key: String,
    #[serde(default = "default_open_weather_endpoint")]
    pub endpoint: String,
}

#[derive(Deserialize)]
pub struct Pushover {
    pub user_key: String,
    pub api_token: String,
    #[serde(default = "default_pushover_endpoint")]
    pub endpoint: String,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Report {
    pub title: String,
    pub chart_path: String,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            title: "Do you need to Spritz that Shit?".to_string(),
            chart_path: "~/projects/spritz/rain.png".to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LevelFilter::Info,
            log_to_stdout: true,
        }
    }
}

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub location: Location,
    pub open_weather: OpenWeather,
    pub pushover: Pushover,
    #[serde(default)]
    pub report: Report,
    #[serde(default)]
    pub general: General,
}

fn default_open_weather_endpoint() -> String {
    "http://api.openweathermap.org/data/2.5/onecall/timemachine".to_string()
}

fn default_pushover_endpoint() -> String {
    "https://api.pushover.net/1/messages.json".to_string()
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(expand_tilde(config_path))
        .map_err(|e| ConfigError::ReadError(format!("{}: {}", config_path, e)))?;

    parse_config(&toml)
}

/// Parses configuration from a TOML document
///
/// # Arguments
///
/// * 'toml' - the configuration document
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    Ok(config)
}

/// Expands a leading '~' to the home directory of the current user.
/// Paths without a leading '~', or when no home directory can be found, are returned as is.
///
/// # Arguments
///
/// * 'path' - the path to expand
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Error depicting errors that occur while loading the configuration
///
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ReadError: {0}")]
    ReadError(String),
    #[error("ParseError: {0}")]
    ParseError(#[from] toml::de::Error),
}
