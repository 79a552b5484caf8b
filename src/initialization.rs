use std::env;
use log::info;
use thiserror::Error;
use crate::config::{load_config, Config, ConfigError};
use crate::logging::{setup_logger, LoggerError};
use crate::manager_open_weather::{OpenWeather, WeatherError};
use crate::manager_pushover::{Pushover, PushoverError};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub struct Mgr {
    pub weather: OpenWeather,
    pub pushover: Pushover,
}

/// Initializes and returns configuration and a Mgr struct holding the initialized clients
///
pub fn init() -> Result<(Config, Mgr), InitializationError> {
    let args: Vec<String> = env::args().collect();
    let config_path = config_path(&args);

    // Load configuration
    let config = load_config(config_path)?;

    // Setup logging
    let _ = setup_logger(config.general.log_path.as_deref(), config.general.log_level, config.general.log_to_stdout)?;

    // Print version
    info!("starting spritz version: {}", env!("CARGO_PKG_VERSION"));

    // Instantiate structs
    let weather = OpenWeather::new(&config.open_weather, &config.location)?;
    let pushover = Pushover::new(&config.pushover)?;

    let mgr = Mgr {
        weather,
        pushover,
    };

    Ok((config, mgr))
}

/// Returns the config path given as '--config=<path>', or the default in the working directory
///
/// # Arguments
///
/// * 'args' - command line arguments
fn config_path(args: &[String]) -> &str {
    args.iter()
        .find_map(|a| a.strip_prefix("--config="))
        .unwrap_or(DEFAULT_CONFIG_PATH)
}

/// Error depicting errors that occur while initializing
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] ConfigError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("WeatherSetupError: {0}")]
    WeatherSetupError(#[from] WeatherError),
    #[error("PushoverSetupError: {0}")]
    PushoverSetupError(#[from] PushoverError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_defaults_to_working_directory() {
        let args = vec!["spritz".to_string()];
        assert_eq!(config_path(&args), "config.toml");
    }

    #[test]
    fn config_path_from_argument() {
        let args = vec!["spritz".to_string(), "--config=/etc/spritz.toml".to_string()];
        assert_eq!(config_path(&args), "/etc/spritz.toml");
    }
}
