pub mod models;

use std::time::Duration;
use chrono::{DateTime, TimeZone};
use log::debug;
use reqwest::blocking::Client;
use thiserror::Error;
use crate::config::{Location, OpenWeather as OpenWeatherParameters};
use crate::manager_open_weather::models::DayWeather;

/// Anything that can hand out one day of hourly weather history
pub trait WeatherHistory {
    /// Returns the weather history for the day starting at the given time
    ///
    /// # Arguments
    ///
    /// * 'day_start' - local midnight of the day to get history for
    fn history<Tz: TimeZone>(&self, day_start: &DateTime<Tz>) -> Result<DayWeather, WeatherError>;
}

/// Struct for fetching weather history from OpenWeatherMap
pub struct OpenWeather {
    client: Client,
    endpoint: String,
    api_key: String,
    lat: f64,
    lon: f64,
}

impl OpenWeather {
    /// Returns an OpenWeather struct ready for fetching history
    ///
    /// # Arguments
    ///
    /// * 'config' - OpenWeatherMap credentials and endpoint
    /// * 'location' - location to fetch history for
    pub fn new(config: &OpenWeatherParameters, location: &Location) -> Result<OpenWeather, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(OpenWeather {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            lat: location.lat,
            lon: location.lon,
        })
    }

    /// Builds the query pairs for a history request
    ///
    /// # Arguments
    ///
    /// * 'timestamp' - unix timestamp of the day to request
    fn query(&self, timestamp: i64) -> Vec<(&'static str, String)> {
        vec![
            ("lat", self.lat.to_string()),
            ("lon", self.lon.to_string()),
            ("dt", timestamp.to_string()),
            ("appid", self.api_key.clone()),
        ]
    }
}

impl WeatherHistory for OpenWeather {
    fn history<Tz: TimeZone>(&self, day_start: &DateTime<Tz>) -> Result<DayWeather, WeatherError> {
        let timestamp = day_start.timestamp();
        debug!("requesting weather history for dt={}", timestamp);

        let response = self.client
            .get(&self.endpoint)
            .query(&self.query(timestamp))
            .send()?
            .error_for_status()?;

        let json = response.text()?;

        let day: DayWeather = serde_json::from_str(&json)
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        Ok(day)
    }
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}
