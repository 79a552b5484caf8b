use serde::Deserialize;

/// One day of history as returned by the timemachine endpoint
#[derive(Deserialize, Debug, Default)]
pub struct DayWeather {
    pub hourly: Option<Vec<HourWeather>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct HourWeather {
    pub dt: Option<i64>,
    pub rain: Option<Rain>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Rain {
    /// Precipitation accumulated over the hour in mm
    #[serde(rename = "1h")]
    pub one_hour: f64,
}
