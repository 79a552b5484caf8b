use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use crate::manager_open_weather::models::{DayWeather, Rain};

/// Number of days before the reference date shown in the chart and the report
pub const REPORT_DAYS: i64 = 4;

/// One hour with rain, keyed by its local time
#[derive(Debug, Clone, PartialEq)]
pub struct RainHour {
    pub time: DateTime<Tz>,
    pub rain: Rain,
}

/// Rain total for one local date
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRain {
    pub date: NaiveDate,
    pub total: f64,
}

/// Returns all hours with rain in a day of weather history, with timestamps in local time.
/// Hours without a rain field are left out.
///
/// # Arguments
///
/// * 'day' - one day of weather history
/// * 'tz' - timezone to convert timestamps to
pub fn rain_hours(day: &DayWeather, tz: &Tz) -> Result<Vec<RainHour>, RainError> {
    let hourly = day.hourly.as_ref().ok_or(RainError::MissingHourly)?;

    hourly.iter()
        .filter_map(|h| h.rain.map(|rain| (h.dt, rain)))
        .map(|(dt, rain)| {
            let dt = dt.ok_or(RainError::MissingTimestamp)?;
            let time = Utc.timestamp_opt(dt, 0)
                .single()
                .ok_or(RainError::InvalidTimestamp(dt))?
                .with_timezone(tz);

            Ok(RainHour { time, rain })
        })
        .collect()
}

/// Sums up the hourly rain, rounded to two decimals
///
/// # Arguments
///
/// * 'hours' - hours with rain
pub fn total_rain(hours: &[RainHour]) -> f64 {
    if hours.is_empty() {
        return 0.0;
    }

    round_to_two_decimals(hours.iter().map(|h| h.rain.one_hour).sum::<f64>())
}

/// Keeps the hours whose local date falls strictly between five days before
/// the reference date and the reference date itself
///
/// # Arguments
///
/// * 'hours' - hours with rain
/// * 'today' - the reference date
pub fn within_window(hours: Vec<RainHour>, today: NaiveDate) -> Vec<RainHour> {
    let oldest = today - TimeDelta::days(REPORT_DAYS + 1);

    hours.into_iter()
        .filter(|h| {
            let date = h.time.date_naive();
            oldest < date && date < today
        })
        .collect()
}

/// Returns the rain total for each of the days before the reference date, oldest first
///
/// # Arguments
///
/// * 'hours' - hours with rain
/// * 'today' - the reference date
pub fn daily_totals(hours: &[RainHour], today: NaiveDate) -> Vec<DailyRain> {
    (1..=REPORT_DAYS).rev()
        .map(|days_back| {
            let date = today - TimeDelta::days(days_back);
            let day_hours = hours.iter()
                .filter(|h| h.time.date_naive() == date)
                .cloned()
                .collect::<Vec<RainHour>>();

            DailyRain { date, total: total_rain(&day_hours) }
        })
        .collect()
}

/// Formats millimeters for display. Whole non-zero amounts keep one decimal ("4.0"),
/// zero prints as "0".
///
/// # Arguments
///
/// * 'mm' - the amount to format
pub fn format_mm(mm: f64) -> String {
    if mm != 0.0 && mm.fract() == 0.0 {
        format!("{:.1}", mm)
    } else {
        format!("{}", mm)
    }
}

/// Rounds values to two decimals, halfway cases to the even neighbour
///
/// # Arguments
///
/// * 'value' - the value to round to two decimals
fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100f64).round_ties_even() / 100f64
}

/// Error depicting errors that occur while extracting rain from weather history
///
#[derive(Debug, Error)]
pub enum RainError {
    #[error("weather history has no hourly data")]
    MissingHourly,
    #[error("hour with rain has no timestamp")]
    MissingTimestamp,
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}
