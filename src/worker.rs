use std::path::Path;
use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use log::info;
use thiserror::Error;
use crate::config::{expand_tilde, Config};
use crate::manager_chart::render_rain_chart;
use crate::manager_open_weather::WeatherHistory;
use crate::manager_pushover::Notifier;
use crate::rain::{daily_totals, rain_hours, total_rain, within_window, RainHour, REPORT_DAYS};
use crate::report::{compose_message, RainReport};

/// Runs the whole rain report: fetch history, aggregate, render the chart and notify
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'weather' - weather history source
/// * 'notifier' - notification sink
/// * 'now' - the time of the run
pub fn run<W: WeatherHistory, N: Notifier>(config: &Config, weather: &W, notifier: &N, now: DateTime<Utc>) -> Result<RainReport, WorkerError> {
    let today = local_midnight(now, &config.location.timezone)?;
    info!("Run start: {}, reference day: {}", now, today);

    let report = build_report(weather, today)?;
    info!("Rain over the past {} days: {}mm", REPORT_DAYS, report.total);

    let chart_path = expand_tilde(&config.report.chart_path);
    render_rain_chart(&report.daily, &chart_path)
        .map_err(|e| WorkerError::ChartError(e.to_string()))?;
    info!("Chart saved to {}", chart_path.display());

    send_report(notifier, &report, &config.report.title, &chart_path)?;

    Ok(report)
}

/// Fetches the history for the report days and today, and aggregates it into a report
///
/// # Arguments
///
/// * 'weather' - weather history source
/// * 'today' - local midnight of the reference day
pub fn build_report<W: WeatherHistory>(weather: &W, today: DateTime<Tz>) -> Result<RainReport, WorkerError> {
    let mut hours: Vec<RainHour> = Vec::new();

    for day_start in query_days(today)? {
        let day = weather.history(&day_start)
            .map_err(|e| WorkerError::FetchError(format!("{}: {}", day_start.date_naive(), e)))?;
        let day_hours = rain_hours(&day, &today.timezone())
            .map_err(|e| WorkerError::FetchError(format!("{}: {}", day_start.date_naive(), e)))?;
        info!("{}: {} hours with rain", day_start.date_naive(), day_hours.len());

        hours.extend(day_hours);
    }

    let today = today.date_naive();
    let hours = within_window(hours, today);
    let total = total_rain(&hours);

    Ok(RainReport {
        today,
        total,
        daily: daily_totals(&hours, today),
        message: compose_message(today, total),
    })
}

/// Sends the report with the chart attached
///
/// # Arguments
///
/// * 'notifier' - notification sink
/// * 'report' - the report to send
/// * 'title' - notification title
/// * 'chart_path' - path to the chart image
pub fn send_report<N: Notifier>(notifier: &N, report: &RainReport, title: &str, chart_path: &Path) -> Result<(), WorkerError> {
    notifier.send_message(&report.message, title, Some(chart_path))
        .map_err(|e| WorkerError::NotifyError(e.to_string()))
}

/// Returns local midnight of the day the given time falls into
///
/// # Arguments
///
/// * 'now' - the time to get the day for
/// * 'tz' - the local timezone
fn local_midnight(now: DateTime<Utc>, tz: &Tz) -> Result<DateTime<Tz>, WorkerError> {
    day_start(now.with_timezone(tz).date_naive(), tz)
}

/// Returns the first instant of a local date. Where midnight is skipped by a DST switch
/// the earliest valid time of that hour is used.
///
/// # Arguments
///
/// * 'date' - the local date
/// * 'tz' - the local timezone
fn day_start(date: NaiveDate, tz: &Tz) -> Result<DateTime<Tz>, WorkerError> {
    let midnight = date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| WorkerError::RunSchemaError(format!("no midnight for {}", date)))?;

    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + TimeDelta::hours(1))).earliest())
        .ok_or_else(|| WorkerError::RunSchemaError(format!("no local midnight for {}", date)))
}

/// Returns the start of each day to fetch history for, oldest first, ending with today
///
/// # Arguments
///
/// * 'today' - local midnight of the reference day
fn query_days(today: DateTime<Tz>) -> Result<Vec<DateTime<Tz>>, WorkerError> {
    let tz = today.timezone();

    (0..=REPORT_DAYS).rev()
        .map(|days_back| day_start(today.date_naive() - TimeDelta::days(days_back), &tz))
        .collect()
}

/// Error depicting errors that occur while running the rain report
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("error while creating run schema: {0}")]
    RunSchemaError(String),
    #[error("error while fetching weather history: {0}")]
    FetchError(String),
    #[error("error while rendering chart: {0}")]
    ChartError(String),
    #[error("error while sending notification: {0}")]
    NotifyError(String),
}
