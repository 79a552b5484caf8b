use anyhow::Result;
use chrono::Utc;
use log::{error, info};
use crate::initialization::init;
use crate::worker::run;

mod config;
mod initialization;
mod logging;
mod manager_chart;
mod manager_open_weather;
mod manager_pushover;
mod rain;
mod report;
mod worker;

fn main() -> Result<()> {
    // Load config and set up clients. If initialization fails, logging may not even be up.
    let (config, mgr) = init()?;

    match run(&config, &mgr.weather, &mgr.pushover, Utc::now()) {
        Ok(report) => {
            info!("Report for {} sent: {}", report.today, report.message);
        },
        Err(e) => {
            error!("Run failed: {}", e);
            return Err(e)?;
        }
    }

    Ok(())
}
