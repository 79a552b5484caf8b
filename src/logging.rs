use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::{Config, Handle};
use thiserror::Error;
use crate::config::expand_tilde;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {M} - {m}{n}";

/// Sets up logging to stdout and/or file
///
/// # Arguments
///
/// * 'log_path' - optional path to a log file, '~' is expanded
/// * 'log_level' - level filter for the root logger
/// * 'log_to_stdout' - whether to also log to stdout
pub fn setup_logger(log_path: Option<&str>, log_level: LevelFilter, log_to_stdout: bool) -> Result<Handle, LoggerError> {
    let mut builder = Config::builder();
    let mut root = Root::builder();

    if let Some(path) = log_path {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(expand_tilde(path))
            .map_err(|e| LoggerError(format!("file appender: {}", e)))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    if log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let config = builder
        .build(root.build(log_level))
        .map_err(|e| LoggerError(format!("config: {}", e)))?;

    log4rs::init_config(config)
        .map_err(|e| LoggerError(format!("init: {}", e)))
}

/// Error depicting errors that occur while setting up the logger
///
#[derive(Debug, Error)]
#[error("error while setting up logger: {0}")]
pub struct LoggerError(pub String);
