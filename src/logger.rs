//! # Logging
//! src/logger.rs
//!
//! Inicializa el backend de `log`: terminal (stderr) por defecto, o un
//! archivo en modo append si se pasó `--log-file`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Cannot open log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger already initialized: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

pub fn init_logger(cfg: &Config) -> Result<(), LoggerError> {
    match &cfg.log_file {
        Some(path) => init_file_logger(cfg.log_level, path),
        None => init_term_logger(cfg.log_level),
    }
}

fn prepare_logger_config() -> simplelog::Config {
    let mut builder = simplelog::ConfigBuilder::new();
    builder
        .set_thread_level(LevelFilter::Info)
        .set_target_level(LevelFilter::Off);

    // Sin offset local disponible se queda en UTC
    let _ = builder.set_time_offset_to_local();

    builder.build()
}

fn init_term_logger(level: LevelFilter) -> Result<(), LoggerError> {
    TermLogger::init(
        level,
        prepare_logger_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}

fn init_file_logger(level: LevelFilter, path: &Path) -> Result<(), LoggerError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggerError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    WriteLogger::init(level, prepare_logger_config(), file)?;
    Ok(())
}
