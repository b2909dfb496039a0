use color_eyre::eyre::{eyre, Result, WrapErr};
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE: &str = "mood_journal.log";
pub const LOG_ENV: &str = "MOOD_JOURNAL_LOG";

/// Installs a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is logged to stdout or stderr.
pub fn init(log_dir: &Path, default_level: &str) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .wrap_err_with(|| format!("creating log dir {}", log_dir.display()))?;
    let path = log_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| eyre!("installing tracing subscriber: {e}"))?;

    Ok(path)
}
