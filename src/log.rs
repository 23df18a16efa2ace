//! Logging utilities
//!
//! The terminal belongs to the dashboard, so log output goes to a file
//! in the user's data directory instead.

use std::{
    fs::{self, File, OpenOptions},
    io,
    path::PathBuf,
    sync::Mutex,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Where the log file goes, if anywhere
pub(crate) fn log_path() -> Option<PathBuf> {
    crate::settings::dirs().map(|d| d.data_local_dir().join("almixer.log"))
}

fn open_log() -> Option<File> {
    let path = log_path()?;
    fs::create_dir_all(path.parent()?).ok()?;
    OpenOptions::new().create(true).append(true).open(path).ok()
}

pub(crate) fn parse_log_level() {
    let filter = EnvFilter::try_from_env("ALMIXER_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt().with_env_filter(filter).with_ansi(false);
    let result = match open_log() {
        Some(file) => builder.with_writer(Mutex::new(file)).try_init(),
        None => builder.with_writer(io::sink).try_init(),
    };
    if result.is_ok() {
        info!("Initialised logger: welcome to almixer!");
    }
}

/// Create an oops (a fatal crash) with an associated error message
pub(crate) fn oops<S: Into<String>>(msg: S, code: i32) -> ! {
    let msg = msg.into();
    error!("{}", msg);
    eprintln!("almixer: {}", msg);
    std::process::exit(code);
}
