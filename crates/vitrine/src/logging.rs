//! File logging.
//!
//! The terminal belongs to the UI, so events go to `vitrine.log` in the
//! platform data directory. `RUST_LOG` overrides the configured level.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::WrapErr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_config::Config;

const LOG_FILE: &str = "vitrine.log";

/// Install the global subscriber. Returns the log file path.
pub fn init(config: &Config) -> color_eyre::Result<PathBuf> {
    let dir = Config::log_dir()?;
    fs::create_dir_all(&dir).wrap_err_with(|| format!("creating {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = fs::File::create(&path).wrap_err_with(|| format!("creating {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .wrap_err_with(|| format!("invalid log level `{}`", config.log_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()
        .wrap_err("installing the tracing subscriber")?;

    tracing::info!(path = %path.display(), version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(path)
}
