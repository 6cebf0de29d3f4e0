use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};

use crate::config::Config;

/// Initialize logging.
///
/// Disabled telemetry logs to stdout; enabled telemetry appends to the
/// configured log file, creating parent directories as needed.
///
/// # Errors
/// Returns error if the log file or its directory cannot be created.
pub fn init(enabled: bool, log_path: &str) -> Result<()> {
    if !enabled {
        tracing_subscriber::fmt().with_target(false).init();
        return Ok(());
    }

    let path = Config::expand_path(log_path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context("failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_target(false)
        .with_ansi(false)
        .init();

    tracing::info!("telemetry initialized: {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    #[ignore] // Global tracing subscriber can only be initialized once per process
    fn test_init_with_telemetry_disabled() {
        // Would race with other tests that install a subscriber; covered
        // by running the binary manually
    }
}
