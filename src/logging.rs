//! Tracing setup. The terminal is owned by the UI, so logs go to a file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::domain::TicketError;

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init(log_path: &Path) -> Result<(), TicketError> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| TicketError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_file_and_directory() {
        let dir = std::env::temp_dir().join("tickets_logging_test");
        let _ = fs::remove_dir_all(&dir);
        let log_file = dir.join("nested").join("tickets.log");

        // A second init in the same process fails, the file must exist either way.
        let _ = init(&log_file);
        assert!(log_file.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
