//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! The terminal belongs to the TUI, so log lines always go to a file.
//! `RUST_LOG` overrides the level picked from `-v` flags.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub log_file: PathBuf,
}

impl LogConfig {
    /// - 0: info
    /// - 1 (`-v`): debug
    /// - 2+ (`-vv`): trace
    pub fn from_verbosity(verbosity: u8, log_file: PathBuf) -> Self {
        let level = match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self { level, log_file }
    }
}

/// Install the global subscriber
///
/// A second call is a no-op.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(parent) = config.log_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let layer = fmt::layer()
        .with_writer(SharedFileWriter::new(file))
        .with_ansi(false)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
    Ok(())
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<fs::File>>,
}

impl SharedFileWriter {
    fn new(file: fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<fs::File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies stay at warn
        EnvFilter::new(format!(
            "warn,inventory_tui={}",
            level.as_str().to_lowercase()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        let file = PathBuf::from("inventory-tui.log");
        assert_eq!(LogConfig::from_verbosity(0, file.clone()).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(1, file.clone()).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(4, file).level, Level::TRACE);
    }

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("inventory-tui.log");
        init_logging(&LogConfig::from_verbosity(1, path.clone())).unwrap();
        assert!(path.exists());
    }
}
