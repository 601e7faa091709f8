//! Tracing setup: one plain-text line per event, written to stdout and appended to a log file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::format::{FmtSpan, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

/// Used when `RUST_LOG` is unset; sqlx statement logging is noisy at info.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Local wall-clock timestamp, `YYYY-MM-DD HH:MM:SS`.
struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Opens `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber. Call once, after `.env` is loaded so `RUST_LOG` applies.
///
/// Lines look like `2026-03-07 09:05:00 INFO relay_bot::handlers::relay: Stored message chat_id=1`.
/// ANSI colours are off so the file copy stays readable.
pub fn init_tracing(log_file: &Path) -> anyhow::Result<()> {
    let file = Arc::new(open_log_file(log_file)?);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let format = tracing_subscriber::fmt::format()
        .with_timer(LocalTimestamp)
        .with_target(true)
        .with_thread_ids(false);

    let layer = tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(io::stdout.and(file))
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false);

    Registry::default()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_log_file_creates_parent_and_appends() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("relay.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
