//! Tracing setup for the `pinmark` binary.
//!
//! Events go to an append-only `pinmark.log` in the XDG state directory so
//! ingest failures can be inspected after the CLI exits. `RUST_LOG` overrides
//! [`DEFAULT_FILTER`].

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Info for dependencies, debug for pinmark's own crates (pipeline stages log at debug).
pub const DEFAULT_FILTER: &str = "info,pinmark=debug,pinmark_core=debug,pinmark_cli=debug";

/// Per-event sink. Each event gets its own handle on `pinmark.log`; if the
/// handle cannot be duplicated the event still reaches stderr instead of
/// being dropped.
enum LogSink {
    Log(File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::Log(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::Log(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0.try_clone().map(LogSink::Log).unwrap_or(LogSink::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/pinmark/pinmark.log`, creating the directory if needed.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pinmark")?;
    Ok(xdg_dirs.place_state_file("pinmark.log")?)
}

/// Install the global subscriber writing to [`log_file_path`].
///
/// Returns `Err` when the state directory is unwritable or a subscriber is
/// already installed; the caller then uses [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "pinmark logging initialized");
    Ok(())
}

/// Stderr-only subscriber. A no-op if one is already installed.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, Write};

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn log_file_writer_appends_to_shared_file() {
        let mut tmp = tempfile::tempfile().unwrap();
        let make = LogFile(tmp.try_clone().unwrap());
        make.make_writer().write_all(b"first\n").unwrap();
        make.make_writer().write_all(b"second\n").unwrap();
        tmp.rewind().unwrap();
        let mut out = String::new();
        tmp.read_to_string(&mut out).unwrap();
        assert_eq!(out, "first\nsecond\n");
    }
}
