//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! Log output never goes to stdout, which carries fetched content.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,rfetch=debug,rfetch_core=debug";

/// Destination of one log event.
enum LogSink {
    File(fs::File),
    /// Used when the log file handle cannot be duplicated.
    Stderr(io::Stderr),
}

impl LogSink {
    fn target(&mut self) -> &mut dyn io::Write {
        match self {
            LogSink::File(f) => f,
            LogSink::Stderr(e) => e,
        }
    }
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.target().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.target().flush()
    }
}

/// Hands every event its own handle on the shared, append-only log file.
struct LogFile(fs::File);

impl LogFile {
    fn open(path: &Path) -> Result<Self> {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file {}", path.display()))?;
        Ok(Self(file))
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(file) => LogSink::File(file),
            Err(_) => LogSink::Stderr(io::stderr()),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Path of the log file, `~/.local/state/rfetch/rfetch.log`. Creates the directory.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rfetch")?;
    Ok(xdg_dirs.place_state_file("rfetch.log")?)
}

/// Route `tracing` output to the XDG state log file.
///
/// Errors (unwritable state dir, subscriber already set) are returned so the
/// CLI can call [`init_logging_stderr`] instead.
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let writer = BoxMakeWriter::new(LogFile::open(&path)?);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("rfetch logging to {}", path.display());
    Ok(())
}

pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
