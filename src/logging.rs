//! Process-wide log sink.
//!
//! All engine diagnostics go through `tracing`. [`init()`] routes them to a
//! single append-only file, since the terminal itself is busy displaying the
//! engine's output.

use std::fs::File;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Error;
use crate::error::Result;

/// Installs the global log subscriber, writing to `path`.
///
/// The file is truncated first so that each run starts with a fresh log;
/// after that every record is appended. The filter can be overridden with the
/// usual `RUST_LOG` syntax, and defaults to `info`.
pub fn init(path: &Path) -> Result<()> {
  File::create(path).map_err(|e| Error::config(path, e))?;
  let file = OpenOptions::new()
    .append(true)
    .open(path)
    .map_err(|e| Error::config(path, e))?;

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .with_target(true)
    .try_init()
    .map_err(|e| Error::Logging(e.to_string()))
}
