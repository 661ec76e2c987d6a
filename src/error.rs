//! Engine error types.
//!
//! Only failures that the engine cannot recover from are represented here:
//! broken resource files and lookups of identifiers that do not exist. Bad
//! geometry and bad widget content are repaired in place and merely logged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::gfx::sprite::SpriteId;

/// A fatal engine error.
#[derive(Debug, Error)]
pub enum Error {
  /// An I/O failure outside of resource parsing.
  #[error("io error: {0}")]
  Io(#[from] io::Error),

  /// A JSON value could not be serialized.
  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A resource file was missing or malformed.
  #[error("could not load {}: {source}", path.display())]
  Config {
    /// The file that failed to load.
    path: PathBuf,
    /// What went wrong.
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  /// A texture was requested from a path that does not exist.
  #[error("texture path {} does not exist", .0.display())]
  MissingTexture(PathBuf),

  /// A sprite id was used after deletion, or was never handed out.
  #[error("sprite {0} does not exist")]
  UnknownSprite(SpriteId),

  /// A menu name was looked up without ever being registered.
  #[error("menu {0:?} is not registered")]
  UnknownMenu(String),

  /// Two menus were registered under one name.
  #[error("menu {0:?} is already registered")]
  DuplicateMenu(String),

  /// The log sink could not be installed.
  #[error("could not install logger: {0}")]
  Logging(String),
}

/// A `Result` specialized to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  /// Wraps any error raised while loading `path`.
  pub fn config(
    path: impl Into<PathBuf>,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
  ) -> Self {
    Error::Config {
      path: path.into(),
      source: source.into(),
    }
  }
}
