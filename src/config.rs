//! On-disk configuration.
//!
//! Frost reads three kinds of JSON files: the engine's init file, font
//! descriptions, and color palettes. All of them are loaded once; a missing
//! or malformed file is fatal, since nothing can be drawn without them. The
//! one exception is the init file, which is created with default values the
//! first time the engine runs.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::error::Result;

/// Reads and parses the JSON file at `path`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
  let text = fs::read_to_string(path).map_err(|e| Error::config(path, e))?;
  serde_json::from_str(&text).map_err(|e| Error::config(path, e))
}

/// Top-level engine settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
  /// Window title, where the backend has one.
  pub title: String,
  /// Screen width, in pixels.
  pub screen_width: u16,
  /// Screen height, in pixels.
  pub screen_height: u16,
  /// Frames per second to cap at when `vsync` is off.
  pub target_fps: u32,
  /// Whether the backend paces frames itself.
  pub vsync: bool,
  /// Path to the font description used by the console.
  pub font_path: PathBuf,
  /// Multiplier applied to the font's cell size.
  pub font_scale: f32,
  /// Palette files merged, in order, over the built-in colors.
  pub palette_paths: Vec<PathBuf>,
  /// Path of the append-only log file.
  pub log_path: PathBuf,
  /// Size of one terminal character cell in pixels, for terminal backends.
  pub terminal_cell: (u16, u16),
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      title: "Frost".into(),
      screen_width: 1280,
      screen_height: 720,
      target_fps: 60,
      vsync: false,
      font_path: "data/font.json".into(),
      font_scale: 2.0,
      palette_paths: vec!["data/colors.json".into()],
      log_path: "OutputLog.txt".into(),
      terminal_cell: (16, 16),
    }
  }
}

impl EngineConfig {
  /// Loads the init file at `path`, writing out the defaults if it does not
  /// exist yet.
  pub fn load_or_default(path: &Path) -> Result<Self> {
    if path.exists() {
      return load_json(path);
    }

    let config = Self::default();
    if let Some(dir) = path.parent() {
      if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).map_err(|e| Error::config(path, e))?;
      }
    }
    fs::write(path, serde_json::to_string_pretty(&config)?)
      .map_err(|e| Error::config(path, e))?;
    Ok(config)
  }
}

/// A font description: one atlas texture and where each glyph lives in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontData {
  /// The atlas image.
  pub png_path: PathBuf,
  /// Width of a glyph cell, in atlas pixels.
  pub font_width: u16,
  /// Height of a glyph cell, in atlas pixels.
  pub font_height: u16,
  /// `(code, x, y)` triples giving each glyph's upper-left corner.
  pub character_data: Vec<(u8, u16, u16)>,
}

/// A palette file: `(name, r, g, b)` entries.
pub type PaletteData = Vec<(String, u8, u8, u8)>;
