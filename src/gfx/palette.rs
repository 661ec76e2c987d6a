//! Named colors.
//!
//! Everything that draws in Frost names its color by string, such as
//! `"White"` or `"Blue"`; the [`Palette`] resolves those names to RGB values
//! right before a draw call is made.

use std::collections::HashMap;
use std::path::Path;

use crate::config;
use crate::config::PaletteData;
use crate::error::Result;
use crate::gfx::texel::colors;
use crate::gfx::texel::Rgb;

/// The name of the color used when none is given.
pub const DEFAULT_COLOR: &str = "White";

/// A name to color map.
#[derive(Clone, Debug)]
pub struct Palette {
  colors: HashMap<String, Rgb>,
}

impl Palette {
  /// Creates a palette holding only the built-in colors.
  pub fn new() -> Self {
    let base = [
      ("White", colors::WHITE),
      ("Black", colors::BLACK),
      ("Gray", colors::GRAY),
      ("Red", colors::RED),
      ("Orange", colors::ORANGE),
      ("Yellow", colors::YELLOW),
      ("Green", colors::LIME),
      ("Cyan", colors::CYAN),
      ("Blue", colors::ROYALBLUE),
      ("Purple", colors::MEDIUMPURPLE),
      ("Pink", colors::HOTPINK),
      ("Brown", colors::SIENNA),
      ("Gold", colors::GOLD),
    ];

    Self {
      colors: base.iter().map(|&(n, c)| (n.to_string(), c)).collect(),
    }
  }

  /// Merges a palette file into this palette; entries in the file override
  /// colors of the same name.
  pub fn load(&mut self, path: &Path) -> Result<()> {
    let data: PaletteData = config::load_json(path)?;
    tracing::info!(
      "loaded {} colors from {}",
      data.len(),
      path.display()
    );
    self.extend(data);
    Ok(())
  }

  /// Adds or replaces colors.
  pub fn extend(&mut self, data: PaletteData) {
    for (name, r, g, b) in data {
      self.colors.insert(name, Rgb::new(r, g, b));
    }
  }

  /// Looks up a color by name.
  pub fn get(&self, name: &str) -> Option<Rgb> {
    self.colors.get(name).copied()
  }

  /// Returns whether `name` is a known color.
  pub fn contains(&self, name: &str) -> bool {
    self.colors.contains_key(name)
  }
}

impl Default for Palette {
  fn default() -> Self {
    Self::new()
  }
}
