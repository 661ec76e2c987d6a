//! Texels, terminal elements.
//!
//! A *texel* is Frost's abstraction for a cell in a terminal. Backends that
//! render into a character grid rather than a bitmap turn every draw call into
//! texels. See the [`Texel`] type for more info.

pub use palette::named as colors;

/// An RGB value, used for palette entries and texture color mods.
pub type Rgb = palette::Srgb<u8>;

/// A foreground or background color for a [`Texel`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Color {
  /// A solid RGB value.
  Rgb(Rgb),

  /// The "default" value, i.e., reset to whatever the terminal's default colors
  /// are.
  Reset,
}

impl From<Rgb> for Color {
  fn from(rgb: Rgb) -> Self {
    Self::Rgb(rgb)
  }
}

/// A "terminal element", analogous to a pixel or voxel.
///
/// A texel consists of a "glyph" (a printable character), a foreground color,
/// and a background color; colors are optional.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Texel {
  glyph: Option<char>,
  fg: Rgb,
  bg: Rgb,
  meta: Meta,
}

bitflags::bitflags! {
  struct Meta: u8 {
    const FG_RESET = 1 << 0;
    const BG_RESET = 1 << 1;
  }
}

impl Texel {
  /// Creates a new invisible texel.
  #[inline]
  pub fn empty() -> Self {
    Self {
      glyph: None,
      fg: colors::BLACK,
      bg: colors::BLACK,
      meta: Meta::FG_RESET | Meta::BG_RESET,
    }
  }

  /// Creates a new colorless texel with the given glyph.
  #[inline]
  pub fn new(glyph: char) -> Self {
    Self {
      glyph: Some(glyph),
      ..Self::empty()
    }
  }

  /// Returns this texel's glyph.
  #[inline]
  pub fn glyph(self) -> Option<char> {
    self.glyph
  }

  /// Returns a copy of this texel with the given glyph.
  #[inline]
  pub fn with_glyph(mut self, glyph: impl Into<Option<char>>) -> Self {
    self.glyph = glyph.into();
    self
  }

  /// Returns this texel's foreground color.
  #[inline]
  pub fn fg(self) -> Color {
    if self.meta.contains(Meta::FG_RESET) {
      Color::Reset
    } else {
      self.fg.into()
    }
  }

  /// Returns a copy of this texel with the given foreground color.
  #[inline]
  pub fn with_fg(mut self, color: impl Into<Color>) -> Self {
    match color.into() {
      Color::Rgb(rgb) => {
        self.fg = rgb;
        self.meta.remove(Meta::FG_RESET);
      }
      Color::Reset => self.meta |= Meta::FG_RESET,
    }
    self
  }

  /// Returns this texel's background color.
  #[inline]
  pub fn bg(self) -> Color {
    if self.meta.contains(Meta::BG_RESET) {
      Color::Reset
    } else {
      self.bg.into()
    }
  }

  /// Returns a copy of this texel with the given background color.
  #[inline]
  pub fn with_bg(mut self, color: impl Into<Color>) -> Self {
    match color.into() {
      Color::Rgb(rgb) => {
        self.bg = rgb;
        self.meta.remove(Meta::BG_RESET);
      }
      Color::Reset => self.meta |= Meta::BG_RESET,
    }
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn colors_reset_until_set() {
    let tx = Texel::new('a');
    assert_eq!(tx.fg(), Color::Reset);
    let tx = tx.with_fg(colors::RED);
    assert_eq!(tx.fg(), Color::Rgb(colors::RED));
    assert_eq!(tx.bg(), Color::Reset);
    assert_eq!(tx.with_fg(Color::Reset).fg(), Color::Reset);
  }
}
