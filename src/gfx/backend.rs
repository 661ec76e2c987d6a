//! The interface Frost draws through.
//!
//! A backend owns the actual screen: it loads textures, copies portions of
//! them onto the screen, and reports keyboard and window events. Everything
//! above it (the console, the rasterizer, sprites) only ever speaks in terms
//! of [`TextureId`]s and [`DrawCall`]s.

use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::geo::Rect;
use crate::gfx::texel::Rgb;
use crate::input::KeyCode;
use crate::input::KeyModifiers;

/// An opaque handle to a texture owned by a backend.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct TextureId(pub u32);

impl fmt::Display for TextureId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "texture#{}", self.0)
  }
}

/// Arguments for a draw call.
///
/// Copies `source` (in texture pixels) from `texture` onto `dest` (in screen
/// pixels), modulated by the texture's current color mod.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DrawCall {
  pub texture: TextureId,
  pub source: Rect,
  pub dest: Rect,
  /// The glyph this call depicts, if it came from a font atlas.
  ///
  /// Backends that cannot sample textures (such as a terminal) draw this
  /// instead.
  pub glyph: Option<char>,
}

/// An event reported by a backend.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Event {
  /// A key went down, or repeated while held.
  KeyDown {
    code: KeyCode,
    modifiers: KeyModifiers,
    repeat: bool,
  },
  /// A key was released.
  KeyUp(KeyCode),
  /// The screen changed size; the new size is in pixels.
  Resized(u16, u16),
  /// The user asked to close the application.
  Quit,
}

/// A graphics and input backend.
pub trait Backend {
  /// Returns the drawable area, in pixels.
  fn screen_size(&self) -> (u16, u16);

  /// Loads the image at `path`, returning a fresh handle for it.
  ///
  /// Caching by path is done by [`Textures`](crate::gfx::Textures); a
  /// backend may load the same file twice if asked to.
  fn load_texture(&mut self, path: &Path) -> Result<TextureId>;

  /// Releases a texture. The handle must not be used afterwards.
  fn destroy_texture(&mut self, texture: TextureId);

  /// Returns the color modulation currently applied to `texture`.
  fn color_mod(&self, texture: TextureId) -> Rgb;

  /// Sets the color modulation applied to `texture` by later draws.
  fn set_color_mod(&mut self, texture: TextureId, color: Rgb);

  /// Queues a copy of part of a texture onto the screen.
  fn draw(&mut self, call: DrawCall);

  /// Clears the back buffer, starting a new frame.
  fn clear(&mut self);

  /// Presents everything drawn since the last [`Backend::clear()`].
  fn present(&mut self) -> Result<()>;

  /// Returns the next pending event, if there is one.
  fn poll_event(&mut self) -> Result<Option<Event>>;
}
