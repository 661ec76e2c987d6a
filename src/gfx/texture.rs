//! Texture cache.
//!
//! [`Textures`] sits between the engine and its [`Backend`]: it makes texture
//! creation idempotent per path, counts who holds each texture, resolves
//! color names through the [`Palette`], and implements tinted draws.
//!
//! Every [`Textures::create_texture()`] is a reference that must be given
//! back with [`Textures::release_texture()`]; the texture is destroyed when
//! the last one is released.

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Result;
use crate::geo::Rect;
use crate::gfx::backend::Backend;
use crate::gfx::backend::DrawCall;
use crate::gfx::backend::TextureId;
use crate::gfx::palette::Palette;
use crate::gfx::palette::DEFAULT_COLOR;
use crate::gfx::texel::colors;
use crate::gfx::texel::Rgb;

/// Owner of a [`Backend`] and every texture created through it.
pub struct Textures {
  backend: Box<dyn Backend>,
  palette: Palette,
  by_path: HashMap<PathBuf, TextureId>,
  by_id: HashMap<TextureId, PathBuf>,
  refs: HashMap<TextureId, usize>,
  warned_colors: HashSet<String>,
}

impl Textures {
  /// Creates a new `Textures` drawing through `backend`.
  pub fn new(backend: Box<dyn Backend>, palette: Palette) -> Self {
    Self {
      backend,
      palette,
      by_path: HashMap::new(),
      by_id: HashMap::new(),
      refs: HashMap::new(),
      warned_colors: HashSet::new(),
    }
  }

  /// Returns the backend.
  pub fn backend(&self) -> &dyn Backend {
    &*self.backend
  }

  /// Returns the backend, mutably.
  pub fn backend_mut(&mut self) -> &mut dyn Backend {
    &mut *self.backend
  }

  /// Returns the color palette.
  pub fn palette(&self) -> &Palette {
    &self.palette
  }

  /// Returns the color palette, mutably.
  pub fn palette_mut(&mut self) -> &mut Palette {
    &mut self.palette
  }

  /// Returns the texture for the image at `path`, loading it if no texture
  /// has been created from that path yet.
  ///
  /// Each call takes a reference to the texture.
  pub fn create_texture(&mut self, path: impl AsRef<Path>) -> Result<TextureId> {
    let path = path.as_ref();
    let id = match self.by_path.get(path) {
      Some(&id) => id,
      None => {
        let id = self.backend.load_texture(path)?;
        tracing::debug!("created {} from {}", id, path.display());
        self.by_path.insert(path.to_owned(), id);
        self.by_id.insert(id, path.to_owned());
        id
      }
    };

    *self.refs.entry(id).or_insert(0) += 1;
    Ok(id)
  }

  /// Returns how many references to `id` are held.
  pub fn references(&self, id: TextureId) -> usize {
    self.refs.get(&id).copied().unwrap_or(0)
  }

  /// Gives back a reference taken by [`Textures::create_texture()`],
  /// destroying the texture once nobody holds it.
  pub fn release_texture(&mut self, id: TextureId) {
    let remaining = match self.refs.get_mut(&id) {
      Some(count) => {
        *count -= 1;
        *count
      }
      None => {
        tracing::warn!("attempted to release {}, which is not held", id);
        return;
      }
    };

    if remaining == 0 {
      self.destroy_texture(id);
    }
  }

  /// Returns how many distinct textures are alive.
  pub fn len(&self) -> usize {
    self.by_id.len()
  }

  /// Returns whether no textures are alive.
  pub fn is_empty(&self) -> bool {
    self.by_id.is_empty()
  }

  /// Destroys a texture, forgetting the path it came from, regardless of
  /// how many references to it are still held.
  ///
  /// Destroying an unknown texture is logged and otherwise ignored.
  pub fn destroy_texture(&mut self, id: TextureId) {
    self.refs.remove(&id);
    let path = match self.by_id.remove(&id) {
      Some(path) => path,
      None => {
        tracing::warn!("attempted to destroy {}, which does not exist", id);
        return;
      }
    };

    self.by_path.remove(&path);
    self.backend.destroy_texture(id);
  }

  /// Draws part of a texture with whatever color mod it currently has.
  pub fn draw(&mut self, texture: TextureId, source: Rect, dest: Rect) {
    self.backend.draw(DrawCall {
      texture,
      source,
      dest,
      glyph: None,
    });
  }

  /// Draws part of a texture tinted with the named color.
  ///
  /// The texture's color mod is overwritten for the duration of the draw and
  /// restored afterwards. Unknown color names fall back to white.
  pub fn draw_tinted(
    &mut self,
    texture: TextureId,
    source: Rect,
    dest: Rect,
    color: &str,
    glyph: Option<char>,
  ) {
    let tint = self.resolve(color);

    let original = self.backend.color_mod(texture);
    self.backend.set_color_mod(texture, tint);
    self.backend.draw(DrawCall {
      texture,
      source,
      dest,
      glyph,
    });
    self.backend.set_color_mod(texture, original);
  }

  /// Resolves a color name, warning once per unknown name.
  fn resolve(&mut self, color: &str) -> Rgb {
    if let Some(rgb) = self.palette.get(color) {
      return rgb;
    }

    if self.warned_colors.insert(color.to_string()) {
      tracing::warn!(
        "color {:?} is not registered; using {}",
        color,
        DEFAULT_COLOR
      );
    }
    self.palette.get(DEFAULT_COLOR).unwrap_or(colors::WHITE)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::gfx::headless::Headless;

  fn textures() -> (Textures, Headless) {
    let backend = Headless::new(320, 240);
    (
      Textures::new(Box::new(backend.clone()), Palette::new()),
      backend,
    )
  }

  #[test]
  fn create_is_idempotent_per_path() {
    let (mut textures, _) = textures();
    let a = textures.create_texture("a.png").unwrap();
    let b = textures.create_texture("b.png").unwrap();
    assert_ne!(a, b);
    assert_eq!(textures.create_texture("a.png").unwrap(), a);
    assert_eq!(textures.len(), 2);
    assert_eq!(textures.references(a), 2);
    assert_eq!(textures.references(b), 1);
  }

  #[test]
  fn last_release_destroys() {
    let (mut textures, backend) = textures();
    let a = textures.create_texture("a.png").unwrap();
    textures.create_texture("a.png").unwrap();

    textures.release_texture(a);
    assert_eq!(backend.live_textures(), 1);
    textures.release_texture(a);
    assert_eq!(backend.live_textures(), 0);
    assert!(textures.is_empty());

    // Releasing again is only a warning.
    textures.release_texture(a);
    assert_eq!(textures.references(a), 0);
  }

  #[test]
  fn destroy_forgets_path() {
    let (mut textures, backend) = textures();
    let a = textures.create_texture("a.png").unwrap();
    textures.destroy_texture(a);
    assert!(textures.is_empty());
    assert_eq!(backend.live_textures(), 0);

    let again = textures.create_texture("a.png").unwrap();
    assert_ne!(again, a);
  }

  #[test]
  fn tinted_draw_restores_color_mod() {
    let (mut textures, backend) = textures();
    let t = textures.create_texture("font.png").unwrap();
    let r = Rect::with_dims(8, 8);

    textures.draw_tinted(t, r, r, "Red", Some('x'));
    let calls = backend.draws();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tint, colors::RED);
    assert_eq!(backend.color_mod_of(t), colors::WHITE);
  }

  #[test]
  fn unknown_color_falls_back_to_white() {
    let (mut textures, backend) = textures();
    let t = textures.create_texture("font.png").unwrap();
    let r = Rect::with_dims(8, 8);

    textures.draw_tinted(t, r, r, "Chartreuse-ish", None);
    assert_eq!(backend.draws()[0].tint, colors::WHITE);
  }
}
