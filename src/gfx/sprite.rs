//! Sprites.
//!
//! A sprite is a rectangle cut out of a texture and placed somewhere on the
//! screen. Sprites live in an arena owned by [`Sprites`] and are referred to
//! by [`SpriteId`]; ids of deleted sprites are recycled.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::error::Error;
use crate::error::Result;
use crate::geo::Point;
use crate::geo::Rect;
use crate::gfx::backend::TextureId;
use crate::gfx::texture::Textures;

/// The smallest factor sprites may be scaled by.
pub const MIN_SCALE: f32 = 1.0;

/// A handle to a sprite in a [`Sprites`] arena.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct SpriteId(pub usize);

impl fmt::Display for SpriteId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "sprite#{}", self.0)
  }
}

/// A textured rectangle.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Sprite {
  texture: TextureId,
  source: Rect,
  position: Point,
  rendering: bool,
}

impl Sprite {
  /// Returns the texture this sprite is cut from.
  #[inline]
  pub fn texture(&self) -> TextureId {
    self.texture
  }

  /// Returns the region of the texture this sprite shows.
  #[inline]
  pub fn source(&self) -> Rect {
    self.source
  }

  /// Returns where the sprite's upper-left corner sits on screen.
  #[inline]
  pub fn position(&self) -> Point {
    self.position
  }

  /// Returns whether the sprite is drawn each frame.
  #[inline]
  pub fn is_rendering(&self) -> bool {
    self.rendering
  }
}

/// An arena of sprites.
#[derive(Debug)]
pub struct Sprites {
  sprites: Vec<Sprite>,
  free: Vec<usize>,
  dead: HashSet<usize>,
  rendering: Vec<SpriteId>,
  scale: f32,
}

impl Sprites {
  /// Creates a new, empty `Sprites`.
  pub fn new() -> Self {
    Self {
      sprites: Vec::new(),
      free: Vec::new(),
      dead: HashSet::new(),
      rendering: Vec::new(),
      scale: MIN_SCALE,
    }
  }

  /// Returns the factor sprites are scaled by when drawn.
  pub fn scale(&self) -> f32 {
    self.scale
  }

  /// Sets the factor sprites are scaled by; values below `MIN_SCALE` are
  /// raised to it.
  pub fn set_scale(&mut self, scale: f32) {
    self.scale = scale.max(MIN_SCALE);
  }

  /// Returns how many sprites are alive.
  pub fn len(&self) -> usize {
    self.sprites.len() - self.dead.len()
  }

  /// Returns whether no sprites are alive.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the ids flagged for rendering, in ascending order.
  pub fn rendering(&self) -> &[SpriteId] {
    &self.rendering
  }

  /// Creates a sprite showing `source` from the image at `path`, placed at
  /// `position`. The sprite starts out not rendering.
  pub fn create(
    &mut self,
    textures: &mut Textures,
    source: Rect,
    position: Point,
    path: impl AsRef<Path>,
  ) -> Result<SpriteId> {
    let texture = textures.create_texture(path)?;

    let sprite = Sprite {
      texture,
      source,
      position,
      rendering: false,
    };

    let id = match self.free.pop() {
      Some(idx) => {
        self.dead.remove(&idx);
        self.sprites[idx] = sprite;
        idx
      }
      None => {
        self.sprites.push(sprite);
        self.sprites.len() - 1
      }
    };
    Ok(SpriteId(id))
  }

  /// Looks up a sprite.
  pub fn get(&self, id: SpriteId) -> Result<&Sprite> {
    self.check(id)?;
    Ok(&self.sprites[id.0])
  }

  /// Moves a sprite.
  pub fn set_position(&mut self, id: SpriteId, position: Point) -> Result<()> {
    self.check(id)?;
    self.sprites[id.0].position = position;
    Ok(())
  }

  /// Starts drawing a sprite every frame.
  pub fn flag_render(&mut self, id: SpriteId) -> Result<()> {
    self.check(id)?;
    let sprite = &mut self.sprites[id.0];
    if sprite.rendering {
      return Ok(());
    }
    sprite.rendering = true;

    if let Err(idx) = self.rendering.binary_search(&id) {
      self.rendering.insert(idx, id);
    }
    Ok(())
  }

  /// Stops drawing a sprite.
  pub fn deflag_render(&mut self, id: SpriteId) -> Result<()> {
    self.check(id)?;
    let sprite = &mut self.sprites[id.0];
    if !sprite.rendering {
      return Ok(());
    }
    sprite.rendering = false;

    if let Ok(idx) = self.rendering.binary_search(&id) {
      self.rendering.remove(idx);
    }
    Ok(())
  }

  /// Deletes a sprite, releasing its hold on its texture. The texture is
  /// destroyed only if nothing else (another sprite, a font) still uses it.
  pub fn delete(&mut self, id: SpriteId, textures: &mut Textures) -> Result<()> {
    self.deflag_render(id)?;

    self.dead.insert(id.0);
    self.free.push(id.0);
    textures.release_texture(self.sprites[id.0].texture);
    Ok(())
  }

  /// Draws every sprite flagged for rendering, in id order.
  pub fn render(&self, textures: &mut Textures) {
    for &id in &self.rendering {
      let sprite = &self.sprites[id.0];
      let src = sprite.source;
      let dest = Rect::new(
        sprite.position.x(),
        sprite.position.y(),
        (src.width() as f32 * self.scale) as i32,
        (src.height() as f32 * self.scale) as i32,
      );
      textures.draw(sprite.texture, src, dest);
    }
  }

  fn check(&self, id: SpriteId) -> Result<()> {
    if id.0 >= self.sprites.len() || self.dead.contains(&id.0) {
      tracing::error!("{} does not exist", id);
      return Err(Error::UnknownSprite(id));
    }
    Ok(())
  }
}

impl Default for Sprites {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::gfx::headless::Headless;
  use crate::gfx::palette::Palette;
  use crate::gfx::texel::colors;
  use crate::gfx::text::tests::ascii_font;
  use crate::gfx::text::Font;
  use crate::gfx::text::TextRenderer;

  fn setup() -> (Sprites, Textures, Headless) {
    let backend = Headless::new(320, 240);
    let textures = Textures::new(Box::new(backend.clone()), Palette::new());
    (Sprites::new(), textures, backend)
  }

  #[test]
  fn ids_are_recycled() {
    let (mut sprites, mut textures, _) = setup();
    let src = Rect::with_dims(16, 16);
    let a = sprites.create(&mut textures, src, Point::zero(), "a.png").unwrap();
    let b = sprites.create(&mut textures, src, Point::zero(), "a.png").unwrap();
    assert_ne!(a, b);

    sprites.delete(a, &mut textures).unwrap();
    assert!(matches!(sprites.get(a), Err(Error::UnknownSprite(_))));
    assert!(sprites.set_position(a, Point::new(1, 1)).is_err());

    let c = sprites.create(&mut textures, src, Point::zero(), "b.png").unwrap();
    assert_eq!(c, a);
    assert_eq!(sprites.len(), 2);
  }

  #[test]
  fn textures_die_with_their_last_sprite() {
    let (mut sprites, mut textures, backend) = setup();
    let src = Rect::with_dims(16, 16);
    let a = sprites.create(&mut textures, src, Point::zero(), "a.png").unwrap();
    let b = sprites.create(&mut textures, src, Point::zero(), "a.png").unwrap();
    assert_eq!(backend.live_textures(), 1);

    sprites.delete(a, &mut textures).unwrap();
    assert_eq!(backend.live_textures(), 1);
    sprites.delete(b, &mut textures).unwrap();
    assert_eq!(backend.live_textures(), 0);
  }

  #[test]
  fn render_list_stays_sorted() {
    let (mut sprites, mut textures, backend) = setup();
    let src = Rect::with_dims(4, 4);
    let ids = (0..3)
      .map(|i| {
        sprites
          .create(&mut textures, src, Point::new(i * 10, 0), "a.png")
          .unwrap()
      })
      .collect::<Vec<_>>();

    sprites.flag_render(ids[2]).unwrap();
    sprites.flag_render(ids[0]).unwrap();
    sprites.flag_render(ids[0]).unwrap();
    assert_eq!(sprites.rendering(), &[ids[0], ids[2]]);

    sprites.set_scale(0.5);
    assert_eq!(sprites.scale(), MIN_SCALE);
    sprites.set_scale(2.0);
    sprites.render(&mut textures);

    let draws = backend.draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[1].call.dest, Rect::new(20, 0, 8, 8));

    sprites.delete(ids[2], &mut textures).unwrap();
    assert_eq!(sprites.rendering(), &[ids[0]]);
  }

  #[test]
  fn deleting_a_sprite_keeps_a_shared_font_alive() {
    let (mut sprites, mut textures, backend) = setup();
    let font = Font::load(&ascii_font(), &mut textures).unwrap();
    let mut text = TextRenderer::new(font);

    let id = sprites
      .create(&mut textures, Rect::with_dims(16, 16), Point::zero(), "font.png")
      .unwrap();
    assert_eq!(sprites.get(id).unwrap().texture(), text.font().texture());
    sprites.delete(id, &mut textures).unwrap();
    assert_eq!(backend.live_textures(), 1);

    text.add_char('A', 0, 0, "Red");
    text.render(&mut textures);
    let draws = backend.draws();
    assert_eq!(draws.last().unwrap().tint, colors::RED);
  }
}
