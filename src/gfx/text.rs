//! Glyph rasterizer.
//!
//! A [`TextRenderer`] places single characters on the screen at pixel
//! positions, by copying cells out of a font atlas. Characters are queued as
//! they are added and submitted in one go on [`TextRenderer::render()`], so no
//! explicit "clear screen" is ever needed: whatever was not added this frame
//! simply is not drawn.

use std::collections::HashMap;

use crate::config::FontData;
use crate::error::Result;
use crate::geo::Rect;
use crate::gfx::backend::TextureId;
use crate::gfx::texture::Textures;

/// The largest factor glyphs may be scaled by.
pub const MAX_SCALE: f32 = 5.0;

/// The smallest factor glyphs may be scaled by.
pub const MIN_SCALE: f32 = 1.0;

/// A font atlas: one texture, and where each glyph is inside it.
#[derive(Clone, Debug)]
pub struct Font {
  texture: TextureId,
  width: u16,
  height: u16,
  glyphs: HashMap<char, (u16, u16)>,
}

impl Font {
  /// Creates the atlas texture for `data` and indexes its glyphs.
  ///
  /// The font holds a reference to the atlas for as long as the program
  /// runs, so sprites cut from the same image never take it down with them.
  pub fn load(data: &FontData, textures: &mut Textures) -> Result<Self> {
    let texture = textures.create_texture(&data.png_path)?;
    let glyphs = data
      .character_data
      .iter()
      .map(|&(code, x, y)| (code as char, (x, y)))
      .collect::<HashMap<_, _>>();

    tracing::info!(
      "loaded font {} ({}x{}, {} glyphs)",
      data.png_path.display(),
      data.font_width,
      data.font_height,
      glyphs.len()
    );

    Ok(Self {
      texture,
      width: data.font_width,
      height: data.font_height,
      glyphs,
    })
  }

  /// Returns the atlas texture.
  pub fn texture(&self) -> TextureId {
    self.texture
  }

  /// Returns the unscaled cell width.
  pub fn width(&self) -> u16 {
    self.width
  }

  /// Returns the unscaled cell height.
  pub fn height(&self) -> u16 {
    self.height
  }

  /// Returns the rectangle inside the atlas holding `c`.
  pub fn source(&self, c: char) -> Option<Rect> {
    let &(x, y) = self.glyphs.get(&c)?;
    Some(Rect::new(
      x as i32,
      y as i32,
      self.width as i32,
      self.height as i32,
    ))
  }
}

#[derive(Clone, Debug)]
struct QueuedGlyph {
  glyph: char,
  source: Rect,
  dest: Rect,
  color: String,
}

/// A queue of glyphs waiting to be drawn, plus the font they come from.
#[derive(Clone, Debug)]
pub struct TextRenderer {
  font: Font,
  scale: f32,
  queue: Vec<QueuedGlyph>,
}

impl TextRenderer {
  /// Creates a new `TextRenderer` drawing with `font` at scale 1.
  pub fn new(font: Font) -> Self {
    Self {
      font,
      scale: MIN_SCALE,
      queue: Vec::new(),
    }
  }

  /// Returns the font.
  pub fn font(&self) -> &Font {
    &self.font
  }

  /// Returns the factor glyphs are scaled by.
  pub fn scale(&self) -> f32 {
    self.scale
  }

  /// Sets the scale factor, clamped to `[MIN_SCALE, MAX_SCALE]`.
  pub fn set_size_scale(&mut self, scale: f32) {
    self.scale = num::clamp(scale.abs(), MIN_SCALE, MAX_SCALE);
  }

  /// Grows the scale factor, up to `MAX_SCALE`.
  pub fn increase_size_scale(&mut self, amount: f32) {
    self.set_size_scale(self.scale + amount);
  }

  /// Shrinks the scale factor, down to `MIN_SCALE`.
  pub fn decrease_size_scale(&mut self, amount: f32) {
    self.set_size_scale(self.scale - amount);
  }

  /// Returns the width of a glyph on screen.
  pub fn scaled_width(&self) -> u16 {
    (self.font.width as f32 * self.scale).floor() as u16
  }

  /// Returns the height of a glyph on screen.
  pub fn scaled_height(&self) -> u16 {
    (self.font.height as f32 * self.scale).floor() as u16
  }

  /// Returns how many glyphs are waiting for the next render.
  pub fn queued(&self) -> usize {
    self.queue.len()
  }

  /// Queues `c` to be drawn with its upper-left corner at `(x, y)`.
  ///
  /// Characters the font has no glyph for are dropped.
  pub fn add_char(&mut self, c: char, x: i32, y: i32, color: &str) {
    if let Some(glyph) = self.glyph(c, x, y, color) {
      self.queue.push(glyph);
    }
  }

  /// Draws `c` immediately, skipping the queue.
  ///
  /// This only makes sense between the backend's clear and present; anything
  /// drawn outside of that window is wiped before it is ever seen.
  pub fn draw_character_now(
    &self,
    c: char,
    x: i32,
    y: i32,
    color: &str,
    textures: &mut Textures,
  ) {
    if let Some(glyph) = self.glyph(c, x, y, color) {
      self.submit(&glyph, textures);
    }
  }

  /// Drops everything queued this frame.
  pub fn clear_buffered_content(&mut self) {
    self.queue.clear();
  }

  /// Submits every queued glyph, emptying the queue.
  pub fn render(&mut self, textures: &mut Textures) {
    let queue = std::mem::take(&mut self.queue);
    for glyph in &queue {
      self.submit(glyph, textures);
    }
    self.queue = queue;
    self.queue.clear();
  }

  fn glyph(&self, c: char, x: i32, y: i32, color: &str) -> Option<QueuedGlyph> {
    let source = match self.font.source(c) {
      Some(source) => source,
      None => {
        tracing::warn!("font has no glyph for {:?}; dropping it", c);
        return None;
      }
    };

    Some(QueuedGlyph {
      glyph: c,
      source,
      dest: Rect::new(
        x,
        y,
        self.scaled_width() as i32,
        self.scaled_height() as i32,
      ),
      color: color.to_string(),
    })
  }

  fn submit(&self, glyph: &QueuedGlyph, textures: &mut Textures) {
    textures.draw_tinted(
      self.font.texture,
      glyph.source,
      glyph.dest,
      &glyph.color,
      Some(glyph.glyph),
    );
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::gfx::headless::Headless;
  use crate::gfx::palette::Palette;
  use crate::gfx::texel::colors;

  /// An 8x8 font with every printable ASCII glyph in one row.
  pub fn ascii_font() -> FontData {
    FontData {
      png_path: "font.png".into(),
      font_width: 8,
      font_height: 8,
      character_data: (b'!'..=b'~')
        .map(|c| (c, (c - b'!') as u16 * 8, 0))
        .collect(),
    }
  }

  fn setup() -> (TextRenderer, Textures, Headless) {
    let backend = Headless::new(640, 480);
    let mut textures = Textures::new(Box::new(backend.clone()), Palette::new());
    let font = Font::load(&ascii_font(), &mut textures).unwrap();
    (TextRenderer::new(font), textures, backend)
  }

  #[test]
  fn scale_is_clamped() {
    let (mut text, _, _) = setup();
    text.set_size_scale(9.0);
    assert_eq!(text.scale(), MAX_SCALE);
    text.decrease_size_scale(10.0);
    assert_eq!(text.scale(), MIN_SCALE);
    text.increase_size_scale(1.5);
    assert_eq!(text.scaled_width(), 20);
  }

  #[test]
  fn render_drains_queue() {
    let (mut text, mut textures, backend) = setup();
    text.add_char('A', 0, 0, "Red");
    text.add_char('B', 8, 0, "White");
    assert_eq!(text.queued(), 2);

    text.render(&mut textures);
    assert_eq!(text.queued(), 0);

    let draws = backend.draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].call.glyph, Some('A'));
    assert_eq!(draws[0].tint, colors::RED);
    assert_eq!(
      draws[1].call.source,
      Rect::new((b'B' - b'!') as i32 * 8, 0, 8, 8)
    );
  }

  #[test]
  fn missing_glyphs_are_dropped() {
    let (mut text, _, _) = setup();
    text.add_char('é', 0, 0, "White");
    assert_eq!(text.queued(), 0);
  }
}
