//! A backend without a screen.
//!
//! [`Headless`] records every draw call instead of displaying it, and replays
//! events that were queued on it ahead of time. It is useful for tests and for
//! running menus without a terminal attached.
//!
//! Clones share state, so a test can hand one clone to the engine and keep
//! another to inspect what was drawn.

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use crate::error::Result;
use crate::gfx::backend::Backend;
use crate::gfx::backend::DrawCall;
use crate::gfx::backend::Event;
use crate::gfx::backend::TextureId;
use crate::gfx::texel::colors;
use crate::gfx::texel::Rgb;

/// A draw call, along with the color mod in effect when it was made.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RecordedDraw {
  pub call: DrawCall,
  pub tint: Rgb,
}

/// A recording backend.
#[derive(Clone)]
pub struct Headless(Rc<RefCell<Inner>>);

struct Inner {
  size: (u16, u16),
  next_id: u32,
  textures: HashMap<TextureId, Rgb>,
  draws: Vec<RecordedDraw>,
  last_frame: Vec<RecordedDraw>,
  presented: u64,
  events: VecDeque<Event>,
}

impl Headless {
  /// Creates a new `Headless` backend with the given screen size in pixels.
  pub fn new(width: u16, height: u16) -> Self {
    Self(Rc::new(RefCell::new(Inner {
      size: (width, height),
      next_id: 0,
      textures: HashMap::new(),
      draws: Vec::new(),
      last_frame: Vec::new(),
      presented: 0,
      events: VecDeque::new(),
    })))
  }

  /// Queues an event to be returned by [`Backend::poll_event()`].
  pub fn push_event(&self, event: Event) {
    self.0.borrow_mut().events.push_back(event);
  }

  /// Returns the draws made since the last clear.
  pub fn draws(&self) -> Vec<RecordedDraw> {
    self.0.borrow().draws.clone()
  }

  /// Returns the draws that made up the most recently presented frame.
  pub fn last_frame(&self) -> Vec<RecordedDraw> {
    self.0.borrow().last_frame.clone()
  }

  /// Returns the glyphs drawn since the last clear, with their screen
  /// positions.
  pub fn glyphs(&self) -> Vec<(char, i32, i32)> {
    self
      .0
      .borrow()
      .draws
      .iter()
      .filter_map(|d| {
        let c = d.call.glyph?;
        Some((c, d.call.dest.x(), d.call.dest.y()))
      })
      .collect()
  }

  /// Returns how many frames have been presented.
  pub fn presented(&self) -> u64 {
    self.0.borrow().presented
  }

  /// Returns how many textures are loaded.
  pub fn live_textures(&self) -> usize {
    self.0.borrow().textures.len()
  }

  /// Returns the color mod of a texture, or white if it does not exist.
  pub fn color_mod_of(&self, texture: TextureId) -> Rgb {
    self.color_mod(texture)
  }
}

impl Backend for Headless {
  fn screen_size(&self) -> (u16, u16) {
    self.0.borrow().size
  }

  fn load_texture(&mut self, _: &Path) -> Result<TextureId> {
    let mut inner = self.0.borrow_mut();
    let id = TextureId(inner.next_id);
    inner.next_id += 1;
    inner.textures.insert(id, colors::WHITE);
    Ok(id)
  }

  fn destroy_texture(&mut self, texture: TextureId) {
    self.0.borrow_mut().textures.remove(&texture);
  }

  fn color_mod(&self, texture: TextureId) -> Rgb {
    self
      .0
      .borrow()
      .textures
      .get(&texture)
      .copied()
      .unwrap_or(colors::WHITE)
  }

  fn set_color_mod(&mut self, texture: TextureId, color: Rgb) {
    if let Some(c) = self.0.borrow_mut().textures.get_mut(&texture) {
      *c = color;
    }
  }

  fn draw(&mut self, call: DrawCall) {
    let tint = self.color_mod(call.texture);
    self.0.borrow_mut().draws.push(RecordedDraw { call, tint });
  }

  fn clear(&mut self) {
    self.0.borrow_mut().draws.clear();
  }

  fn present(&mut self) -> Result<()> {
    let mut inner = self.0.borrow_mut();
    inner.last_frame = inner.draws.clone();
    inner.presented += 1;
    Ok(())
  }

  fn poll_event(&mut self) -> Result<Option<Event>> {
    Ok(self.0.borrow_mut().events.pop_front())
  }
}
