//! The virtual console.
//!
//! A [`Console`] is a grid of character cells laid over a pixel region of the
//! screen. Text is written at a cursor that wraps at the right edge; rows may
//! run past the bottom of the region, in which case only a `height`-row window
//! of them is drawn. Which window that is depends on the *focus* row: the
//! console scrolls so that the focus stays visible.
//!
//! Nothing is drawn until [`Console::render()`], which also resets the cursor,
//! so a menu re-emits its whole contents every frame.

use crate::geo::Point;
use crate::geo::Rect;
use crate::gfx::text::TextRenderer;
use crate::gfx::texture::Textures;

/// Multiplier applied to the cell height to get the distance between rows.
pub const VERTICAL_SPACING: f32 = 1.0;

#[derive(Clone, Debug)]
struct Queued {
  row: usize,
  col: usize,
  glyph: char,
  color: String,
}

/// A character grid with a wrapping cursor and a scrolling window.
#[derive(Clone, Debug)]
pub struct Console {
  text: TextRenderer,
  bounds: Rect,
  width: usize,
  height: usize,

  cursor: (usize, usize),
  anchor: usize,
  focus: usize,
  greatest_row: usize,
  window: (usize, usize),

  queue: Vec<Queued>,
}

impl Console {
  /// Creates a new `Console` drawing with `text`, covering no area.
  ///
  /// Call [`Console::resize()`] to give it some room.
  pub fn new(text: TextRenderer) -> Self {
    Self {
      text,
      bounds: Rect::default(),
      width: 0,
      height: 0,
      cursor: (0, 0),
      anchor: 0,
      focus: 0,
      greatest_row: 0,
      window: (0, 0),
      queue: Vec::new(),
    }
  }

  /// Returns the rasterizer this console draws with.
  pub fn text(&self) -> &TextRenderer {
    &self.text
  }

  /// Changes the font scale, refitting the grid to the same pixel bounds.
  pub fn set_font_scale(&mut self, scale: f32) {
    self.text.set_size_scale(scale);
    let b = self.bounds;
    self.resize(b.x(), b.y(), b.lower_right().x(), b.lower_right().y());
  }

  /// Refits the console to the given pixel bounds.
  ///
  /// Inverted bounds collapse the console to nothing.
  pub fn resize(&mut self, start_x: i32, start_y: i32, end_x: i32, end_y: i32) {
    if end_x < start_x || end_y < start_y {
      tracing::warn!(
        "console bounds ({}, {})..({}, {}) are inverted; collapsing to zero size",
        start_x,
        start_y,
        end_x,
        end_y
      );
      self.bounds = Rect::default();
      self.width = 0;
      self.height = 0;
      return;
    }

    self.bounds = Rect::new(start_x, start_y, end_x - start_x, end_y - start_y);

    let cell_w = self.text.scaled_width() as f32;
    let cell_h = self.text.scaled_height() as f32 * VERTICAL_SPACING;
    self.width = if cell_w > 0.0 {
      (self.bounds.width() as f32 / cell_w) as usize
    } else {
      0
    };
    self.height = if cell_h > 0.0 {
      (self.bounds.height() as f32 / cell_h) as usize
    } else {
      0
    };
  }

  /// Returns the pixel region this console covers.
  pub fn bounds(&self) -> Rect {
    self.bounds
  }

  /// Returns the grid width, in cells.
  pub fn width(&self) -> usize {
    self.width
  }

  /// Returns the grid height, in cells.
  pub fn height(&self) -> usize {
    self.height
  }

  /// Returns the cursor as `(column, row)`.
  pub fn cursor(&self) -> Point<usize> {
    Point::new(self.cursor.0, self.cursor.1)
  }

  /// Moves the cursor, if `(col, row)` lies inside the grid.
  pub fn move_cursor(&mut self, col: usize, row: usize) {
    if col >= self.width || row >= self.height {
      return;
    }
    self.cursor = (col, row);
  }

  /// Returns the column new lines start at.
  pub fn anchor(&self) -> usize {
    self.anchor
  }

  /// Sets the column new lines start at.
  pub fn set_anchor(&mut self, col: usize) {
    self.anchor = col;
  }

  /// Anchors new lines at the cursor's current column.
  pub fn set_anchor_here(&mut self) {
    self.anchor = self.cursor.0;
  }

  /// Returns the row kept visible on the next render.
  pub fn focus(&self) -> usize {
    self.focus
  }

  /// Sets the row to keep visible on the next render.
  pub fn set_focus(&mut self, row: usize) {
    self.focus = row;
  }

  /// Returns the rows drawn by the last render, as a half-open range.
  pub fn window(&self) -> (usize, usize) {
    self.window
  }

  /// Returns how many characters are waiting to be rendered.
  pub fn queued(&self) -> usize {
    self.queue.len()
  }

  /// Writes one character at the cursor.
  ///
  /// Spaces only advance the cursor and newlines wrap it; anything else
  /// outside of printable ASCII is dropped.
  pub fn add_character(&mut self, c: char, color: &str) {
    match c {
      ' ' => {
        self.cursor.0 += 1;
        self.wrap_if_needed();
      }
      '\n' => self.add_new_line(1),
      '!'..='~' => {
        if self.width == 0 {
          return;
        }
        self.wrap_if_needed();

        let (col, row) = self.cursor;
        self.queue.push(Queued {
          row,
          col,
          glyph: c,
          color: color.to_string(),
        });
        self.greatest_row = self.greatest_row.max(row);

        self.cursor.0 += 1;
        self.wrap_if_needed();
      }
      _ => {}
    }
  }

  /// Writes every character of `s` in one color.
  pub fn add_string(&mut self, s: &str, color: &str) {
    for c in s.chars() {
      self.add_character(c, color);
    }
  }

  /// Moves the cursor down `n` rows, back to the anchor column.
  pub fn add_new_line(&mut self, n: usize) {
    self.cursor.1 += n;
    self.cursor.0 = if self.anchor < self.width { self.anchor } else { 0 };
    self.greatest_row = self.greatest_row.max(self.cursor.1);
  }

  /// Drops everything written since the last render.
  pub fn clear_buffered_content(&mut self) {
    self.queue.clear();
    self.text.clear_buffered_content();
  }

  /// Draws the visible window of everything written since the last render,
  /// then resets the cursor for the next frame.
  pub fn render(&mut self, textures: &mut Textures) {
    self.window = self.compute_window();
    let (start, end) = self.window;

    let cell_w = self.text.scaled_width() as f32;
    let cell_h = self.text.scaled_height() as f32 * VERTICAL_SPACING;
    for q in self.queue.drain(..) {
      if q.row < start || q.row >= end {
        continue;
      }
      let x = self.bounds.x() + (q.col as f32 * cell_w) as i32;
      let y = self.bounds.y() + ((q.row - start) as f32 * cell_h) as i32;
      self.text.add_char(q.glyph, x, y, &q.color);
    }
    self.text.render(textures);

    self.cursor = (0, 0);
    self.greatest_row = 0;
  }

  fn wrap_if_needed(&mut self) {
    if self.cursor.0 >= self.width {
      self.add_new_line(1);
    }
  }

  fn compute_window(&self) -> (usize, usize) {
    let height = self.height;
    let half = height / 2;

    // Centered on focus, but never past the last buffered row.
    let start = if self.focus < half {
      0
    } else {
      let centered = self.focus - half;
      let pinned = (self.greatest_row + 1).saturating_sub(height);
      centered.min(pinned)
    };
    (start, start + height)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::gfx::headless::Headless;
  use crate::gfx::palette::Palette;
  use crate::gfx::text::tests::ascii_font;
  use crate::gfx::text::Font;

  /// A console of 8x8 cells, `cols` by `rows`.
  fn console(cols: i32, rows: i32) -> (Console, Textures, Headless) {
    let backend = Headless::new(640, 480);
    let mut textures = Textures::new(Box::new(backend.clone()), Palette::new());
    let font = Font::load(&ascii_font(), &mut textures).unwrap();
    let mut console = Console::new(TextRenderer::new(font));
    console.resize(0, 0, cols * 8, rows * 8);
    (console, textures, backend)
  }

  #[test]
  fn resize_is_idempotent() {
    let (mut console, _, _) = console(10, 5);
    let before = (console.width(), console.height(), console.bounds());
    console.resize(0, 0, 80, 40);
    assert_eq!((console.width(), console.height(), console.bounds()), before);
    assert_eq!((console.width(), console.height()), (10, 5));
  }

  #[test]
  fn inverted_bounds_collapse() {
    let (mut console, _, _) = console(10, 5);
    console.resize(100, 0, 50, 40);
    assert_eq!((console.width(), console.height()), (0, 0));
  }

  #[test]
  fn characters_wrap_at_the_edge() {
    let (mut console, _, _) = console(4, 5);
    console.add_string("abcdef", "White");
    assert_eq!(console.cursor(), Point::new(2, 1));
    assert!(console.cursor().x() < console.width());
    assert_eq!(console.queued(), 6);
  }

  #[test]
  fn unprintable_characters_are_dropped() {
    let (mut console, _, _) = console(10, 5);
    console.add_string("a\tb\u{7f}", "White");
    assert_eq!(console.queued(), 2);
    console.add_character(' ', "White");
    assert_eq!(console.queued(), 2);
    assert_eq!(console.cursor(), Point::new(3, 0));
  }

  #[test]
  fn new_lines_return_to_anchor() {
    let (mut console, _, _) = console(10, 5);
    console.add_string("ab", "White");
    console.set_anchor_here();
    console.add_new_line(2);
    assert_eq!(console.cursor(), Point::new(2, 2));
    console.set_anchor(0);
    console.add_character('\n', "White");
    assert_eq!(console.cursor(), Point::new(0, 3));
  }

  #[test]
  fn move_cursor_is_bounds_checked() {
    let (mut console, _, _) = console(10, 5);
    console.move_cursor(3, 4);
    assert_eq!(console.cursor(), Point::new(3, 4));
    console.move_cursor(10, 0);
    assert_eq!(console.cursor(), Point::new(3, 4));
  }

  #[test]
  fn render_resets_cursor_and_queue() {
    let (mut console, mut textures, backend) = console(10, 5);
    console.add_string("hi", "Red");
    console.add_new_line(1);
    console.add_string("yo", "White");
    console.render(&mut textures);

    assert_eq!(console.cursor(), Point::new(0, 0));
    assert_eq!(console.queued(), 0);
    assert_eq!(
      backend.glyphs(),
      vec![('h', 0, 0), ('i', 8, 0), ('y', 0, 8), ('o', 8, 8)]
    );
  }

  #[test]
  fn window_starts_at_top_for_early_focus() {
    let (mut console, mut textures, _) = console(10, 10);
    console.set_focus(2);
    for _ in 0..3 {
      console.add_character('x', "White");
      console.add_new_line(1);
    }
    console.render(&mut textures);
    assert_eq!(console.window(), (0, 10));
  }

  #[test]
  fn window_centers_on_focus() {
    let (mut console, mut textures, backend) = console(10, 10);
    for row in 0..30 {
      console.add_string(&format!("{}", row % 10), "White");
      console.add_new_line(1);
    }
    console.set_focus(12);
    console.render(&mut textures);
    assert_eq!(console.window(), (7, 17));

    let glyphs = backend.glyphs();
    assert_eq!(glyphs.len(), 10);
    assert_eq!(glyphs[0], ('7', 0, 0));
  }

  #[test]
  fn window_pins_to_bottom() {
    let (mut console, mut textures, _) = console(10, 10);
    for _ in 0..14 {
      console.add_character('x', "White");
      console.add_new_line(1);
    }
    console.set_focus(12);
    console.render(&mut textures);
    assert_eq!(console.window(), (5, 15));
  }

  #[test]
  fn window_scrolls_one_row_at_a_time() {
    let (mut console, mut textures, _) = console(10, 10);
    let mut last = None;
    for focus in 0..21 {
      for _ in 0..20 {
        console.add_character('x', "White");
        console.add_new_line(1);
      }
      console.set_focus(focus);
      console.render(&mut textures);

      let (start, end) = console.window();
      assert!(start <= focus && focus < end, "{:?} misses {}", (start, end), focus);
      if let Some(prev) = last {
        assert!(start - prev <= 1, "window jumped from {} to {}", prev, start);
      }
      last = Some(start);
    }
    assert_eq!(console.window(), (11, 21));
  }
}
