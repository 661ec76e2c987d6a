//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use frost::config::FontData;
use frost::gfx::Console;
use frost::gfx::Font;
use frost::gfx::Headless;
use frost::gfx::Palette;
use frost::gfx::TextRenderer;
use frost::gfx::Textures;
use frost::input::Input;
use frost::input::KeyCode;
use frost::input::KeyModifiers;

/// Cell size of the test font, in pixels.
pub const CELL: i32 = 8;

/// A font with an 8x8 glyph for every printable ASCII character.
pub fn font_data() -> FontData {
  FontData {
    png_path: "font.png".into(),
    font_width: CELL as u16,
    font_height: CELL as u16,
    character_data: (b'!'..=b'~')
      .map(|c| (c, (c - b'!') as u16 * CELL as u16, 0))
      .collect(),
  }
}

/// A console `cols` cells wide and `rows` cells tall, over a headless
/// backend.
pub fn console(cols: usize, rows: usize) -> (Console, Textures, Headless) {
  let backend = Headless::new(1024, 1024);
  let mut textures = Textures::new(Box::new(backend.clone()), Palette::new());
  let font = Font::load(&font_data(), &mut textures).unwrap();
  let mut console = Console::new(TextRenderer::new(font));
  console.resize(0, 0, cols as i32 * CELL, rows as i32 * CELL);
  (console, textures, backend)
}

/// Renders `console` and returns its visible rows as strings.
pub fn screen(
  console: &mut Console,
  textures: &mut Textures,
  backend: &Headless,
) -> Vec<String> {
  textures.backend_mut().clear();
  console.render(textures);

  let mut rows = vec![Vec::new(); console.height()];
  for (c, x, y) in backend.glyphs() {
    let (col, row) = ((x / CELL) as usize, (y / CELL) as usize);
    let line = &mut rows[row];
    if line.len() <= col {
      line.resize(col + 1, ' ');
    }
    line[col] = c;
  }
  rows
    .into_iter()
    .map(|r| r.into_iter().collect::<String>().trim_end().to_string())
    .collect()
}

/// Presses `key` on a fresh frame, releasing everything held before.
pub fn tap(input: &mut Input, key: KeyCode) {
  for k in input.pressed_keys().to_vec() {
    input.release(k);
  }
  input.begin_frame(input.now());
  input.press(key, KeyModifiers::NONE, false);
}
