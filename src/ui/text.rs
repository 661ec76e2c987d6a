//! Static text.

use crate::gfx::console::Console;
use crate::gfx::palette::DEFAULT_COLOR;
use crate::input::Input;
use crate::ui::Outcome;
use crate::ui::SharedColor;
use crate::ui::UiItem;
use crate::ui::CURSOR;
use crate::ui::NO_CURSOR;

/// A line of text that can be hovered, but has nothing to edit.
///
/// Selecting it hands control straight back.
pub struct Text {
  content: String,
  color: String,
  cursor: SharedColor,
}

impl Text {
  /// Creates a new `Text` in the default color.
  pub fn new(content: impl Into<String>, cursor: SharedColor) -> Self {
    Self::with_color(content, DEFAULT_COLOR, cursor)
  }

  /// Creates a new `Text` in the given color.
  pub fn with_color(
    content: impl Into<String>,
    color: impl Into<String>,
    cursor: SharedColor,
  ) -> Self {
    Self {
      content: content.into(),
      color: color.into(),
      cursor,
    }
  }
}

impl UiItem for Text {
  fn render_no_status(&self, console: &mut Console) {
    console.add_string(NO_CURSOR, DEFAULT_COLOR);
    console.add_string(&self.content, &self.color);
  }

  fn render_hovered(&self, console: &mut Console) {
    console.add_string(CURSOR, &self.cursor.get());
    console.add_string(&self.content, &self.color);
  }

  fn render_selected(&self, console: &mut Console) {
    self.render_hovered(console);
  }

  fn handle_input(&mut self, _: &mut Input) -> Outcome {
    Outcome::Hovered
  }

  fn value(&self) -> Option<&str> {
    Some(&self.content)
  }
}
