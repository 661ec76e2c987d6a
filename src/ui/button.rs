//! Buttons.

use std::fmt;

use crate::gfx::console::Console;
use crate::gfx::palette::DEFAULT_COLOR;
use crate::input::Input;
use crate::ui::Outcome;
use crate::ui::SharedColor;
use crate::ui::UiItem;
use crate::ui::CURSOR;
use crate::ui::NO_CURSOR;

/// An item that runs a callback each time it is selected.
pub struct Button {
  name: String,
  color: String,
  cursor: SharedColor,
  callback: Box<dyn FnMut()>,
}

impl Button {
  /// Creates a new `Button` drawn in the default color.
  pub fn new(
    name: impl Into<String>,
    cursor: SharedColor,
    callback: impl FnMut() + 'static,
  ) -> Self {
    Self {
      name: name.into(),
      color: DEFAULT_COLOR.to_string(),
      cursor,
      callback: Box::new(callback),
    }
  }

  /// Sets the color the button's name is drawn in.
  pub fn with_color(mut self, color: impl Into<String>) -> Self {
    self.color = color.into();
    self
  }
}

impl fmt::Debug for Button {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Button")
      .field("name", &self.name)
      .field("color", &self.color)
      .finish()
  }
}

impl UiItem for Button {
  fn render_no_status(&self, console: &mut Console) {
    console.add_string(NO_CURSOR, DEFAULT_COLOR);
    console.add_string(&self.name, &self.color);
  }

  fn render_hovered(&self, console: &mut Console) {
    console.add_string(CURSOR, &self.cursor.get());
    console.add_string(&self.name, &self.color);
  }

  fn render_selected(&self, console: &mut Console) {
    self.render_hovered(console);
  }

  fn handle_input(&mut self, _: &mut Input) -> Outcome {
    tracing::debug!("button {:?} pressed", self.name);
    (self.callback)();
    Outcome::Hovered
  }
}
