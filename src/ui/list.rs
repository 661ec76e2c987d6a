//! Composite lists.

use crate::gfx::console::Console;
use crate::gfx::palette::DEFAULT_COLOR;
use crate::input::Input;
use crate::ui::first_key;
use crate::ui::navigate;
use crate::ui::Outcome;
use crate::ui::SharedColor;
use crate::ui::Status;
use crate::ui::UiItem;
use crate::ui::CURSOR;
use crate::ui::DESELECT;
use crate::ui::NO_CURSOR;
use crate::ui::SELECT;

/// The color "Empty" is drawn in for lists with no children.
const EMPTY_COLOR: &str = "Red";

/// A named group of items, which may themselves be lists.
///
/// While selected, a list works like a small panel: its children are drawn
/// beneath its name with a hanging indent, the cursor moves among them, and
/// Enter selects one. Input goes to the selected child until it hands control
/// back; Escape with no child selected hands control back to the list's own
/// owner.
pub struct List {
  name: String,
  items: Vec<Box<dyn UiItem>>,
  cursor: usize,
  selected: Option<usize>,
  cursor_color: SharedColor,
}

impl List {
  /// Creates a new `List`.
  pub fn new(
    name: impl Into<String>,
    items: Vec<Box<dyn UiItem>>,
    cursor_color: SharedColor,
  ) -> Self {
    Self {
      name: name.into(),
      items,
      cursor: 0,
      selected: None,
      cursor_color,
    }
  }

  /// Moves the cursor, clamped to the last child.
  pub fn with_cursor(mut self, cursor: usize) -> Self {
    self.cursor = cursor.min(self.items.len().saturating_sub(1));
    self
  }

  /// Appends a child.
  pub fn push(&mut self, item: impl UiItem + 'static) {
    self.items.push(Box::new(item));
  }

  /// Returns the children.
  pub fn items(&self) -> &[Box<dyn UiItem>] {
    &self.items
  }

  /// Returns the index of the hovered child.
  pub fn cursor_index(&self) -> usize {
    self.cursor
  }

  /// Returns the index of the selected child, if any.
  pub fn selected_index(&self) -> Option<usize> {
    self.selected
  }

  fn render_summary(&self, console: &mut Console) {
    console.add_string(&format!("{}: ", self.name), DEFAULT_COLOR);
    if self.items.is_empty() {
      console.add_string("Empty", EMPTY_COLOR);
    } else {
      console.add_string("[...]", DEFAULT_COLOR);
    }
  }
}

impl UiItem for List {
  fn render_no_status(&self, console: &mut Console) {
    console.add_string(NO_CURSOR, DEFAULT_COLOR);
    self.render_summary(console);
  }

  fn render_hovered(&self, console: &mut Console) {
    console.add_string(CURSOR, &self.cursor_color.get());
    self.render_summary(console);
  }

  fn render_selected(&self, console: &mut Console) {
    if self.items.is_empty() {
      self.render_hovered(console);
      return;
    }

    let anchor = console.anchor();
    console.set_anchor_here();
    console.add_string(NO_CURSOR, DEFAULT_COLOR);
    console.add_string(&format!("{}:", self.name), DEFAULT_COLOR);
    console.set_anchor(console.anchor() + NO_CURSOR.len());

    for (i, item) in self.items.iter().enumerate() {
      console.add_new_line(1);
      let status = if i != self.cursor {
        Status::NoStatus
      } else if self.selected.is_some() {
        Status::Selected
      } else {
        Status::Hovered
      };
      if i == self.cursor {
        console.set_focus(console.cursor().y());
      }
      item.render(status, console);
    }

    console.set_anchor(anchor);
  }

  fn handle_input(&mut self, input: &mut Input) -> Outcome {
    if let Some(i) = self.selected {
      if self.items[i].handle_input(input) == Outcome::Hovered {
        self.selected = None;
      }
      return Outcome::Selected;
    }

    let key = match first_key(input) {
      Some(key) => key,
      None => return Outcome::Selected,
    };

    if key == SELECT {
      input.block_until_released(key);
      if !self.items.is_empty() {
        self.selected = Some(self.cursor);
      }
    } else if key == DESELECT {
      input.block_until_released(key);
      return Outcome::Hovered;
    } else if let Some(next) =
      navigate(input, key, self.cursor, self.items.len())
    {
      self.cursor = next;
    }
    Outcome::Selected
  }
}
