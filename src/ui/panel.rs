//! Top-level item containers.

use crate::gfx::console::Console;
use crate::input::Input;
use crate::ui::first_key;
use crate::ui::navigate;
use crate::ui::Outcome;
use crate::ui::SharedColor;
use crate::ui::Status;
use crate::ui::UiItem;
use crate::ui::SELECT;

/// A vertical stack of items, one per line, driven once per frame by
/// [`Panel::simulate()`].
///
/// At most one item is selected at a time. While one is, it receives all
/// input; otherwise the panel moves its cursor and selects with Enter.
pub struct Panel {
  items: Vec<Box<dyn UiItem>>,
  cursor: usize,
  selected: Option<usize>,
  cursor_color: SharedColor,
}

impl Panel {
  /// Creates a new, empty `Panel`.
  pub fn new(cursor_color: SharedColor) -> Self {
    Self {
      items: Vec::new(),
      cursor: 0,
      selected: None,
      cursor_color,
    }
  }

  /// Adds an item to the bottom of the panel.
  pub fn push(&mut self, item: impl UiItem + 'static) {
    self.items.push(Box::new(item));
  }

  /// Adds an already boxed item to the bottom of the panel.
  pub fn push_boxed(&mut self, item: Box<dyn UiItem>) {
    self.items.push(item);
  }

  /// Returns the panel's items.
  pub fn items(&self) -> &[Box<dyn UiItem>] {
    &self.items
  }

  /// Returns the item at `idx` mutably.
  pub fn item_mut(&mut self, idx: usize) -> Option<&mut Box<dyn UiItem>> {
    self.items.get_mut(idx)
  }

  /// Returns the cursor color handle shared with this panel's items.
  pub fn cursor_color(&self) -> &SharedColor {
    &self.cursor_color
  }

  /// Returns the index of the hovered item.
  #[inline]
  pub fn cursor_index(&self) -> usize {
    self.cursor
  }

  /// Returns the index of the selected item, if any.
  #[inline]
  pub fn selected_index(&self) -> Option<usize> {
    self.selected
  }

  /// Moves the cursor back to the top and drops any selection.
  pub fn reset(&mut self) {
    self.cursor = 0;
    self.selected = None;
  }

  /// Runs one frame: draws every item into `console`, then hands `input` to
  /// the selected item, or navigates.
  pub fn simulate(&mut self, console: &mut Console, input: &mut Input) {
    if self.items.is_empty() {
      return;
    }
    self.render(console);
    self.handle_input(input);
  }

  /// Draws every item, one per line, with the focus on the cursor's row.
  pub fn render(&self, console: &mut Console) {
    for (i, item) in self.items.iter().enumerate() {
      let status = if i != self.cursor {
        Status::NoStatus
      } else if self.selected.is_some() {
        Status::Selected
      } else {
        console.set_focus(console.cursor().y());
        Status::Hovered
      };
      item.render(status, console);
      console.add_new_line(1);
    }
  }

  fn handle_input(&mut self, input: &mut Input) {
    if let Some(i) = self.selected {
      if self.items[i].handle_input(input) == Outcome::Hovered {
        self.selected = None;
      }
      return;
    }

    let key = match first_key(input) {
      Some(key) => key,
      None => return,
    };
    if key == SELECT {
      input.block_until_released(key);
      self.selected = Some(self.cursor);
    } else if let Some(next) =
      navigate(input, key, self.cursor, self.items.len())
    {
      self.cursor = next;
    }
  }
}
