//! Editable lists of strings.

use crate::gfx::console::Console;
use crate::gfx::palette::DEFAULT_COLOR;
use crate::input::Input;
use crate::input::KeyCode;
use crate::ui::edit;
use crate::ui::first_key;
use crate::ui::navigate;
use crate::ui::take_press;
use crate::ui::Outcome;
use crate::ui::SharedColor;
use crate::ui::UiItem;
use crate::ui::CURSOR;
use crate::ui::DESELECT;
use crate::ui::NO_CURSOR;
use crate::ui::SELECT;

/// Label of the synthetic entry that appends a new string.
pub const ADD_LABEL: &str = "Add";

/// A growable list of strings, followed by an "Add" entry.
///
/// While the list is selected:
/// - Enter on a string edits it, and Enter or Escape ends the edit;
/// - Enter on "Add" inserts a blank string before it;
/// - Backspace on a string deletes it;
/// - Escape hands control back.
pub struct TextList {
  name: String,
  entries: Vec<String>,
  cursor: usize,
  editing: Option<usize>,
  cursor_color: SharedColor,
}

impl TextList {
  /// Creates a new `TextList` with the cursor on its first entry.
  pub fn new(
    name: impl Into<String>,
    entries: Vec<String>,
    cursor_color: SharedColor,
  ) -> Self {
    Self {
      name: name.into(),
      entries,
      cursor: 0,
      editing: None,
      cursor_color,
    }
  }

  /// Returns the strings in the list.
  pub fn entries(&self) -> &[String] {
    &self.entries
  }

  /// Returns the hovered entry; `entries().len()` is the "Add" entry.
  pub fn cursor_index(&self) -> usize {
    self.cursor
  }

  /// Returns the entry being edited, if any.
  pub fn editing_index(&self) -> Option<usize> {
    self.editing
  }

  fn on_add(&self) -> bool {
    self.cursor == self.entries.len()
  }
}

impl UiItem for TextList {
  fn render_no_status(&self, console: &mut Console) {
    console.add_string(NO_CURSOR, DEFAULT_COLOR);
    console.add_string(&format!("{}: [...]", self.name), DEFAULT_COLOR);
  }

  fn render_hovered(&self, console: &mut Console) {
    console.add_string(CURSOR, &self.cursor_color.get());
    console.add_string(&format!("{}: [...]", self.name), DEFAULT_COLOR);
  }

  fn render_selected(&self, console: &mut Console) {
    let anchor = console.anchor();
    console.set_anchor_here();
    let color = self.cursor_color.get();

    console.add_string(NO_CURSOR, DEFAULT_COLOR);
    console.add_string(&format!("{}:", self.name), DEFAULT_COLOR);

    let labels = self
      .entries
      .iter()
      .map(String::as_str)
      .chain(std::iter::once(ADD_LABEL));
    for (i, label) in labels.enumerate() {
      console.add_new_line(1);
      console.add_string(NO_CURSOR, DEFAULT_COLOR);
      if i != self.cursor {
        console.add_string(NO_CURSOR, DEFAULT_COLOR);
        console.add_string(label, DEFAULT_COLOR);
        continue;
      }

      console.set_focus(console.cursor().y());
      console.add_string(CURSOR, &color);
      if self.editing == Some(i) {
        console.add_string(&format!("{}_", label), &color);
      } else {
        console.add_string(label, DEFAULT_COLOR);
      }
    }

    console.set_anchor(anchor);
  }

  fn handle_input(&mut self, input: &mut Input) -> Outcome {
    if let Some(i) = self.editing {
      if take_press(input, SELECT) || take_press(input, DESELECT) {
        self.editing = None;
      } else {
        edit::edit_string(&mut self.entries[i], input);
      }
      return Outcome::Selected;
    }

    let key = match first_key(input) {
      Some(key) => key,
      None => return Outcome::Selected,
    };

    match key {
      SELECT => {
        input.block_until_released(key);
        if self.on_add() {
          self.entries.insert(self.cursor, String::new());
          self.cursor += 1;
        } else {
          self.editing = Some(self.cursor);
        }
      }
      DESELECT => {
        input.block_until_released(key);
        return Outcome::Hovered;
      }
      KeyCode::Backspace => {
        input.block_until_released(key);
        if !self.on_add() {
          self.entries.remove(self.cursor);
          self.cursor = self.cursor.saturating_sub(1);
        }
      }
      _ => {
        let len = self.entries.len() + 1;
        if let Some(next) = navigate(input, key, self.cursor, len) {
          self.cursor = next;
        }
      }
    }
    Outcome::Selected
  }
}
