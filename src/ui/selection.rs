//! Flat pick-one menus.

use crate::gfx::console::Console;
use crate::gfx::palette::DEFAULT_COLOR;
use crate::input::Input;
use crate::ui::first_key;
use crate::ui::navigate;
use crate::ui::ColorString;
use crate::ui::SharedColor;
use crate::ui::CURSOR;
use crate::ui::NO_CURSOR;
use crate::ui::SELECT;

/// A list of colored strings to pick one of, such as a main menu.
///
/// Unlike a [`Panel`](crate::ui::Panel), the entries are inert: Enter just
/// records which one was picked, for the owner to collect with
/// [`Selection::take_selected()`].
pub struct Selection {
  entries: Vec<ColorString>,
  cursor: usize,
  selected: Option<usize>,
  cursor_color: SharedColor,
}

impl Selection {
  pub fn new(entries: Vec<ColorString>, cursor_color: SharedColor) -> Self {
    Self {
      entries,
      cursor: 0,
      selected: None,
      cursor_color,
    }
  }

  pub fn entries(&self) -> &[ColorString] {
    &self.entries
  }

  #[inline]
  pub fn cursor_index(&self) -> usize {
    self.cursor
  }

  /// Returns the picked entry's index and clears it.
  pub fn take_selected(&mut self) -> Option<usize> {
    self.selected.take()
  }

  /// Runs one frame: draws the entries, then navigates or picks.
  pub fn simulate(&mut self, console: &mut Console, input: &mut Input) {
    if self.entries.is_empty() {
      return;
    }

    let color = self.cursor_color.get();
    for (i, entry) in self.entries.iter().enumerate() {
      if i == self.cursor {
        console.set_focus(console.cursor().y());
        console.add_string(CURSOR, &color);
      } else {
        console.add_string(NO_CURSOR, DEFAULT_COLOR);
      }
      console.add_string(&entry.content, &entry.color);
      console.add_new_line(1);
    }

    let key = match first_key(input) {
      Some(key) => key,
      None => return,
    };
    if key == SELECT {
      input.block_until_released(key);
      self.selected = Some(self.cursor);
    } else if let Some(next) =
      navigate(input, key, self.cursor, self.entries.len())
    {
      self.cursor = next;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::input::KeyCode;
  use crate::ui::tests::console;
  use crate::ui::tests::screen;
  use crate::ui::tests::tap;

  #[test]
  fn picks_the_hovered_entry() {
    let (mut console, mut textures, backend) = console();
    let mut input = Input::new();
    let mut menu = Selection::new(
      vec![
        ColorString::new("Play", "Green"),
        ColorString::new("Quit", "Red"),
      ],
      SharedColor::new("Blue"),
    );

    tap(&mut input, KeyCode::Char('S'));
    menu.simulate(&mut console, &mut input);
    assert_eq!(menu.cursor_index(), 1);
    screen(&mut console, &mut textures, &backend);

    tap(&mut input, KeyCode::Enter);
    menu.simulate(&mut console, &mut input);
    assert_eq!(menu.take_selected(), Some(1));
    assert_eq!(menu.take_selected(), None);

    let rows = screen(&mut console, &mut textures, &backend);
    assert_eq!(rows[0], "   Play");
    assert_eq!(rows[1], " > Quit");
  }
}
