//! Single-choice selectors.

use crate::gfx::console::Console;
use crate::gfx::palette::DEFAULT_COLOR;
use crate::input::Input;
use crate::ui::first_key;
use crate::ui::navigate;
use crate::ui::ColorString;
use crate::ui::Outcome;
use crate::ui::SharedColor;
use crate::ui::UiItem;
use crate::ui::CURSOR;
use crate::ui::DESELECT;
use crate::ui::NO_CURSOR;
use crate::ui::SELECT;

/// A named value picked from a fixed list of colored strings.
///
/// While selected, the choices are listed under the name and the cursor
/// moves among them; Enter commits the hovered choice, Escape keeps the old
/// one.
pub struct Choice {
  name: String,
  choices: Vec<ColorString>,
  cursor: usize,
  chosen: usize,
  cursor_color: SharedColor,
}

impl Choice {
  /// Creates a new `Choice` with `chosen` committed and the cursor on it.
  ///
  /// Out of range indices are clamped to the last choice.
  pub fn new(
    name: impl Into<String>,
    choices: Vec<ColorString>,
    chosen: usize,
    cursor_color: SharedColor,
  ) -> Self {
    let chosen = chosen.min(choices.len().saturating_sub(1));
    Self {
      name: name.into(),
      choices,
      cursor: chosen,
      chosen,
      cursor_color,
    }
  }

  /// Returns the index of the hovered choice.
  pub fn cursor_index(&self) -> usize {
    self.cursor
  }

  /// Returns the index of the committed choice.
  pub fn chosen_index(&self) -> usize {
    self.chosen
  }

  /// Returns the committed choice, unless there are no choices at all.
  pub fn chosen(&self) -> Option<&ColorString> {
    self.choices.get(self.chosen)
  }

  /// Appends a choice.
  pub fn push(&mut self, choice: ColorString) {
    self.choices.push(choice);
  }

  fn render_summary(&self, console: &mut Console) {
    console.add_string(&format!("{}: ", self.name), DEFAULT_COLOR);
    if let Some(c) = self.chosen() {
      console.add_string(&c.content, &c.color);
    }
  }
}

impl UiItem for Choice {
  fn render_no_status(&self, console: &mut Console) {
    console.add_string(NO_CURSOR, DEFAULT_COLOR);
    self.render_summary(console);
  }

  fn render_hovered(&self, console: &mut Console) {
    console.add_string(CURSOR, &self.cursor_color.get());
    self.render_summary(console);
  }

  fn render_selected(&self, console: &mut Console) {
    let anchor = console.anchor();
    console.set_anchor_here();

    console.add_string(NO_CURSOR, DEFAULT_COLOR);
    console.add_string(&format!("{}:", self.name), DEFAULT_COLOR);
    for (i, c) in self.choices.iter().enumerate() {
      console.add_new_line(1);
      if i == self.cursor {
        console.set_focus(console.cursor().y());
        console.add_string(NO_CURSOR, DEFAULT_COLOR);
        console.add_string(CURSOR, &self.cursor_color.get());
      } else {
        console.add_string(NO_CURSOR, DEFAULT_COLOR);
        console.add_string(NO_CURSOR, DEFAULT_COLOR);
      }
      console.add_string(&c.content, &c.color);
    }

    console.set_anchor(anchor);
  }

  fn handle_input(&mut self, input: &mut Input) -> Outcome {
    let key = match first_key(input) {
      Some(key) => key,
      None => return Outcome::Selected,
    };

    if key == SELECT {
      input.block_until_released(key);
      self.chosen = self.cursor;
      return Outcome::Hovered;
    }
    if key == DESELECT {
      input.block_until_released(key);
      self.cursor = self.chosen;
      return Outcome::Hovered;
    }
    if let Some(next) = navigate(input, key, self.cursor, self.choices.len()) {
      self.cursor = next;
    }
    Outcome::Selected
  }

  fn value(&self) -> Option<&str> {
    self.chosen().map(|c| c.content.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::input::KeyCode;
  use crate::ui::tests::console;
  use crate::ui::tests::screen;
  use crate::ui::tests::tap;
  use crate::ui::Status;

  fn choice() -> Choice {
    Choice::new(
      "Mode",
      vec![ColorString::new("Easy", "Green"), ColorString::new("Hard", "Red")],
      0,
      SharedColor::new("Blue"),
    )
  }

  #[test]
  fn down_clamps_at_last_choice() {
    let mut input = Input::new();
    let mut choice = choice();

    tap(&mut input, KeyCode::Char('s'));
    assert_eq!(choice.handle_input(&mut input), Outcome::Selected);
    assert_eq!(choice.cursor_index(), 1);

    tap(&mut input, KeyCode::Char('s'));
    assert_eq!(choice.handle_input(&mut input), Outcome::Selected);
    assert_eq!(choice.cursor_index(), 1);
  }

  #[test]
  fn held_key_waits_for_cooldown() {
    let mut input = Input::new();
    let mut choice = Choice::new(
      "n",
      (0..5).map(|i| ColorString::new(i.to_string(), "White")).collect(),
      0,
      SharedColor::new("Blue"),
    );

    tap(&mut input, KeyCode::Down);
    choice.handle_input(&mut input);
    choice.handle_input(&mut input);
    assert_eq!(choice.cursor_index(), 1);
  }

  #[test]
  fn enter_commits_and_escape_reverts() {
    let mut input = Input::new();
    let mut choice = choice();

    tap(&mut input, KeyCode::Down);
    choice.handle_input(&mut input);
    tap(&mut input, KeyCode::Esc);
    assert_eq!(choice.handle_input(&mut input), Outcome::Hovered);
    assert_eq!(choice.value(), Some("Easy"));

    tap(&mut input, KeyCode::Down);
    choice.handle_input(&mut input);
    tap(&mut input, KeyCode::Enter);
    assert_eq!(choice.handle_input(&mut input), Outcome::Hovered);
    assert_eq!(choice.chosen_index(), 1);
    assert_eq!(choice.value(), Some("Hard"));
  }

  #[test]
  fn selected_render_lists_choices() {
    let (mut console, mut textures, backend) = console();
    let mut input = Input::new();
    let mut choice = choice();
    tap(&mut input, KeyCode::Down);
    choice.handle_input(&mut input);

    console.add_string("ab", "White");
    choice.render(Status::Selected, &mut console);
    console.add_new_line(1);
    console.add_string("z", "White");

    let rows = screen(&mut console, &mut textures, &backend);
    assert_eq!(rows[0], "ab   Mode:");
    assert_eq!(rows[1], "        Easy");
    assert_eq!(rows[2], "      > Hard");
    assert_eq!(rows[3], "z");
  }
}
