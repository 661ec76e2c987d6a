//! Text editing helpers shared by the editable items.

use crate::input::Input;
use crate::input::KeyCode;
use crate::input::KeyModifiers;

/// Strips leading zeros from `s`, always leaving at least one character.
///
/// ```
/// # use frost::ui::edit::remove_first_zeros;
/// assert_eq!(remove_first_zeros("00042"), "42");
/// assert_eq!(remove_first_zeros("0"), "0");
/// assert_eq!(remove_first_zeros("0.5"), ".5");
/// ```
pub fn remove_first_zeros(s: &str) -> &str {
  let mut rest = s;
  while rest.len() > 1 && rest.starts_with('0') {
    rest = &rest[1..];
  }
  rest
}

/// Applies this frame's raw key presses to `content`, as a text field would.
///
/// Printable characters are appended, Backspace deletes the last character,
/// and Shift+Backspace clears everything. `accept` filters which characters
/// may be typed; it sees the content as it is before each one.
pub fn edit_with(
  content: &mut String,
  input: &Input,
  mut accept: impl FnMut(&str, char) -> bool,
) {
  for key in input.raw_keys() {
    match key.code {
      KeyCode::Char(c) if (' '..='~').contains(&c) => {
        if accept(content.as_str(), c) {
          content.push(c);
        }
      }
      KeyCode::Backspace if key.modifiers.contains(KeyModifiers::SHIFT) => {
        content.clear();
      }
      KeyCode::Backspace => {
        content.pop();
      }
      _ => {}
    }
  }
}

/// Applies this frame's raw key presses to `content`, accepting any printable
/// character.
pub fn edit_string(content: &mut String, input: &Input) {
  edit_with(content, input, |_, _| true)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zeros_are_stripped_down_to_one() {
    assert_eq!(remove_first_zeros("00042"), "42");
    assert_eq!(remove_first_zeros("0"), "0");
    assert_eq!(remove_first_zeros("000"), "0");
    assert_eq!(remove_first_zeros(""), "");
    assert_eq!(remove_first_zeros("100"), "100");
  }

  #[test]
  fn typing_and_deleting() {
    let mut input = Input::new();
    for c in "Hi!".chars() {
      input.press(KeyCode::Char(c), KeyModifiers::NONE, false);
    }
    input.press(KeyCode::Backspace, KeyModifiers::NONE, false);
    input.press(KeyCode::Tab, KeyModifiers::NONE, false);

    let mut content = String::from(">");
    edit_string(&mut content, &input);
    assert_eq!(content, ">Hi");

    input.begin_frame(input.now());
    input.press(KeyCode::Backspace, KeyModifiers::SHIFT, false);
    edit_string(&mut content, &input);
    assert!(content.is_empty());
  }

  #[test]
  fn filter_sees_current_content() {
    let mut input = Input::new();
    for c in "1.2.3".chars() {
      input.press(KeyCode::Char(c), KeyModifiers::NONE, false);
    }
    let mut content = String::new();
    edit_with(&mut content, &input, |s, c| {
      c.is_ascii_digit() || (c == '.' && !s.contains('.'))
    });
    assert_eq!(content, "1.23");
  }
}
