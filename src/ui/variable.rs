//! Editable variables.
//!
//! A variable is a named, editable value with a default. While selected it
//! takes typed characters; on deselect, an empty value is replaced with the
//! default. [`IntVariable`] and [`FloatVariable`] additionally restrict what
//! may be typed, and reject construction-time content that does not parse,
//! falling back to the default.

use crate::gfx::console::Console;
use crate::gfx::palette::DEFAULT_COLOR;
use crate::input::Input;
use crate::ui::edit;
use crate::ui::edit::remove_first_zeros;
use crate::ui::take_press;
use crate::ui::Outcome;
use crate::ui::SharedColor;
use crate::ui::UiItem;
use crate::ui::CURSOR;
use crate::ui::DESELECT;
use crate::ui::NO_CURSOR;
use crate::ui::SELECT;

/// Claims a deselect press: either Enter or Escape.
fn take_deselect(input: &mut Input) -> bool {
  take_press(input, SELECT) || take_press(input, DESELECT)
}

fn render_no_status(console: &mut Console, name: &str, content: &str) {
  console.add_string(NO_CURSOR, DEFAULT_COLOR);
  console.add_string(&format!("{}: {}", name, content), DEFAULT_COLOR);
}

fn render_hovered(
  console: &mut Console,
  cursor: &SharedColor,
  name: &str,
  content: &str,
) {
  console.add_string(CURSOR, &cursor.get());
  console.add_string(&format!("{}: {}", name, content), DEFAULT_COLOR);
}

fn render_selected(
  console: &mut Console,
  cursor: &SharedColor,
  name: &str,
  content: &str,
) {
  let color = cursor.get();
  console.add_string(CURSOR, &color);
  console.add_string(&format!("{}: ", name), DEFAULT_COLOR);
  console.add_string(&format!("{}_", content), &color);
}

/// A free-text variable.
pub struct StringVariable {
  name: String,
  content: String,
  default: String,
  cursor: SharedColor,
}

impl StringVariable {
  /// Creates a new `StringVariable`; empty content starts out as the default.
  pub fn new(
    name: impl Into<String>,
    content: impl Into<String>,
    default: impl Into<String>,
    cursor: SharedColor,
  ) -> Self {
    let default = default.into();
    let mut content = content.into();
    if content.is_empty() {
      content = default.clone();
    }
    Self {
      name: name.into(),
      content,
      default,
      cursor,
    }
  }

  /// Returns the current content.
  pub fn content(&self) -> &str {
    &self.content
  }

  /// Returns the default content.
  pub fn default_content(&self) -> &str {
    &self.default
  }
}

impl UiItem for StringVariable {
  fn render_no_status(&self, console: &mut Console) {
    render_no_status(console, &self.name, &self.content);
  }

  fn render_hovered(&self, console: &mut Console) {
    render_hovered(console, &self.cursor, &self.name, &self.content);
  }

  fn render_selected(&self, console: &mut Console) {
    render_selected(console, &self.cursor, &self.name, &self.content);
  }

  fn handle_input(&mut self, input: &mut Input) -> Outcome {
    if take_deselect(input) {
      if self.content.is_empty() {
        self.content = self.default.clone();
      }
      return Outcome::Hovered;
    }

    edit::edit_string(&mut self.content, input);
    Outcome::Selected
  }

  fn value(&self) -> Option<&str> {
    Some(&self.content)
  }
}

/// Checks that `s` is all digits.
fn is_int(s: &str) -> bool {
  s.chars().all(|c| c.is_ascii_digit())
}

/// An unsigned integer variable.
pub struct IntVariable {
  name: String,
  content: String,
  default: String,
  cursor: SharedColor,
}

impl IntVariable {
  /// Creates a new `IntVariable`.
  ///
  /// A default that is not all digits becomes `"0"`; content that is not all
  /// digits becomes the default. Both are stripped of leading zeros.
  pub fn new(
    name: impl Into<String>,
    content: impl Into<String>,
    default: impl Into<String>,
    cursor: SharedColor,
  ) -> Self {
    let name = name.into();

    let default = default.into();
    let default = if default.is_empty() {
      "0".to_string()
    } else if !is_int(&default) {
      tracing::warn!(
        "int variable {:?} has a non-integer default {:?}; using 0",
        name,
        default
      );
      "0".to_string()
    } else {
      remove_first_zeros(&default).to_string()
    };

    let content = content.into();
    let content = if content.is_empty() {
      default.clone()
    } else if !is_int(&content) {
      tracing::warn!(
        "int variable {:?} has non-integer content {:?}; using the default",
        name,
        content
      );
      default.clone()
    } else {
      remove_first_zeros(&content).to_string()
    };

    Self {
      name,
      content,
      default,
      cursor,
    }
  }

  /// Returns the current content.
  pub fn content(&self) -> &str {
    &self.content
  }

  /// Returns the default content.
  pub fn default_content(&self) -> &str {
    &self.default
  }

  /// Parses the current content.
  pub fn as_u64(&self) -> Option<u64> {
    self.content.parse().ok()
  }
}

impl UiItem for IntVariable {
  fn render_no_status(&self, console: &mut Console) {
    render_no_status(console, &self.name, &self.content);
  }

  fn render_hovered(&self, console: &mut Console) {
    render_hovered(console, &self.cursor, &self.name, &self.content);
  }

  fn render_selected(&self, console: &mut Console) {
    render_selected(console, &self.cursor, &self.name, &self.content);
  }

  fn handle_input(&mut self, input: &mut Input) -> Outcome {
    if take_deselect(input) {
      self.content = remove_first_zeros(&self.content).to_string();
      if self.content.is_empty() {
        self.content = self.default.clone();
      }
      return Outcome::Hovered;
    }

    edit::edit_with(&mut self.content, input, |_, c| c.is_ascii_digit());
    Outcome::Selected
  }

  fn value(&self) -> Option<&str> {
    Some(&self.content)
  }
}

/// Checks that `s` is digits with at most one decimal point.
fn is_float(s: &str) -> bool {
  s.chars().all(|c| c.is_ascii_digit() || c == '.')
    && s.matches('.').count() <= 1
}

/// Normalizes float text: strips leading zeros, but keeps one before a
/// leading decimal point.
fn normalize_float(s: &str) -> String {
  let s = remove_first_zeros(s);
  if s.starts_with('.') {
    format!("0{}", s)
  } else {
    s.to_string()
  }
}

/// An unsigned decimal variable.
pub struct FloatVariable {
  name: String,
  content: String,
  has_decimal: bool,
  default: String,
  cursor: SharedColor,
}

impl FloatVariable {
  /// Creates a new `FloatVariable`.
  ///
  /// A default that is not a decimal number becomes `"0"`; content that is
  /// not a decimal number becomes the default. Both are normalized, so
  /// `"00.5"` is stored as `"0.5"`.
  pub fn new(
    name: impl Into<String>,
    content: impl Into<String>,
    default: impl Into<String>,
    cursor: SharedColor,
  ) -> Self {
    let name = name.into();

    let default = default.into();
    let default = if default.is_empty() {
      "0".to_string()
    } else if !is_float(&default) {
      tracing::warn!(
        "float variable {:?} has a non-decimal default {:?}; using 0",
        name,
        default
      );
      "0".to_string()
    } else {
      normalize_float(&default)
    };

    let content = content.into();
    let content = if content.is_empty() {
      default.clone()
    } else if !is_float(&content) {
      tracing::warn!(
        "float variable {:?} has non-decimal content {:?}; using the default",
        name,
        content
      );
      default.clone()
    } else {
      normalize_float(&content)
    };

    Self {
      name,
      has_decimal: content.contains('.'),
      content,
      default,
      cursor,
    }
  }

  /// Returns the current content.
  pub fn content(&self) -> &str {
    &self.content
  }

  /// Returns the default content.
  pub fn default_content(&self) -> &str {
    &self.default
  }

  /// Returns whether the content has a decimal point.
  pub fn has_decimal(&self) -> bool {
    self.has_decimal
  }

  /// Parses the current content.
  pub fn as_f64(&self) -> Option<f64> {
    self.content.parse().ok()
  }
}

impl UiItem for FloatVariable {
  fn render_no_status(&self, console: &mut Console) {
    render_no_status(console, &self.name, &self.content);
  }

  fn render_hovered(&self, console: &mut Console) {
    render_hovered(console, &self.cursor, &self.name, &self.content);
  }

  fn render_selected(&self, console: &mut Console) {
    render_selected(console, &self.cursor, &self.name, &self.content);
  }

  fn handle_input(&mut self, input: &mut Input) -> Outcome {
    if take_deselect(input) {
      self.content = if self.content.is_empty() {
        self.default.clone()
      } else {
        normalize_float(&self.content)
      };
      self.has_decimal = self.content.contains('.');
      return Outcome::Hovered;
    }

    edit::edit_with(&mut self.content, input, |s, c| {
      c.is_ascii_digit() || (c == '.' && !s.contains('.'))
    });
    self.has_decimal = self.content.contains('.');
    Outcome::Selected
  }

  fn value(&self) -> Option<&str> {
    Some(&self.content)
  }
}
