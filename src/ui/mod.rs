//! UI system.
//!
//! # Design Rationale
//!
//! Frost's UI is a retained tree of *items* that re-emit themselves into a
//! [`Console`] every frame. There is no layout pass: an item simply writes
//! text at the console's cursor, and the console's wrapping and anchoring
//! decide where that text ends up. Nested items get a hanging indent by moving
//! the console's anchor before rendering their children and restoring it
//! afterwards.
//!
//! # States
//!
//! Every item is, at any given moment, in one of three states:
//! - *No status*: the navigation cursor is elsewhere.
//! - *Hovered*: the navigation cursor rests on the item.
//! - *Selected*: the item has been activated with Enter and receives all
//!   input until it gives it back.
//!
//! ```text
//! NO_STATUS --(cursor arrives)--> HOVERED
//! HOVERED   --(Enter)-----------> SELECTED
//! SELECTED  --(Enter or Escape)-> HOVERED
//! ```
//!
//! Only the owner of an item (a [`Panel`](panel::Panel), or a composite
//! [`List`](list::List)) knows whether the cursor is on it, so *no status* is
//! assigned from the outside. An item's own [`UiItem::handle_input()`] only
//! ever reports whether it is still selected ([`Outcome::Selected`]) or has
//! handed control back ([`Outcome::Hovered`]).
//!
//! # Keys
//!
//! Navigation acts on one key per frame: the first *available* key in the
//! [`Input`]. Navigation keys are put on a short cooldown when used, so
//! holding one scrolls at a steady pace; Enter and Escape are blocked until
//! released, so one press never triggers twice.

use std::cell::RefCell;
use std::rc::Rc;

use crate::gfx::console::Console;
use crate::input::Input;
use crate::input::KeyCode;

pub mod button;
pub mod choice;
pub mod display;
pub mod edit;
pub mod list;
pub mod panel;
pub mod selection;
pub mod text;
pub mod text_list;
pub mod variable;

pub use button::Button;
pub use choice::Choice;
pub use list::List;
pub use panel::Panel;
pub use selection::Selection;
pub use text::Text;
pub use text_list::TextList;
pub use variable::FloatVariable;
pub use variable::IntVariable;
pub use variable::StringVariable;

/// The key that selects an item, or commits an edit.
pub const SELECT: KeyCode = KeyCode::Enter;

/// The key that hands control back from a selected item.
pub const DESELECT: KeyCode = KeyCode::Esc;

/// Prefix drawn before the hovered entry, in the cursor color.
pub(crate) const CURSOR: &str = " > ";

/// Prefix drawn before every other entry.
pub(crate) const NO_CURSOR: &str = "   ";

/// How an item is drawn this frame.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Status {
  NoStatus,
  Hovered,
  Selected,
}

/// The result of handing a frame of input to a selected item.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Outcome {
  /// The item gave control back to its owner.
  Hovered,
  /// The item wants to keep receiving input.
  Selected,
}

impl From<Outcome> for Status {
  fn from(o: Outcome) -> Status {
    match o {
      Outcome::Hovered => Status::Hovered,
      Outcome::Selected => Status::Selected,
    }
  }
}

/// A UI item.
pub trait UiItem {
  /// Draws the item as it looks with the cursor elsewhere.
  fn render_no_status(&self, console: &mut Console);

  /// Draws the item as it looks with the cursor on it.
  fn render_hovered(&self, console: &mut Console);

  /// Draws the item as it looks while it is receiving input.
  fn render_selected(&self, console: &mut Console);

  /// Processes one frame of input while selected.
  fn handle_input(&mut self, input: &mut Input) -> Outcome;

  /// Returns the item's current value, for items that have one.
  fn value(&self) -> Option<&str> {
    None
  }

  /// Draws the item in the given state.
  fn render(&self, status: Status, console: &mut Console) {
    match status {
      Status::NoStatus => self.render_no_status(console),
      Status::Hovered => self.render_hovered(console),
      Status::Selected => self.render_selected(console),
    }
  }
}

/// A color name shared between a menu and every item it owns.
///
/// Setting it retints every holder at once.
#[derive(Clone, Debug, PartialEq)]
pub struct SharedColor(Rc<RefCell<String>>);

impl SharedColor {
  /// Creates a new handle holding `color`.
  pub fn new(color: impl Into<String>) -> Self {
    Self(Rc::new(RefCell::new(color.into())))
  }

  /// Returns the current color name.
  pub fn get(&self) -> String {
    self.0.borrow().clone()
  }

  /// Changes the color for every holder of this handle.
  pub fn set(&self, color: impl Into<String>) {
    *self.0.borrow_mut() = color.into();
  }
}

/// A string with a color attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorString {
  pub content: String,
  pub color: String,
}

impl ColorString {
  /// Creates a new `ColorString`.
  pub fn new(content: impl Into<String>, color: impl Into<String>) -> Self {
    Self {
      content: content.into(),
      color: color.into(),
    }
  }
}

/// Returns whether `key` moves a cursor up.
pub fn is_up(key: KeyCode) -> bool {
  matches!(key, KeyCode::Up | KeyCode::Char('w'))
}

/// Returns whether `key` moves a cursor down.
pub fn is_down(key: KeyCode) -> bool {
  matches!(key, KeyCode::Down | KeyCode::Char('s'))
}

/// Returns the first available key this frame, if any.
pub(crate) fn first_key(input: &Input) -> Option<KeyCode> {
  input.available_keys().first().copied()
}

/// Applies a navigation key to a cursor over `len` entries.
///
/// Returns the new cursor, or `None` if `key` does not navigate. Used keys go
/// on cooldown; with shift held, the cursor jumps to the first or last entry.
pub(crate) fn navigate(
  input: &mut Input,
  key: KeyCode,
  cursor: usize,
  len: usize,
) -> Option<usize> {
  let last = len.saturating_sub(1);
  let next = if is_up(key) {
    if input.shift_held() {
      0
    } else {
      cursor.saturating_sub(1)
    }
  } else if is_down(key) {
    if input.shift_held() {
      last
    } else {
      (cursor + 1).min(last)
    }
  } else {
    return None;
  };

  input.delay(key);
  Some(next)
}

/// Claims a press of `key` if it is available, blocking it until released.
pub(crate) fn take_press(input: &mut Input, key: KeyCode) -> bool {
  if !input.is_available(key) {
    return false;
  }
  input.block_until_released(key);
  true
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::gfx::headless::Headless;
  use crate::gfx::palette::Palette;
  use crate::gfx::text::tests::ascii_font;
  use crate::gfx::text::Font;
  use crate::gfx::text::TextRenderer;
  use crate::gfx::texture::Textures;
  use crate::input::KeyModifiers;

  /// An 80x24 console over a headless backend.
  pub fn console() -> (Console, Textures, Headless) {
    let backend = Headless::new(640, 192);
    let mut textures = Textures::new(Box::new(backend.clone()), Palette::new());
    let font = Font::load(&ascii_font(), &mut textures).unwrap();
    let mut console = Console::new(TextRenderer::new(font));
    console.resize(0, 0, 640, 192);
    (console, textures, backend)
  }

  /// Renders `console` and returns its rows as strings, with spaces where
  /// nothing was drawn.
  pub fn screen(
    console: &mut Console,
    textures: &mut Textures,
    backend: &Headless,
  ) -> Vec<String> {
    textures.backend_mut().clear();
    console.render(textures);

    let mut rows = vec![Vec::new(); console.height()];
    for (c, x, y) in backend.glyphs() {
      let (col, row) = ((x / 8) as usize, (y / 8) as usize);
      let line = &mut rows[row];
      if line.len() <= col {
        line.resize(col + 1, ' ');
      }
      line[col] = c;
    }
    rows
      .into_iter()
      .map(|r| r.into_iter().collect::<String>())
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

  #[test]
  fn navigation_saturates() {
    let mut input = Input::new();
    input.press(KeyCode::Up, KeyModifiers::NONE, false);
    assert_eq!(navigate(&mut input, KeyCode::Up, 0, 3), Some(0));
    assert_eq!(navigate(&mut input, KeyCode::Char('s'), 2, 3), Some(2));
    assert_eq!(navigate(&mut input, KeyCode::Down, 0, 3), Some(1));
    assert_eq!(navigate(&mut input, KeyCode::Enter, 0, 3), None);
    assert!(!input.is_available(KeyCode::Up));
  }

  #[test]
  fn shift_jumps_to_the_ends() {
    let mut input = Input::new();
    input.press(KeyCode::Down, KeyModifiers::SHIFT, false);
    assert_eq!(navigate(&mut input, KeyCode::Down, 1, 5), Some(4));
    assert_eq!(navigate(&mut input, KeyCode::Up, 3, 5), Some(0));
  }

  #[test]
  fn shared_color_retints_every_holder() {
    let a = SharedColor::new("Blue");
    let b = a.clone();
    b.set("Gold");
    assert_eq!(a.get(), "Gold");
  }
}
