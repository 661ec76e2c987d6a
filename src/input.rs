//! Input processing utilties.

use std::collections::HashMap;
use std::collections::HashSet;
use std::time::Duration;
use std::time::Instant;

pub use crossterm::event::KeyCode;
pub use crossterm::event::KeyEvent;
pub use crossterm::event::KeyModifiers;

/// How long [`Input::delay()`] makes a key unavailable for.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

/// A tracker for key state across frames.
///
/// The backend feeds key-down and key-up events in through [`Input::press()`]
/// and [`Input::release()`]; widgets query it throughout the frame. There are
/// three views of the keyboard:
/// - *pressed* keys are held down right now;
/// - *available* keys are pressed, and not delayed or blocked by whoever used
///   them last;
/// - *raw* keys are this frame's key-down events, including auto-repeats, as a
///   text field would see them.
///
/// Letters are tracked case-insensitively, except in the raw view.
///
/// At the begining of each frame [`Input::begin_frame()`] should be called to
/// clear the previous frame's raw keys.
pub struct Input {
  now: Instant,
  held: Vec<KeyCode>,
  mods: KeyModifiers,
  raw: Vec<KeyEvent>,
  delays: HashMap<KeyCode, Instant>,
  blocked: HashSet<KeyCode>,
}

fn normalize(code: KeyCode) -> KeyCode {
  match code {
    KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
    k => k,
  }
}

impl Input {
  /// Creates a new `Input` with nothing held.
  pub fn new() -> Self {
    Self {
      now: Instant::now(),
      held: Vec::new(),
      mods: KeyModifiers::empty(),
      raw: Vec::new(),
      delays: HashMap::new(),
      blocked: HashSet::new(),
    }
  }

  /// Starts a new frame at time `now`.
  ///
  /// This function should be called once per frame, before any events are
  /// fed in.
  pub fn begin_frame(&mut self, now: Instant) {
    self.now = now;
    self.raw.clear();
  }

  /// Returns the time the current frame started at.
  pub fn now(&self) -> Instant {
    self.now
  }

  /// Records a key-down event.
  pub fn press(&mut self, code: KeyCode, mods: KeyModifiers, repeat: bool) {
    self.raw.push(KeyEvent::new(code, mods));
    self.mods = mods;

    let key = normalize(code);
    if !self.held.contains(&key) {
      if repeat {
        tracing::debug!("repeat of {:?} arrived before its press", key);
      }
      self.held.push(key);
    }
  }

  /// Records a key-up event. Releasing a key lifts any delay or block on it.
  pub fn release(&mut self, code: KeyCode) {
    let key = normalize(code);
    self.held.retain(|&k| k != key);
    self.delays.remove(&key);
    self.blocked.remove(&key);
    if self.held.is_empty() {
      self.mods = KeyModifiers::empty();
    }
  }

  /// Checks whether `key` is held down.
  pub fn is_pressed(&self, key: KeyCode) -> bool {
    self.held.contains(&normalize(key))
  }

  /// Returns every held key, in the order they were pressed.
  pub fn pressed_keys(&self) -> &[KeyCode] {
    &self.held
  }

  /// Checks whether `key` is held down, and not delayed or blocked.
  pub fn is_available(&self, key: KeyCode) -> bool {
    let key = normalize(key);
    self.held.contains(&key) && self.is_free(key)
  }

  /// Returns every available key, in the order they were pressed.
  pub fn available_keys(&self) -> Vec<KeyCode> {
    self
      .held
      .iter()
      .copied()
      .filter(|&k| self.is_free(k))
      .collect()
  }

  /// Returns this frame's key-down events, repeats included.
  pub fn raw_keys(&self) -> &[KeyEvent] {
    &self.raw
  }

  /// Checks whether `m` was held with the most recent key press.
  pub fn has_mod(&self, m: KeyModifiers) -> bool {
    self.mods.contains(m)
  }

  /// Checks whether shift was held with the most recent key press.
  pub fn shift_held(&self) -> bool {
    self.has_mod(KeyModifiers::SHIFT)
  }

  /// Makes `key` unavailable for `ms` milliseconds, or until released.
  pub fn delay_key(&mut self, key: KeyCode, ms: u64) {
    self
      .delays
      .insert(normalize(key), self.now + Duration::from_millis(ms));
  }

  /// Makes `key` unavailable for [`DEFAULT_DELAY`], or until released.
  pub fn delay(&mut self, key: KeyCode) {
    self.delay_key(key, DEFAULT_DELAY.as_millis() as u64);
  }

  /// Makes `key` unavailable until it is released.
  pub fn block_until_released(&mut self, key: KeyCode) {
    self.blocked.insert(normalize(key));
  }

  fn is_free(&self, key: KeyCode) -> bool {
    if self.blocked.contains(&key) {
      return false;
    }
    match self.delays.get(&key) {
      Some(&until) => self.now >= until,
      None => true,
    }
  }
}

impl Default for Input {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn letters_are_case_insensitive() {
    let mut input = Input::new();
    input.press(KeyCode::Char('W'), KeyModifiers::SHIFT, false);
    assert!(input.is_pressed(KeyCode::Char('w')));
    assert!(input.shift_held());
    assert_eq!(input.raw_keys()[0].code, KeyCode::Char('W'));

    input.release(KeyCode::Char('w'));
    assert!(!input.is_pressed(KeyCode::Char('W')));
    assert!(!input.shift_held());
  }

  #[test]
  fn delays_expire() {
    let start = Instant::now();
    let mut input = Input::new();
    input.begin_frame(start);
    input.press(KeyCode::Down, KeyModifiers::NONE, false);
    input.delay(KeyCode::Down);
    assert!(input.is_pressed(KeyCode::Down));
    assert!(!input.is_available(KeyCode::Down));

    input.begin_frame(start + Duration::from_millis(199));
    assert!(!input.is_available(KeyCode::Down));
    input.begin_frame(start + Duration::from_millis(200));
    assert!(input.is_available(KeyCode::Down));
  }

  #[test]
  fn blocks_last_until_release() {
    let start = Instant::now();
    let mut input = Input::new();
    input.begin_frame(start);
    input.press(KeyCode::Enter, KeyModifiers::NONE, false);
    input.block_until_released(KeyCode::Enter);

    input.begin_frame(start + Duration::from_secs(10));
    assert!(!input.is_available(KeyCode::Enter));
    assert!(input.available_keys().is_empty());

    input.release(KeyCode::Enter);
    input.press(KeyCode::Enter, KeyModifiers::NONE, false);
    assert!(input.is_available(KeyCode::Enter));
  }

  #[test]
  fn available_keys_keep_press_order() {
    let mut input = Input::new();
    input.press(KeyCode::Up, KeyModifiers::NONE, false);
    input.press(KeyCode::Enter, KeyModifiers::NONE, false);
    input.press(KeyCode::Up, KeyModifiers::NONE, true);
    assert_eq!(input.available_keys(), vec![KeyCode::Up, KeyCode::Enter]);
    assert_eq!(input.raw_keys().len(), 3);

    input.begin_frame(Instant::now());
    assert!(input.raw_keys().is_empty());
    assert!(input.is_pressed(KeyCode::Up));
  }
}
