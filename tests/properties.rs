//! Property tests for the console, input and number helpers.

mod common;

use proptest::prelude::*;

use frost::input::Input;
use frost::input::KeyCode;
use frost::input::KeyModifiers;
use frost::ui::display::ratio_of_range;
use frost::ui::edit::remove_first_zeros;

fn text_strategy() -> impl Strategy<Value = String> {
  proptest::collection::vec(
    prop_oneof![
      8 => (0x20u8..0x7f).prop_map(char::from),
      1 => Just('\n'),
      1 => any::<char>(),
    ],
    0..400,
  )
  .prop_map(|cs| cs.into_iter().collect())
}

proptest! {
  #[test]
  fn cursor_stays_in_bounds(
    cols in 1usize..40,
    rows in 1usize..20,
    text in text_strategy(),
  ) {
    let (mut console, _, _) = common::console(cols, rows);
    for c in text.chars() {
      console.add_character(c, "White");
      prop_assert!(console.cursor().x() < console.width());
    }
  }
}

proptest! {
  #[test]
  fn render_drains_and_resets(
    cols in 1usize..40,
    rows in 1usize..20,
    text in text_strategy(),
  ) {
    let (mut console, mut textures, _) = common::console(cols, rows);
    console.add_string(&text, "White");
    console.render(&mut textures);
    prop_assert_eq!(console.queued(), 0);
    prop_assert_eq!(console.cursor().x(), 0);
    prop_assert_eq!(console.cursor().y(), 0);
  }
}

proptest! {
  #[test]
  fn window_spans_height_and_shows_focus(
    rows in 1usize..30,
    lines in 0usize..100,
    focus in 0usize..100,
  ) {
    let (mut console, mut textures, _) = common::console(10, rows);
    for _ in 0..lines {
      console.add_string("x", "White");
      console.add_new_line(1);
    }
    console.add_string("x", "White");
    console.set_focus(focus);
    console.render(&mut textures);

    let (start, end) = console.window();
    prop_assert_eq!(end - start, console.height());
    if focus <= lines {
      prop_assert!(start <= focus && focus < end, "{:?} misses {}", (start, end), focus);
    }
  }
}

proptest! {
  #[test]
  fn resize_is_idempotent(
    x0 in -100i32..100,
    y0 in -100i32..100,
    x1 in -100i32..400,
    y1 in -100i32..400,
  ) {
    let (mut console, _, _) = common::console(1, 1);
    console.resize(x0, y0, x1, y1);
    let first = (console.bounds(), console.width(), console.height());
    console.resize(x0, y0, x1, y1);
    prop_assert_eq!(first, (console.bounds(), console.width(), console.height()));
    if x1 < x0 || y1 < y0 {
      prop_assert_eq!((console.width(), console.height()), (0, 0));
    }
  }
}

proptest! {
  #[test]
  fn ratio_is_a_valid_bucket(
    num in -1000i64..1000,
    min in -1000i64..1000,
    span in 0i64..1000,
    buckets in 1usize..20,
  ) {
    let r = ratio_of_range(num, min, min + span, buckets);
    prop_assert!(r < buckets);
    if num <= min {
      prop_assert_eq!(r, 0);
    }
  }
}

proptest! {
  #[test]
  fn ratio_is_monotonic(
    a in -100i64..200,
    b in -100i64..200,
    buckets in 1usize..12,
  ) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    prop_assert!(
      ratio_of_range(lo, 0, 100, buckets) <= ratio_of_range(hi, 0, 100, buckets)
    );
  }
}

proptest! {
  #[test]
  fn zeros_are_stripped(s in "[0-9]{0,12}") {
    let out = remove_first_zeros(&s);
    prop_assert!(s.ends_with(out));
    prop_assert_eq!(out.is_empty(), s.is_empty());
    if out.len() > 1 {
      prop_assert!(!out.starts_with('0'));
    }
  }
}

proptest! {
  #[test]
  fn available_keys_are_pressed_and_free(
    keys in proptest::collection::vec(prop_oneof![
      Just(KeyCode::Up),
      Just(KeyCode::Down),
      Just(KeyCode::Enter),
      Just(KeyCode::Esc),
      (b'a'..=b'z').prop_map(|c| KeyCode::Char(c as char)),
    ], 0..10),
    delayed in 0usize..10,
    blocked in 0usize..10,
  ) {
    let mut input = Input::new();
    for &k in &keys {
      input.press(k, KeyModifiers::NONE, false);
    }
    if let Some(&k) = keys.get(delayed) {
      input.delay_key(k, 1_000);
    }
    if let Some(&k) = keys.get(blocked) {
      input.block_until_released(k);
    }

    for k in input.available_keys() {
      prop_assert!(input.is_pressed(k));
      prop_assert!(input.is_available(k));
      prop_assert!(Some(&k) != keys.get(delayed));
      prop_assert!(Some(&k) != keys.get(blocked));
    }
  }
}
