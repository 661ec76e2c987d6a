//! Read-only number displays: colored values and meters.

use crate::gfx::console::Console;
use crate::gfx::palette::DEFAULT_COLOR;

/// Number of segments in a meter.
pub const METER_SEGMENTS: usize = 10;

/// Color of the unfilled part of a meter.
const EMPTY_SEGMENT_COLOR: &str = "Gray";

/// Glyph meters are drawn with.
const SEGMENT: char = '/';

/// Maps `num` within `[min, max]` to one of `buckets` equal-width buckets.
///
/// Values below `min` land in the first bucket and values at or above `max`
/// in the last; an empty range puts everything below `max` in the first.
///
/// ```
/// # use frost::ui::display::ratio_of_range;
/// assert_eq!(ratio_of_range(0, 0, 100, 4), 0);
/// assert_eq!(ratio_of_range(50, 0, 100, 4), 2);
/// assert_eq!(ratio_of_range(100, 0, 100, 4), 3);
/// ```
pub fn ratio_of_range(num: i64, min: i64, max: i64, buckets: usize) -> usize {
  if buckets == 0 {
    return 0;
  }
  let last = buckets - 1;
  if num >= max {
    return if max > min || num > min { last } else { 0 };
  }
  if num <= min {
    return 0;
  }

  let ratio = (num - min) as f64 / (max - min) as f64;
  ((ratio * buckets as f64).floor() as usize).min(last)
}

/// Writes `num`, colored by where it falls in `[min, max]`.
///
/// `colors` runs from the color of `min` to the color of `max`. With no
/// colors, the number is drawn in the default color.
pub fn display_colored_int<S: AsRef<str>>(
  console: &mut Console,
  num: i64,
  min: i64,
  max: i64,
  colors: &[S],
) {
  let color = if colors.is_empty() {
    DEFAULT_COLOR
  } else {
    colors[ratio_of_range(num, min, max, colors.len())].as_ref()
  };
  console.add_string(&num.to_string(), color);
}

/// Writes a meter like `5 [/////     ] 10`, filled in one color.
pub fn display_single_color_meter(
  console: &mut Console,
  num: i64,
  min: i64,
  max: i64,
  color: &str,
) {
  meter(console, num, min, max, color);
}

/// Writes a meter like `5 [/////     ] 10`, filled in a color picked from
/// `colors` by where `num` falls in `[min, max]`.
pub fn display_multi_color_meter<S: AsRef<str>>(
  console: &mut Console,
  num: i64,
  min: i64,
  max: i64,
  colors: &[S],
) {
  let color = if colors.is_empty() {
    DEFAULT_COLOR
  } else {
    colors[ratio_of_range(num, min, max, colors.len())].as_ref()
  };
  meter(console, num, min, max, color);
}

fn meter(console: &mut Console, num: i64, min: i64, max: i64, color: &str) {
  let filled = ratio_of_range(num, min, max, METER_SEGMENTS + 1);

  console.add_string(&format!("{} [", num), DEFAULT_COLOR);
  for i in 0..METER_SEGMENTS {
    if i < filled {
      console.add_character(SEGMENT, color);
    } else {
      console.add_character(SEGMENT, EMPTY_SEGMENT_COLOR);
    }
  }
  console.add_string(&format!("] {}", max), DEFAULT_COLOR);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ui::tests::console;
  use crate::ui::tests::screen;

  #[test]
  fn buckets_cover_the_range() {
    assert_eq!(ratio_of_range(-5, 0, 10, 3), 0);
    assert_eq!(ratio_of_range(3, 0, 10, 3), 0);
    assert_eq!(ratio_of_range(4, 0, 10, 3), 1);
    assert_eq!(ratio_of_range(7, 0, 10, 3), 2);
    assert_eq!(ratio_of_range(99, 0, 10, 3), 2);
    assert_eq!(ratio_of_range(5, 0, 10, 0), 0);
  }

  #[test]
  fn empty_range_picks_an_end() {
    assert_eq!(ratio_of_range(4, 5, 5, 3), 0);
    assert_eq!(ratio_of_range(5, 5, 5, 3), 0);
    assert_eq!(ratio_of_range(6, 5, 5, 3), 2);
  }

  #[test]
  fn meters_fill_proportionally() {
    let (mut console, mut textures, backend) = console();
    display_single_color_meter(&mut console, 5, 0, 10, "Green");
    console.add_new_line(1);
    display_multi_color_meter(&mut console, 10, 0, 10, &["Red", "Green"]);
    console.add_new_line(1);
    display_colored_int(&mut console, 3, 0, 10, &["Red", "Green"]);

    let rows = screen(&mut console, &mut textures, &backend);
    assert_eq!(rows[0], "5 [//////////] 10");
    assert_eq!(rows[1], "10 [//////////] 10");
    assert_eq!(rows[2], "3");

    let green = textures.palette().get("Green").unwrap();
    let gray = textures.palette().get("Gray").unwrap();
    let tints: Vec<_> = backend
      .draws()
      .iter()
      .filter(|d| d.call.glyph == Some('/'))
      .map(|d| d.tint)
      .collect();
    assert_eq!(tints[..5], [green; 5]);
    assert_eq!(tints[5..10], [gray; 5]);
    assert_eq!(tints[10..20], [green; 10]);
  }
}
