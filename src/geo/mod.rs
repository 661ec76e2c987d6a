//! Screen geometry.
//!
//! We use the following convention for coordinates: x increases to the right,
//! and y in the downwards direction. Pixel space and character-grid space
//! share these types; which one a value lives in is up to its owner.

use std::ops::Add;
use std::ops::Sub;

use num::Zero;

/// A two-dimensional point.
///
/// `Point<T>` values may be added and subtracted componentwise.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
pub struct Point<T = i32>([T; 2]);

impl<T> Point<T> {
  /// Creates a new `Point` with the given coordinates.
  #[inline]
  pub fn new(x: T, y: T) -> Self {
    Self([x, y])
  }

  /// Creates a new `Point` representing the origin.
  #[inline]
  pub fn zero() -> Self
  where
    T: Zero,
  {
    Self([T::zero(), T::zero()])
  }

  /// Returns the `x` coordinate.
  #[inline]
  pub fn x(self) -> T
  where
    T: Copy,
  {
    self.0[0]
  }

  /// Returns the `y` coordinate.
  #[inline]
  pub fn y(self) -> T
  where
    T: Copy,
  {
    self.0[1]
  }
}

impl<T: Add<Output = T> + Copy> Add for Point<T> {
  type Output = Self;
  fn add(self, other: Self) -> Self {
    Point::new(self.x() + other.x(), self.y() + other.y())
  }
}

impl<T: Sub<Output = T> + Copy> Sub for Point<T> {
  type Output = Self;
  fn sub(self, other: Self) -> Self {
    Point::new(self.x() - other.x(), self.y() - other.y())
  }
}

/// A rectangle, represented as its upper-left corner and its dimensions.
///
/// This is the shape every draw call speaks in: a source rectangle inside a
/// texture, or a destination rectangle on the screen.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct Rect<T = i32> {
  origin: Point<T>,
  dims: Point<T>,
}

impl<T: Copy> Rect<T> {
  /// Creates a new `Rect` with upper-left corner `(x, y)` and the given
  /// dimensions.
  #[inline]
  pub fn new(x: T, y: T, width: T, height: T) -> Self {
    Self {
      origin: Point::new(x, y),
      dims: Point::new(width, height),
    }
  }

  /// Creates a new `Rect` of the given dimensions with one corner at the
  /// origin.
  #[inline]
  pub fn with_dims(width: T, height: T) -> Self
  where
    T: Zero,
  {
    Self::new(T::zero(), T::zero(), width, height)
  }

  /// Returns the upper-left corner of this `Rect`.
  #[inline]
  pub fn upper_left(self) -> Point<T> {
    self.origin
  }

  /// Returns the x coordinate of the left edge.
  #[inline]
  pub fn x(self) -> T {
    self.origin.x()
  }

  /// Returns the y coordinate of the top edge.
  #[inline]
  pub fn y(self) -> T {
    self.origin.y()
  }

  /// Returns the width of this `Rect`.
  #[inline]
  pub fn width(self) -> T {
    self.dims.x()
  }

  /// Returns the height of this `Rect`.
  #[inline]
  pub fn height(self) -> T {
    self.dims.y()
  }

  /// Returns the lower-right corner, exclusive.
  #[inline]
  pub fn lower_right(self) -> Point<T>
  where
    T: Add<Output = T>,
  {
    self.origin + self.dims
  }

  /// Returns a copy of this `Rect` moved so its upper-left corner is at `p`.
  #[inline]
  pub fn moved_to(mut self, p: Point<T>) -> Self {
    self.origin = p;
    self
  }

  /// Returns a copy of this `Rect` with new dimensions, keeping its corner.
  #[inline]
  pub fn resized(mut self, width: T, height: T) -> Self {
    self.dims = Point::new(width, height);
    self
  }

  /// Returns whether this `Rect` contains a given point.
  ///
  /// Note that the points in a rectangle form an "exclusive" range; points
  /// colinear with the lower-right corner are *not* part of the rectangle.
  #[inline]
  pub fn contains(self, p: Point<T>) -> bool
  where
    T: Add<Output = T> + PartialOrd,
  {
    let end = self.lower_right();
    (self.x()..end.x()).contains(&p.x()) && (self.y()..end.y()).contains(&p.y())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rect_corners() {
    let r = Rect::new(2, 3, 10, 4);
    assert_eq!(r.upper_left(), Point::new(2, 3));
    assert_eq!(r.lower_right(), Point::new(12, 7));
    assert!(r.contains(Point::new(2, 3)));
    assert!(!r.contains(Point::new(12, 3)));
  }

  #[test]
  fn moved_rect_keeps_dims() {
    let r = Rect::with_dims(8, 8).moved_to(Point::new(16, 0));
    assert_eq!((r.x(), r.y(), r.width(), r.height()), (16, 0, 8, 8));
  }
}
