// SPDX-License-Identifier: MIT OR Apache-2.0

use nalgebra::Vector2;

/// An integer point in pixel space.
pub type Point = Vector2<i32>;

/// Shorthand for [Point::new].
pub fn point(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// An integer rectangle in pixel space.
///
/// `contains` treats the right and bottom edges as exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rectangle {
    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from a location and a size.
    pub fn from_parts(location: Point, size: Point) -> Self {
        Self::new(location.x, location.y, size.x, size.y)
    }

    /// The top-left corner.
    pub fn location(&self) -> Point {
        point(self.x, self.y)
    }

    /// The size as a point.
    pub fn size(&self) -> Point {
        point(self.width, self.height)
    }

    /// One past the right-most column.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom-most row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// The center point, rounded towards the top-left.
    pub fn center(&self) -> Point {
        point(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// If the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point lies inside the rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Check if two rectangles overlap.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }

    /// Move the rectangle by `offset`.
    pub fn offset(&self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Keep the location but multiply the size by `scale`.
    pub fn scaled_size(&self, scale: i32) -> Self {
        Self::new(self.x, self.y, self.width * scale, self.height * scale)
    }

    /// Grow the rectangle by `amount` on every side. Negative values shrink it.
    pub fn inflate(&self, amount: i32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2,
            self.height + amount * 2,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = point(10, 5);
        let b = point(2, 3);
        assert_eq!(a + b, point(12, 8));
        assert_eq!(a - b, point(8, 2));
        assert_eq!(b * 3, point(6, 9));
    }

    #[test]
    fn test_contains_excludes_far_edges() {
        let rect = Rectangle::new(0, 0, 10, 10);
        assert!(rect.contains(point(0, 0)));
        assert!(rect.contains(point(9, 9)));
        assert!(!rect.contains(point(10, 5)));
        assert!(!rect.contains(point(5, 10)));
    }

    #[test]
    fn test_scaled_size_keeps_location() {
        let rect = Rectangle::new(3, 4, 10, 20).scaled_size(2);
        assert_eq!(rect, Rectangle::new(3, 4, 20, 40));
    }

    #[test]
    fn test_intersects() {
        let a = Rectangle::new(0, 0, 10, 10);
        assert!(a.intersects(&Rectangle::new(5, 5, 10, 10)));
        assert!(!a.intersects(&Rectangle::new(10, 0, 5, 5)));
    }
}
