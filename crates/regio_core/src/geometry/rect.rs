use crate::geometry::Point;

/// An axis-aligned rectangle on the integer pixel grid.
///
/// Both axes are half-open: a rect covers `[left, right)` horizontally and
/// `[top, bottom)` vertically. Two rects that share an edge
/// (`a.right == b.left`) touch but do not overlap, which lets adjacent rects
/// merge cleanly during coalescing without ever being double-counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    /// The x-coordinate of the left edge.
    pub left: i32,
    /// The y-coordinate of the top edge.
    pub top: i32,
    /// The x-coordinate one past the right edge.
    pub right: i32,
    /// The y-coordinate one past the bottom edge.
    pub bottom: i32,
}

impl Rect {
    /// Creates a new `Rect` from its four edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect { left, top, right, bottom }
    }

    /// Creates a new `Rect` from a top-left corner and a size.
    pub const fn from_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Rect {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Returns the width of the rectangle.
    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Returns the height of the rectangle.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns the area of the rectangle, or zero if it is degenerate.
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width() as i64 * self.height() as i64
        }
    }

    /// Checks whether the rectangle is degenerate (covers no pixels).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Checks if the rectangle contains a given point.
    ///
    /// The right and bottom edges are exclusive, so a point sitting exactly
    /// on them is outside.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Checks if the rectangle fully contains another rectangle.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !other.is_empty()
            && other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    /// Checks if the rectangle overlaps another rectangle.
    ///
    /// Touching edges do not count as overlap.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// Returns the overlapping area of two rectangles, or `None` when they
    /// do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);

        if left < right && top < bottom {
            Some(Rect { left, top, right, bottom })
        } else {
            None
        }
    }

    /// Returns the smallest rectangle containing both rectangles.
    ///
    /// A degenerate operand contributes nothing; the union of two degenerate
    /// rects is degenerate.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Returns this rectangle translated by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}
