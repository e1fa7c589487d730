//! Integer rectangles in platformer world space (y up)

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle; `y` is the bottom edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Bottom edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Top edge (exclusive)
    pub const fn top(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the rectangles share any area; touching edges do not count
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }

    /// Whether `other` lies entirely inside this rectangle
    pub const fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.top() <= self.top()
    }
}
