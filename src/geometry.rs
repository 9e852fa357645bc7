//! Points and axis-aligned rectangles in pixel space

use serde::Serialize;

/// A position in canvas (source image) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a normalized rectangle from two opposite corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: a.x.max(b.x) - x,
            height: a.y.max(b.y) - y,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: the left and top edges belong to the rectangle,
    /// the right and bottom edges do not.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// True unless one rectangle lies strictly to one side of the other.
    ///
    /// Touching edges count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }

    /// Snap to whole pixels: `(x, y, width, height)` rounded to the nearest integer.
    pub fn to_pixels(&self) -> (i64, i64, u32, u32) {
        let x0 = self.x.round() as i64;
        let y0 = self.y.round() as i64;
        let x1 = self.right().round() as i64;
        let y1 = self.bottom().round() as i64;
        (x0, y0, (x1 - x0).max(0) as u32, (y1 - y0).max(0) as u32)
    }
}

/// Maps pointer positions from the displayed (possibly scaled) canvas into
/// canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub display_width: f64,
    pub display_height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Viewport {
    pub fn new(display_width: f64, display_height: f64, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            display_width,
            display_height,
            canvas_width,
            canvas_height,
        }
    }

    /// Convert a display-space position. A zero-sized display maps 1:1.
    pub fn to_canvas(&self, p: Point) -> Point {
        let sx = if self.display_width > 0.0 {
            self.canvas_width / self.display_width
        } else {
            1.0
        };
        let sy = if self.display_height > 0.0 {
            self.canvas_height / self.display_height
        } else {
            1.0
        };
        Point::new(p.x * sx, p.y * sy)
    }
}
