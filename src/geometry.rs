use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// A position on the model canvas, in model coordinates.
///
/// The core never interprets these values; the view layer owns all
/// screen-space math and feeds positions back through plain setters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A displacement between two points, used for drag deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, delta: Vec2) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

impl AddAssign<Vec2> for Point {
    fn add_assign(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

impl Sub<Point> for Point {
    type Output = Vec2;

    fn sub(self, origin: Point) -> Vec2 {
        Vec2::new(self.x - origin.x, self.y - origin.y)
    }
}
