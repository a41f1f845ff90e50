//! Point math and the per-shape geometry derivations.
//!
//! Every function here is a pure function of its two control points: the
//! point where the gesture started and the point where the pointer is now.

use std::ops::{Add, Div, Mul, Sub};

const ROOT2: f64 = std::f64::consts::SQRT_2;
const ROOT3: f64 = 1.732_050_807_568_877_2;

/// A 2D coordinate in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation: `t = 0.0` is `self`, `t = 1.0` is `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }

    /// Componentwise minimum.
    pub fn min(self, other: Point) -> Point {
        Point::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Componentwise absolute value.
    pub fn abs(self) -> Point {
        Point::new(self.x.abs(), self.y.abs())
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top_left: Point, size: Point) -> Self {
        Self {
            x: top_left.x,
            y: top_left.y,
            width: size.x,
            height: size.y,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }
}

/// Circle centered on `center` passing through `end`.
pub fn circle(center: Point, end: Point) -> (Point, f64) {
    (center, center.distance_to(end))
}

/// Bounding box of the two points, whichever direction the drag went.
pub fn rectangle(start: Point, end: Point) -> Rect {
    Rect::new(start.min(end), (start - end).abs())
}

/// Square centered on `center` whose half-diagonal is the drag distance.
pub fn square(center: Point, end: Point) -> Rect {
    let dist = center.distance_to(end);
    let half = dist / ROOT2;
    Rect::new(center - Point::new(half, half), Point::new(dist * ROOT2, dist * ROOT2))
}

/// Right triangle with the right angle at `start`.
pub fn right_triangle(start: Point, end: Point) -> Vec<Point> {
    vec![
        start,
        Point::new(start.x, end.y),
        Point::new(end.x, start.y),
    ]
}

/// Rhombus around `start`, with `end` reflected through it for the far vertices.
pub fn rhombus(start: Point, end: Point) -> Vec<Point> {
    vec![
        Point::new(end.x, start.y),
        Point::new(start.x, end.y),
        Point::new(2.0 * start.x - end.x, start.y),
        Point::new(start.x, 2.0 * start.y - end.y),
    ]
}

/// Upright equilateral triangle around `center`.
///
/// Only the distance to `end` matters; the apex always points up.
pub fn equilateral_triangle(center: Point, end: Point) -> Vec<Point> {
    let dist = center.distance_to(end);
    vec![
        center - Point::new(0.0, dist),
        center + Point::new(-ROOT3, 1.0) * dist / 2.0,
        center + Point::new(ROOT3, 1.0) * dist / 2.0,
    ]
}

/// Number of disc stamps needed to cover the segment without gaps.
///
/// Segments with a non-finite extent need none.
pub fn stroke_sample_count(start: Point, end: Point) -> usize {
    let diff = (start - end).abs();
    let extent = diff.x.max(diff.y);
    if !extent.is_finite() {
        return 0;
    }
    extent.ceil() as usize
}

/// Evenly spaced stamp centers from `start` towards `end`.
///
/// The endpoint itself is excluded; it becomes the first sample of the
/// next streamed segment.
pub fn stroke_samples(start: Point, end: Point) -> impl Iterator<Item = Point> {
    let count = stroke_sample_count(start, end);
    (0..count).map(move |i| start.lerp(end, i as f64 / count as f64))
}

/// The part of the segment lying inside `bounds` (Liang-Barsky).
///
/// Returns `None` when the segment misses `bounds` or any coordinate is not
/// finite. Endpoints already inside are returned unchanged.
pub fn clip_segment(start: Point, end: Point, bounds: Rect) -> Option<(Point, Point)> {
    let d = end - start;
    let finite = [start.x, start.y, end.x, end.y, d.x, d.y]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return None;
    }

    let edges = [
        (-d.x, start.x - bounds.x),
        (d.x, bounds.x + bounds.width - start.x),
        (-d.y, start.y - bounds.y),
        (d.y, bounds.y + bounds.height - start.y),
    ];

    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let from = if t0 > 0.0 { start.lerp(end, t0) } else { start };
    let to = if t1 < 1.0 { start.lerp(end, t1) } else { end };
    Some((from, to))
}
