use std::ops::{Add, Mul, Sub};

use serde_tuple::{Deserialize_tuple, Serialize_tuple};

/// A position in pointer coordinates, x to the right, y down.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize_tuple, Deserialize_tuple)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub type Vector = Point;

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.squared_length().sqrt()
    }

    pub fn squared_length(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// The larger of the two axis distances to `other`.
    ///
    /// This is the metric taps are measured with: a pointer that wanders along one axis only is
    /// judged by that axis alone.
    pub fn max_axis_distance(&self, other: Point) -> f64 {
        let d = (other - *self).abs();
        d.x.max(d.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn length_is_euclidean() {
        let d = Point::new(13.0, 14.0) - Point::new(10.0, 10.0);
        assert_relative_eq!(d.length(), 5.0);
        assert_relative_eq!(Point::ZERO.length(), 0.0);
    }

    #[test]
    fn max_axis_distance_takes_the_dominant_axis() {
        let a = Point::new(10.0, 10.0);
        assert_eq!(a.max_axis_distance(Point::new(12.0, 11.0)), 2.0);
        assert_eq!(a.max_axis_distance(Point::new(9.0, 2.0)), 8.0);
    }

    #[test]
    fn serializes_as_tuple() {
        let json = serde_json::to_string(&Point::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let p: Point = serde_json::from_str("[3, 4]").unwrap();
        assert_eq!(p, Point::new(3.0, 4.0));
    }
}
