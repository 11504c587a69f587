//! Pure geometry used to classify pointer gestures: travel angles, the four swipe / drag
//! directions, and the two finger scale and rotation of a pinch.
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{Line, Point};

/// The angle in degrees of the travel from `p1` to `p2`, range (-180, 180].
///
/// Screen orientation: 0 points right, 90 points down.
pub fn angle_between(p1: Point, p2: Point) -> f64 {
    let angle = Line::new(p1, p2).theta_degrees();
    // atan2 yields -180 for a negative zero y delta.
    if angle <= -180.0 { angle + 360.0 } else { angle }
}

/// The dominant direction of a travel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[display("up")]
    Up,
    #[display("down")]
    Down,
    #[display("left")]
    Left,
    #[display("right")]
    Right,
}

impl Direction {
    /// Classifies an angle in degrees as returned by [`angle_between`].
    pub fn from_angle(angle: f64) -> Self {
        if (45.0..135.0).contains(&angle) {
            Direction::Down
        } else if angle >= 135.0 || angle <= -135.0 {
            Direction::Left
        } else if angle > -135.0 && angle < -45.0 {
            Direction::Up
        } else {
            Direction::Right
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }
}

/// The ratio of the distance between two moved fingers to their distance at the start.
///
/// Returns 0 unless both `start` and `moved` contain exactly two points, or when the two starting
/// fingers share a position. Single finger samples show up in the middle of a two finger gesture
/// all the time, so this is not an error.
pub fn scale_between(start: &[Point], moved: &[Point]) -> f64 {
    match (finger_pair(start), finger_pair(moved)) {
        (Some(start), Some(moved)) if start.length() > 0.0 => moved.length() / start.length(),
        _ => 0.0,
    }
}

/// The rotation in degrees of the two finger segment from `start` to `moved`.
///
/// Returns 0 unless both `start` and `moved` contain exactly two points.
pub fn rotation_between(start: &[Point], moved: &[Point]) -> f64 {
    match (finger_pair(start), finger_pair(moved)) {
        (Some(start), Some(moved)) => moved.theta_degrees() - start.theta_degrees(),
        _ => 0.0,
    }
}

fn finger_pair(points: &[Point]) -> Option<Line> {
    match points {
        [p1, p2] => Some(Line::new(*p1, *p2)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn angle_follows_screen_axes() {
        let origin = Point::new(10.0, 10.0);
        assert_relative_eq!(angle_between(origin, Point::new(20.0, 10.0)), 0.0);
        assert_relative_eq!(angle_between(origin, Point::new(10.0, 20.0)), 90.0);
        assert_relative_eq!(angle_between(origin, Point::new(0.0, 10.0)), 180.0);
        assert_relative_eq!(angle_between(origin, Point::new(10.0, 0.0)), -90.0);
    }

    #[test]
    fn leftward_travel_with_negative_zero_is_positive() {
        let angle = angle_between(Point::new(0.0, 0.0), Point::new(-5.0, -0.0));
        assert_relative_eq!(angle, 180.0);
        assert_eq!(Direction::from_angle(angle), Direction::Left);
    }

    #[test]
    fn direction_boundaries() {
        use Direction::*;
        assert_eq!(Direction::from_angle(45.0), Down);
        assert_eq!(Direction::from_angle(134.9), Down);
        assert_eq!(Direction::from_angle(135.0), Left);
        assert_eq!(Direction::from_angle(180.0), Left);
        assert_eq!(Direction::from_angle(-135.0), Left);
        assert_eq!(Direction::from_angle(-134.9), Up);
        assert_eq!(Direction::from_angle(-45.1), Up);
        assert_eq!(Direction::from_angle(-45.0), Right);
        assert_eq!(Direction::from_angle(0.0), Right);
        assert_eq!(Direction::from_angle(44.9), Right);
    }

    #[test]
    fn direction_is_total_and_exclusive() {
        let mut angle = -179.75;
        while angle <= 180.0 {
            let predicates = [
                (45.0..135.0).contains(&angle),
                angle >= 135.0 || angle <= -135.0,
                angle > -135.0 && angle < -45.0,
                (-45.0..45.0).contains(&angle),
            ];
            assert_eq!(
                predicates.iter().filter(|p| **p).count(),
                1,
                "angle {angle} must match exactly one direction"
            );
            let expected = [
                Direction::Down,
                Direction::Left,
                Direction::Up,
                Direction::Right,
            ][predicates.iter().position(|p| *p).unwrap()];
            assert_eq!(Direction::from_angle(angle), expected);
            angle += 0.25;
        }
    }

    #[test]
    fn vertical_and_horizontal() {
        assert!(Direction::Up.is_vertical());
        assert!(Direction::Down.is_vertical());
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert_eq!(Direction::Left.to_string(), "left");
    }

    #[test]
    fn pinch_scale_and_rotation() {
        let start = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let spread = [Point::new(0.0, 0.0), Point::new(20.0, 0.0)];
        assert_relative_eq!(scale_between(&start, &spread), 2.0);
        assert_relative_eq!(rotation_between(&start, &spread), 0.0);

        let turned = [Point::new(0.0, 0.0), Point::new(0.0, 10.0)];
        assert_relative_eq!(scale_between(&start, &turned), 1.0);
        assert_relative_eq!(rotation_between(&start, &turned), 90.0);
    }

    #[test]
    fn pinch_math_degenerates_to_zero() {
        let one = [Point::new(1.0, 1.0)];
        let two = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let three = [Point::ZERO, Point::new(1.0, 0.0), Point::new(2.0, 0.0)];

        for (start, moved) in [
            (&one[..], &two[..]),
            (&two[..], &one[..]),
            (&[][..], &two[..]),
            (&two[..], &three[..]),
            (&three[..], &three[..]),
        ] {
            assert_eq!(scale_between(start, moved), 0.0);
            assert_eq!(rotation_between(start, moved), 0.0);
        }
    }
}
