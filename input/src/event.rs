use derive_more::Display;
use serde::Serialize;

use tactile_geometry::{Direction, Point, Vector, angle_between};

/// The classification of a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Hold,
    Swipe,
    Drag,
    Transform,
    Tap,
    DoubleTap,
}

/// How far and where to a pointer travelled since the session started.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Travel {
    /// Degrees, see [`angle_between`].
    pub angle: f64,
    pub direction: Direction,
    /// Euclidean distance.
    pub distance: f64,
    pub distance_x: f64,
    pub distance_y: f64,
}

impl Travel {
    pub fn between(from: Point, to: Point) -> Self {
        let angle = angle_between(from, to);
        let delta: Vector = to - from;
        Self {
            angle,
            direction: Direction::from_angle(angle),
            distance: delta.length(),
            distance_x: delta.x,
            distance_y: delta.y,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct DragDetails {
    #[serde(flatten)]
    pub travel: Travel,
    /// Element relative position of the first pointer.
    pub position: Point,
}

/// Summary of a finished drag. Positions and deltas are not reported.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct DragEndDetails {
    pub angle: f64,
    pub direction: Direction,
    pub distance: f64,
}

impl From<Travel> for DragEndDetails {
    fn from(travel: Travel) -> Self {
        Self {
            angle: travel.angle,
            direction: travel.direction,
            distance: travel.distance,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct TransformDetails {
    /// Element relative center between the two fingers.
    pub position: Point,
    /// Degrees.
    pub rotation: f64,
    pub scale: f64,
}

/// A recognized gesture, dispatched to every subscribed listener.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// The pointer stayed down for the hold timeout. The session continues.
    Hold { position: Vec<Point> },
    Swipe {
        /// Element relative position of the first pointer.
        position: Point,
        #[serde(flatten)]
        travel: Travel,
    },
    DragStart(DragDetails),
    Drag(DragDetails),
    DragEnd(DragEndDetails),
    TransformStart(TransformDetails),
    Transform(TransformDetails),
    TransformEnd(TransformDetails),
    Tap { position: Vec<Point> },
    DoubleTap { position: Vec<Point> },
    /// Always the last event of a session.
    Release { gesture: Option<GestureKind> },
}

impl GestureEvent {
    pub fn name(&self) -> &'static str {
        use GestureEvent::*;
        match self {
            Hold { .. } => "hold",
            Swipe { .. } => "swipe",
            DragStart(_) => "drag_start",
            Drag(_) => "drag",
            DragEnd(_) => "drag_end",
            TransformStart(_) => "transform_start",
            Transform(_) => "transform",
            TransformEnd(_) => "transform_end",
            Tap { .. } => "tap",
            DoubleTap { .. } => "double_tap",
            Release { .. } => "release",
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn travel_measures_from_start() {
        let travel = Travel::between(Point::new(10.0, 10.0), Point::new(10.0, -15.0));
        assert_relative_eq!(travel.distance, 25.0);
        assert_relative_eq!(travel.angle, -90.0);
        assert_eq!(travel.direction, Direction::Up);
        assert_eq!(travel.distance_x, 0.0);
        assert_eq!(travel.distance_y, -25.0);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let release = GestureEvent::Release {
            gesture: Some(GestureKind::DoubleTap),
        };
        assert_eq!(
            serde_json::to_value(&release).unwrap(),
            json!({ "type": "release", "gesture": "double_tap" })
        );

        let drag = GestureEvent::Drag(DragDetails {
            travel: Travel::between(Point::ZERO, Point::new(30.0, 0.0)),
            position: Point::new(30.0, 0.0),
        });
        assert_eq!(
            serde_json::to_value(&drag).unwrap(),
            json!({
                "type": "drag",
                "angle": 0.0,
                "direction": "right",
                "distance": 30.0,
                "distance_x": 30.0,
                "distance_y": 0.0,
                "position": [30.0, 0.0],
            })
        );
        assert_eq!(drag.name(), "drag");
    }
}
