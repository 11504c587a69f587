use std::time::Instant;

use serde::{Deserialize, Serialize};

use tactile_geometry::Point;

/// Where in a press-to-release session a sample belongs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    #[default]
    Touch,
    Mouse,
}

/// One pointer or touch event, normalized by the host adapter.
///
/// For [`Phase::Start`] and [`Phase::Move`] `points` holds every active touch (exactly one for a
/// mouse). For [`Phase::End`] and [`Phase::Cancel`] it holds the touches that are _still down_,
/// which is empty when the last finger lifted or the mouse button was released.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerSample {
    pub points: Vec<Point>,
    pub time: Instant,
    pub phase: Phase,
    pub kind: PointerKind,
}

impl PointerSample {
    pub fn new(phase: Phase, time: Instant, points: impl Into<Vec<Point>>) -> Self {
        Self {
            points: points.into(),
            time,
            phase,
            kind: PointerKind::default(),
        }
    }

    pub fn start(time: Instant, points: impl Into<Vec<Point>>) -> Self {
        Self::new(Phase::Start, time, points)
    }

    pub fn moved(time: Instant, points: impl Into<Vec<Point>>) -> Self {
        Self::new(Phase::Move, time, points)
    }

    /// The last touch lifted.
    pub fn end(time: Instant) -> Self {
        Self::new(Phase::End, time, Vec::new())
    }

    /// A touch lifted while `remaining` touches are still down.
    pub fn end_with_remaining(time: Instant, remaining: impl Into<Vec<Point>>) -> Self {
        Self::new(Phase::End, time, remaining)
    }

    pub fn cancel(time: Instant) -> Self {
        Self::new(Phase::Cancel, time, Vec::new())
    }

    /// Marks the sample as coming from a mouse.
    #[must_use]
    pub fn mouse(mut self) -> Self {
        self.kind = PointerKind::Mouse;
        self
    }

    pub fn finger_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_mouse(&self) -> bool {
        self.kind == PointerKind::Mouse
    }
}
