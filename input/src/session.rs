//! Classification inside one press-to-release session.
use std::time::{Duration, Instant};

use log::{debug, trace};

use tactile_geometry::{Line, Point, Vector, rotation_between, scale_between};

use crate::{
    DefaultAction, DragDetails, GestureConfig, GestureEvent, GestureKind, PointerSample,
    TimerHandle, TransformDetails, Travel,
};

/// Recognizer state that survives the end of a session, so that the next session can detect a
/// double tap.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TapHistory {
    pub previous_gesture: Option<GestureKind>,
    pub previous_tap_end: Option<Instant>,
    pub previous_tap_position: Option<Vec<Point>>,
}

/// An active session. Dropping it is the reset between sessions.
#[derive(Debug)]
pub(crate) struct Session {
    pub start_points: Vec<Point>,
    pub start_time: Instant,
    /// The points of the most recent move, `None` if the pointer never moved.
    pub move_points: Option<Vec<Point>>,
    /// Element offset, queried at start.
    pub offset: Vector,
    pub current: Option<GestureKind>,
    /// The next drag or transform event is reported as its start variant.
    pub start_variant_pending: bool,
    pub hold_fired: bool,
    pub hold_timer: Option<TimerHandle>,
}

impl Session {
    /// `start_points` must not be empty.
    pub fn new(start_points: Vec<Point>, start_time: Instant, offset: Vector) -> Self {
        debug_assert!(!start_points.is_empty());
        Self {
            start_points,
            start_time,
            move_points: None,
            offset,
            current: None,
            start_variant_pending: true,
            hold_fired: false,
            hold_timer: None,
        }
    }

    fn start_point(&self) -> Point {
        self.start_points[0]
    }

    /// Travel of the first pointer from its start to its most recent move.
    fn travel(&self) -> Option<(Point, Travel)> {
        let to = *self.move_points.as_ref()?.first()?;
        Some((to, Travel::between(self.start_point(), to)))
    }

    /// `sample.points` must not be empty.
    pub fn on_move(
        &mut self,
        config: &GestureConfig,
        sample: &PointerSample,
        events: &mut Vec<GestureEvent>,
    ) -> DefaultAction {
        self.move_points = Some(sample.points.clone());
        trace!("Move with {} pointer(s)", sample.finger_count());

        if config.transform_enabled
            && sample.finger_count() == 2
            && let Some(details) = self.confirm_transform(config, &sample.points)
        {
            self.current = Some(GestureKind::Transform);
            if self.start_variant_pending {
                debug!("Transform started");
                events.push(GestureEvent::TransformStart(details));
                self.start_variant_pending = false;
            }
            events.push(GestureEvent::Transform(details));
            return DefaultAction::Prevent;
        }

        self.drag(config, events)
    }

    fn confirm_transform(
        &self,
        config: &GestureConfig,
        points: &[Point],
    ) -> Option<TransformDetails> {
        let rotation = rotation_between(&self.start_points, points);
        let scale = scale_between(&self.start_points, points);

        let confirmed = match self.current {
            Some(GestureKind::Drag) => false,
            Some(GestureKind::Transform) => true,
            _ => (1.0 - scale).abs() > config.scale_threshold
                || rotation.abs() > config.rotation_threshold,
        };

        confirmed.then(|| TransformDetails {
            position: two_finger_center(points) - self.offset,
            rotation,
            scale,
        })
    }

    fn drag(&mut self, config: &GestureConfig, events: &mut Vec<GestureEvent>) -> DefaultAction {
        let Some((to, travel)) = self.travel() else {
            return DefaultAction::Allow;
        };
        let beyond_threshold = travel.distance > config.drag_min_distance;

        if !(config.drag_enabled && beyond_threshold) && self.current != Some(GestureKind::Drag) {
            return DefaultAction::Allow;
        }

        let axis_allowed = if travel.direction.is_vertical() {
            config.drag_vertical
        } else {
            config.drag_horizontal
        };
        if !axis_allowed && beyond_threshold {
            trace!("Drag {} is locked out", travel.direction);
            return DefaultAction::Allow;
        }

        self.current = Some(GestureKind::Drag);
        let details = DragDetails {
            travel,
            position: to - self.offset,
        };
        if self.start_variant_pending {
            debug!("Drag started {} after {:.1}", travel.direction, travel.distance);
            events.push(GestureEvent::DragStart(details));
            self.start_variant_pending = false;
        }
        events.push(GestureEvent::Drag(details));
        DefaultAction::Prevent
    }

    /// Classifies the end of the session and returns the final gesture.
    pub fn finish(
        mut self,
        config: &GestureConfig,
        history: &mut TapHistory,
        now: Instant,
        events: &mut Vec<GestureEvent>,
    ) -> (Option<GestureKind>, DefaultAction) {
        let duration = now.saturating_duration_since(self.start_time);
        // Drag and transform ends are decided on what was in progress, not on the swipe that may
        // replace the classification below.
        let ongoing = self.current;
        let travel = self.travel();
        let mut action = DefaultAction::Allow;

        if let Some((to, travel)) = travel
            && config.swipe_enabled
            && duration < config.swipe_max_time
            && travel.distance > config.swipe_min_distance
        {
            self.current = Some(GestureKind::Swipe);
            events.push(GestureEvent::Swipe {
                position: to - self.offset,
                travel,
            });
        }

        match ongoing {
            Some(GestureKind::Drag) => {
                if let Some((_, travel)) = travel {
                    events.push(GestureEvent::DragEnd(travel.into()));
                }
            }
            Some(GestureKind::Transform) => {
                let points = self.move_points.as_deref().unwrap_or(&self.start_points[..]);
                events.push(GestureEvent::TransformEnd(TransformDetails {
                    position: two_finger_center(points) - self.offset,
                    rotation: rotation_between(&self.start_points, points),
                    scale: scale_between(&self.start_points, points),
                }));
            }
            _ => action = self.tap(config, history, now, duration, events),
        }

        // A hold that never fired is no gesture.
        if self.current == Some(GestureKind::Hold) && !self.hold_fired {
            self.current = None;
        }
        (self.current, action)
    }

    fn tap(
        &mut self,
        config: &GestureConfig,
        history: &mut TapHistory,
        now: Instant,
        duration: Duration,
        events: &mut Vec<GestureEvent>,
    ) -> DefaultAction {
        if config.hold_enabled && duration >= config.hold_timeout {
            return DefaultAction::Allow;
        }

        let start = self.start_point();
        let double_tap = config.tap_double_enabled
            && history.previous_gesture == Some(GestureKind::Tap)
            && history.previous_tap_end.is_some_and(|end| {
                self.start_time.saturating_duration_since(end) < config.tap_max_interval
            })
            && history
                .previous_tap_position
                .as_ref()
                .and_then(|p| p.first())
                .is_some_and(|p| p.max_axis_distance(start) < config.tap_double_max_distance);

        if double_tap {
            self.current = Some(GestureKind::DoubleTap);
            history.previous_tap_end = None;
            events.push(GestureEvent::DoubleTap {
                position: self.start_points.clone(),
            });
            return DefaultAction::Prevent;
        }

        let distance = self
            .move_points
            .as_ref()
            .and_then(|m| m.first())
            .map_or(0.0, |m| m.max_axis_distance(start));
        if distance >= config.tap_max_distance {
            return DefaultAction::Allow;
        }

        self.current = Some(GestureKind::Tap);
        history.previous_tap_end = Some(now);
        history.previous_tap_position = Some(self.start_points.clone());
        if !config.tap_enabled {
            return DefaultAction::Allow;
        }
        events.push(GestureEvent::Tap {
            position: self.start_points.clone(),
        });
        DefaultAction::Prevent
    }
}

/// The center between the first two points, or the only point.
fn two_finger_center(points: &[Point]) -> Point {
    match points {
        [p1, p2, ..] => Line::new(*p1, *p2).center(),
        [p] => *p,
        [] => Point::ZERO,
    }
}
