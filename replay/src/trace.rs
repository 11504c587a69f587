//! Recorded pointer traces and replaying them through a recognizer.
//!
//! A trace is a JSON array of records:
//!
//! ```json
//! [
//!   { "phase": "start", "time_ms": 0, "points": [[10, 10]] },
//!   { "phase": "move", "time_ms": 40, "points": [[14, 11]] },
//!   { "phase": "end", "time_ms": 90 }
//! ]
//! ```
//!
//! `kind` is `"touch"` (default) or `"mouse"`. A `"mouse_out"` record carries `left_element`
//! (default `true`).
use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;

use tactile_geometry::Point;
use tactile_input::{
    GestureConfig, GestureEvent, GestureRecognizer, Phase, PointerKind, PointerSample, TickTimer,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TracePhase {
    Start,
    Move,
    End,
    Cancel,
    MouseOut,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceRecord {
    pub phase: TracePhase,
    pub time_ms: u64,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub kind: PointerKind,
    #[serde(default = "default_left_element")]
    pub left_element: bool,
}

fn default_left_element() -> bool {
    true
}

impl TraceRecord {
    fn to_sample(&self, base: Instant) -> PointerSample {
        let phase = match self.phase {
            TracePhase::Start => Phase::Start,
            TracePhase::Move => Phase::Move,
            TracePhase::End | TracePhase::MouseOut => Phase::End,
            TracePhase::Cancel => Phase::Cancel,
        };
        PointerSample {
            points: self.points.clone(),
            time: base + Duration::from_millis(self.time_ms),
            phase,
            kind: self.kind,
        }
    }
}

/// Parses a trace and checks that it is replayable.
pub fn parse_trace(json: &str) -> Result<Vec<TraceRecord>> {
    let records: Vec<TraceRecord> =
        serde_json::from_str(json).context("Failed to parse JSON pointer trace")?;

    for (i, pair) in records.windows(2).enumerate() {
        if pair[1].time_ms < pair[0].time_ms {
            bail!(
                "Trace record {} at {}ms is earlier than its predecessor at {}ms",
                i + 1,
                pair[1].time_ms,
                pair[0].time_ms
            );
        }
    }

    for (i, record) in records.iter().enumerate() {
        if matches!(record.phase, TracePhase::Start | TracePhase::Move) && record.points.is_empty()
        {
            bail!("Trace record {i} ({:?}) has no points", record.phase);
        }
    }

    Ok(records)
}

/// Feeds `records` through a recognizer and returns every event it reported.
///
/// The hold timer is advanced to each record's time before the record is handled, and once more
/// after the last record so that a pending hold still fires.
pub fn replay(
    records: &[TraceRecord],
    config: GestureConfig,
    offset: Point,
    base: Instant,
) -> Vec<GestureEvent> {
    let mut recognizer = GestureRecognizer::new(config, TickTimer::new(), offset);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    recognizer.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    for record in records {
        let sample = record.to_sample(base);
        recognizer.tick(sample.time);
        match record.phase {
            TracePhase::MouseOut => {
                recognizer.on_mouse_out(&sample, record.left_element);
            }
            _ => {
                recognizer.handle(&sample);
            }
        }
    }

    if let Some(due) = recognizer.timer().next_due() {
        recognizer.tick(due);
    }

    info!(
        "Replayed {} records into {} events",
        records.len(),
        events.borrow().len()
    );
    events.take()
}

#[cfg(test)]
mod tests {
    use tactile_input::GestureKind;

    use super::*;

    fn names(events: &[GestureEvent]) -> Vec<&'static str> {
        events.iter().map(GestureEvent::name).collect()
    }

    #[test]
    fn replays_a_double_tap() {
        let records = parse_trace(
            r#"[
                { "phase": "start", "time_ms": 0, "points": [[10, 10]] },
                { "phase": "end", "time_ms": 100 },
                { "phase": "start", "time_ms": 250, "points": [[12, 11]] },
                { "phase": "end", "time_ms": 300 }
            ]"#,
        )
        .unwrap();

        let events = replay(
            &records,
            GestureConfig::default(),
            Point::ZERO,
            Instant::now(),
        );
        assert_eq!(names(&events), ["tap", "release", "double_tap", "release"]);
    }

    #[test]
    fn trailing_hold_fires() {
        let records = parse_trace(r#"[{ "phase": "start", "time_ms": 0, "points": [[1, 1]] }]"#)
            .unwrap();
        let events = replay(
            &records,
            GestureConfig::default(),
            Point::ZERO,
            Instant::now(),
        );
        assert_eq!(
            events,
            [GestureEvent::Hold {
                position: vec![Point::new(1.0, 1.0)]
            }]
        );
    }

    #[test]
    fn mouse_out_ends_a_mouse_drag() {
        let records = parse_trace(
            r#"[
                { "phase": "start", "time_ms": 0, "points": [[0, 0]], "kind": "mouse" },
                { "phase": "move", "time_ms": 300, "points": [[50, 0]], "kind": "mouse" },
                { "phase": "mouse_out", "time_ms": 320, "points": [[60, 0]], "kind": "mouse" }
            ]"#,
        )
        .unwrap();
        let events = replay(
            &records,
            GestureConfig::default(),
            Point::ZERO,
            Instant::now(),
        );
        assert_eq!(names(&events), ["drag_start", "drag", "drag_end", "release"]);
        assert_eq!(
            events.last(),
            Some(&GestureEvent::Release {
                gesture: Some(GestureKind::Drag)
            })
        );
    }

    #[test]
    fn rejects_out_of_order_records() {
        let err = parse_trace(
            r#"[
                { "phase": "start", "time_ms": 10, "points": [[0, 0]] },
                { "phase": "end", "time_ms": 5 }
            ]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("earlier than its predecessor"));
    }

    #[test]
    fn rejects_starts_without_points() {
        let err = parse_trace(r#"[{ "phase": "start", "time_ms": 0 }]"#).unwrap_err();
        assert!(err.to_string().contains("has no points"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_trace(r#"[{ "phase": "hover", "time_ms": 0 }]"#).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse JSON pointer trace"));
    }
}
