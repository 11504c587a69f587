//! The gesture recognizer: turns a stream of pointer samples into gesture events.
//!
//! A session starts with a [`Phase::Start`] sample and ends with [`Phase::End`] /
//! [`Phase::Cancel`] (or, for a mouse, when it leaves the element). Inside a session every move is
//! checked for a two finger transform first and for a drag second. The end of a session reports a
//! swipe, finishes a drag or transform, or decides between tap and double tap. A session that
//! stays down long enough reports a hold through the [`HoldTimer`].
//!
//! ```
//! use std::{cell::RefCell, rc::Rc, time::{Duration, Instant}};
//! use tactile_geometry::Point;
//! use tactile_input::{GestureEvent, GestureKind, GestureRecognizer, PointerSample};
//!
//! let mut recognizer = GestureRecognizer::default();
//! let events = Rc::new(RefCell::new(Vec::new()));
//! let sink = events.clone();
//! recognizer.subscribe(move |e| sink.borrow_mut().push(e.clone()));
//!
//! let t0 = Instant::now();
//! recognizer.handle(&PointerSample::start(t0, [Point::new(10.0, 10.0)]));
//! recognizer.handle(&PointerSample::end(t0 + Duration::from_millis(80)));
//!
//! assert_eq!(
//!     *events.borrow(),
//!     [
//!         GestureEvent::Tap { position: vec![Point::new(10.0, 10.0)] },
//!         GestureEvent::Release { gesture: Some(GestureKind::Tap) },
//!     ]
//! );
//! ```
use std::time::Instant;

use log::{debug, warn};

use tactile_geometry::Point;

use crate::{
    DefaultAction, GestureConfig, GestureEvent, GestureKind, HoldTicket, HoldTimer, ListenerId,
    OffsetProvider, Phase, PointerSample, SessionId, TickTimer,
    listeners::Listeners,
    session::{Session, TapHistory},
};

#[derive(Debug)]
pub struct GestureRecognizer<T: HoldTimer = TickTimer, O: OffsetProvider = Point> {
    config: GestureConfig,
    timer: T,
    offset_provider: O,
    listeners: Listeners,
    session_id: SessionId,
    /// `None` while idle.
    session: Option<Session>,
    history: TapHistory,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::with_config(GestureConfig::default())
    }
}

impl GestureRecognizer {
    /// A recognizer driven by a [`TickTimer`] with element coordinates equal to sample coordinates.
    pub fn with_config(config: GestureConfig) -> Self {
        Self::new(config, TickTimer::new(), Point::ZERO)
    }
}

impl<T: HoldTimer, O: OffsetProvider> GestureRecognizer<T, O> {
    pub fn new(config: GestureConfig, timer: T, offset_provider: O) -> Self {
        Self {
            config,
            timer,
            offset_provider,
            listeners: Listeners::default(),
            session_id: SessionId::default(),
            session: None,
            history: TapHistory::default(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the configuration. A running session continues with the new thresholds.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GestureEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Returns `false` if the listener was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The classification of the running session so far.
    pub fn current_gesture(&self) -> Option<GestureKind> {
        self.session.as_ref().and_then(|s| s.current)
    }

    /// The final classification of the previous session.
    pub fn previous_gesture(&self) -> Option<GestureKind> {
        self.history.previous_gesture
    }

    /// The session the most recent start began.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Routes a sample to the entry point of its phase.
    pub fn handle(&mut self, sample: &PointerSample) -> DefaultAction {
        match sample.phase {
            Phase::Start => self.on_start(sample),
            Phase::Move => self.on_move(sample),
            Phase::End | Phase::Cancel => self.on_end(sample),
        }
    }

    /// Begins a new session, replacing a running one.
    pub fn on_start(&mut self, sample: &PointerSample) -> DefaultAction {
        if sample.points.is_empty() {
            warn!("Ignoring start sample without points");
            return DefaultAction::Allow;
        }

        self.cancel_hold_timer();
        self.session_id.next();

        let mut session = Session::new(
            sample.points.clone(),
            sample.time,
            self.offset_provider.element_offset(),
        );

        if self.config.hold_enabled {
            session.current = Some(GestureKind::Hold);
            let ticket = HoldTicket {
                session: self.session_id,
                armed_at: sample.time,
            };
            session.hold_timer = Some(self.timer.schedule(ticket, self.config.hold_timeout));
        }

        debug!(
            "Started {} with {} pointer(s)",
            self.session_id,
            sample.finger_count()
        );
        self.session = Some(session);

        if self.config.prevent_default_on_match {
            DefaultAction::Prevent
        } else {
            DefaultAction::Allow
        }
    }

    pub fn on_move(&mut self, sample: &PointerSample) -> DefaultAction {
        let Some(session) = self.session.as_mut() else {
            return DefaultAction::Allow;
        };
        if sample.points.is_empty() {
            warn!("Ignoring move sample without points");
            return DefaultAction::Allow;
        }

        let mut events = Vec::new();
        let action = session.on_move(&self.config, sample, &mut events);
        self.dispatch_all(&events);
        action
    }

    /// Ends the session when the last pointer lifted. While a transform runs, the first lifted
    /// finger ends it.
    pub fn on_end(&mut self, sample: &PointerSample) -> DefaultAction {
        let Some(session) = self.session.as_ref() else {
            return DefaultAction::Allow;
        };
        if session.current != Some(GestureKind::Transform) && !sample.points.is_empty() {
            return DefaultAction::Allow;
        }

        let Some(mut session) = self.session.take() else {
            return DefaultAction::Allow;
        };
        if let Some(handle) = session.hold_timer.take() {
            self.timer.cancel(handle);
        }

        let mut events = Vec::new();
        let (gesture, action) =
            session.finish(&self.config, &mut self.history, sample.time, &mut events);

        debug!("Ended {} as {gesture:?}", self.session_id);
        self.history.previous_gesture = gesture;
        events.push(GestureEvent::Release { gesture });
        self.dispatch_all(&events);
        action
    }

    /// A mouse left the element. `left_element` is `false` when it only moved onto a child of the
    /// element. Touch samples are ignored.
    pub fn on_mouse_out(&mut self, sample: &PointerSample, left_element: bool) -> DefaultAction {
        if !sample.is_mouse() || !left_element {
            return DefaultAction::Allow;
        }
        self.on_end(&PointerSample {
            points: Vec::new(),
            phase: Phase::End,
            ..sample.clone()
        })
    }

    /// The hold delay for `ticket` passed.
    ///
    /// Reports a hold if the ticket belongs to the running session and that session is still
    /// classified as a hold. The session continues.
    pub fn hold_elapsed(&mut self, ticket: HoldTicket) {
        if ticket.session != self.session_id {
            debug!("Ignoring hold ticket of {}", ticket.session);
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.hold_timer = None;
        if session.current != Some(GestureKind::Hold) {
            return;
        }

        session.hold_fired = true;
        let event = GestureEvent::Hold {
            position: session.start_points.clone(),
        };
        self.dispatch(&event);
    }

    /// Ends a running session without classifying it. Reports a release without a gesture.
    pub fn abort(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.cancel_hold_timer();
        self.session = None;
        debug!("Aborted {}", self.session_id);
        self.dispatch(&GestureEvent::Release { gesture: None });
    }

    fn cancel_hold_timer(&mut self) {
        if let Some(handle) = self.session.as_mut().and_then(|s| s.hold_timer.take()) {
            self.timer.cancel(handle);
        }
    }

    fn dispatch_all(&mut self, events: &[GestureEvent]) {
        for event in events {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: &GestureEvent) {
        debug!("Gesture {}", event.name());
        self.listeners.dispatch(event);
    }
}

impl<O: OffsetProvider> GestureRecognizer<TickTimer, O> {
    /// Fires the holds that became due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for ticket in self.timer.tick(now) {
            self.hold_elapsed(ticket);
        }
    }
}
