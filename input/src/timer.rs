//! The delayed callback that drives the hold gesture.
//!
//! The recognizer never owns a clock. When a session starts it asks a [`HoldTimer`] to schedule a
//! [`HoldTicket`] and the host hands the ticket back through
//! [`GestureRecognizer::hold_elapsed`](crate::GestureRecognizer::hold_elapsed) when the delay
//! passed. The ticket carries the [`SessionId`] it was armed for, so a ticket that outlives its
//! session is recognized and dropped.
use std::time::{Duration, Instant};

use derive_more::{Display, From};

/// Identifies one press-to-release session. Incremented on every session start.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Display)]
#[display("session#{_0}")]
pub struct SessionId(u64);

impl SessionId {
    /// Wrapping: a ticket from `u64::MAX` sessions ago is long gone.
    pub(crate) fn next(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// A by-value snapshot of the session a hold timer was armed for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HoldTicket {
    pub session: SessionId,
    pub armed_at: Instant,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct TimerHandle(u64);

pub trait HoldTimer {
    /// Schedules `ticket` to be handed back after `delay`.
    fn schedule(&mut self, ticket: HoldTicket, delay: Duration) -> TimerHandle;

    /// Cancels a scheduled ticket. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// A [`HoldTimer`] that is driven by explicit ticks.
///
/// Hosts call [`TickTimer::tick`] with the current time (from a frame tick, an event loop wakeup,
/// or just before feeding the next sample) and receive the tickets that became due.
#[derive(Debug, Default)]
pub struct TickTimer {
    next_handle: u64,
    pending: Vec<Pending>,
}

#[derive(Debug)]
struct Pending {
    handle: TimerHandle,
    due: Instant,
    ticket: HoldTicket,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all tickets due at `now`, earliest first.
    pub fn tick(&mut self, now: Instant) -> Vec<HoldTicket> {
        let mut due = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push((p.due, p.ticket));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(due, _)| *due);
        due.into_iter().map(|(_, ticket)| ticket).collect()
    }

    /// The number of scheduled tickets.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// The time the earliest ticket becomes due.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }
}

impl HoldTimer for TickTimer {
    fn schedule(&mut self, ticket: HoldTicket, delay: Duration) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.pending.push(Pending {
            handle,
            due: ticket.armed_at + delay,
            ticket,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|p| p.handle != handle);
    }
}
