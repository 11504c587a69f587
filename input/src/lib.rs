//! Gesture recognition over a normalized stream of pointer and touch samples.
//!
//! The host adapter translates native events into [`PointerSample`]s and feeds them to a
//! [`GestureRecognizer`], which reports taps, double taps, holds, swipes, drags, and two finger
//! transforms to its subscribed listeners as [`GestureEvent`]s.
mod config;
mod event;
mod listeners;
mod offset;
mod recognizer;
mod sample;
mod session;
mod timer;

pub use config::*;
pub use event::*;
pub use listeners::ListenerId;
pub use offset::*;
pub use recognizer::*;
pub use sample::*;
pub use timer::*;

/// Tells the host adapter whether to suppress the native default action of the event that
/// produced a sample.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DefaultAction {
    #[default]
    Allow,
    Prevent,
}
