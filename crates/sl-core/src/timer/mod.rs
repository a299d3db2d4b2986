//! Countdown state shared by the QR and password-entry timers.

mod countdown;

pub use countdown::{Countdown, TimerKind};
