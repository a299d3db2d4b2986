use serde::{Deserialize, Serialize};

/// Default ceiling of the QR validity countdown.
pub const DEFAULT_QR_TTL_SECS: u32 = 30;
/// Default ceiling of the password entry countdown, aligned with the
/// pairing API session lifetime.
pub const DEFAULT_PASSWORD_TTL_SECS: u32 = 60;

/// The two independent countdowns of a pairing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    PairingQr,
    PasswordEntry,
}

impl TimerKind {
    pub fn default_ceiling_secs(self) -> u32 {
        match self {
            TimerKind::PairingQr => DEFAULT_QR_TTL_SECS,
            TimerKind::PasswordEntry => DEFAULT_PASSWORD_TTL_SECS,
        }
    }
}

/// Remaining-seconds counter with a fixed ceiling.
///
/// Decremented once per tick while running; reaching zero means expired.
/// A fresh countdown sits at its ceiling and is not expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    ceiling_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl Countdown {
    pub fn new(ceiling_secs: u32) -> Self {
        Self {
            ceiling_secs,
            remaining_secs: ceiling_secs,
            running: false,
        }
    }

    /// Reset the counter to `ceiling_secs` and begin counting down.
    pub fn start(&mut self, ceiling_secs: u32) {
        self.ceiling_secs = ceiling_secs;
        self.remaining_secs = ceiling_secs;
        self.running = ceiling_secs > 0;
    }

    /// Advance by one second. Returns `true` on the tick that expires it.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            return true;
        }
        false
    }

    /// Stop counting; the remaining value is kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn ceiling_secs(&self) -> u32 {
        self.ceiling_secs
    }
}
