use async_trait::async_trait;

use crate::timer::Countdown;

/// A tick-based countdown with one-second granularity.
///
/// Each timer instance is independent; the QR and password-entry timers
/// never share state.
#[async_trait]
pub trait CountdownPort: Send + Sync {
    /// Reset the counter to `ceiling_secs` and begin ticking.
    async fn start(&self, ceiling_secs: u32) -> anyhow::Result<()>;

    /// Stop ticking. Always possible and free of side effects.
    async fn stop(&self) -> anyhow::Result<()>;

    fn snapshot(&self) -> Countdown;

    fn is_expired(&self) -> bool {
        self.snapshot().is_expired()
    }

    fn remaining_secs(&self) -> u32 {
        self.snapshot().remaining_secs()
    }

    /// Resolve once the counter reaches zero. Never resolves for a stopped
    /// timer that has time left.
    async fn expired(&self);
}
