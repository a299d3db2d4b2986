use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::{interval_at, Duration, Instant};
use tracing::debug;

use sl_core::config::PairingConfig;
use sl_core::ports::CountdownPort;
use sl_core::timer::{Countdown, TimerKind};

const TICK: Duration = Duration::from_secs(1);

/// One-second countdown driven by a spawned tokio task.
///
/// Restarting aborts the previous ticker before the counter is reset, so a
/// late tick of an older run never decrements the new one.
pub struct TickingCountdown {
    kind: TimerKind,
    state: Arc<watch::Sender<Countdown>>,
    ticker: Mutex<Option<AbortHandle>>,
}

impl TickingCountdown {
    pub fn new(kind: TimerKind, ceiling_secs: u32) -> Self {
        let (state, _) = watch::channel(Countdown::new(ceiling_secs));
        Self {
            kind,
            state: Arc::new(state),
            ticker: Mutex::new(None),
        }
    }

    pub fn from_config(kind: TimerKind, config: &PairingConfig) -> Self {
        Self::new(kind, config.ceiling_secs(kind))
    }

    fn abort_ticker(&self) {
        if let Ok(mut guard) = self.ticker.lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }
}

#[async_trait::async_trait]
impl CountdownPort for TickingCountdown {
    async fn start(&self, ceiling_secs: u32) -> anyhow::Result<()> {
        self.abort_ticker();
        self.state.send_modify(|countdown| countdown.start(ceiling_secs));
        if ceiling_secs == 0 {
            return Ok(());
        }

        let state = Arc::clone(&self.state);
        let kind = self.kind;
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            loop {
                interval.tick().await;
                let mut expired = false;
                state.send_modify(|countdown| expired = countdown.tick());
                if expired {
                    debug!(timer = ?kind, "countdown expired");
                    break;
                }
                if !state.borrow().is_running() {
                    break;
                }
            }
        });

        let mut guard = self
            .ticker
            .lock()
            .map_err(|_| anyhow::anyhow!("countdown ticker lock poisoned"))?;
        *guard = Some(handle.abort_handle());
        debug!(timer = ?self.kind, ceiling_secs, "countdown started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.abort_ticker();
        self.state.send_modify(|countdown| countdown.stop());
        debug!(timer = ?self.kind, "countdown stopped");
        Ok(())
    }

    fn snapshot(&self) -> Countdown {
        *self.state.borrow()
    }

    async fn expired(&self) {
        let mut rx = self.state.subscribe();
        loop {
            if rx.borrow_and_update().is_expired() {
                return;
            }
            // The sender lives as long as `self`.
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Drop for TickingCountdown {
    fn drop(&mut self) {
        self.abort_ticker();
    }
}
