use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use sl_core::ids::AttemptToken;
use sl_core::pairing::{PairingAction, PairingEvent, PairingPhase, PairingStateMachine, QrPayload};

/// Mutable display state of the newest attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingSnapshot {
    pub attempt: AttemptToken,
    pub phase: PairingPhase,
    pub qr: QrPayload,
    pub loading: bool,
    pub password_prompt_visible: bool,
}

impl PairingSnapshot {
    fn fresh(attempt: AttemptToken) -> Self {
        Self {
            attempt,
            phase: PairingPhase::Idle,
            qr: QrPayload::placeholder(),
            loading: false,
            password_prompt_visible: false,
        }
    }
}

/// Shared pairing context holding the current attempt token and its state.
///
/// Shared between the pairing controller, the recovery controller and
/// `LeavePairing`. Every mutation names the token it belongs to and is
/// dropped when that token is no longer the newest one, so a continuation
/// of a superseded `start()` can never touch the state of a later attempt.
pub struct PairingContext {
    state: Mutex<PairingSnapshot>,
}

impl PairingContext {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PairingSnapshot::fresh(AttemptToken::INITIAL)),
        }
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn snapshot(&self) -> PairingSnapshot {
        self.state.lock().await.clone()
    }

    /// Invalidate every pending continuation and reset the display state.
    pub async fn begin_attempt(&self) -> AttemptToken {
        let mut guard = self.state.lock().await;
        let token = guard.attempt.next();
        *guard = PairingSnapshot::fresh(token);
        debug!(attempt = %token, "pairing attempt started");
        token
    }

    pub async fn is_current(&self, token: AttemptToken) -> bool {
        self.state.lock().await.attempt == token
    }

    /// Run the phase state machine for `token`.
    ///
    /// Returns `None` when the attempt was superseded; the phase is left
    /// untouched in that case.
    pub async fn transition(
        &self,
        token: AttemptToken,
        event: PairingEvent,
    ) -> Option<Vec<PairingAction>> {
        let mut guard = self.state.lock().await;
        if guard.attempt != token {
            debug!(attempt = %token, current = %guard.attempt, ?event, "stale pairing event dropped");
            return None;
        }

        let from = guard.phase.clone();
        let event_name = format!("{:?}", event);
        let (next, actions) = PairingStateMachine::transition(from.clone(), event);
        info!(attempt = %token, from = ?from, to = ?next, event = %event_name, "pairing phase transition");
        guard.phase = next;
        Some(actions)
    }

    /// Hold the state lock while `token` is current.
    ///
    /// A caller keeps the guard across a status write so that no newer
    /// attempt can begin between the token check and the write.
    pub async fn lock_current(&self, token: AttemptToken) -> Option<MutexGuard<'_, PairingSnapshot>> {
        let guard = self.state.lock().await;
        (guard.attempt == token).then_some(guard)
    }

    /// Supersede the current attempt unless it shows the loading indicator.
    pub async fn abandon_unless_loading(&self) -> bool {
        let mut guard = self.state.lock().await;
        if guard.loading {
            return false;
        }
        let token = guard.attempt.next();
        *guard = PairingSnapshot::fresh(token);
        true
    }

    /// Apply `update` if `token` is still current. Returns whether it ran.
    pub async fn update<F>(&self, token: AttemptToken, update: F) -> bool
    where
        F: FnOnce(&mut PairingSnapshot),
    {
        let mut guard = self.state.lock().await;
        if guard.attempt != token {
            return false;
        }
        update(&mut guard);
        true
    }
}

impl Default for PairingContext {
    fn default() -> Self {
        Self::new()
    }
}
