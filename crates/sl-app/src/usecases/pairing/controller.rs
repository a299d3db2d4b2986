//! Pairing session controller.
//!
//! Drives one pairing attempt per `start()`: request a QR payload, wait for
//! the remote device, then either finish a fresh pairing or hand the
//! confirmed session to recovery.

use std::sync::Arc;

use tracing::{debug, error, info, info_span, warn, Instrument};

use sl_core::config::PairingConfig;
use sl_core::ids::AttemptToken;
use sl_core::navigation::PairingFlow;
use sl_core::pairing::{PairingAction, PairingEvent, PairingPhase, PairingSession, PairingView};
use sl_core::ports::{CountdownPort, PairingEstablisherPort, PairingEventPort};
use sl_core::timer::TimerKind;

use super::context::{PairingContext, PairingSnapshot};
use super::error::PairingError;
use crate::usecases::wallet::ApplyWalletStatus;

/// A confirmed session carrying backup data, owned by recovery from here on.
#[derive(Debug)]
pub struct RecoveryHandoff {
    attempt: AttemptToken,
    session: PairingSession,
}

impl RecoveryHandoff {
    pub(crate) fn new(attempt: AttemptToken, session: PairingSession) -> Self {
        Self { attempt, session }
    }

    pub fn attempt(&self) -> AttemptToken {
        self.attempt
    }

    pub fn session(&self) -> &PairingSession {
        &self.session
    }

    pub(crate) fn into_parts(self) -> (AttemptToken, PairingSession) {
        (self.attempt, self.session)
    }
}

/// How a `start()` call ended.
#[derive(Debug)]
pub enum PairingStep {
    /// Key generation finished and the status register reads `Paired`.
    FreshPaired,
    /// The session carries a backup; continue with the recovery controller.
    Handoff(RecoveryHandoff),
    /// A newer `start()` took over; nothing was mutated.
    Superseded,
}

/// Helper for constructing the controller with explicit dependency fields.
pub struct PairingControllerDeps {
    pub establisher: Arc<dyn PairingEstablisherPort>,
    pub apply_status: Arc<ApplyWalletStatus>,
    pub qr_timer: Arc<dyn CountdownPort>,
    pub password_timer: Arc<dyn CountdownPort>,
    pub events: Arc<dyn PairingEventPort>,
}

pub struct PairingSessionController {
    flow: PairingFlow,
    config: PairingConfig,
    context: Arc<PairingContext>,
    establisher: Arc<dyn PairingEstablisherPort>,
    apply_status: Arc<ApplyWalletStatus>,
    qr_timer: Arc<dyn CountdownPort>,
    password_timer: Arc<dyn CountdownPort>,
    events: Arc<dyn PairingEventPort>,
}

impl PairingSessionController {
    pub fn from_deps(
        flow: PairingFlow,
        config: PairingConfig,
        context: Arc<PairingContext>,
        deps: PairingControllerDeps,
    ) -> Self {
        let PairingControllerDeps {
            establisher,
            apply_status,
            qr_timer,
            password_timer,
            events,
        } = deps;

        Self {
            flow,
            config,
            context,
            establisher,
            apply_status,
            qr_timer,
            password_timer,
            events,
        }
    }

    pub fn flow(&self) -> PairingFlow {
        self.flow
    }

    /// Begin a new attempt, superseding any attempt still in flight.
    ///
    /// Suspends until the establisher confirms the session. A continuation
    /// of an older attempt that resolves later returns
    /// [`PairingStep::Superseded`] without touching any state.
    pub async fn start(&self) -> Result<PairingStep, PairingError> {
        let attempt = self.context.begin_attempt().await;
        let span = info_span!("usecase.pairing.start", flow = ?self.flow, attempt = %attempt);
        async {
            let err = match self.drive(attempt).await {
                Ok(step) => return Ok(step),
                Err(err) => err,
            };
            // A newer attempt owns the page even when this one failed late.
            if err.is_stale() || !self.context.is_current(attempt).await {
                debug!(error = %err, "pairing continuation superseded by a newer attempt");
                return Ok(PairingStep::Superseded);
            }
            error!(error = %err, "pairing attempt failed");
            self.settle(
                attempt,
                PairingEvent::Failed {
                    reason: err.failure(),
                },
            )
            .await;
            Err(err)
        }
        .instrument(span)
        .await
    }

    /// Feed a terminal event for an attempt that was handed to recovery.
    ///
    /// Ignored when the attempt was superseded in the meantime.
    pub async fn settle(&self, attempt: AttemptToken, event: PairingEvent) {
        let Some(actions) = self.context.transition(attempt, event).await else {
            return;
        };
        let mut no_session = None;
        for action in actions {
            if let Err(err) = self.execute_action(attempt, action, &mut no_session).await {
                error!(error = %err, attempt = %attempt, "pairing settle action failed");
            }
        }
        self.emit(attempt).await;
    }

    /// Display state of the newest attempt.
    pub async fn view(&self) -> PairingView {
        let snapshot = self.context.snapshot().await;
        self.compose_view(snapshot)
    }

    async fn drive(&self, attempt: AttemptToken) -> Result<PairingStep, PairingError> {
        let mut session = None;
        let mut pending_events = vec![PairingEvent::Start];

        while let Some(event) = pending_events.pop() {
            let actions = self
                .context
                .transition(attempt, event)
                .await
                .ok_or(PairingError::StaleAttempt(attempt))?;
            for action in actions {
                debug!(?action, "pairing executing action");
                if let Some(follow_up) = self.execute_action(attempt, action, &mut session).await? {
                    pending_events.push(follow_up);
                }
            }
            self.emit(attempt).await;
        }

        let snapshot = self.context.snapshot().await;
        if snapshot.attempt != attempt {
            return Err(PairingError::StaleAttempt(attempt));
        }
        match (snapshot.phase, session) {
            (PairingPhase::Done, _) => {
                info!("fresh pairing completed");
                Ok(PairingStep::FreshPaired)
            }
            (PairingPhase::HandoffToRecovery, Some(session)) => {
                info!(pairing_id = %session.pairing_id(), "pairing session handed to recovery");
                Ok(PairingStep::Handoff(RecoveryHandoff::new(attempt, session)))
            }
            (phase, _) => Err(PairingError::Interrupted(phase)),
        }
    }

    async fn execute_action(
        &self,
        attempt: AttemptToken,
        action: PairingAction,
        session: &mut Option<PairingSession>,
    ) -> Result<Option<PairingEvent>, PairingError> {
        match action {
            PairingAction::IssueQr => {
                let qr = self.establisher.initiate_pairing().await?;
                self.ensure_current(attempt).await?;
                self.context.update(attempt, |s| s.qr = qr).await;
                self.restart_timers().await;
                Ok(Some(PairingEvent::QrIssued))
            }
            PairingAction::AwaitConfirmation => {
                let confirmed = self.establisher.await_session_confirmation().await?;
                self.ensure_current(attempt).await?;
                let has_backup = confirmed.has_backup();
                info!(pairing_id = %confirmed.pairing_id(), has_backup, "pairing session confirmed");
                *session = Some(confirmed);
                Ok(Some(PairingEvent::SessionConfirmed { has_backup }))
            }
            PairingAction::MarkScanned => {
                self.context.update(attempt, |s| s.loading = true).await;
                self.stop_timer(TimerKind::PairingQr).await;
                Ok(None)
            }
            PairingAction::CompleteFreshPairing => {
                let confirmed = session
                    .take()
                    .ok_or(PairingError::Interrupted(PairingPhase::FreshPairingKeygen))?;
                self.establisher.complete_fresh_pairing(&confirmed).await?;
                self.ensure_current(attempt).await?;
                self.establisher.run_keygen().await?;
                self.ensure_current(attempt).await?;
                Ok(Some(PairingEvent::KeygenSucceeded))
            }
            PairingAction::PersistStatus(status) => {
                let _current = self
                    .context
                    .lock_current(attempt)
                    .await
                    .ok_or(PairingError::StaleAttempt(attempt))?;
                self.apply_status.execute(status).await?;
                Ok(Some(PairingEvent::StatusPersisted))
            }
            PairingAction::ShowPasswordPrompt => {
                self.context
                    .update(attempt, |s| s.password_prompt_visible = true)
                    .await;
                Ok(None)
            }
            PairingAction::HidePasswordPrompt => {
                self.context
                    .update(attempt, |s| s.password_prompt_visible = false)
                    .await;
                self.stop_timer(TimerKind::PasswordEntry).await;
                Ok(None)
            }
            PairingAction::StopLoading => {
                self.context.update(attempt, |s| s.loading = false).await;
                Ok(None)
            }
        }
    }

    async fn ensure_current(&self, attempt: AttemptToken) -> Result<(), PairingError> {
        if self.context.is_current(attempt).await {
            Ok(())
        } else {
            Err(PairingError::StaleAttempt(attempt))
        }
    }

    fn timer(&self, kind: TimerKind) -> &Arc<dyn CountdownPort> {
        match kind {
            TimerKind::PairingQr => &self.qr_timer,
            TimerKind::PasswordEntry => &self.password_timer,
        }
    }

    /// Both countdowns restart at their ceilings on every issued QR.
    async fn restart_timers(&self) {
        for kind in [TimerKind::PairingQr, TimerKind::PasswordEntry] {
            let ceiling_secs = self.config.ceiling_secs(kind);
            if let Err(err) = self.timer(kind).start(ceiling_secs).await {
                warn!(error = %err, timer = ?kind, "failed to start countdown");
            }
        }
    }

    async fn stop_timer(&self, kind: TimerKind) {
        if let Err(err) = self.timer(kind).stop().await {
            warn!(error = %err, timer = ?kind, "failed to stop countdown");
        }
    }

    fn compose_view(&self, snapshot: PairingSnapshot) -> PairingView {
        let qr_countdown = self.qr_timer.snapshot();
        let qr_ready = !snapshot.qr.is_placeholder();
        // A scanned code is spent once the attempt ends without success.
        let qr_spent = qr_ready && snapshot.phase.needs_retry();
        let qr_expired = qr_spent || (qr_ready && qr_countdown.is_expired());

        PairingView {
            attempt: snapshot.attempt,
            phase: snapshot.phase,
            qr: snapshot.qr,
            qr_seconds_left: match (qr_ready, qr_expired) {
                (false, _) => self.config.qr_ttl_secs,
                (true, true) => 0,
                (true, false) => qr_countdown.remaining_secs(),
            },
            qr_expired,
            password_seconds_left: self.password_timer.remaining_secs(),
            loading: snapshot.loading,
            password_prompt_visible: snapshot.password_prompt_visible,
        }
    }

    async fn emit(&self, attempt: AttemptToken) {
        let snapshot = self.context.snapshot().await;
        if snapshot.attempt != attempt {
            return;
        }
        self.events
            .emit_pairing_changed(self.compose_view(snapshot))
            .await;
    }
}
