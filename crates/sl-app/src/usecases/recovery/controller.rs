//! Recovery session controller.
//!
//! Consumes a confirmed session that carries backup data, collects the
//! backup password within the password entry window, and finalizes the
//! recovery against the previously known identity.

use std::sync::Arc;

use tracing::{debug, error, info, info_span, Instrument};

use sl_core::ids::AttemptToken;
use sl_core::navigation::PairingFlow;
use sl_core::ports::{CountdownPort, OldIdentityPort, PairingEstablisherPort, PasswordPromptPort};
use sl_core::recovery::{Identity, RecoveryOutcome};
use sl_core::security::SecretString;
use sl_core::wallet::WalletStatus;

use crate::usecases::pairing::{PairingContext, PairingError, RecoveryHandoff};
use crate::usecases::wallet::ApplyWalletStatus;

/// How a recovery run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryStep {
    /// The status register now reads `BackedUp` or `Mismatched`.
    Finalized(RecoveryOutcome),
    /// The password entry window closed first; nothing was attempted.
    PasswordExpired,
    /// The user left the prompt.
    PromptCancelled,
}

enum PromptAnswer {
    Expired,
    Answered(Option<SecretString>),
}

/// Helper for constructing the controller with explicit dependency fields.
pub struct RecoveryControllerDeps {
    pub establisher: Arc<dyn PairingEstablisherPort>,
    pub apply_status: Arc<ApplyWalletStatus>,
    pub old_identity: Arc<dyn OldIdentityPort>,
    pub prompt: Arc<dyn PasswordPromptPort>,
    pub password_timer: Arc<dyn CountdownPort>,
}

pub struct RecoverySessionController {
    flow: PairingFlow,
    context: Arc<PairingContext>,
    establisher: Arc<dyn PairingEstablisherPort>,
    apply_status: Arc<ApplyWalletStatus>,
    old_identity: Arc<dyn OldIdentityPort>,
    prompt: Arc<dyn PasswordPromptPort>,
    password_timer: Arc<dyn CountdownPort>,
}

impl RecoverySessionController {
    pub fn from_deps(
        flow: PairingFlow,
        context: Arc<PairingContext>,
        deps: RecoveryControllerDeps,
    ) -> Self {
        let RecoveryControllerDeps {
            establisher,
            apply_status,
            old_identity,
            prompt,
            password_timer,
        } = deps;

        Self {
            flow,
            context,
            establisher,
            apply_status,
            old_identity,
            prompt,
            password_timer,
        }
    }

    /// Prompt for the backup password and finalize.
    ///
    /// The prompt is dropped as soon as the password timer reaches zero.
    /// Failures are returned as-is; retrying needs a fresh `start()`.
    pub async fn run(&self, handoff: RecoveryHandoff) -> Result<RecoveryStep, PairingError> {
        let attempt = handoff.attempt();
        let old_identity = match self.old_identity.get_old_identity().await {
            Ok(identity) => identity,
            Err(err) => {
                self.ensure_current(attempt).await?;
                return Err(PairingError::Storage(err));
            }
        };

        let answer = tokio::select! {
            biased;
            _ = self.password_timer.expired() => PromptAnswer::Expired,
            password = self.prompt.request_password() => PromptAnswer::Answered(password),
        };

        match answer {
            PromptAnswer::Answered(Some(password)) => self
                .finalize(handoff, old_identity.as_ref(), password)
                .await
                .map(RecoveryStep::Finalized),
            PromptAnswer::Answered(None) => {
                self.ensure_current(attempt).await?;
                info!(attempt = %attempt, "password prompt left, pairing session discarded");
                Ok(RecoveryStep::PromptCancelled)
            }
            PromptAnswer::Expired => {
                self.ensure_current(attempt).await?;
                info!(attempt = %attempt, "password entry window expired, recovery abandoned");
                Ok(RecoveryStep::PasswordExpired)
            }
        }
    }

    /// Complete the recovery and write the status register.
    ///
    /// The handoff is consumed: a session that failed here cannot be
    /// finalized again. The status write is the last step and only happens
    /// while the attempt is still current.
    pub async fn finalize(
        &self,
        handoff: RecoveryHandoff,
        old_identity: Option<&Identity>,
        password: SecretString,
    ) -> Result<RecoveryOutcome, PairingError> {
        let (attempt, session) = handoff.into_parts();
        let span = info_span!("usecase.recovery.finalize", flow = ?self.flow, attempt = %attempt);
        async move {
            self.ensure_current(attempt).await?;

            let current = match self
                .establisher
                .complete_recovery_session(&session, old_identity, &password)
                .await
            {
                Ok(identity) => identity,
                Err(err) => {
                    // A late failure of a superseded attempt is not this page's failure.
                    self.ensure_current(attempt).await?;
                    error!(error = %err, pairing_id = %session.pairing_id(), "recovery session failed");
                    return Err(err.into());
                }
            };
            drop(session);

            let outcome = RecoveryOutcome::classify(self.flow, old_identity, current);
            let status = if outcome.is_mismatch() {
                WalletStatus::Mismatched
            } else {
                WalletStatus::BackedUp
            };

            let _current = self
                .context
                .lock_current(attempt)
                .await
                .ok_or(PairingError::StaleAttempt(attempt))?;
            self.apply_status.execute(status).await?;

            info!(
                identity = %outcome.identity(),
                mismatch = outcome.is_mismatch(),
                "recovery finalized"
            );
            Ok(outcome)
        }
        .instrument(span)
        .await
    }

    async fn ensure_current(&self, attempt: AttemptToken) -> Result<(), PairingError> {
        if self.context.is_current(attempt).await {
            return Ok(());
        }
        debug!(attempt = %attempt, "recovery continuation superseded");
        Err(PairingError::StaleAttempt(attempt))
    }
}
