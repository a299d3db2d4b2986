use std::sync::Arc;

use tracing::{error, info, info_span, Instrument};

use sl_core::navigation::PairingFlow;
use sl_core::pairing::{PairingEvent, PairingView};

use super::SessionOutcome;
use crate::usecases::pairing::{PairingError, PairingSessionController, PairingStep, RecoveryHandoff};
use crate::usecases::recovery::{RecoverySessionController, RecoveryStep};

/// Runs one pairing attempt end to end and reduces it to a single tagged
/// outcome.
///
/// Calling `resolve_session()` again while a previous call is pending is
/// the retry path: the older call resolves to [`SessionOutcome::Superseded`].
pub struct SessionResolver {
    flow: PairingFlow,
    pairing: Arc<PairingSessionController>,
    recovery: Arc<RecoverySessionController>,
}

impl SessionResolver {
    pub fn new(
        pairing: Arc<PairingSessionController>,
        recovery: Arc<RecoverySessionController>,
    ) -> Self {
        Self {
            flow: pairing.flow(),
            pairing,
            recovery,
        }
    }

    pub fn flow(&self) -> PairingFlow {
        self.flow
    }

    pub async fn view(&self) -> PairingView {
        self.pairing.view().await
    }

    pub async fn resolve_session(&self) -> SessionOutcome {
        let span = info_span!("usecase.session.resolve", flow = ?self.flow);
        async {
            let outcome = match self.pairing.start().await {
                Ok(PairingStep::FreshPaired) => SessionOutcome::FreshPaired,
                Ok(PairingStep::Superseded) => SessionOutcome::Superseded,
                Ok(PairingStep::Handoff(handoff)) => self.recover(handoff).await,
                Err(err) => self.failed(err),
            };
            info!(navigation = ?outcome.navigation(), failed = outcome.is_failure(), "pairing session resolved");
            outcome
        }
        .instrument(span)
        .await
    }

    async fn recover(&self, handoff: RecoveryHandoff) -> SessionOutcome {
        let attempt = handoff.attempt();
        match self.recovery.run(handoff).await {
            Ok(RecoveryStep::Finalized(outcome)) => {
                self.pairing
                    .settle(attempt, PairingEvent::RecoverySucceeded)
                    .await;
                outcome.into()
            }
            Ok(RecoveryStep::PasswordExpired) => {
                self.pairing
                    .settle(attempt, PairingEvent::PasswordExpired)
                    .await;
                SessionOutcome::PasswordExpired
            }
            Ok(RecoveryStep::PromptCancelled) => {
                self.pairing
                    .settle(attempt, PairingEvent::PromptCancelled)
                    .await;
                SessionOutcome::PromptCancelled
            }
            Err(err) if err.is_stale() => SessionOutcome::Superseded,
            Err(err) => {
                error!(error = %err, attempt = %attempt, "recovery attempt failed");
                self.pairing
                    .settle(
                        attempt,
                        PairingEvent::Failed {
                            reason: err.failure(),
                        },
                    )
                    .await;
                self.failed(err)
            }
        }
    }

    fn failed(&self, error: PairingError) -> SessionOutcome {
        SessionOutcome::Failed {
            fallback: self.flow.failure_fallback(),
            error,
        }
    }
}
