//! Pairing session state machine.
//!
//! Pure transition function `(phase, event) -> (phase, actions)` for one
//! pairing attempt. The orchestrator in `sl-app` feeds it establisher,
//! user and timer events and executes the returned actions.
//!
//! ```text
//! Idle ─Start─▶ AwaitingScan ─SessionConfirmed─┬─▶ FreshPairingKeygen ─StatusPersisted─▶ Done
//!                    │                           └─▶ HandoffToRecovery ─RecoverySucceeded─▶ Done
//!                    └─Failed─▶ Failed                     ├─PasswordExpired─▶ Expired
//!                                                          └─PromptCancelled─▶ Idle
//! ```
//!
//! The status register is always written before `Done` is entered: the
//! fresh path writes through `PersistStatus` and waits for
//! `StatusPersisted`, the recovery controller writes in `finalize` and only
//! then reports `RecoverySucceeded`.

use serde::{Deserialize, Serialize};

use crate::wallet::WalletStatus;

/// Phase of the current pairing attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingPhase {
    /// No attempt in flight.
    Idle,
    /// QR requested or displayed, waiting for the remote device.
    AwaitingScan,
    /// Confirmed session without backup; key generation running.
    FreshPairingKeygen,
    /// Confirmed session with backup; recovery owns the attempt.
    HandoffToRecovery,
    /// Attempt finished and the status register was written.
    Done,
    /// Attempt failed; the caller retries with a new `start()`.
    Failed { reason: PairingFailure },
    /// Password entry window closed before a password was submitted.
    Expired,
}

impl PairingPhase {
    /// Phases in which the attempt still waits on a collaborator or the user.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            PairingPhase::AwaitingScan
                | PairingPhase::FreshPairingKeygen
                | PairingPhase::HandoffToRecovery
        )
    }

    /// Phases that end an attempt without success; only a new `start()`
    /// moves on from here.
    pub fn needs_retry(&self) -> bool {
        matches!(
            self,
            PairingPhase::Idle | PairingPhase::Expired | PairingPhase::Failed { .. }
        )
    }
}

/// Auditable failure reason stored in [`PairingPhase::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingFailure {
    /// QR issuance or session confirmation failed.
    Establisher(String),
    /// Fresh key generation failed.
    Keygen(String),
    /// Backup recovery failed (wrong password, corrupt backup, rejection).
    Recovery(String),
    /// Local status or identity storage failed.
    Storage(String),
}

/// Events that drive a pairing attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingEvent {
    /// Caller invoked `start()`.
    Start,
    /// Establisher produced a QR payload.
    QrIssued,
    /// Remote device completed its half of pairing.
    SessionConfirmed { has_backup: bool },
    /// Fresh pairing and key generation completed.
    KeygenSucceeded,
    /// The status register write requested by `PersistStatus` succeeded.
    StatusPersisted,
    /// Recovery finalized and wrote the status register.
    RecoverySucceeded,
    /// Password entry timer reached zero while the prompt was open.
    PasswordExpired,
    /// User left the password prompt.
    PromptCancelled,
    /// A collaborator or the local store failed.
    Failed { reason: PairingFailure },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingAction {
    /// Request a QR payload and restart both countdowns.
    IssueQr,
    /// Wait for the establisher's confirmation.
    AwaitConfirmation,
    /// QR was scanned: show the loading indicator.
    MarkScanned,
    /// Complete fresh pairing and run key generation.
    CompleteFreshPairing,
    /// Write the wallet status register.
    PersistStatus(WalletStatus),
    ShowPasswordPrompt,
    HidePasswordPrompt,
    StopLoading,
}

/// Pure pairing state machine.
pub struct PairingStateMachine;

impl PairingStateMachine {
    pub fn transition(
        phase: PairingPhase,
        event: PairingEvent,
    ) -> (PairingPhase, Vec<PairingAction>) {
        match (phase, event) {
            // A new start supersedes whatever the previous attempt was doing.
            (_, PairingEvent::Start) => (PairingPhase::AwaitingScan, vec![PairingAction::IssueQr]),
            (PairingPhase::AwaitingScan, PairingEvent::QrIssued) => (
                PairingPhase::AwaitingScan,
                vec![PairingAction::AwaitConfirmation],
            ),
            (PairingPhase::AwaitingScan, PairingEvent::SessionConfirmed { has_backup: false }) => (
                PairingPhase::FreshPairingKeygen,
                vec![
                    PairingAction::MarkScanned,
                    PairingAction::CompleteFreshPairing,
                ],
            ),
            (PairingPhase::AwaitingScan, PairingEvent::SessionConfirmed { has_backup: true }) => (
                PairingPhase::HandoffToRecovery,
                vec![
                    PairingAction::MarkScanned,
                    PairingAction::ShowPasswordPrompt,
                ],
            ),
            // Done only follows a successful status write.
            (PairingPhase::FreshPairingKeygen, PairingEvent::KeygenSucceeded) => (
                PairingPhase::FreshPairingKeygen,
                vec![PairingAction::PersistStatus(WalletStatus::Paired)],
            ),
            (PairingPhase::FreshPairingKeygen, PairingEvent::StatusPersisted) => {
                (PairingPhase::Done, vec![PairingAction::StopLoading])
            }
            (PairingPhase::HandoffToRecovery, PairingEvent::RecoverySucceeded) => (
                PairingPhase::Done,
                vec![
                    PairingAction::HidePasswordPrompt,
                    PairingAction::StopLoading,
                ],
            ),
            (PairingPhase::HandoffToRecovery, PairingEvent::PasswordExpired) => (
                PairingPhase::Expired,
                vec![
                    PairingAction::HidePasswordPrompt,
                    PairingAction::StopLoading,
                ],
            ),
            (PairingPhase::HandoffToRecovery, PairingEvent::PromptCancelled) => (
                PairingPhase::Idle,
                vec![
                    PairingAction::HidePasswordPrompt,
                    PairingAction::StopLoading,
                ],
            ),
            (phase, PairingEvent::Failed { reason }) if phase.is_in_flight() => (
                PairingPhase::Failed { reason },
                vec![
                    PairingAction::HidePasswordPrompt,
                    PairingAction::StopLoading,
                ],
            ),
            (phase, _event) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(phase = ?phase, event = ?_event, "pairing event ignored");
                (phase, Vec::new())
            }
        }
    }
}
