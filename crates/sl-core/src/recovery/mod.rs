//! Backup recovery domain module.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::navigation::PairingFlow;

/// Externally-owned account address derived from the wallet key.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Hex addresses compare case-insensitively; checksum casing is not identity.
impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Result of a successful recovery.
///
/// A mismatch is a success outcome that needs user reconciliation, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryOutcome {
    /// Backup restored; continue toward minting.
    Recovered { identity: Identity },
    /// Repair produced an account different from the one known locally.
    Mismatched { previous: Identity, current: Identity },
}

impl RecoveryOutcome {
    /// Compare the recovered identity against the previously known one.
    ///
    /// Only a repair flow with a known previous identity can mismatch.
    pub fn classify(flow: PairingFlow, previous: Option<&Identity>, current: Identity) -> Self {
        match previous {
            Some(previous) if flow.is_repair() && *previous != current => {
                RecoveryOutcome::Mismatched {
                    previous: previous.clone(),
                    current,
                }
            }
            _ => RecoveryOutcome::Recovered { identity: current },
        }
    }

    pub fn identity(&self) -> &Identity {
        match self {
            RecoveryOutcome::Recovered { identity } => identity,
            RecoveryOutcome::Mismatched { current, .. } => current,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, RecoveryOutcome::Mismatched { .. })
    }
}
