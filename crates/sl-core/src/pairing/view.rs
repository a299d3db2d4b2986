use serde::{Deserialize, Serialize};

use super::{PairingPhase, QrPayload};
use crate::ids::AttemptToken;

/// Display state of the newest pairing attempt, as pushed to the caller.
///
/// While `qr` is the placeholder the caller shows a loading indicator
/// instead of a scannable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingView {
    pub attempt: AttemptToken,
    pub phase: PairingPhase,
    pub qr: QrPayload,
    pub qr_seconds_left: u32,
    /// QR validity ran out; the pending confirmation wait is left untouched.
    pub qr_expired: bool,
    pub password_seconds_left: u32,
    pub loading: bool,
    pub password_prompt_visible: bool,
}

impl PairingView {
    /// View shown before the first `start()`.
    pub fn idle(qr_ttl_secs: u32, password_ttl_secs: u32) -> Self {
        Self {
            attempt: AttemptToken::INITIAL,
            phase: PairingPhase::Idle,
            qr: QrPayload::placeholder(),
            qr_seconds_left: qr_ttl_secs,
            qr_expired: false,
            password_seconds_left: password_ttl_secs,
            loading: false,
            password_prompt_visible: false,
        }
    }

    pub fn qr_ready(&self) -> bool {
        !self.qr.is_placeholder()
    }
}
