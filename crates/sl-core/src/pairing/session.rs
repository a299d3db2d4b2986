use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::PairingId;

/// Sentinel shown while no QR payload has been issued yet.
pub const QR_PLACEHOLDER: &str = "placeholder";

/// Raw QR payload string, opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload(String);

impl QrPayload {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    /// Payload rendered as a loading indicator instead of a code.
    pub fn placeholder() -> Self {
        Self(QR_PLACEHOLDER.to_string())
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == QR_PLACEHOLDER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Password-protected backup blob carried by a confirmed session.
#[derive(Clone, PartialEq, Eq)]
pub struct BackupData(String);

impl BackupData {
    pub fn new(blob: impl Into<String>) -> Self {
        Self(blob.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BackupData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BackupData({} bytes)", self.0.len())
    }
}

/// One confirmed pairing attempt.
///
/// Not `Clone`: a session is moved into the recovery path and dropped there,
/// so a session consumed by a failed recovery can never be replayed.
#[derive(Debug, PartialEq, Eq)]
pub struct PairingSession {
    pairing_id: PairingId,
    qr_payload: QrPayload,
    backup_data: Option<BackupData>,
}

impl PairingSession {
    pub fn new(
        pairing_id: PairingId,
        qr_payload: QrPayload,
        backup_data: Option<BackupData>,
    ) -> Self {
        Self {
            pairing_id,
            qr_payload,
            backup_data,
        }
    }

    pub fn pairing_id(&self) -> &PairingId {
        &self.pairing_id
    }

    pub fn qr_payload(&self) -> &QrPayload {
        &self.qr_payload
    }

    pub fn backup_data(&self) -> Option<&BackupData> {
        self.backup_data.as_ref()
    }

    pub fn has_backup(&self) -> bool {
        self.backup_data.is_some()
    }
}
