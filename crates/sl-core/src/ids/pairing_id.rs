use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Length of a generated pairing identifier.
pub const PAIRING_ID_LEN: usize = 19;

/// Pairing attempt identifier shared with the remote device through the QR code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairingId(String);

impl_id!(PairingId);

impl PairingId {
    /// Generate a random alphanumeric identifier.
    pub fn random() -> Self {
        Self(Alphanumeric.sample_string(&mut rand::rng(), PAIRING_ID_LEN))
    }
}
