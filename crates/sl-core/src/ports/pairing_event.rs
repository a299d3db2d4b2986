use crate::pairing::PairingView;

#[async_trait::async_trait]
pub trait PairingEventPort: Send + Sync {
    /// Publish the display state of the newest pairing attempt.
    async fn emit_pairing_changed(&self, view: PairingView);
}
