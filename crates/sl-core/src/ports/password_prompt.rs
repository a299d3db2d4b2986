use async_trait::async_trait;

use crate::security::SecretString;

/// Password entry delegated to the caller's UI.
#[async_trait]
pub trait PasswordPromptPort: Send + Sync {
    /// Resolve with the submitted password, or `None` when the user
    /// navigated back from the prompt.
    ///
    /// The future is dropped when the password entry window expires.
    async fn request_password(&self) -> Option<SecretString>;
}
