//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Bearer credential configuration.
///
/// Token acquisition and refresh happen outside FileNest; the client only
/// attaches whatever token it is given.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token sent as `Authorization: Bearer <token>`.
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
