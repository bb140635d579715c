//! Administrative credential - the entire trust model for admin access.

/// Process-wide shared secret, set at startup and never rotated at
/// runtime. There are no per-admin identities, sessions, or revocation;
/// the credential is an explicit value carried through app state so the
/// equality check stays testable in isolation.
#[derive(Clone)]
pub struct AdminCredential {
    token: String,
}

impl AdminCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Strict equality against the configured secret.
    pub fn matches(&self, presented: &str) -> bool {
        self.token == presented
    }

    /// The session value handed back by a successful verify call. It is
    /// the secret itself; clients replay it on subsequent requests.
    pub fn session_token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for AdminCredential {
    // keep the secret out of debug output
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential").finish_non_exhaustive()
    }
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing admin token")]
    MissingToken,

    #[error("Invalid admin token")]
    InvalidToken,
}
