// Binmarks identity provider
// The core never authenticates; it only needs a stable per-user identity string.

use crate::types::errors::IdentityError;

/// Environment variable overriding the configured user.
pub const USER_ENV_VAR: &str = "BINMARKS_USER";

/// Source of the current user's identity.
pub trait IdentityProvider {
    /// The signed-in user, or `None` when nobody is signed in.
    fn current_user(&self) -> Option<&str>;

    /// Like [`IdentityProvider::current_user`], but an error when nobody is signed in.
    fn require_user(&self) -> Result<&str, IdentityError> {
        self.current_user().ok_or(IdentityError::NotSignedIn)
    }
}

/// Identity fixed at startup (settings or environment).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<String>,
}

impl StaticIdentity {
    /// Accepts an identity if it is non-blank and free of surrounding whitespace.
    pub fn new(user: Option<String>) -> Result<Self, IdentityError> {
        match user {
            Some(u) if u.trim().is_empty() || u.trim() != u => Err(IdentityError::Invalid(u)),
            user => Ok(Self { user }),
        }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// `BINMARKS_USER` if set, else `configured`.
    pub fn from_env_or(configured: Option<String>) -> Result<Self, IdentityError> {
        let user = std::env::var(USER_ENV_VAR).ok().or(configured);
        Self::new(user)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}
