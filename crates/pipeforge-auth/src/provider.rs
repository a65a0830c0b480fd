//! Authentication provider trait and outcomes

use async_trait::async_trait;

use crate::error::AuthError;
use crate::token::{AuthenticatedToken, IncomingToken};

/// Outcome of offering a token to a provider
///
/// The three cases are distinct on purpose: a chain reads `NotApplicable` as
/// "try the next provider", while `Rejected` means this provider owned the
/// token and the credentials were refused.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// The token is not of a shape this provider handles; nothing happened
    NotApplicable,
    /// The provider owned the token and the credentials were refused
    Rejected,
    /// Authentication succeeded
    Authenticated(AuthenticatedToken),
}

impl AuthOutcome {
    /// Whether authentication succeeded
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The authenticated token, if any
    pub fn token(&self) -> Option<&AuthenticatedToken> {
        match self {
            Self::Authenticated(token) => Some(token),
            Self::NotApplicable | Self::Rejected => None,
        }
    }

    /// Consume the outcome, yielding the token on success
    pub fn into_token(self) -> Option<AuthenticatedToken> {
        match self {
            Self::Authenticated(token) => Some(token),
            Self::NotApplicable | Self::Rejected => None,
        }
    }
}

/// Trait for authentication providers
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Authenticate the token, or declare it not applicable.
    ///
    /// Errors are reserved for malformed requests and collaborator failures;
    /// refused credentials are the `Rejected` outcome, not an error.
    async fn authenticate(&self, token: &IncomingToken) -> Result<AuthOutcome, AuthError>;
}
