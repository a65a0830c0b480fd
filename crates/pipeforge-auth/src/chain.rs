//! Provider chains
//!
//! A login deployment usually runs several authentication providers side by
//! side (plugin delegation, password file, ...). The chain offers each token
//! to the providers in order; the first one that recognizes the token decides
//! the outcome.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::AuthError;
use crate::provider::{AuthOutcome, AuthenticationProvider};
use crate::token::IncomingToken;

/// Ordered chain of authentication providers (first claimant wins)
///
/// `NotApplicable` falls through to the next provider. `Rejected` ends the
/// chain: the token belonged to that provider and its credentials failed, so
/// later providers must not get a second try.
pub struct AuthenticationProviderChain {
    providers: Vec<Arc<dyn AuthenticationProvider>>,
}

impl AuthenticationProviderChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Append a provider to the chain
    pub fn add<P: AuthenticationProvider + 'static>(&mut self, provider: P) -> &mut Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Append a provider wrapped in Arc
    pub fn add_arc(&mut self, provider: Arc<dyn AuthenticationProvider>) -> &mut Self {
        self.providers.push(provider);
        self
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Get the number of providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Offer the token to each provider in order
    pub async fn authenticate(&self, token: &IncomingToken) -> Result<AuthOutcome, AuthError> {
        for provider in &self.providers {
            match provider.authenticate(token).await? {
                AuthOutcome::NotApplicable => {
                    tracing::debug!("provider {} did not recognize the token", provider.name());
                }
                outcome => {
                    tracing::debug!("token claimed by provider {}", provider.name());
                    return Ok(outcome);
                }
            }
        }

        Ok(AuthOutcome::NotApplicable)
    }
}

impl Default for AuthenticationProviderChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthenticationProvider for AuthenticationProviderChain {
    fn name(&self) -> &str {
        "chain"
    }

    async fn authenticate(&self, token: &IncomingToken) -> Result<AuthOutcome, AuthError> {
        AuthenticationProviderChain::authenticate(self, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    use crate::authority::Authority;
    use crate::token::{AuthenticatedToken, Principal, UsernamePasswordCredentials};

    enum StubBehavior {
        NotApplicable,
        Rejected,
        Authenticated,
    }

    struct StubProvider {
        name: &'static str,
        behavior: StubBehavior,
        calls: Mutex<usize>,
    }

    impl StubProvider {
        fn new(name: &'static str, behavior: StubBehavior) -> Arc<Self> {
            Arc::new(Self {
                name,
                behavior,
                calls: Mutex::new(0),
            })
        }

        fn call_count(&self) -> usize {
            *self.calls.lock()
        }

        fn token(&self) -> AuthenticatedToken {
            let principal = Principal {
                username: "alice".to_string(),
                display_name: "Alice".to_string(),
                authorities: vec![Authority::user()],
            };
            AuthenticatedToken::new(
                principal,
                HashMap::new(),
                "stub.plugin".to_string(),
                vec![Authority::user()],
            )
        }
    }

    #[async_trait]
    impl AuthenticationProvider for StubProvider {
        fn name(&self) -> &str {
            self.name
        }

        async fn authenticate(&self, _token: &IncomingToken) -> Result<AuthOutcome, AuthError> {
            *self.calls.lock() += 1;
            Ok(match self.behavior {
                StubBehavior::NotApplicable => AuthOutcome::NotApplicable,
                StubBehavior::Rejected => AuthOutcome::Rejected,
                StubBehavior::Authenticated => AuthOutcome::Authenticated(self.token()),
            })
        }
    }

    fn some_token() -> IncomingToken {
        IncomingToken::UsernamePassword(UsernamePasswordCredentials::new("bob", "hunter2"))
    }

    #[tokio::test]
    async fn test_empty_chain_is_not_applicable() {
        let chain = AuthenticationProviderChain::new();
        assert!(chain.is_empty());

        let outcome = chain.authenticate(&some_token()).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::NotApplicable));
    }

    #[tokio::test]
    async fn test_first_claimant_wins() {
        let skipped = StubProvider::new("skipped", StubBehavior::NotApplicable);
        let claimant = StubProvider::new("claimant", StubBehavior::Authenticated);
        let unreached = StubProvider::new("unreached", StubBehavior::Authenticated);

        let mut chain = AuthenticationProviderChain::new();
        chain
            .add_arc(skipped.clone())
            .add_arc(claimant.clone())
            .add_arc(unreached.clone());
        assert_eq!(chain.len(), 3);

        let outcome = chain.authenticate(&some_token()).await.unwrap();

        assert!(outcome.is_authenticated());
        assert_eq!(skipped.call_count(), 1);
        assert_eq!(claimant.call_count(), 1);
        assert_eq!(unreached.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejection_stops_the_chain() {
        let rejecting = StubProvider::new("rejecting", StubBehavior::Rejected);
        let unreached = StubProvider::new("unreached", StubBehavior::Authenticated);

        let mut chain = AuthenticationProviderChain::new();
        chain.add_arc(rejecting.clone()).add_arc(unreached.clone());

        let outcome = chain.authenticate(&some_token()).await.unwrap();

        assert!(matches!(outcome, AuthOutcome::Rejected));
        assert_eq!(unreached.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unclaimed_token_is_not_applicable() {
        let first = StubProvider::new("first", StubBehavior::NotApplicable);
        let second = StubProvider::new("second", StubBehavior::NotApplicable);

        let mut chain = AuthenticationProviderChain::new();
        chain.add_arc(first.clone()).add_arc(second.clone());

        let outcome = chain.authenticate(&some_token()).await.unwrap();

        assert!(matches!(outcome, AuthOutcome::NotApplicable));
        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 1);
    }
}
