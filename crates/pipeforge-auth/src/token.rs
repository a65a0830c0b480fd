//! Authentication tokens
//!
//! The web layer builds an [`IncomingToken`] from each login request and
//! offers it to the provider chain. Providers dispatch on the variant tag
//! only; a token from a flow a provider does not handle passes through
//! untouched.

use std::collections::HashMap;

use crate::authority::Authority;

/// Credentials collected by an upstream entry point, tagged with the
/// authorization plugin responsible for checking them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCredentialToken {
    /// Identifier of the plugin that must verify the credentials
    pub plugin_id: String,
    /// Credential bundle as extracted upstream; empty when the request
    /// carried none
    pub credentials: HashMap<String, String>,
}

impl PluginCredentialToken {
    /// Create a token for `plugin_id` carrying `credentials`
    pub fn new(plugin_id: impl Into<String>, credentials: HashMap<String, String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            credentials,
        }
    }

    /// Whether the upstream request carried any credentials
    pub fn has_credentials(&self) -> bool {
        !self.credentials.is_empty()
    }
}

/// Username/password credentials from login flows this crate does not handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernamePasswordCredentials {
    pub username: String,
    pub password: String,
}

impl UsernamePasswordCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// An unauthenticated token offered to the provider chain, discriminated by
/// origin
#[derive(Debug, Clone)]
pub enum IncomingToken {
    /// A credential bundle destined for an authorization plugin
    PluginCredentials(PluginCredentialToken),
    /// A form or basic-auth login from another flow
    UsernamePassword(UsernamePasswordCredentials),
}

/// The identity embedded in an authenticated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    /// Falls back to the username when the plugin supplied no display name
    pub display_name: String,
    pub authorities: Vec<Authority>,
}

/// A fully-populated authenticated token
///
/// Only constructed by a provider after a successful plugin check; holding a
/// value of this type means authentication succeeded.
#[derive(Debug, Clone)]
pub struct AuthenticatedToken {
    principal: Principal,
    credentials: HashMap<String, String>,
    plugin_id: String,
    authorities: Vec<Authority>,
}

impl AuthenticatedToken {
    pub(crate) fn new(
        principal: Principal,
        credentials: HashMap<String, String>,
        plugin_id: String,
        authorities: Vec<Authority>,
    ) -> Self {
        Self {
            principal,
            credentials,
            plugin_id,
            authorities,
        }
    }

    /// The authenticated identity
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// The original credential bundle, echoed unchanged
    pub fn credentials(&self) -> &HashMap<String, String> {
        &self.credentials
    }

    /// The plugin that verified the credentials
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// Internal authorities resolved for the principal
    pub fn authorities(&self) -> &[Authority] {
        &self.authorities
    }

    /// Always true for a constructed token
    pub fn is_authenticated(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_credentials() {
        let empty = PluginCredentialToken::new("github.oauth", HashMap::new());
        assert!(!empty.has_credentials());

        let mut credentials = HashMap::new();
        credentials.insert("access_token".to_string(), "some_token".to_string());
        let token = PluginCredentialToken::new("github.oauth", credentials);
        assert!(token.has_credentials());
    }

    #[test]
    fn test_authenticated_token_is_authenticated() {
        let principal = Principal {
            username: "alice".to_string(),
            display_name: "Alice".to_string(),
            authorities: vec![Authority::user()],
        };
        let token = AuthenticatedToken::new(
            principal,
            HashMap::new(),
            "github.oauth".to_string(),
            vec![Authority::user()],
        );

        assert!(token.is_authenticated());
        assert_eq!(token.plugin_id(), "github.oauth");
        assert_eq!(token.principal().username, "alice");
    }
}
