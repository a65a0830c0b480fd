//! Authorization plugin call contract
//!
//! Plugins are external identity-verification modules reached through a fixed
//! request/response contract. The transport, wire encoding, and timeout
//! policy all live behind [`AuthorizationPluginClient`]; this crate only
//! interprets the structured response.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::{AuthConfig, RoleConfig};
use crate::error::AuthError;

/// Identity resolved by a plugin from a credential bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginUser {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl PluginUser {
    /// Create a plugin user with only a username
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: None,
            email: None,
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Structured response from a plugin authentication call
///
/// An absent `user` means the plugin refused the credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginAuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PluginUser>,
    /// Role names granted by the plugin; `None` is read as no roles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl PluginAuthResponse {
    /// A successful response carrying the resolved user and granted roles
    pub fn authenticated(user: PluginUser, roles: Vec<String>) -> Self {
        Self {
            user: Some(user),
            roles: Some(roles),
        }
    }

    /// A response signalling refused credentials
    pub fn rejected() -> Self {
        Self::default()
    }
}

/// Invokes the named plugin's authentication entry point
///
/// The plugin is the sole authority on whether a credential bundle is valid.
/// Implementations receive the configs and roles already scoped to the
/// plugin being called.
#[async_trait]
pub trait AuthorizationPluginClient: Send + Sync {
    /// Ask `plugin_id` to verify `credentials`
    async fn authenticate_user(
        &self,
        plugin_id: &str,
        credentials: &HashMap<String, String>,
        auth_configs: &[AuthConfig],
        role_configs: &[RoleConfig],
    ) -> Result<PluginAuthResponse, AuthError>;
}
