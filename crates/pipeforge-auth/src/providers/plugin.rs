//! Plugin-delegating authentication provider
//!
//! Delegates the credential check to the authorization plugin named in the
//! token, then reconciles the authenticated identity into local user and
//! role records before issuing the authenticated token.

use async_trait::async_trait;
use std::sync::Arc;

use crate::authority::AuthorityResolver;
use crate::config::{CaseInsensitiveString, SecurityConfigStore};
use crate::error::AuthError;
use crate::plugin::AuthorizationPluginClient;
use crate::provider::{AuthOutcome, AuthenticationProvider};
use crate::roles::RoleSynchronizer;
use crate::token::{AuthenticatedToken, IncomingToken, PluginCredentialToken, Principal};
use crate::user::{User, UserProvisioner};

/// Authenticates plugin-credential tokens against their authorization plugin
///
/// Stateless and reentrant; every call reads a fresh config snapshot and
/// drives the collaborators in a fixed order: provision the user, sync the
/// plugin-granted roles, then resolve authorities.
pub struct PluginAuthenticationProvider {
    config_store: Arc<dyn SecurityConfigStore>,
    plugin_client: Arc<dyn AuthorizationPluginClient>,
    user_provisioner: Arc<dyn UserProvisioner>,
    role_synchronizer: Arc<dyn RoleSynchronizer>,
    authority_resolver: Arc<dyn AuthorityResolver>,
}

impl PluginAuthenticationProvider {
    /// Wire a provider to its collaborators
    pub fn new(
        config_store: Arc<dyn SecurityConfigStore>,
        plugin_client: Arc<dyn AuthorizationPluginClient>,
        user_provisioner: Arc<dyn UserProvisioner>,
        role_synchronizer: Arc<dyn RoleSynchronizer>,
        authority_resolver: Arc<dyn AuthorityResolver>,
    ) -> Self {
        Self {
            config_store,
            plugin_client,
            user_provisioner,
            role_synchronizer,
            authority_resolver,
        }
    }

    async fn authenticate_plugin_token(
        &self,
        token: &PluginCredentialToken,
    ) -> Result<AuthOutcome, AuthError> {
        if !token.has_credentials() {
            return Err(AuthError::MissingCredentials);
        }

        let security_config = self.config_store.security_config().await?;
        let auth_configs = security_config.auth_configs_for_plugin(&token.plugin_id);
        let role_configs = security_config.roles_for_plugin(&token.plugin_id);

        tracing::debug!(
            plugin_id = %token.plugin_id,
            auth_configs = auth_configs.len(),
            role_configs = role_configs.len(),
            "delegating authentication to plugin"
        );

        let response = self
            .plugin_client
            .authenticate_user(
                &token.plugin_id,
                &token.credentials,
                &auth_configs,
                &role_configs,
            )
            .await?;

        let Some(plugin_user) = response.user else {
            tracing::warn!(plugin_id = %token.plugin_id, "plugin refused the supplied credentials");
            return Ok(AuthOutcome::Rejected);
        };

        let display_name = plugin_user
            .display_name
            .unwrap_or_else(|| plugin_user.username.clone());

        let record = User {
            name: plugin_user.username.clone(),
            display_name: display_name.clone(),
            email: plugin_user.email,
        };
        self.user_provisioner.add_user_if_absent(&record).await?;

        let roles = target_role_set(response.roles.unwrap_or_default());
        self.role_synchronizer
            .replace_roles(&token.plugin_id, &plugin_user.username, &roles)
            .await?;

        // Live-state resolvers must observe the role set just synced.
        let authorities = self
            .authority_resolver
            .authorities(&plugin_user.username)
            .await?;

        tracing::info!(
            username = %plugin_user.username,
            plugin_id = %token.plugin_id,
            "authenticated via plugin"
        );

        let principal = Principal {
            username: plugin_user.username,
            display_name,
            authorities: authorities.clone(),
        };
        Ok(AuthOutcome::Authenticated(AuthenticatedToken::new(
            principal,
            token.credentials.clone(),
            token.plugin_id.clone(),
            authorities,
        )))
    }
}

/// Normalize granted role names to case-insensitive identities, dropping
/// casing duplicates (first spelling wins)
fn target_role_set(names: Vec<String>) -> Vec<CaseInsensitiveString> {
    let mut roles: Vec<CaseInsensitiveString> = Vec::with_capacity(names.len());
    for name in names {
        let role = CaseInsensitiveString::new(name);
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    roles
}

#[async_trait]
impl AuthenticationProvider for PluginAuthenticationProvider {
    fn name(&self) -> &str {
        "plugin"
    }

    async fn authenticate(&self, token: &IncomingToken) -> Result<AuthOutcome, AuthError> {
        match token {
            IncomingToken::PluginCredentials(token) => self.authenticate_plugin_token(token).await,
            IncomingToken::UsernamePassword(_) => Ok(AuthOutcome::NotApplicable),
        }
    }
}
