//! In-memory reference collaborators
//!
//! In production the configuration comes from the config repository and the
//! user/role records live in the server database; these implementations back
//! the same contracts with process-local state.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::authority::{Authority, AuthorityResolver};
use crate::config::{CaseInsensitiveString, SecurityConfig, SecurityConfigStore};
use crate::error::AuthError;
use crate::roles::RoleSynchronizer;
use crate::user::{User, UserProvisioner};

/// In-memory security configuration source
pub struct InMemorySecurityConfigStore {
    config: RwLock<SecurityConfig>,
}

impl InMemorySecurityConfigStore {
    /// Create a store holding `config`
    pub fn new(config: SecurityConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Replace the held configuration
    pub fn set(&self, config: SecurityConfig) {
        *self.config.write() = config;
    }
}

impl Default for InMemorySecurityConfigStore {
    fn default() -> Self {
        Self::new(SecurityConfig::default())
    }
}

#[async_trait]
impl SecurityConfigStore for InMemorySecurityConfigStore {
    async fn security_config(&self) -> Result<SecurityConfig, AuthError> {
        Ok(self.config.read().clone())
    }
}

/// In-memory user store with idempotent provisioning
pub struct InMemoryUserStore {
    /// Users indexed by name
    users: RwLock<HashMap<String, User>>,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Get a user by name
    pub fn get_user(&self, name: &str) -> Option<User> {
        self.users.read().get(name).cloned()
    }

    /// Number of stored users
    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }
}

#[async_trait]
impl UserProvisioner for InMemoryUserStore {
    async fn add_user_if_absent(&self, user: &User) -> Result<(), AuthError> {
        // First write wins; repeat upserts for the same name are no-ops.
        self.users
            .write()
            .entry(user.name.clone())
            .or_insert_with(|| user.clone());
        Ok(())
    }
}

/// In-memory plugin role assignments
pub struct InMemoryRoleStore {
    /// Role sets indexed by (plugin id, username)
    assignments: RwLock<HashMap<(String, String), Vec<CaseInsensitiveString>>>,
}

impl Default for InMemoryRoleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            assignments: RwLock::new(HashMap::new()),
        }
    }

    /// Roles currently held by `username` under `plugin_id`
    pub fn granted_roles(&self, plugin_id: &str, username: &str) -> Vec<CaseInsensitiveString> {
        self.assignments
            .read()
            .get(&(plugin_id.to_string(), username.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// All roles held by `username` across plugins, sorted and deduplicated
    pub fn roles_for_user(&self, username: &str) -> Vec<CaseInsensitiveString> {
        let assignments = self.assignments.read();
        let mut roles: Vec<CaseInsensitiveString> = assignments
            .iter()
            .filter(|((_, user), _)| user == username)
            .flat_map(|(_, roles)| roles.iter().cloned())
            .collect();
        roles.sort();
        roles.dedup();
        roles
    }
}

#[async_trait]
impl RoleSynchronizer for InMemoryRoleStore {
    async fn replace_roles(
        &self,
        plugin_id: &str,
        username: &str,
        roles: &[CaseInsensitiveString],
    ) -> Result<(), AuthError> {
        let key = (plugin_id.to_string(), username.to_string());
        let mut assignments = self.assignments.write();
        if roles.is_empty() {
            assignments.remove(&key);
        } else {
            assignments.insert(key, roles.to_vec());
        }
        Ok(())
    }
}

/// Authority resolver reading live role assignments
///
/// Grants every username `ROLE_USER` plus one `ROLE_<NAME>` authority per
/// plugin-granted role. Deployments with their own mapping policy substitute
/// their own [`AuthorityResolver`].
pub struct RoleStoreAuthorityResolver {
    role_store: Arc<InMemoryRoleStore>,
}

impl RoleStoreAuthorityResolver {
    /// Create a resolver backed by `role_store`
    pub fn new(role_store: Arc<InMemoryRoleStore>) -> Self {
        Self { role_store }
    }
}

#[async_trait]
impl AuthorityResolver for RoleStoreAuthorityResolver {
    async fn authorities(&self, username: &str) -> Result<Vec<Authority>, AuthError> {
        let mut authorities = vec![Authority::user()];
        for role in self.role_store.roles_for_user(username) {
            authorities.push(Authority::from_role(role.as_str()));
        }
        Ok(authorities)
    }
}
