//! Security configuration and plugin scoping
//!
//! The global security configuration declares which authorization plugins are
//! deployed (auth configs) and which roles each plugin defines (role configs).
//! Providers read one snapshot per authentication call and filter it down to
//! the entries owned by a single plugin.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::AuthError;

/// A string compared, ordered, and hashed without regard to ASCII case.
///
/// Role names are case-insensitive identities. The original spelling is kept
/// for display and serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseInsensitiveString(String);

impl CaseInsensitiveString {
    /// Wrap a string, keeping its spelling
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The original spelling
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for CaseInsensitiveString {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for CaseInsensitiveString {}

impl Hash for CaseInsensitiveString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl PartialOrd for CaseInsensitiveString {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CaseInsensitiveString {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .bytes()
            .map(|b| b.to_ascii_lowercase())
            .cmp(other.0.bytes().map(|b| b.to_ascii_lowercase()))
    }
}

impl fmt::Display for CaseInsensitiveString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CaseInsensitiveString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CaseInsensitiveString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A named configuration instance for one plugin deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Configuration instance id (e.g., "github")
    pub id: String,
    /// Owning plugin identifier (e.g., "github.oauth")
    pub plugin_id: String,
    /// Plugin-defined settings, opaque to this crate
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl AuthConfig {
    /// Create an auth config with no properties
    pub fn new(id: impl Into<String>, plugin_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            plugin_id: plugin_id.into(),
            properties: HashMap::new(),
        }
    }

    /// Add a plugin-defined property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A role defined by, and scoped to, one plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Role name, a case-insensitive identity
    pub name: CaseInsensitiveString,
    /// Owning plugin identifier
    pub plugin_id: String,
    /// Plugin-defined matching rules, opaque to this crate
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl RoleConfig {
    /// Create a role config with no properties
    pub fn new(name: impl Into<CaseInsensitiveString>, plugin_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugin_id: plugin_id.into(),
            properties: HashMap::new(),
        }
    }

    /// Add a plugin-defined property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A snapshot of the global security configuration
///
/// Entry order is the stored order; scoping preserves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub auth_configs: Vec<AuthConfig>,
    #[serde(default)]
    pub role_configs: Vec<RoleConfig>,
}

impl SecurityConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an auth config
    pub fn add_auth_config(&mut self, config: AuthConfig) {
        self.auth_configs.push(config);
    }

    /// Append a role config
    pub fn add_role(&mut self, role: RoleConfig) {
        self.role_configs.push(role);
    }

    /// Auth configs owned by `plugin_id`, in stored order
    pub fn auth_configs_for_plugin(&self, plugin_id: &str) -> Vec<AuthConfig> {
        self.auth_configs
            .iter()
            .filter(|c| c.plugin_id == plugin_id)
            .cloned()
            .collect()
    }

    /// Role configs owned by `plugin_id`, in stored order
    pub fn roles_for_plugin(&self, plugin_id: &str) -> Vec<RoleConfig> {
        self.role_configs
            .iter()
            .filter(|r| r.plugin_id == plugin_id)
            .cloned()
            .collect()
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Source of the current security configuration
///
/// Callers read one snapshot per authentication call and never cache it
/// across calls.
#[async_trait]
pub trait SecurityConfigStore: Send + Sync {
    /// The current configuration snapshot
    async fn security_config(&self) -> Result<SecurityConfig, AuthError>;
}
