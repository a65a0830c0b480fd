//! Internal authorities granted to authenticated users

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AuthError;

/// An internal permission grant, independent of plugin role names
///
/// Spelled in the `ROLE_*` convention. How an authority maps to concrete
/// permissions is decided by the surrounding framework, not this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    /// Wrap an authority string
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The baseline authority every authenticated user holds
    pub fn user() -> Self {
        Self("ROLE_USER".to_string())
    }

    /// Authority derived from a plugin-granted role name
    pub fn from_role(role: &str) -> Self {
        Self(format!("ROLE_{}", role.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a username to the internal authorities it currently holds
///
/// Implementations that read live role state observe the role set synced
/// earlier in the same authentication call; providers query the resolver
/// strictly after role synchronization.
#[async_trait]
pub trait AuthorityResolver: Send + Sync {
    /// The authorities currently held by `username`
    async fn authorities(&self, username: &str) -> Result<Vec<Authority>, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_role_uppercases() {
        assert_eq!(Authority::from_role("admin").as_str(), "ROLE_ADMIN");
        assert_eq!(Authority::from_role("Admin").as_str(), "ROLE_ADMIN");
    }

    #[test]
    fn test_baseline_user_authority() {
        assert_eq!(Authority::user().as_str(), "ROLE_USER");
        assert_eq!(Authority::user().to_string(), "ROLE_USER");
    }
}
