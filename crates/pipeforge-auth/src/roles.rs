//! Plugin-granted role synchronization

use async_trait::async_trait;

use crate::config::CaseInsensitiveString;
use crate::error::AuthError;

/// Reconciles the plugin-granted role memberships of one user
#[async_trait]
pub trait RoleSynchronizer: Send + Sync {
    /// Replace the role set held by `username` under `plugin_id` with
    /// `roles`, in one logical operation.
    ///
    /// This is a full replace, not an additive grant: roles missing from the
    /// target set are revoked, newly present ones are granted. Last write
    /// wins under concurrent calls for the same user.
    async fn replace_roles(
        &self,
        plugin_id: &str,
        username: &str,
        roles: &[CaseInsensitiveString],
    ) -> Result<(), AuthError>;
}
