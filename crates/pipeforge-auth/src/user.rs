//! Local user records and provisioning

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// A local user record, keyed by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique username
    pub name: String,
    /// Display name; equals the name when the plugin supplied none
    pub display_name: String,
    /// Email address (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Create a user record without an email
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            email: None,
        }
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Ensures a local record exists for an authenticated identity
#[async_trait]
pub trait UserProvisioner: Send + Sync {
    /// Insert `user` unless a record with the same name already exists.
    ///
    /// Repeat calls with the same identity must neither create duplicates nor
    /// error; concurrent calls for the same name must resolve to one record.
    async fn add_user_if_absent(&self, user: &User) -> Result<(), AuthError>;
}
