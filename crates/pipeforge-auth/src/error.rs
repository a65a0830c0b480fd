//! Authentication error types

use thiserror::Error;

/// Errors raised by the authentication bridge and its collaborators
#[derive(Debug, Error)]
pub enum AuthError {
    /// A plugin-credential token arrived without any credentials.
    ///
    /// This is a malformed upstream request, not a refused login. The message
    /// is stable; the web layer renders it as a bad-request response.
    #[error("No pre-authenticated credentials found in request.")]
    MissingCredentials,

    #[error("security config store error: {0}")]
    ConfigStore(String),

    #[error("plugin unavailable: {0}")]
    PluginUnavailable(String),

    #[error("user store error: {0}")]
    UserStore(String),

    #[error("role store error: {0}")]
    RoleStore(String),

    #[error("authority resolution failed: {0}")]
    AuthorityResolution(String),

    #[error("internal error: {0}")]
    Internal(String),
}
