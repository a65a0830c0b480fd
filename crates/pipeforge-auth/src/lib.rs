//! Pipeforge Authentication
//!
//! This crate provides:
//! - Plugin-delegating authentication: credential bundles tagged with an
//!   authorization plugin are verified by that plugin, and the resulting
//!   identity is reconciled into local user and role records
//! - Provider chaining for deployments that run several login flows
//! - Security-config scoping per authorization plugin
//! - Contracts for user provisioning, role synchronization, and authority
//!   resolution, with in-memory reference implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use pipeforge_auth::{
//!     AuthenticationProvider, AuthenticationProviderChain, PluginAuthenticationProvider,
//! };
//! use std::sync::Arc;
//!
//! // Wire the plugin provider to its collaborators and put it in a chain
//! let provider = PluginAuthenticationProvider::new(
//!     config_store, plugin_client, user_store, role_store, authority_resolver,
//! );
//! let mut chain = AuthenticationProviderChain::new();
//! chain.add(provider);
//!
//! // Authenticate tokens built by the web layer
//! // let outcome = chain.authenticate(&token).await?;
//! ```

// Core modules (always available)
pub mod authority;
pub mod config;
pub mod error;
pub mod plugin;
pub mod roles;
pub mod store;
pub mod token;
pub mod user;

// Provider modules
pub mod chain;
pub mod provider;
pub mod providers;

// Re-export core types
pub use authority::{Authority, AuthorityResolver};
pub use config::{
    AuthConfig, CaseInsensitiveString, RoleConfig, SecurityConfig, SecurityConfigStore,
};
pub use error::AuthError;
pub use plugin::{AuthorizationPluginClient, PluginAuthResponse, PluginUser};
pub use roles::RoleSynchronizer;
pub use store::{
    InMemoryRoleStore, InMemorySecurityConfigStore, InMemoryUserStore, RoleStoreAuthorityResolver,
};
pub use token::{
    AuthenticatedToken, IncomingToken, PluginCredentialToken, Principal,
    UsernamePasswordCredentials,
};
pub use user::{User, UserProvisioner};

// Re-export provider types
pub use chain::AuthenticationProviderChain;
pub use provider::{AuthOutcome, AuthenticationProvider};
pub use providers::PluginAuthenticationProvider;
