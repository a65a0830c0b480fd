//! Authentication provider implementations
//!
//! This module contains implementations of the `AuthenticationProvider`
//! trait:
//! - `plugin`: delegation to authorization plugins

pub mod plugin;

pub use plugin::PluginAuthenticationProvider;
