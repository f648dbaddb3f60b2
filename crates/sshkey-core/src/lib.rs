//! Core types, traits, and utilities for the gh-ssh-key extension.
//!
//! This crate provides the foundational abstractions used across the workspace:
//! - [`IOStreams`] for terminal I/O handling
//! - [`config::Config`] trait for configuration management
//! - [`config::AuthConfig`] trait for authentication state
//! - [`cmdutil`] error signals understood by the top-level handler

pub mod cmdutil;
pub mod config;
pub mod errors;
pub mod instance;
pub mod iostreams;
pub mod keyring_store;
#[cfg(test)]
pub mod test_utils;

pub use errors::ConfigError;
pub use iostreams::IOStreams;
