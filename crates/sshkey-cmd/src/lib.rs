//! Command implementations for the `gh ssh-key` extension.
//!
//! Each module corresponds to a command group.

pub mod factory;
pub mod ssh_key;

#[cfg(test)]
pub mod test_helpers;
