//! SSH key commands (`gh ssh-key`).
//!
//! Manage SSH keys for the authenticated GitHub user.

pub mod add;

use clap::Subcommand;

/// Manage SSH keys.
#[derive(Debug, Subcommand)]
pub enum SshKeyCommand {
    /// Add an SSH key to your GitHub account.
    Add(add::AddArgs),
}

impl SshKeyCommand {
    /// Run the selected subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> anyhow::Result<()> {
        match self {
            Self::Add(args) => args.run(factory).await,
        }
    }
}
