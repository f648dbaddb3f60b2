//! `gh ssh-key add` command.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sshkey_api::queries::ssh_key::{UploadKeyError, upload_key};
use sshkey_core::cmdutil::{FlagError, SilentError};
use sshkey_core::ios_eprintln;
use sshkey_core::iostreams::IOStreams;
use tracing::debug;

use crate::factory::Factory;

/// Argument that selects standard input as the key source.
pub const STDIN_ARG: &str = "-";

/// Command that grants the scope needed to upload keys.
pub const SCOPE_REFRESH_COMMAND: &str = "gh auth refresh -s write:public_key";

/// Add an SSH key to your GitHub account.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Path to the public key file, or `-` to read it from standard input.
    #[arg(value_name = "KEY_FILE")]
    key_file: Option<String>,

    /// Title for the new key.
    #[arg(short, long, default_value = "")]
    title: String,
}

/// Where the public key is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl KeySource {
    /// Map a positional argument to a source; `-` means standard input.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIN_ARG {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Open the source for reading.
    ///
    /// Dropping the returned reader releases it, whichever branch produced it.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from opening the file.
    pub fn open(&self, io: &IOStreams) -> std::io::Result<Box<dyn Read + Send>> {
        match self {
            Self::Stdin => Ok(io.take_stdin()),
            Self::File(path) => Ok(Box::new(std::fs::File::open(path)?)),
        }
    }
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdin => f.write_str("standard input"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolved options for one `add` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOptions {
    /// Where to read the key from.
    pub key_source: KeySource,
    /// Title for the new key; may be empty.
    pub title: String,
}

impl AddArgs {
    /// Resolve the arguments against the terminal state.
    ///
    /// Without a positional argument the key is read from standard input,
    /// unless both stdin and stdout are terminals.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagError`] when no key file is given in an interactive
    /// session.
    pub fn resolve(&self, io: &IOStreams) -> Result<AddOptions, FlagError> {
        let key_source = match self.key_file.as_deref() {
            Some(arg) => KeySource::from_arg(arg),
            None if io.is_interactive() => {
                return Err(FlagError("public key file missing".to_string()));
            }
            None => KeySource::Stdin,
        };
        Ok(AddOptions {
            key_source,
            title: self.title.clone(),
        })
    }

    /// Run the ssh-key add command.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be added.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let opts = self.resolve(&factory.io)?;
        run_add(&opts, factory).await
    }
}

/// Upload the key described by `opts` to the default host.
///
/// # Errors
///
/// Returns the first failure among client setup, opening the key source,
/// config loading and the upload itself. A token without the
/// `write:public_key` scope yields a [`SilentError`] after the guidance is
/// printed to stderr.
pub async fn run_add(opts: &AddOptions, factory: &Factory) -> Result<()> {
    let client = factory.http_client()?;

    let mut key = opts
        .key_source
        .open(&factory.io)
        .with_context(|| format!("open {}", opts.key_source))?;

    let hostname = factory.config()?.default_host()?;
    debug!(%hostname, source = %opts.key_source, "adding SSH key");

    let ios = &factory.io;
    let cs = ios.color_scheme();

    match upload_key(&client, &hostname, &mut key, &opts.title).await {
        Ok(()) => {}
        Err(UploadKeyError::InsufficientScopes) => {
            ios_eprintln!(ios, "Error: insufficient OAuth scopes to list SSH keys");
            ios_eprintln!(
                ios,
                "Run the following to grant scopes: {}",
                cs.bold(SCOPE_REFRESH_COMMAND),
            );
            return Err(SilentError.into());
        }
        Err(e) => return Err(e.into()),
    }
    drop(key);

    if ios.is_stdout_tty() {
        ios_eprintln!(ios, "{} Public key added to your account", cs.success_icon());
    }
    Ok(())
}
