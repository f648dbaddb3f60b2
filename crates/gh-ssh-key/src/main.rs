//! gh-ssh-key - `gh ssh-key` extension written in Rust.
//!
//! Installed as a `gh` extension, so `gh ssh-key add` runs this binary
//! with `add` as its first argument.

use clap::{CommandFactory, Parser};
use sshkey_cmd::factory::Factory;
use sshkey_cmd::ssh_key::SshKeyCommand;
use sshkey_core::cmdutil::{FlagError, is_silent};
use tracing_subscriber::EnvFilter;

/// Exit codes matching the Go CLI behavior.
mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
}

/// Manage SSH keys registered with your GitHub account.
#[derive(Debug, Parser)]
#[command(
    name = "gh-ssh-key",
    bin_name = "gh ssh-key",
    version,
    about = "Manage SSH keys registered with your GitHub account"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<SshKeyCommand>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GH_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let factory = Factory::new(env!("CARGO_PKG_VERSION").to_string());

    let exit_code = if let Some(cmd) = cli.command {
        match cmd.run(&factory).await {
            Ok(()) => exit_codes::OK,
            Err(e) => {
                match error_output(&e, &cmd) {
                    ErrorOutput::Nothing => {}
                    ErrorOutput::Usage(text) => eprintln!("{text}"),
                    ErrorOutput::Log => tracing::error!("{e:#}"),
                }
                exit_code_for(&e)
            }
        }
    } else {
        Cli::command().print_help().ok();
        println!();
        exit_codes::OK
    };

    std::process::exit(exit_code);
}

/// Exit code for a failed command.
///
/// Silent failures and usage errors exit like any other failure; only
/// their [`ErrorOutput`] differs.
fn exit_code_for(_err: &anyhow::Error) -> i32 {
    exit_codes::ERROR
}

/// What to print for a failed command.
#[derive(Debug, PartialEq, Eq)]
enum ErrorOutput {
    /// The command already reported the failure.
    Nothing,
    /// Usage error text for stderr.
    Usage(String),
    /// Log the error chain.
    Log,
}

fn error_output(err: &anyhow::Error, cmd: &SshKeyCommand) -> ErrorOutput {
    if is_silent(err) {
        ErrorOutput::Nothing
    } else if let Some(flag_err) = err.downcast_ref::<FlagError>() {
        ErrorOutput::Usage(flag_error_text(flag_err, cmd))
    } else {
        ErrorOutput::Log
    }
}

/// A usage error followed by the usage of the subcommand that raised it.
fn flag_error_text(err: &FlagError, cmd: &SshKeyCommand) -> String {
    let name = match cmd {
        SshKeyCommand::Add(_) => "add",
    };
    let mut root = Cli::command();
    root.build();
    match root.find_subcommand_mut(name) {
        Some(sub) => format!("{err}\n\n{}", sub.render_usage()),
        None => err.to_string(),
    }
}
