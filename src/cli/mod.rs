//! Command-line interface for pakt.
//!
//! Each command lives in its own module with its own argument struct and
//! execution logic:
//!
//! - `install`: install manifest dependencies into the resolved target
//! - `check`: verify dependencies are already satisfied, without installing
//! - `config`: report an effective setting and its source
//! - `show`: report the installed location of a package
//!
//! # Global options
//!
//! - `--manifest-path PATH`: explicit manifest reference, a `pakt.toml`
//!   file or the directory directly containing one (no upward search)
//! - `--config PATH`: global configuration file location
//! - `--verbose` / `--quiet`: logging verbosity (mutually exclusive)
//!
//! # Exit codes
//!
//! | Condition | Code |
//! |-----------|------|
//! | success | 0 |
//! | manifest could not be located (`install`, `check`, `show`) | 10 |
//! | dependencies not satisfied (`check`) | 1 |
//! | any other failure | 1 |

pub mod common;

mod check;
mod config;
mod install;
mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI for pakt.
#[derive(Parser)]
#[command(
    name = "pakt",
    about = "pakt - isolated package installation with layered install-path configuration",
    version,
    long_about = "pakt installs a project's packages into one resolved install directory, \
                  merging install-path settings from local config, environment, and global \
                  config with strict precedence."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file
    /// (default: `~/.pakt/config.toml`, or `PAKT_CONFIG`).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the manifest, either `pakt.toml` itself or the directory
    /// directly containing it.
    ///
    /// Without this flag the manifest must sit in the invocation directory;
    /// pakt never searches parent directories.
    #[arg(long, global = true)]
    manifest_path: Option<PathBuf>,
}

/// Available pakt subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Install manifest dependencies into the resolved install target.
    Install(install::InstallCommand),

    /// Verify the manifest's dependencies are already satisfied.
    Check(check::CheckCommand),

    /// Report the effective value of a configuration setting.
    Config(config::ConfigCommand),

    /// Report the installed location of a package.
    Show(show::ShowCommand),
}

impl Cli {
    /// The log filter implied by the verbosity flags, used when `RUST_LOG`
    /// is not set.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Dispatch to the selected subcommand.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Install(cmd) => {
                cmd.execute_with_manifest_path(self.manifest_path, self.config).await
            }
            Commands::Check(cmd) => {
                cmd.execute_with_manifest_path(self.manifest_path, self.config).await
            }
            Commands::Config(cmd) => {
                cmd.execute_with_manifest_path(self.manifest_path, self.config).await
            }
            Commands::Show(cmd) => {
                cmd.execute_with_manifest_path(self.manifest_path, self.config).await
            }
        }
    }
}
