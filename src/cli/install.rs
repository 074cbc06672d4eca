//! Install packages from manifest dependencies.
//!
//! Runs the full pipeline: locate manifest → load configuration → resolve
//! install target → install. Exit codes: 0 on success, 10 when no manifest
//! can be located, 1 for other failures.
//!
//! ```bash
//! pakt install
//! pakt install --manifest-path ../app          # directory or file
//! pakt install --path /opt/pakt-packages      # per-invocation override
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::Invocation;
use crate::installer;
use crate::manifest::Manifest;
use crate::resolver::{resolve_install_target, ReservedLocations};
use crate::source;

/// Command to install every package the manifest requires.
#[derive(Args)]
pub struct InstallCommand {
    /// Install packages into this directory, overriding any configured
    /// install-path for this invocation.
    ///
    /// Relative paths resolve against the directory the command is invoked
    /// from.
    #[arg(long)]
    path: Option<PathBuf>,
}

impl InstallCommand {
    /// Execute the install command.
    pub async fn execute_with_manifest_path(
        self,
        manifest_ref: Option<PathBuf>,
        config_override: Option<PathBuf>,
    ) -> Result<()> {
        let invocation = Invocation::prepare(manifest_ref, config_override).await?;

        let manifest_path = invocation.manifest_path?;
        let manifest = Manifest::load(&manifest_path).await?;

        let target = resolve_install_target(
            &invocation.snapshot,
            self.path.as_deref(),
            &invocation.cwd,
            Some(&manifest.project_root),
        )?;
        let reserved = ReservedLocations::for_project(&manifest.project_root, &invocation.env)?;
        let package_source = source::from_manifest(&manifest)?;

        let installed = installer::install(&manifest, &target, &reserved, &package_source).await?;

        println!(
            "Installed {} package(s) to {} ({})",
            installed.count(),
            target.path.display(),
            target.provenance
        );
        for package in &installed.packages {
            let marker = if package.freshly_installed {
                "+".green()
            } else {
                "=".dimmed()
            };
            println!("  {} {} {}", marker, package.name.bold(), package.version);
        }

        Ok(())
    }
}
