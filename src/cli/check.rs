//! Verify declared dependencies are already installed.
//!
//! Checks the manifest's dependencies against the resolved install target
//! without installing anything. Exit 0 when satisfied; exit 1 with a
//! "dependencies could not be satisfied" message when not.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::Invocation;
use crate::inspect::check_satisfied;
use crate::manifest::Manifest;
use crate::resolver::resolve_install_target;

/// Command to check whether the manifest is satisfied under the resolved
/// install target.
#[derive(Args)]
pub struct CheckCommand {}

impl CheckCommand {
    /// Execute the check command.
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
            None,
            &invocation.cwd,
            Some(&manifest.project_root),
        )?;

        check_satisfied(&manifest, &target)?;

        println!(
            "{} All {} dependencies are satisfied under {}",
            "✓".green(),
            manifest.dependencies.len(),
            target.path.display()
        );
        Ok(())
    }
}
