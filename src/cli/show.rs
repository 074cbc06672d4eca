//! Report the installed location of a package.
//!
//! `pakt show <package>` prints the on-disk directory of an installed
//! package under the resolved install target. Unlike `pakt config`, this is
//! a manifest-dependent query: without a locatable manifest it fails with
//! the usual "Could not locate manifest" error.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::Invocation;
use crate::inspect::installed_package_dir;
use crate::manifest::Manifest;
use crate::resolver::resolve_install_target;

/// Command to print where a package is installed.
#[derive(Args)]
pub struct ShowCommand {
    /// Name of the installed package.
    package: String,
}

impl ShowCommand {
    /// Execute the show command.
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

        let dir = installed_package_dir(&target, &self.package)?;
        println!("{}", dir.display());
        Ok(())
    }
}
