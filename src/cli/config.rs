//! Inspect effective configuration settings.
//!
//! `pakt config <key>` prints the effective value for a key together with
//! the configuration layer that supplied it. The report works with or
//! without a manifest: when none can be located this is noted in the output
//! but the setting is still reported and the command exits 0.
//!
//! ```bash
//! pakt config install-path
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::Invocation;
use crate::inspect::SettingReport;

/// Command to print the effective value of a configuration key.
#[derive(Args)]
pub struct ConfigCommand {
    /// The setting to report (e.g. `install-path`).
    key: String,
}

impl ConfigCommand {
    /// Execute the config command.
    ///
    /// Never fails for an unset key or a missing manifest; both are report
    /// states, not errors.
    pub async fn execute_with_manifest_path(
        self,
        manifest_ref: Option<PathBuf>,
        config_override: Option<PathBuf>,
    ) -> Result<()> {
        let invocation = Invocation::prepare(manifest_ref, config_override).await?;

        let report = SettingReport::new(&invocation.snapshot, &self.key, &invocation.manifest_path);

        print!("{}", report.render());
        Ok(())
    }
}
