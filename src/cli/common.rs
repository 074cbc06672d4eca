//! Shared per-invocation context for CLI commands.

use crate::config::{ConfigPaths, ConfigSnapshot};
use crate::core::PaktError;
use crate::manifest::locate_manifest;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Everything a command needs that is fixed for one invocation: the
/// invocation directory, an environment snapshot, the manifest-location
/// outcome, and the merged configuration.
///
/// Built once at command start and passed explicitly, so no command reads
/// configuration through hidden global state.
pub struct Invocation {
    /// Directory the command was invoked from. Resolution base for relative
    /// install-path values.
    pub cwd: PathBuf,
    /// Snapshot of the process environment at startup.
    pub env: BTreeMap<String, String>,
    /// Outcome of manifest location. Kept as a result because setting
    /// queries report a missing manifest without failing.
    pub manifest_path: Result<PathBuf, PaktError>,
    /// Immutable merged configuration.
    pub snapshot: ConfigSnapshot,
}

impl Invocation {
    /// Capture the invocation context, locate the manifest, and load the
    /// configuration snapshot.
    ///
    /// The manifest is located first so the local per-project config file
    /// anchors at the project root; with no locatable manifest it falls
    /// back to the invocation directory. `config_override` is the global
    /// `--config` flag (global config file location).
    pub async fn prepare(
        manifest_ref: Option<PathBuf>,
        config_override: Option<PathBuf>,
    ) -> Result<Self> {
        let cwd = std::env::current_dir()
            .context("Cannot determine current working directory")?;
        let env: BTreeMap<String, String> = std::env::vars().collect();

        let manifest_path = locate_manifest(manifest_ref, &cwd);
        let config_anchor = manifest_path
            .as_ref()
            .ok()
            .and_then(|path| path.parent())
            .map_or_else(|| cwd.clone(), Path::to_path_buf);

        let paths = ConfigPaths::discover(&config_anchor, &env, config_override)?;
        let snapshot = ConfigSnapshot::load(&paths, &env).await?;
        Ok(Self {
            cwd,
            env,
            manifest_path,
            snapshot,
        })
    }
}
