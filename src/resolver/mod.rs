//! Install-path resolution.
//!
//! Turns the merged configuration and any per-invocation override into one
//! absolute, validated [`InstallTarget`]. Pure computation over
//! already-loaded data; nothing here touches the filesystem.
//!
//! # Precedence
//!
//! 1. explicit CLI override (`pakt install --path DIR`) wins outright;
//! 2. the effective `install-path` setting from the [`ConfigSnapshot`];
//! 3. the conventional default target `<project-root>/vendor`, whose
//!    packages land in `<project-root>/vendor/packages/`.
//!
//! # Resolution base
//!
//! Relative `install-path` values resolve against the **invocation
//! directory**, not the manifest's directory. Installation may be invoked
//! from a directory other than the project root, and this contract keeps the
//! result a function of where the command ran rather than of where the
//! manifest happens to live. Only the built-in default layout is anchored at
//! the project root.

use crate::config::{ConfigSnapshot, SettingSource};
use crate::constants::{APP_LOCAL_SUBDIR, ENV_SYSTEM_PATH, INSTALL_PATH_KEY, PACKAGES_SUBDIR, VENDOR_DIR};
use crate::core::PaktError;
use crate::utils::fs::absolutize;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The resolved directory packages will be installed into, with provenance.
///
/// Invariant: `path` is absolute and lexically normalized (no `.`/`..`
/// components, no trailing separator). The target is owned by a single
/// invocation and discarded at its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    /// Canonical absolute install directory.
    pub path: PathBuf,
    /// Which configuration layer produced this path.
    pub provenance: SettingSource,
}

impl InstallTarget {
    /// The subdirectory of the target that receives package trees.
    #[must_use]
    pub fn packages_dir(&self) -> PathBuf {
        self.path.join(PACKAGES_SUBDIR)
    }

    /// Directory a given release installs into:
    /// `<target>/packages/<name>-<version>`.
    #[must_use]
    pub fn package_dir(&self, dir_name: &str) -> PathBuf {
        self.packages_dir().join(dir_name)
    }
}

/// The tool's reserved default install locations.
///
/// These are the directories that must never receive packages when a
/// distinct install target was resolved: the system-wide package path, the
/// project's conventional vendor path, and the project's app-local path.
/// The installer validates every write against this list (single choke
/// point).
#[derive(Debug, Clone)]
pub struct ReservedLocations {
    /// System-wide package path (`~/.pakt/packages`, overridable with
    /// `PAKT_SYSTEM_PATH`).
    pub system: PathBuf,
    /// `<project-root>/vendor/packages`.
    pub vendor: PathBuf,
    /// `<project-root>/.pakt/packages`.
    pub app_local: PathBuf,
}

impl ReservedLocations {
    /// Build the reserved list for a project.
    ///
    /// `env` is the invocation's environment snapshot; `PAKT_SYSTEM_PATH`
    /// overrides the platform system location (tests rely on this to assert
    /// isolation without touching the real user home).
    pub fn for_project(project_root: &Path, env: &BTreeMap<String, String>) -> Result<Self> {
        let system = match env.get(ENV_SYSTEM_PATH) {
            Some(path) => absolutize(Path::new(path), project_root),
            None => default_system_path()?,
        };
        Ok(Self {
            system,
            vendor: project_root.join(VENDOR_DIR).join(PACKAGES_SUBDIR),
            app_local: project_root.join(APP_LOCAL_SUBDIR),
        })
    }

    /// All reserved locations, for iteration in validation and tests.
    #[must_use]
    pub fn all(&self) -> [&Path; 3] {
        [&self.system, &self.vendor, &self.app_local]
    }
}

/// Platform default system-wide package path.
fn default_system_path() -> Result<PathBuf> {
    let base = if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
            .join("pakt")
    } else {
        dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
            .join(".pakt")
    };
    Ok(base.join(PACKAGES_SUBDIR))
}

/// Resolve the install target for one invocation.
///
/// `override_path` is the CLI flag; `invocation_dir` is the directory the
/// command runs from (resolution base for relative values); `project_root`
/// anchors the default layout and may be absent when no manifest was
/// located.
///
/// Fails when `install-path` is set to an empty string (set-but-empty is a
/// configuration mistake, not "unset"), and when nothing is configured and
/// no project root is available to anchor the default.
pub fn resolve_install_target(
    snapshot: &ConfigSnapshot,
    override_path: Option<&Path>,
    invocation_dir: &Path,
    project_root: Option<&Path>,
) -> Result<InstallTarget> {
    if let Some(path) = override_path {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        return Ok(InstallTarget {
            path: absolutize(Path::new(&expanded), invocation_dir),
            provenance: SettingSource::CommandLine,
        });
    }

    if let Some(setting) = snapshot.get(INSTALL_PATH_KEY) {
        if setting.value.is_empty() {
            return Err(PaktError::ConfigError {
                message: format!("{INSTALL_PATH_KEY} is set to an empty string ({})", setting.source),
            }
            .into());
        }
        let expanded = shellexpand::tilde(&setting.value).into_owned();
        let target = InstallTarget {
            path: absolutize(Path::new(&expanded), invocation_dir),
            provenance: setting.source,
        };
        tracing::debug!(
            path = %target.path.display(),
            source = %target.provenance,
            "resolved install target"
        );
        return Ok(target);
    }

    let root = project_root.ok_or_else(|| PaktError::ConfigError {
        message: format!("no {INSTALL_PATH_KEY} configured and no project root to anchor the default layout"),
    })?;
    Ok(InstallTarget {
        path: absolutize(&root.join(VENDOR_DIR), invocation_dir),
        provenance: SettingSource::Default,
    })
}
