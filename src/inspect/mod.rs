//! Read-only queries over configuration and installed state.
//!
//! Diagnostic subcommands go through this module. Two rules from the
//! observed contract shape the API:
//!
//! - **Setting queries work without a manifest.** `pakt config install-path`
//!   reports the effective value even when no manifest is present; the
//!   missing manifest is noted separately and is not fatal.
//! - **Manifest-dependent queries** (`pakt show`, `pakt check`) require a
//!   located manifest and surface the usual typed error otherwise.

use crate::config::{ConfigSnapshot, Setting};
use crate::core::PaktError;
use crate::manifest::Manifest;
use crate::resolver::InstallTarget;
use crate::source::split_release_name;
use semver::Version;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Report of one setting query: effective value plus enough context to tell
/// "manifest not found" apart from "value found but manifest missing".
#[derive(Debug)]
pub struct SettingReport {
    /// The queried key.
    pub key: String,
    /// The effective setting, or `None` when unset everywhere.
    pub setting: Option<Setting>,
    /// The manifest-missing message, when no manifest could be located.
    pub manifest_missing: Option<String>,
}

impl SettingReport {
    /// Build a report for `key` from the snapshot and the outcome of
    /// manifest location.
    #[must_use]
    pub fn new(
        snapshot: &ConfigSnapshot,
        key: &str,
        manifest: &Result<PathBuf, PaktError>,
    ) -> Self {
        Self {
            key: key.to_string(),
            setting: snapshot.get(key).cloned(),
            manifest_missing: manifest.as_ref().err().map(ToString::to_string),
        }
    }

    /// Render the report for terminal output.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.setting {
            Some(setting) => {
                let _ = writeln!(out, "Settings for `{}` (set via {})", self.key, setting.source);
                let _ = writeln!(out, "  {}", setting.value);
            }
            None => {
                let _ = writeln!(out, "Settings for `{}` (not set)", self.key);
                let _ = writeln!(
                    out,
                    "  No value in local config, environment, or global config"
                );
            }
        }
        if let Some(note) = &self.manifest_missing {
            let _ = writeln!(out, "  {note}");
        }
        out
    }
}

/// Enumerate the packages installed under a target.
///
/// Returns `(name, version, directory)` triples; an absent `packages`
/// directory yields an empty list, not an error.
pub fn installed_packages(target: &InstallTarget) -> Vec<(String, Version, PathBuf)> {
    let packages_dir = target.packages_dir();
    let Ok(entries) = std::fs::read_dir(&packages_dir) else {
        return Vec::new();
    };

    let mut installed = Vec::new();
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let dir_name = entry.file_name().to_string_lossy().into_owned();
        if let Some((name, version)) = split_release_name(&dir_name) {
            installed.push((name.to_string(), version, entry.path()));
        }
    }
    installed.sort();
    installed
}

/// On-disk location of an installed package (highest installed version).
///
/// Backs `pakt show <package>`.
pub fn installed_package_dir(target: &InstallTarget, name: &str) -> Result<PathBuf, PaktError> {
    installed_packages(target)
        .into_iter()
        .filter(|(installed_name, _, _)| installed_name == name)
        .max_by(|a, b| a.1.cmp(&b.1))
        .map(|(_, _, dir)| dir)
        .ok_or_else(|| PaktError::PackageNotInstalled {
            name: name.to_string(),
            target: target.path.display().to_string(),
        })
}

/// Verify the manifest's declared dependencies are already present under the
/// target, without installing anything.
///
/// Backs `pakt check`. Unsatisfied dependencies produce
/// [`PaktError::DependenciesUnsatisfied`] (exit code 1).
pub fn check_satisfied(manifest: &Manifest, target: &InstallTarget) -> Result<(), PaktError> {
    let installed = installed_packages(target);
    let missing: Vec<String> = manifest
        .dependencies
        .iter()
        .filter(|dep| {
            !installed
                .iter()
                .any(|(name, version, _)| *name == dep.name && dep.requirement.matches(version))
        })
        .map(|dep| dep.name.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PaktError::DependenciesUnsatisfied {
            missing,
        })
    }
}
