//! Package source collaborator.
//!
//! Version resolution and package retrieval are external concerns: the
//! installer consumes them only through the narrow [`PackageSource`] trait.
//! The built-in implementation, [`DirectorySource`], serves packages from a
//! local registry directory laid out as one `<name>-<version>` subdirectory
//! per release:
//!
//! ```text
//! registry/
//! ├── rack-1.0.0/
//! │   └── lib/
//! │       └── rack.rb
//! └── rack-1.2.0/
//!     └── lib/...
//! ```

use crate::core::PaktError;
use crate::manifest::Dependency;
use anyhow::{Context, Result};
use semver::Version;
use std::path::{Path, PathBuf};

/// A concrete package release selected to satisfy a dependency.
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    /// Package name.
    pub name: String,
    /// The exact version chosen.
    pub version: Version,
    /// Directory holding the package's file tree.
    pub root: PathBuf,
}

impl ResolvedPackage {
    /// Canonical `<name>-<version>` directory name for this release.
    #[must_use]
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// Resolves declared dependencies to concrete package releases.
///
/// Implementations must be deterministic for a fixed package universe: the
/// installer relies on resolving the same manifest twice yielding the same
/// set.
pub trait PackageSource: Send + Sync {
    /// Select one release per dependency, or fail if any requirement cannot
    /// be met.
    fn resolve(&self, dependencies: &[Dependency]) -> Result<Vec<ResolvedPackage>>;
}

/// A local directory registry of packages.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source reading from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// All releases of `name` present in the registry.
    fn releases(&self, name: &str) -> Result<Vec<(Version, PathBuf)>> {
        let entries = std::fs::read_dir(&self.root).with_context(|| {
            format!("Failed to read package registry at {}", self.root.display())
        })?;

        let mut releases = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let dir_name = entry.file_name().to_string_lossy().into_owned();
            if let Some((entry_name, version)) = split_release_name(&dir_name) {
                if entry_name == name {
                    releases.push((version, entry.path()));
                }
            }
        }
        Ok(releases)
    }
}

impl PackageSource for DirectorySource {
    fn resolve(&self, dependencies: &[Dependency]) -> Result<Vec<ResolvedPackage>> {
        let mut resolved = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            let mut candidates: Vec<(Version, PathBuf)> = self
                .releases(&dependency.name)?
                .into_iter()
                .filter(|(version, _)| dependency.requirement.matches(version))
                .collect();
            candidates.sort_by(|a, b| a.0.cmp(&b.0));

            let (version, root) =
                candidates.pop().ok_or_else(|| PaktError::DependencyResolutionFailed {
                    name: dependency.name.clone(),
                    requirement: dependency.requirement.to_string(),
                })?;

            tracing::debug!(
                package = %dependency.name,
                version = %version,
                "resolved dependency"
            );
            resolved.push(ResolvedPackage {
                name: dependency.name.clone(),
                version,
                root,
            });
        }
        Ok(resolved)
    }
}

/// Split a `<name>-<version>` directory name into its parts.
///
/// Package names may themselves contain hyphens, so the split point is the
/// first hyphen whose suffix parses as a full semver version.
#[must_use]
pub fn split_release_name(dir_name: &str) -> Option<(&str, Version)> {
    for (idx, _) in dir_name.match_indices('-') {
        if idx == 0 {
            continue;
        }
        if let Ok(version) = Version::parse(&dir_name[idx + 1..]) {
            return Some((&dir_name[..idx], version));
        }
    }
    None
}

/// Build the package source declared by a manifest.
///
/// Fails when the manifest declares no source or the registry directory does
/// not exist; both are configuration problems, not resolution failures.
pub fn from_manifest(manifest: &crate::manifest::Manifest) -> Result<DirectorySource> {
    let root = manifest.source.as_ref().ok_or_else(|| PaktError::ConfigError {
        message: format!("manifest {} declares no package source", manifest.path.display()),
    })?;
    if !root.is_dir() {
        return Err(PaktError::ConfigError {
            message: format!("package source directory does not exist: {}", root.display()),
        }
        .into());
    }
    Ok(DirectorySource::new(root.clone()))
}
