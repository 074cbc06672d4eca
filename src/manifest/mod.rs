//! Project manifest (`pakt.toml`): locating, parsing, and the dependency
//! model.
//!
//! # Format
//!
//! ```toml
//! source = "../registry"    # package registry directory
//!
//! [packages]
//! rack = "1.0.0"            # name = semver version requirement
//! ```
//!
//! # Locating
//!
//! [`locate_manifest`] is a pure function over two inputs: an optional
//! explicit reference and the invocation directory. A direct file path is
//! used verbatim; a directory is expected to contain `pakt.toml` directly;
//! with no reference the manifest must sit directly in the invocation
//! directory. There is **no upward directory search**: the manifest is
//! either exactly where pointed to or the lookup fails with a typed
//! [`PaktError::ManifestNotFound`].

use crate::constants::MANIFEST_FILE;
use crate::core::PaktError;
use crate::utils::fs::absolutize;
use anyhow::{Context, Result};
use semver::VersionReq;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// One declared dependency: a package name and its version requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Package name as declared in the manifest.
    pub name: String,
    /// Semver requirement the installed version must satisfy.
    pub requirement: VersionReq,
}

/// A parsed project manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Absolute path of the manifest file itself.
    pub path: PathBuf,
    /// Directory containing the manifest; anchors the default install layout
    /// and the reserved-location list.
    pub project_root: PathBuf,
    /// Package registry directory, absolutized against the project root.
    pub source: Option<PathBuf>,
    /// Declared dependencies in manifest order.
    pub dependencies: Vec<Dependency>,
}

/// Raw serde shape of `pakt.toml`.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    /// Registry directory, possibly relative to the manifest.
    source: Option<String>,
    /// `name = "requirement"` pairs.
    #[serde(default)]
    packages: BTreeMap<String, String>,
}

/// Compute the manifest location for one invocation.
///
/// Rules, in order:
/// - explicit reference naming an existing directory: `pakt.toml` directly
///   inside it, which must exist;
/// - explicit reference that is a file path: returned verbatim, existence
///   deferred to [`Manifest::load`];
/// - no reference: `pakt.toml` directly inside `cwd`, which must exist.
///
/// Relative references resolve against `cwd`.
pub fn locate_manifest(explicit: Option<PathBuf>, cwd: &Path) -> Result<PathBuf, PaktError> {
    match explicit {
        Some(reference) => {
            let absolute = absolutize(&reference, cwd);
            if absolute.is_dir() {
                let candidate = absolute.join(MANIFEST_FILE);
                if candidate.is_file() {
                    Ok(candidate)
                } else {
                    Err(PaktError::ManifestNotFound {
                        location: candidate.display().to_string(),
                    })
                }
            } else {
                // Direct file path: used verbatim. The loader reports
                // ManifestNotFound if nothing is there.
                Ok(absolute)
            }
        }
        None => {
            let candidate = cwd.join(MANIFEST_FILE);
            if candidate.is_file() {
                Ok(candidate)
            } else {
                Err(PaktError::ManifestNotFound {
                    location: candidate.display().to_string(),
                })
            }
        }
    }
}

impl Manifest {
    /// Load and parse the manifest at `path`.
    ///
    /// A missing file is reported as [`PaktError::ManifestNotFound`] so that
    /// a verbatim explicit reference produces the same user-visible failure
    /// as a failed directory lookup.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PaktError::ManifestNotFound {
                location: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read manifest from {}", path.display()))?;

        let raw: ManifestFile = toml::from_str(&content).map_err(|e| PaktError::ManifestParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let project_root = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow::anyhow!("Manifest path has no parent: {}", path.display()))?;

        let mut dependencies = Vec::with_capacity(raw.packages.len());
        for (name, requirement) in raw.packages {
            let requirement =
                VersionReq::parse(&requirement).map_err(|e| PaktError::ManifestParseError {
                    file: path.display().to_string(),
                    reason: format!("invalid requirement '{requirement}' for package '{name}': {e}"),
                })?;
            dependencies.push(Dependency {
                name,
                requirement,
            });
        }

        let source = raw.source.map(|s| absolutize(Path::new(&s), &project_root));

        tracing::debug!(
            manifest = %path.display(),
            packages = dependencies.len(),
            "loaded manifest"
        );

        Ok(Self {
            path: path.to_path_buf(),
            project_root,
            source,
            dependencies,
        })
    }
}
