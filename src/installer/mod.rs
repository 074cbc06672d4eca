//! Isolated package installation.
//!
//! Materializes resolved packages under exactly one [`InstallTarget`] and
//! nowhere else. The isolation invariant is enforced at a single choke
//! point, [`IsolationGuard`]: every path the installer intends to touch is
//! validated before any write occurs: it must fall under the target, and it
//! must not fall under a reserved default location the target does not
//! itself occupy. pakt never silently redirects a rejected write to a
//! default location; it fails loudly with
//! [`PaktError::InstallWriteFailure`].
//!
//! # Atomicity
//!
//! Each package is staged into a hidden temp directory next to its final
//! location and renamed into place. An external observer sees a package
//! directory either fully present with correct contents or absent, never
//! half-written. On failure the staging directory is removed.
//!
//! # Idempotence
//!
//! Installed packages carry no on-disk receipt (the package directory must
//! enumerate to exactly the source's entries); instead a SHA-256 digest over
//! the file tree decides whether an existing install is current. Matching
//! content is skipped, mismatching content is replaced.
//!
//! # Concurrency
//!
//! Package directories are disjoint, so independent packages install
//! concurrently through a bounded buffered stream
//! ([`crate::constants::MAX_PARALLEL_INSTALLS`]). Writers never interleave
//! into overlapping paths. Tree hashing and copying are blocking
//! filesystem work and run on blocking tasks, not the async workers.

use crate::core::PaktError;
use crate::manifest::Manifest;
use crate::resolver::{InstallTarget, ReservedLocations};
use crate::source::{PackageSource, ResolvedPackage};
use crate::utils::fs::{copy_dir_contents, ensure_dir};
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use semver::Version;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;


/// One package materialized under an install target.
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    /// Package name.
    pub name: String,
    /// Installed version.
    pub version: Version,
    /// Directory the package landed in
    /// (`<target>/packages/<name>-<version>`).
    pub install_dir: PathBuf,
    /// All installed files, rooted under `install_dir`.
    pub files: Vec<PathBuf>,
    /// SHA-256 digest over the installed file tree.
    pub digest: String,
    /// `false` when an existing, digest-identical install was kept as-is.
    pub freshly_installed: bool,
}

/// The exact set of packages present under a target after one install run.
#[derive(Debug, Clone, Default)]
pub struct InstalledSet {
    /// Installed packages, in manifest dependency order.
    pub packages: Vec<InstalledPackage>,
}

impl InstalledSet {
    /// Number of packages in the set.
    #[must_use]
    pub fn count(&self) -> usize {
        self.packages.len()
    }

    /// Look up a package by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&InstalledPackage> {
        self.packages.iter().find(|p| p.name == name)
    }
}

/// Single validation choke point for all installer writes.
///
/// Centralizing the reserved-location check here, rather than trusting each
/// call site, makes the isolation invariant exhaustively testable in one
/// place.
pub struct IsolationGuard<'a> {
    target: &'a InstallTarget,
    reserved: &'a ReservedLocations,
}

impl<'a> IsolationGuard<'a> {
    /// Create a guard for one target.
    #[must_use]
    pub fn new(target: &'a InstallTarget, reserved: &'a ReservedLocations) -> Self {
        Self {
            target,
            reserved,
        }
    }

    /// Validate a path the installer intends to write.
    ///
    /// The path must be under the install target, and must not fall under a
    /// reserved default location unless the target's own packages area
    /// resolves into that location (i.e. the resolution explicitly chose
    /// it, as the default `<project-root>/vendor` target does).
    pub fn check_write(&self, path: &Path) -> Result<(), PaktError> {
        if !path.starts_with(&self.target.path) {
            return Err(PaktError::InstallWriteFailure {
                path: path.display().to_string(),
                reason: format!(
                    "write escapes the resolved install target {}",
                    self.target.path.display()
                ),
            });
        }

        for reserved in self.reserved.all() {
            if path.starts_with(reserved) && !self.target.packages_dir().starts_with(reserved) {
                return Err(PaktError::InstallWriteFailure {
                    path: path.display().to_string(),
                    reason: format!(
                        "write falls in reserved default location {} while the install \
                         target is {}",
                        reserved.display(),
                        self.target.path.display()
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Install every package the manifest requires under `target`.
///
/// Version selection is delegated to the `source` collaborator. On success
/// the returned [`InstalledSet`] lists the exact identity of every package
/// present; on failure no package is left half-written.
pub async fn install(
    manifest: &Manifest,
    target: &InstallTarget,
    reserved: &ReservedLocations,
    source: &dyn PackageSource,
) -> Result<InstalledSet> {
    let resolved = source.resolve(&manifest.dependencies)?;
    let guard = IsolationGuard::new(target, reserved);

    let packages_dir = target.packages_dir();
    guard.check_write(&packages_dir)?;
    ensure_dir(&packages_dir).map_err(|e| PaktError::InstallWriteFailure {
        path: packages_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!(
        target = %target.path.display(),
        source = %target.provenance,
        packages = resolved.len(),
        "installing packages"
    );

    let mut results: Vec<InstalledPackage> = stream::iter(resolved.iter())
        .map(|package| install_one(package, target, &guard))
        .buffer_unordered(crate::constants::MAX_PARALLEL_INSTALLS)
        .collect::<Vec<Result<InstalledPackage>>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    // buffer_unordered completes out of order; restore manifest order.
    results.sort_by_key(|installed| {
        resolved.iter().position(|r| r.name == installed.name).unwrap_or(usize::MAX)
    });

    Ok(InstalledSet {
        packages: results,
    })
}

/// Install a single resolved package atomically.
async fn install_one(
    package: &ResolvedPackage,
    target: &InstallTarget,
    guard: &IsolationGuard<'_>,
) -> Result<InstalledPackage> {
    let dir_name = package.dir_name();
    let final_dir = target.package_dir(&dir_name);
    guard.check_write(&final_dir)?;
    let staging = target.packages_dir().join(format!(".{dir_name}.tmp"));
    guard.check_write(&staging)?;

    // Use a blocking task for tree hashing and copying to avoid blocking
    // the async runtime.
    let source_root = package.root.clone();
    let task_final_dir = final_dir.clone();
    let (digest, files, freshly_installed) = tokio::task::spawn_blocking(move || {
        materialize_tree(&dir_name, &source_root, &task_final_dir, &staging)
    })
    .await??;

    Ok(InstalledPackage {
        name: package.name.clone(),
        version: package.version.clone(),
        install_dir: final_dir,
        files,
        digest,
        freshly_installed,
    })
}

/// Blocking body of one package install: digest comparison, staging, and
/// the rename into place. Paths must already be guard-validated.
fn materialize_tree(
    dir_name: &str,
    source_root: &Path,
    final_dir: &Path,
    staging: &Path,
) -> Result<(String, Vec<PathBuf>, bool)> {
    let source_digest = hash_tree(source_root)
        .with_context(|| format!("Failed to hash package source {}", source_root.display()))?;

    if final_dir.is_dir() {
        let installed_digest = hash_tree(final_dir)?;
        if installed_digest == source_digest {
            tracing::debug!(package = %dir_name, "already installed, skipping");
            return Ok((installed_digest, list_files(final_dir)?, false));
        }
        tracing::debug!(package = %dir_name, "installed content differs, replacing");
        std::fs::remove_dir_all(final_dir)
            .with_context(|| format!("Failed to remove stale install {}", final_dir.display()))?;
    }

    if staging.exists() {
        std::fs::remove_dir_all(staging)
            .with_context(|| format!("Failed to clear stale staging dir {}", staging.display()))?;
    }

    let staged = copy_dir_contents(source_root, staging).and_then(|_| {
        std::fs::rename(staging, final_dir).with_context(|| {
            format!("Failed to move {} into place at {}", staging.display(), final_dir.display())
        })
    });
    if let Err(e) = staged {
        // Leave no ambiguous partial state behind.
        let _ = std::fs::remove_dir_all(staging);
        return Err(PaktError::InstallWriteFailure {
            path: final_dir.display().to_string(),
            reason: e.to_string(),
        }
        .into());
    }

    tracing::info!(package = %dir_name, dir = %final_dir.display(), "installed");
    Ok((source_digest, list_files(final_dir)?, true))
}

/// SHA-256 digest over a directory tree: relative paths and file contents,
/// in sorted walk order.
pub fn hash_tree(root: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("Path escapes tree: {}", entry.path().display()))?;
        hasher.update(relative.to_string_lossy().as_bytes());
        hasher.update([0u8]);
        if entry.file_type().is_file() {
            let content = std::fs::read(entry.path())
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;
            hasher.update(&content);
            hasher.update([0u8]);
        }
    }
    Ok(hex::encode(hasher.finalize()))
}

/// All regular files under `root`, sorted.
fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}
