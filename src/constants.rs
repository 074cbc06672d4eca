//! Global constants used throughout the pakt codebase.
//!
//! File names, environment variable names, and layout conventions live here
//! so the reserved-location list and the config precedence chain reference a
//! single definition.

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "pakt.toml";

/// Directory (relative to the project root, or the invocation directory
/// when no manifest is located) holding the local per-project
/// configuration file.
pub const LOCAL_CONFIG_DIR: &str = ".pakt";

/// File name of both the local and global configuration files.
pub const CONFIG_FILE: &str = "config.toml";

/// Prefix for configuration environment variables.
///
/// `PAKT_INSTALL_PATH` maps to the `install-path` key at `environment`
/// precedence.
pub const ENV_PREFIX: &str = "PAKT_";

/// Environment variable overriding the local config directory location.
pub const ENV_APP_CONFIG: &str = "PAKT_APP_CONFIG";

/// Environment variable overriding the global config file location.
pub const ENV_GLOBAL_CONFIG: &str = "PAKT_CONFIG";

/// Environment variable overriding the system package path.
///
/// Primarily for tests, which must assert that nothing leaks into the
/// system location without writing to the real user home.
pub const ENV_SYSTEM_PATH: &str = "PAKT_SYSTEM_PATH";

/// Configuration key naming the install target directory.
pub const INSTALL_PATH_KEY: &str = "install-path";

/// Subdirectory of an install target that receives package trees
/// (`<target>/packages/<name>-<version>/`).
pub const PACKAGES_SUBDIR: &str = "packages";

/// Conventional vendor directory relative to the project root, used as the
/// default install target when no install-path is configured. Packages then
/// land in `<project-root>/vendor/packages/`.
pub const VENDOR_DIR: &str = "vendor";

/// Conventional app-local package path relative to the project root.
pub const APP_LOCAL_SUBDIR: &str = ".pakt/packages";

/// Maximum number of packages installed concurrently.
///
/// Package directories are disjoint, so installs parallelize safely; the
/// bound keeps file-handle usage predictable on small machines.
pub const MAX_PARALLEL_INSTALLS: usize = 8;
