//! On-disk configuration files.
//!
//! Both the local per-project file (`.pakt/config.toml`) and the global
//! user-level file (`~/.pakt/config.toml`) share the same flat TOML shape:
//!
//! ```toml
//! install-path = "/opt/pakt-packages"
//! ```
//!
//! Missing files are not errors; they simply contribute no settings to the
//! merge. The global file may hold user-wide preferences and is written with
//! restrictive permissions on Unix.

use crate::constants::{CONFIG_FILE, ENV_APP_CONFIG, LOCAL_CONFIG_DIR};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A flat key/value configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Raw settings, keyed by namespaced setting name (e.g. `install-path`).
    #[serde(flatten)]
    pub settings: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Load a configuration file, returning an empty file if it does not
    /// exist.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load a configuration file from a specific path.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save the configuration to `path`, creating parent directories and
    /// restricting permissions on Unix.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        crate::utils::fs::atomic_write(path, content.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)
                .await
                .with_context(|| format!("Failed to read permissions for {}", path.display()))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).await.with_context(|| {
                format!("Failed to set permissions on {}", path.display())
            })?;
        }

        Ok(())
    }

    /// Set a key, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(key.into(), value.into());
    }
}

/// Resolve the local per-project configuration file path.
///
/// `anchor` is the project root when a manifest was located, or the
/// invocation directory otherwise, so `--manifest-path` from outside the
/// project still picks up the project's own file. The directory defaults
/// to `.pakt` under the anchor and can be redirected with
/// `PAKT_APP_CONFIG`; a relative override resolves against the anchor.
#[must_use]
pub fn local_config_path(anchor: &Path, env: &BTreeMap<String, String>) -> PathBuf {
    let dir = env.get(ENV_APP_CONFIG).map_or_else(
        || anchor.join(LOCAL_CONFIG_DIR),
        |dir| crate::utils::fs::absolutize(Path::new(dir), anchor),
    );
    dir.join(CONFIG_FILE)
}

/// Resolve the global user-level configuration file path.
///
/// Defaults to `~/.pakt/config.toml` (`%LOCALAPPDATA%\pakt\config.toml` on
/// Windows). An explicit path (from `--config` or `PAKT_CONFIG`) wins.
pub fn global_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let config_dir = if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
            .join("pakt")
    } else {
        dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
            .join(".pakt")
    };

    Ok(config_dir.join(CONFIG_FILE))
}
