//! Layered configuration for pakt.
//!
//! Settings are merged from four sources, scanned in precedence order with
//! first-found-wins per key:
//!
//! 1. **Local**: per-project file, `.pakt/config.toml` under the project
//!    root (the invocation directory when no manifest is located;
//!    redirectable via `PAKT_APP_CONFIG`)
//! 2. **Environment**: `PAKT_*` variables ([`environment`])
//! 3. **Global**: user-level file, `~/.pakt/config.toml` (overridable with
//!    `--config` or `PAKT_CONFIG`)
//! 4. **Default**: built-in conventions
//!
//! The merge produces an immutable [`ConfigSnapshot`], built once per
//! invocation and discarded at its end. Configuration is never read through
//! hidden process-wide state: the snapshot is explicit, passed-in data,
//! which keeps the precedence merge independently testable and invocations
//! decoupled from each other.
//!
//! Missing source files are not errors. Querying an unset key yields `None`,
//! which is distinct from a key set to the empty string.
//!
//! The `install-path` key has no static default: its fallback is the
//! conventional vendor layout relative to the project root, computed by the
//! resolver (`crate::resolver`) because it depends on where the manifest
//! lives. A value resolved that way carries [`SettingSource::Default`].

pub mod environment;
pub mod file;

pub use file::ConfigFile;

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which layer of the precedence chain produced a setting.
///
/// Ordered here from strongest to weakest. `CommandLine` never appears in a
/// [`ConfigSnapshot`]; it is the provenance the resolver assigns to an
/// explicit per-invocation override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    /// Explicit CLI flag for this invocation.
    CommandLine,
    /// Local per-project configuration file.
    Local,
    /// `PAKT_*` environment variable.
    Environment,
    /// Global user-level configuration file.
    Global,
    /// Built-in convention.
    Default,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CommandLine => "command line",
            Self::Local => "local config",
            Self::Environment => "environment",
            Self::Global => "global config",
            Self::Default => "default",
        };
        write!(f, "{label}")
    }
}

/// A configured value together with the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// The effective value.
    pub value: String,
    /// The precedence layer that won for this key.
    pub source: SettingSource,
}

/// Resolved locations of the configuration files consulted by a load.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Local per-project configuration file.
    pub local: PathBuf,
    /// Global user-level configuration file.
    pub global: PathBuf,
}

impl ConfigPaths {
    /// Discover configuration file locations for one invocation.
    ///
    /// `anchor` is the directory the local file hangs off: the project root
    /// when a manifest was located, the invocation directory otherwise.
    /// `global_override` comes from the `--config` flag; `PAKT_CONFIG` is
    /// consulted next, then the platform default location.
    pub fn discover(
        anchor: &Path,
        env: &BTreeMap<String, String>,
        global_override: Option<PathBuf>,
    ) -> Result<Self> {
        let global = file::global_config_path(
            global_override
                .or_else(|| env.get(crate::constants::ENV_GLOBAL_CONFIG).map(PathBuf::from)),
        )?;
        Ok(Self {
            local: file::local_config_path(anchor, env),
            global,
        })
    }
}

/// Immutable merged view of all settings at resolution time.
///
/// Built once per invocation by [`ConfigSnapshot::load`]; never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    settings: BTreeMap<String, Setting>,
}

impl ConfigSnapshot {
    /// Load and merge all configuration sources.
    ///
    /// Sources are scanned local → environment → global; the first source
    /// that defines a key wins and later sources never override it. Missing
    /// files contribute nothing.
    pub async fn load(paths: &ConfigPaths, env: &BTreeMap<String, String>) -> Result<Self> {
        let local = ConfigFile::load_or_default(&paths.local).await?;
        let global = ConfigFile::load_or_default(&paths.global).await?;
        let env_settings = environment::settings_from_env(env);

        let mut settings: BTreeMap<String, Setting> = BTreeMap::new();
        let layers = [
            (local.settings, SettingSource::Local),
            (env_settings, SettingSource::Environment),
            (global.settings, SettingSource::Global),
        ];
        for (values, source) in layers {
            for (key, value) in values {
                settings.entry(key).or_insert(Setting {
                    value,
                    source,
                });
            }
        }

        tracing::debug!(
            local = %paths.local.display(),
            global = %paths.global.display(),
            keys = settings.len(),
            "loaded configuration snapshot"
        );

        Ok(Self {
            settings,
        })
    }

    /// Build a snapshot directly from merged settings. Test seam; production
    /// code goes through [`ConfigSnapshot::load`].
    #[must_use]
    pub fn from_settings(settings: BTreeMap<String, Setting>) -> Self {
        Self {
            settings,
        }
    }

    /// The effective setting for `key`, or `None` when no source defines it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Setting> {
        self.settings.get(key)
    }
}
