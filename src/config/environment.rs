//! Environment-variable configuration source.
//!
//! Variables prefixed with `PAKT_` contribute settings at `environment`
//! precedence: the prefix is stripped, the remainder lowercased, and
//! underscores become hyphens (`PAKT_INSTALL_PATH` → `install-path`).
//!
//! Control variables that steer pakt itself rather than carrying settings
//! (`PAKT_APP_CONFIG`, `PAKT_CONFIG`, `PAKT_SYSTEM_PATH`) are excluded from
//! the mapping.

use crate::constants::{ENV_APP_CONFIG, ENV_GLOBAL_CONFIG, ENV_PREFIX, ENV_SYSTEM_PATH};
use std::collections::BTreeMap;

/// Variables interpreted by pakt directly, never as settings.
const CONTROL_VARS: &[&str] = &[ENV_APP_CONFIG, ENV_GLOBAL_CONFIG, ENV_SYSTEM_PATH];

/// Extract configuration settings from a process environment snapshot.
///
/// The input is an explicit map rather than `std::env` so the merge stays a
/// pure function over passed-in data.
#[must_use]
pub fn settings_from_env(env: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    env.iter()
        .filter(|(name, _)| !CONTROL_VARS.contains(&name.as_str()))
        .filter_map(|(name, value)| {
            let suffix = name.strip_prefix(ENV_PREFIX)?;
            if suffix.is_empty() {
                return None;
            }
            Some((suffix.to_lowercase().replace('_', "-"), value.clone()))
        })
        .collect()
}
