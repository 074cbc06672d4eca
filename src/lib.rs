//! pakt: installation-target resolution and isolated package installs.
//!
//! pakt reads a project manifest (`pakt.toml`), resolves the directory
//! packages should be installed into by merging layered configuration
//! sources with strict precedence, and installs packages so that they land
//! exclusively under that directory, never leaking into the tool's
//! reserved default locations.
//!
//! # Architecture
//!
//! One invocation is one logical sequence:
//!
//! ```text
//! locate manifest → load config snapshot → resolve install target
//!                 → install / check / report
//! ```
//!
//! - [`manifest`]: manifest location (no upward search) and parsing
//! - [`config`]: layered configuration with precedence
//!   local > environment > global > default, merged into an immutable
//!   per-invocation snapshot
//! - [`resolver`]: install-target resolution with provenance, and the
//!   reserved default locations
//! - [`installer`]: isolated, atomic, idempotent package installation;
//!   every write validated at a single choke point
//! - [`source`]: the package-source collaborator trait and the local
//!   directory registry implementation
//! - [`inspect`]: read-only setting and installed-state queries
//! - [`cli`]: command-line surface (`install`, `check`, `config`, `show`)
//! - [`core`]: error taxonomy and exit-code mapping
//!
//! # Isolation invariant
//!
//! When the resolved install target differs from the reserved default
//! locations (system package path, project vendor path, project app-local
//! path), no package file may be written to any of them. The installer
//! enforces this centrally; a violation fails the install rather than being
//! silently redirected.

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod inspect;
pub mod installer;
pub mod manifest;
pub mod resolver;
pub mod source;
pub mod utils;
