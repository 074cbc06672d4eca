//! Error handling for pakt.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`PaktError`]) for precise handling in code
//!    and for mapping failures to process exit codes.
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable
//!    suggestions for CLI users.
//!
//! # Exit codes
//!
//! Each error variant carries a process exit code via [`PaktError::exit_code`]:
//!
//! | Error | Exit code |
//! |-------|-----------|
//! | [`PaktError::ManifestNotFound`] | 10 |
//! | [`PaktError::DependenciesUnsatisfied`] | 1 |
//! | everything else | 1 |
//!
//! The distinct code 10 lets callers script around a missing manifest without
//! parsing output.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for pakt operations.
///
/// Each variant represents a specific failure mode with enough context to
/// produce an actionable message. Variants that correspond to user-visible
/// CLI failures define their exit code in [`PaktError::exit_code`].
#[derive(Error, Debug)]
pub enum PaktError {
    /// No manifest file exists at the computed location.
    ///
    /// pakt expects the manifest exactly where pointed to (via
    /// `--manifest-path`) or directly in the working directory. There is
    /// deliberately no upward directory search.
    #[error("Could not locate manifest (pakt.toml) at {location}")]
    ManifestNotFound {
        /// The location that was checked for a manifest.
        location: String,
    },

    /// Manifest file exists but could not be parsed.
    #[error("Invalid manifest file syntax in {file}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse.
        file: String,
        /// Specific reason for the parsing failure.
        reason: String,
    },

    /// Declared dependencies are not present under the resolved install target.
    ///
    /// Reported by `pakt check`; exit code 1.
    #[error("dependencies could not be satisfied: missing {}", missing.join(", "))]
    DependenciesUnsatisfied {
        /// Names of the dependencies that are not installed.
        missing: Vec<String>,
    },

    /// The package source could not satisfy a declared dependency.
    #[error("No version of package '{name}' satisfies requirement '{requirement}'")]
    DependencyResolutionFailed {
        /// Name of the unsatisfiable dependency.
        name: String,
        /// The version requirement that could not be met.
        requirement: String,
    },

    /// An install write was rejected or failed.
    ///
    /// Raised when the target is unwritable, or when a write path escapes the
    /// resolved install target or lands in a reserved default location. pakt
    /// never silently redirects to a default location.
    #[error("Cannot install to {path}: {reason}")]
    InstallWriteFailure {
        /// The offending path.
        path: String,
        /// Why the write was rejected.
        reason: String,
    },

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error.
        message: String,
    },

    /// A package was requested (e.g. by `pakt show`) but is not installed
    /// under the resolved install target.
    #[error("Package '{name}' is not installed under {target}")]
    PackageNotInstalled {
        /// Name of the missing package.
        name: String,
        /// The install target that was searched.
        target: String,
    },

    /// IO error wrapper for std::io errors.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error wrapper.
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error wrapper.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// Semantic version parsing error wrapper.
    #[error("Version parsing error: {0}")]
    SemverError(#[from] semver::Error),
}

impl PaktError {
    /// The process exit code this error maps to.
    ///
    /// `ManifestNotFound` is distinguished with code 10 so that callers can
    /// tell "no manifest" apart from generic installer failures.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ManifestNotFound {
                ..
            } => 10,
            _ => 1,
        }
    }
}

/// Wrapper that pairs an error with a user-facing suggestion and details.
///
/// Produced by [`user_friendly_error`] at the CLI boundary; the typed error
/// stays intact for exit-code mapping while the context carries remediation
/// hints.
pub struct ErrorContext {
    /// The underlying error.
    pub error: anyhow::Error,
    /// An actionable suggestion shown to the user, if any.
    pub suggestion: Option<String>,
    /// Additional details about the failure, if any.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context wrapping `error` with no suggestion or details.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach an actionable suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach additional details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.error);
        if let Some(details) = &self.details {
            eprintln!("\n{details}");
        }
        if let Some(suggestion) = &self.suggestion {
            eprintln!("\n{} {}", "Hint:".yellow().bold(), suggestion);
        }
    }

    /// The exit code of the wrapped error (1 when it is not a [`PaktError`]).
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.error.downcast_ref::<PaktError>().map_or(1, PaktError::exit_code)
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\n{details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nHint: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion appropriate
/// to the failure.
///
/// Used by `main` to render failures once, synchronously, before exiting with
/// the error's code.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let (suggestion, details) = match error.downcast_ref::<PaktError>() {
        Some(PaktError::ManifestNotFound {
            ..
        }) => (
            Some(
                "Point pakt at the manifest with --manifest-path, or run it from the \
                 project directory"
                    .to_string(),
            ),
            None,
        ),
        Some(PaktError::DependenciesUnsatisfied {
            ..
        }) => (Some("Run `pakt install` to install missing packages".to_string()), None),
        Some(PaktError::DependencyResolutionFailed {
            ..
        }) => (
            Some("Check the version requirement in pakt.toml against the registry".to_string()),
            None,
        ),
        Some(PaktError::InstallWriteFailure {
            ..
        }) => (
            Some("Choose a different install-path or fix permissions on the target".to_string()),
            Some(
                "Packages are only ever written under the resolved install target; pakt \
                 refuses to fall back to a default location."
                    .to_string(),
            ),
        ),
        Some(PaktError::ConfigError {
            ..
        }) => (Some("Check the configuration file for syntax errors".to_string()), None),
        _ => (None, None),
    };

    let mut ctx = ErrorContext::new(error);
    if let Some(s) = suggestion {
        ctx = ctx.with_suggestion(s);
    }
    if let Some(d) = details {
        ctx = ctx.with_details(d);
    }
    ctx
}
