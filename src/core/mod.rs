//! Core types shared across pakt: the error taxonomy and its CLI-facing
//! rendering helpers.

pub mod error;

pub use error::{user_friendly_error, ErrorContext, PaktError};
