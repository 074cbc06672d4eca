//! Supporting utilities for pakt.

pub mod fs;
