//! GLIDE migration CLI library.
//!
//! Command implementations and output formatting for the `glide-migrate`
//! binary, exposed as a library so they can be tested without a process.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::format_push_string)]

pub mod commands;
pub mod context;
pub mod formatters;

pub use context::Context;
pub use formatters::{Summary, format_output};
