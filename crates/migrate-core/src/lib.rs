//! Core types, configuration, and errors for GLIDE migration analysis.
//!
//! This crate provides the foundational pieces used across the workspace
//! that helps migrate from the `ioredis` and `node-redis` clients to Valkey
//! GLIDE.
//!
//! # Architecture
//!
//! - Domain enums: [`ClientKind`], [`CommandFamily`]
//! - The parsed method model: [`MethodSignature`], [`Parameter`], [`ArityRange`]
//! - Error hierarchy with contextual information: [`Error`]
//! - Runtime configuration: [`MigrationConfig`]
//! - Remote text retrieval: [`TextFetcher`], [`HttpFetcher`]
//! - Atomic artifact writes: [`fs::write_atomic`] and [`fs::write_atomic_all`]

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;
pub mod fetch;
pub mod fs;
pub mod signature;

pub use config::{CONFIG_ENV_VAR, MigrationConfig, OUTPUT_DIR_ENV_VAR};
pub use error::{Error, Result};
pub use fetch::{HttpFetcher, StaticFetcher, TextFetcher, fetch_all};
pub use signature::{ArityRange, MethodSignature, Parameter};
pub use types::{ClientKind, CommandFamily};
