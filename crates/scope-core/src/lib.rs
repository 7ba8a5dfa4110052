//! scope-core library: content model, configuration and storage seams.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums per module; callers at the binary
//!   edge wrap them with `anyhow` context.
//! - **Logging**: `tracing` macros. Skipped input is a `warn!`, never an error.
#![forbid(unsafe_code)]

pub mod config;
pub mod draft;
pub mod error;
pub mod inventory;
pub mod model;
pub mod runlog;
pub mod topics;
