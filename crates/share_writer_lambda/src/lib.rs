//! AWS-oriented adapters and the invocation handler for the share writer.
//!
//! This crate owns runtime integration details (the Lambda handler, secrets
//! store access and file-share backends) and re-exports the domain
//! primitives from `share_writer_core` under a single `runtime` boundary.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod runtime;
