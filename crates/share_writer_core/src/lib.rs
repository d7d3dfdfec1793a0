//! Domain primitives for the share writer function.
//!
//! This crate owns the invocation contract, credential parsing, path building
//! and the error taxonomy. It intentionally excludes AWS SDK, Lambda runtime
//! and file-share protocol concerns.

pub mod contract;
pub mod credentials;
pub mod error;
pub mod paths;
