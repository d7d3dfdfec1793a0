pub use share_writer_core::{contract, credentials, error, paths};
