use crate::runtime::contract::DirectoryEntry;
use crate::runtime::credentials::CredentialRecord;
use crate::runtime::error::ShareError;
use crate::runtime::paths::SharePath;

/// Opens authenticated sessions against a file-share host.
pub trait ShareConnector {
    type Session: ShareSession;

    fn connect(&self, credentials: &CredentialRecord) -> Result<Self::Session, ShareError>;
}

/// An authenticated session, owned by a single invocation.
pub trait ShareSession {
    fn is_directory(&self, path: &SharePath) -> Result<bool, ShareError>;

    /// Creates one directory level; the parent must already exist.
    fn create_directory(&self, path: &SharePath) -> Result<(), ShareError>;

    /// Opens `path` for append, creating it if absent, and writes `line`.
    fn append_line(&self, path: &SharePath, line: &str) -> Result<(), ShareError>;

    /// Immediate entries of `path`, excluding `.` and `..`.
    fn list_directory(&self, path: &SharePath) -> Result<Vec<DirectoryEntry>, ShareError>;

    fn close(self) -> Result<(), ShareError>;
}
