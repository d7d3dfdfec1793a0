use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::adapters::file_share::{ShareConnector, ShareSession};
use crate::runtime::contract::{DirectoryEntry, EntryKind};
use crate::runtime::credentials::CredentialRecord;
use crate::runtime::error::{ErrorKind, ShareError};
use crate::runtime::paths::SharePath;

/// Shares already mounted on the local filesystem at `<root>/<host>/<share>`.
///
/// Authentication happens at mount time, so credentials only select the
/// mount point.
#[derive(Debug, Clone)]
pub struct MountedShareConnector {
    root: PathBuf,
}

impl MountedShareConnector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ShareConnector for MountedShareConnector {
    type Session = MountedShareSession;

    fn connect(&self, credentials: &CredentialRecord) -> Result<Self::Session, ShareError> {
        let base = share_mount_path(&self.root, credentials);
        match fs::metadata(&base) {
            Ok(metadata) if metadata.is_dir() => Ok(MountedShareSession {
                host: credentials.host.clone(),
                share: credentials.share.clone(),
                base,
            }),
            Ok(_) => Err(ShareError::new(
                ErrorKind::NotFound,
                format!("share mount '{}' is not a directory", base.display()),
            )),
            Err(error) => Err(ShareError::from_io(
                &format!("share mount '{}'", base.display()),
                &error,
            )),
        }
    }
}

#[derive(Debug)]
pub struct MountedShareSession {
    host: String,
    share: String,
    base: PathBuf,
}

impl MountedShareSession {
    fn local_path(&self, path: &SharePath) -> Result<PathBuf, ShareError> {
        if path.host() != self.host || path.share() != self.share {
            return Err(ShareError::new(
                ErrorKind::Parse,
                format!("path '{path}' is outside share {}/{}", self.host, self.share),
            ));
        }

        let mut local = self.base.clone();
        local.extend(path.segments());
        Ok(local)
    }
}

impl ShareSession for MountedShareSession {
    fn is_directory(&self, path: &SharePath) -> Result<bool, ShareError> {
        let local = self.local_path(path)?;
        match fs::metadata(&local) {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(ShareError::from_io(&format!("stat '{path}'"), &error)),
        }
    }

    fn create_directory(&self, path: &SharePath) -> Result<(), ShareError> {
        let local = self.local_path(path)?;
        fs::create_dir(&local)
            .map_err(|error| ShareError::from_io(&format!("mkdir '{path}'"), &error))
    }

    fn append_line(&self, path: &SharePath, line: &str) -> Result<(), ShareError> {
        let local = self.local_path(path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&local)
            .map_err(|error| ShareError::from_io(&format!("open '{path}'"), &error))?;
        file.write_all(line.as_bytes())
            .map_err(|error| ShareError::from_io(&format!("write '{path}'"), &error))
    }

    fn list_directory(&self, path: &SharePath) -> Result<Vec<DirectoryEntry>, ShareError> {
        let local = self.local_path(path)?;
        let read_dir = fs::read_dir(&local)
            .map_err(|error| ShareError::from_io(&format!("list '{path}'"), &error))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry =
                entry.map_err(|error| ShareError::from_io(&format!("list '{path}'"), &error))?;
            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = entry
                .file_type()
                .map_err(|error| ShareError::from_io(&format!("stat '{name}'"), &error))?;
            entries.push(DirectoryEntry::new(name, classify(&file_type)));
        }
        Ok(entries)
    }

    fn close(self) -> Result<(), ShareError> {
        Ok(())
    }
}

fn classify(file_type: &fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::SymbolicLink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

pub fn share_mount_path(root: &Path, credentials: &CredentialRecord) -> PathBuf {
    root.join(&credentials.host).join(&credentials.share)
}
