use std::io::Write;

use pavao::{SmbClient, SmbCredentials, SmbDirentType, SmbMode, SmbOpenOptions, SmbOptions};

use crate::adapters::file_share::{ShareConnector, ShareSession};
use crate::runtime::contract::{DirectoryEntry, EntryKind};
use crate::runtime::credentials::CredentialRecord;
use crate::runtime::error::{ErrorKind, ShareError};
use crate::runtime::paths::SharePath;

const DIRECTORY_MODE: u32 = 0o755;

/// SMB2/3 sessions through libsmbclient.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmbShareConnector;

impl ShareConnector for SmbShareConnector {
    type Session = SmbShareSession;

    fn connect(&self, credentials: &CredentialRecord) -> Result<Self::Session, ShareError> {
        let client = SmbClient::new(
            SmbCredentials::default()
                .server(format!("smb://{}", credentials.host))
                .share(format!("/{}", credentials.share))
                .username(&credentials.username)
                .password(&credentials.password),
            SmbOptions::default(),
        )
        .map_err(|error| classify("open smb context", &error))?;

        // libsmbclient authenticates lazily; force the tree connect now.
        client
            .list_dir("/")
            .map_err(|error| classify("connect to share", &error))?;

        Ok(SmbShareSession {
            host: credentials.host.clone(),
            share: credentials.share.clone(),
            client,
        })
    }
}

pub struct SmbShareSession {
    host: String,
    share: String,
    client: SmbClient,
}

impl SmbShareSession {
    fn remote_path(&self, path: &SharePath) -> Result<String, ShareError> {
        share_relative_path(&self.host, &self.share, path)
    }
}

/// The libsmbclient path of `path`, which must name the session's share.
fn share_relative_path(host: &str, share: &str, path: &SharePath) -> Result<String, ShareError> {
    if path.host() != host || path.share() != share {
        return Err(ShareError::new(
            ErrorKind::Parse,
            format!("path '{path}' is outside share {host}/{share}"),
        ));
    }
    Ok(path.share_relative())
}

impl ShareSession for SmbShareSession {
    fn is_directory(&self, path: &SharePath) -> Result<bool, ShareError> {
        let remote = self.remote_path(path)?;
        let Some((name, parent)) = path.segments().split_last() else {
            return Ok(true);
        };

        let parent_remote = format!("/{}", parent.join("/"));
        match self.client.list_dir(&parent_remote) {
            Ok(entries) => Ok(entries
                .iter()
                .any(|entry| {
                    entry.name() == name.as_str()
                        && matches!(entry.get_type(), SmbDirentType::Dir)
                })),
            Err(error) => {
                let error = classify(&format!("list '{parent_remote}'"), &error);
                if error.kind == ErrorKind::NotFound {
                    Ok(false)
                } else {
                    Err(ShareError::new(
                        error.kind,
                        format!("stat '{remote}': {}", error.message),
                    ))
                }
            }
        }
    }

    fn create_directory(&self, path: &SharePath) -> Result<(), ShareError> {
        let remote = self.remote_path(path)?;
        self.client
            .mkdir(&remote, SmbMode::from(DIRECTORY_MODE))
            .map_err(|error| classify(&format!("mkdir '{remote}'"), &error))
    }

    fn append_line(&self, path: &SharePath, line: &str) -> Result<(), ShareError> {
        let remote = self.remote_path(path)?;
        let mut file = self
            .client
            .open_with(
                &remote,
                SmbOpenOptions::default().create(true).write(true).append(true),
            )
            .map_err(|error| classify(&format!("open '{remote}'"), &error))?;
        file.write_all(line.as_bytes())
            .map_err(|error| ShareError::from_io(&format!("write '{remote}'"), &error))?;
        file.flush()
            .map_err(|error| ShareError::from_io(&format!("flush '{remote}'"), &error))
    }

    fn list_directory(&self, path: &SharePath) -> Result<Vec<DirectoryEntry>, ShareError> {
        let remote = self.remote_path(path)?;
        let entries = self
            .client
            .list_dir(&remote)
            .map_err(|error| classify(&format!("list '{remote}'"), &error))?;

        Ok(entries
            .iter()
            .filter(|entry| entry.name() != "." && entry.name() != "..")
            .filter_map(|entry| {
                let kind = match entry.get_type() {
                    SmbDirentType::File => EntryKind::File,
                    SmbDirentType::Dir => EntryKind::Directory,
                    SmbDirentType::Link => EntryKind::SymbolicLink,
                    _ => return None,
                };
                Some(DirectoryEntry::new(entry.name(), kind))
            })
            .collect())
    }

    fn close(self) -> Result<(), ShareError> {
        drop(self.client);
        Ok(())
    }
}

fn classify(context: &str, error: &impl std::fmt::Display) -> ShareError {
    let message = error.to_string();
    let lowered = message.to_ascii_lowercase();
    let kind = if lowered.contains("permission") || lowered.contains("denied") {
        ErrorKind::Auth
    } else if lowered.contains("no such file") || lowered.contains("not found") {
        ErrorKind::NotFound
    } else {
        ErrorKind::Io
    };
    ShareError::new(kind, format!("{context}: {message}"))
}
