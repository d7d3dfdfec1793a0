use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_SECRET_NAME: &str = "FScredentials";
pub const DEFAULT_DIRECTORY: &str = "TestDir";
pub const DEFAULT_FILENAME: &str = "TestFile.txt";
pub const MARKER_PREFIX: &str = "Added by AWS Lambda requestID:";

/// Trigger payload. Both keys must be present for either to be used.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InvocationInput {
    pub directory: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub directory: String,
    pub filename: String,
    pub defaulted: bool,
}

impl ResolvedInput {
    pub fn defaults() -> Self {
        Self {
            directory: DEFAULT_DIRECTORY.to_string(),
            filename: DEFAULT_FILENAME.to_string(),
            defaulted: true,
        }
    }
}

pub fn resolve_input(event: &Value) -> ResolvedInput {
    match InvocationInput::deserialize(event) {
        Ok(input) => ResolvedInput {
            directory: input.directory,
            filename: input.filename,
            defaulted: false,
        },
        Err(_) => ResolvedInput::defaults(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
    SymbolicLink,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Directory => "Dir",
            Self::SymbolicLink => "Symlink",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn log_line(&self) -> String {
        format!("{}: {}", self.kind.label(), self.name)
    }
}

pub fn marker_line(request_id: &str) -> String {
    format!("{MARKER_PREFIX} {request_id} \n")
}

pub fn success_message(filename: &str, directory: &str, share: &str, host: &str) -> String {
    format!(
        "Successfully stored {filename} file under {directory} folder to {share} share on {host} host!"
    )
}
