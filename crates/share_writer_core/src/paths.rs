use std::fmt;

use crate::contract::ResolvedInput;
use crate::credentials::CredentialRecord;
use crate::error::{ErrorKind, ShareError};

/// A location on a file share, addressed as host, share and path segments.
/// Segments never contain `..`, so a path cannot climb above its share root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePath {
    host: String,
    share: String,
    segments: Vec<String>,
}

impl SharePath {
    pub fn share_root(host: impl Into<String>, share: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            share: share.into(),
            segments: Vec::new(),
        }
    }

    /// Appends `relative`, treating both `/` and `\` as separators.
    /// Rejects any `..` segment.
    pub fn join(&self, relative: &str) -> Result<Self, ShareError> {
        let mut segments = self.segments.clone();
        for segment in relative.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    return Err(ShareError::new(
                        ErrorKind::Parse,
                        format!("path '{relative}' escapes the {} share root", self.share),
                    ))
                }
                other => segments.push(other.to_string()),
            }
        }
        Ok(Self {
            host: self.host.clone(),
            share: self.share.clone(),
            segments,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn share(&self) -> &str {
        &self.share
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Every ancestor below the share root, ending with `self`.
    pub fn ancestors_from_root(&self) -> Vec<SharePath> {
        (1..=self.segments.len())
            .map(|depth| Self {
                host: self.host.clone(),
                share: self.share.clone(),
                segments: self.segments[..depth].to_vec(),
            })
            .collect()
    }

    /// Path relative to the share root, `/`-rooted.
    pub fn share_relative(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl fmt::Display for SharePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host, self.share)?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    pub directory: SharePath,
    pub file: SharePath,
}

pub fn build_target_paths(
    credentials: &CredentialRecord,
    input: &ResolvedInput,
) -> Result<TargetPaths, ShareError> {
    let directory =
        SharePath::share_root(&credentials.host, &credentials.share).join(&input.directory)?;
    let file = directory.join(&input.filename)?;
    Ok(TargetPaths { directory, file })
}
