use std::path::PathBuf;

use thiserror::Error;

use crate::runtime::contract::DEFAULT_SECRET_NAME;

pub const REGION_VAR: &str = "AWS_REGION";
pub const SECRET_NAME_VAR: &str = "SHARE_CREDENTIALS_SECRET";
pub const MOUNT_ROOT_VAR: &str = "SHARE_MOUNT_ROOT";
pub const DEFAULT_MOUNT_ROOT: &str = "/mnt/shares";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareWriterConfig {
    pub region: String,
    pub secret_name: String,
    pub mount_root: PathBuf,
}

impl ShareWriterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            region: non_empty(REGION_VAR).ok_or(ConfigError::Missing(REGION_VAR))?,
            secret_name: non_empty(SECRET_NAME_VAR)
                .unwrap_or_else(|| DEFAULT_SECRET_NAME.to_string()),
            mount_root: non_empty(MOUNT_ROOT_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MOUNT_ROOT)),
        })
    }
}
