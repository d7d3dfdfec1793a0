use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::error::CredentialError;

/// Raw secret content as returned by the store.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretPayload {
    Text(String),
    Binary(Vec<u8>),
}

impl SecretPayload {
    /// Binary secrets are stored base64-encoded; blobs that are not base64
    /// are accepted as plain UTF-8.
    pub fn into_text(self) -> Result<String, CredentialError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Binary(bytes) => {
                let trimmed = trim_ascii(&bytes);
                let decoded = STANDARD.decode(trimmed).unwrap_or(bytes);
                String::from_utf8(decoded).map_err(|_| CredentialError::InvalidBinary)
            }
        }
    }
}

impl std::fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(_) => f.write_str("SecretPayload::Text(<redacted>)"),
            Self::Binary(bytes) => write!(f, "SecretPayload::Binary({} bytes)", bytes.len()),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
    pub host: String,
    pub share: String,
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("share", &self.share)
            .finish()
    }
}

pub fn parse_credentials(payload: &str) -> Result<CredentialRecord, CredentialError> {
    let value: Value = serde_json::from_str(payload).map_err(CredentialError::Malformed)?;
    let Some(object) = value.as_object() else {
        return Err(CredentialError::NotAnObject);
    };

    Ok(CredentialRecord {
        username: required_string(object, "username")?,
        password: required_string(object, "password")?,
        host: required_string(object, "host")?,
        share: required_string(object, "share")?,
    })
}

fn required_string(object: &Map<String, Value>, key: &'static str) -> Result<String, CredentialError> {
    match object.get(key) {
        None => Err(CredentialError::MissingField(key)),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(CredentialError::NotAString(key)),
    }
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|byte| !byte.is_ascii_whitespace())
        .map_or(start, |index| index + 1);
    &bytes[start..end]
}
