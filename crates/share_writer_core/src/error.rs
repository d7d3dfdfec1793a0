use serde::Serialize;
use thiserror::Error;

/// Coarse classification shared by every failure the handler observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Auth,
    NotFound,
    Io,
    Parse,
    NotConnected,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::NotFound => "not_found",
            Self::Io => "io",
            Self::Parse => "parse",
            Self::NotConnected => "not_connected",
        }
    }
}

/// Error codes documented for `GetSecretValue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretsErrorCode {
    DecryptionFailure,
    InternalServiceError,
    InvalidParameter,
    InvalidRequest,
    ResourceNotFound,
    Other(String),
}

impl SecretsErrorCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "DecryptionFailure" | "DecryptionFailureException" => Self::DecryptionFailure,
            "InternalServiceError" | "InternalServiceErrorException" => {
                Self::InternalServiceError
            }
            "InvalidParameterException" => Self::InvalidParameter,
            "InvalidRequestException" => Self::InvalidRequest,
            "ResourceNotFoundException" => Self::ResourceNotFound,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::DecryptionFailure => "DecryptionFailure",
            Self::InternalServiceError => "InternalServiceError",
            Self::InvalidParameter => "InvalidParameterException",
            Self::InvalidRequest => "InvalidRequestException",
            Self::ResourceNotFound => "ResourceNotFoundException",
            Self::Other(code) => code,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DecryptionFailure => ErrorKind::Auth,
            Self::ResourceNotFound => ErrorKind::NotFound,
            Self::InvalidParameter | Self::InvalidRequest => ErrorKind::Parse,
            Self::InternalServiceError | Self::Other(_) => ErrorKind::Io,
        }
    }
}

/// A secrets-store failure, carried to the caller without recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("secrets store returned {}: {message}", .code.as_str())]
pub struct SecretsError {
    pub code: SecretsErrorCode,
    pub message: String,
}

impl SecretsError {
    pub fn new(code: SecretsErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("secret payload is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("secret payload must be a JSON object")]
    NotAnObject,
    #[error("secret payload is missing required key '{0}'")]
    MissingField(&'static str),
    #[error("secret key '{0}' must be a string")]
    NotAString(&'static str),
    #[error("binary secret is not valid UTF-8 text")]
    InvalidBinary,
}

/// Failure reported by a file-share backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} error: {message}", .kind.as_str())]
pub struct ShareError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ShareError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_connected() -> Self {
        Self::new(ErrorKind::NotConnected, "no active share session")
    }

    pub fn from_io(context: &str, error: &std::io::Error) -> Self {
        let kind = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Auth,
            std::io::ErrorKind::InvalidInput | std::io::ErrorKind::InvalidData => {
                ErrorKind::Parse
            }
            _ => ErrorKind::Io,
        };
        Self::new(kind, format!("{context}: {error}"))
    }
}
