use crate::runtime::credentials::SecretPayload;
use crate::runtime::error::SecretsError;

pub trait SecretsStore {
    fn get_secret(&self, secret_id: &str) -> Result<SecretPayload, SecretsError>;
}
