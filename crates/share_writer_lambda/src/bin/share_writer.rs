use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use share_writer_lambda::adapters::secrets::SecretsStore;
use share_writer_lambda::config::ShareWriterConfig;
use share_writer_lambda::handlers::share_write::{handle_share_write, InvocationContext};
use share_writer_lambda::logging::JsonStderrLog;
use share_writer_lambda::runtime::credentials::SecretPayload;
use share_writer_lambda::runtime::error::{SecretsError, SecretsErrorCode};

#[cfg(not(feature = "smb"))]
use share_writer_lambda::adapters::mounted_share::MountedShareConnector;
#[cfg(feature = "smb")]
use share_writer_lambda::adapters::smb_share::SmbShareConnector;

const CURRENT_VERSION_STAGE: &str = "AWSCURRENT";

struct AwsSecretsStore {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsStore for AwsSecretsStore {
    fn get_secret(&self, secret_id: &str) -> Result<SecretPayload, SecretsError> {
        let client = self.client.clone();
        let secret_id = secret_id.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_secret_value()
                    .secret_id(secret_id)
                    .version_stage(CURRENT_VERSION_STAGE)
                    .send()
                    .await
                    .map_err(|error| {
                        let code = error
                            .as_service_error()
                            .and_then(|service_error| service_error.code())
                            .map(SecretsErrorCode::from_code)
                            .unwrap_or_else(|| SecretsErrorCode::Other("Unclassified".to_string()));
                        SecretsError::new(code, DisplayErrorContext(&error).to_string())
                    })?;

                if let Some(text) = output.secret_string() {
                    return Ok(SecretPayload::Text(text.to_string()));
                }
                if let Some(blob) = output.secret_binary() {
                    return Ok(SecretPayload::Binary(blob.as_ref().to_vec()));
                }
                Err(SecretsError::new(
                    SecretsErrorCode::Other("EmptySecret".to_string()),
                    "secret has neither a string nor a binary value",
                ))
            })
        })
    }
}

#[cfg(feature = "smb")]
fn share_connector(_config: &ShareWriterConfig) -> SmbShareConnector {
    SmbShareConnector
}

#[cfg(not(feature = "smb"))]
fn share_connector(config: &ShareWriterConfig) -> MountedShareConnector {
    MountedShareConnector::new(config.mount_root.clone())
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<String, Error> {
    let config = ShareWriterConfig::from_env().map_err(|error| Error::from(error.to_string()))?;

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;
    let secrets = AwsSecretsStore {
        client: aws_sdk_secretsmanager::Client::new(&aws_config),
    };

    let context = InvocationContext {
        request_id: event.context.request_id.clone(),
        secret_name: config.secret_name.clone(),
    };
    let log = JsonStderrLog::new("share_writer");

    handle_share_write(
        &event.payload,
        &context,
        &secrets,
        &share_connector(&config),
        &log,
    )
    .map(|outcome| outcome.message)
    .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
