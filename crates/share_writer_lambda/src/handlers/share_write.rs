use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::adapters::file_share::{ShareConnector, ShareSession};
use crate::adapters::secrets::SecretsStore;
use crate::logging::OperationalLog;
use crate::runtime::contract::{
    marker_line, resolve_input, success_message, DirectoryEntry, ResolvedInput,
};
use crate::runtime::credentials::{parse_credentials, CredentialRecord};
use crate::runtime::error::{CredentialError, ErrorKind, SecretsError, ShareError};
use crate::runtime::paths::{build_target_paths, SharePath, TargetPaths};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub secret_name: String,
}

/// Failures that abort the invocation before any share side effect.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error(transparent)]
    Secrets(#[from] SecretsError),
    #[error("invalid credential secret: {0}")]
    Credentials(#[from] CredentialError),
    #[error("invalid target path: {0}")]
    Path(#[from] ShareError),
}

impl InvocationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Secrets(error) => error.code.kind(),
            Self::Credentials(_) => ErrorKind::Parse,
            Self::Path(error) => error.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error_kind", rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Skipped,
    Failed(ErrorKind),
}

impl StepStatus {
    fn from_result<T>(result: &Result<T, ShareError>) -> Self {
        match result {
            Ok(_) => Self::Completed,
            Err(error) => Self::Failed(error.kind),
        }
    }
}

/// Per-step record of one invocation. `message` is the value handed back to
/// the trigger and is the same whether or not every step completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareWriteOutcome {
    pub message: String,
    pub input: ResolvedInput,
    pub paths: TargetPaths,
    pub session: StepStatus,
    pub directory: StepStatus,
    pub append: StepStatus,
    pub listing: StepStatus,
    pub release: StepStatus,
    pub entries: Vec<DirectoryEntry>,
}

impl ShareWriteOutcome {
    pub fn all_steps_completed(&self) -> bool {
        [
            self.session,
            self.directory,
            self.append,
            self.listing,
            self.release,
        ]
        .iter()
        .all(|status| *status == StepStatus::Completed)
    }
}

pub fn handle_share_write<C: ShareConnector>(
    event: &Value,
    context: &InvocationContext,
    secrets: &impl SecretsStore,
    connector: &C,
    log: &impl OperationalLog,
) -> Result<ShareWriteOutcome, InvocationError> {
    log.info(
        "invocation_started",
        json!({
            "request_id": context.request_id.clone(),
            "secret_name": context.secret_name.clone(),
        }),
    );

    let credentials = match load_credentials(context, secrets) {
        Ok(value) => value,
        Err(error) => {
            log.error(
                "credentials_unavailable",
                json!({
                    "request_id": context.request_id.clone(),
                    "error_kind": error.kind(),
                    "error": error.to_string(),
                }),
            );
            return Err(error);
        }
    };

    let input = resolve_input(event);
    if input.defaulted {
        log.info(
            "input_defaulted",
            json!({
                "directory": input.directory.clone(),
                "filename": input.filename.clone(),
            }),
        );
    }
    let paths = match build_target_paths(&credentials, &input) {
        Ok(paths) => paths,
        Err(error) => {
            log.error(
                "target_path_rejected",
                json!({
                    "directory": input.directory.clone(),
                    "filename": input.filename.clone(),
                    "error_kind": error.kind,
                    "error": error.message.clone(),
                }),
            );
            return Err(error.into());
        }
    };

    let scoped = ScopedSession::<C::Session>::open(connector, &credentials, log);
    let session = scoped.status();

    let directory_result = scoped
        .session()
        .and_then(|session| ensure_directory(session, &paths.directory, log));
    if let Err(error) = &directory_result {
        log_step_error(log, "directory_ensure_failed", &paths.directory, error);
    }
    let directory = StepStatus::from_result(&directory_result);

    let append = if directory == StepStatus::Completed {
        let append_result = scoped.session().and_then(|session| {
            session.append_line(&paths.file, &marker_line(&context.request_id))
        });
        match &append_result {
            Ok(()) => log.info(
                "marker_appended",
                json!({
                    "path": paths.file.to_string(),
                    "request_id": context.request_id.clone(),
                }),
            ),
            Err(error) => log_step_error(log, "marker_append_failed", &paths.file, error),
        }
        StepStatus::from_result(&append_result)
    } else {
        StepStatus::Skipped
    };

    let listing_result = scoped
        .session()
        .and_then(|session| session.list_directory(&paths.directory));
    let listing = StepStatus::from_result(&listing_result);
    let entries = match listing_result {
        Ok(entries) => {
            for entry in &entries {
                log.info(
                    "directory_entry",
                    json!({
                        "line": entry.log_line(),
                        "name": entry.name.clone(),
                        "kind": entry.kind,
                    }),
                );
            }
            entries
        }
        Err(error) => {
            log_step_error(log, "directory_listing_failed", &paths.directory, &error);
            Vec::new()
        }
    };

    let release = scoped.release(log);

    let outcome = ShareWriteOutcome {
        message: success_message(
            &input.filename,
            &input.directory,
            &credentials.share,
            &credentials.host,
        ),
        input,
        paths,
        session,
        directory,
        append,
        listing,
        release,
        entries,
    };

    log.info(
        "invocation_completed",
        json!({
            "request_id": context.request_id.clone(),
            "all_steps_completed": outcome.all_steps_completed(),
            "session": outcome.session,
            "directory": outcome.directory,
            "append": outcome.append,
            "listing": outcome.listing,
            "release": outcome.release,
            "entries": outcome.entries.len(),
        }),
    );

    Ok(outcome)
}

fn load_credentials(
    context: &InvocationContext,
    secrets: &impl SecretsStore,
) -> Result<CredentialRecord, InvocationError> {
    let payload = secrets.get_secret(&context.secret_name)?;
    let text = payload.into_text()?;
    Ok(parse_credentials(&text)?)
}

/// Creates every missing level of `directory` below the share root.
/// Returns whether anything was created.
pub fn ensure_directory(
    session: &impl ShareSession,
    directory: &SharePath,
    log: &impl OperationalLog,
) -> Result<bool, ShareError> {
    let mut created = false;
    for level in directory.ancestors_from_root() {
        if session.is_directory(&level)? {
            continue;
        }
        session.create_directory(&level)?;
        created = true;
        log.info("directory_created", json!({ "path": level.to_string() }));
    }
    if !created {
        log.info(
            "directory_present",
            json!({ "path": directory.to_string() }),
        );
    }
    Ok(created)
}

fn log_step_error(log: &impl OperationalLog, event: &str, path: &SharePath, error: &ShareError) {
    log.error(
        event,
        json!({
            "path": path.to_string(),
            "error_kind": error.kind,
            "error": error.message.clone(),
        }),
    );
}

/// Owns the invocation's session. Released exactly once, by `release` or on drop.
struct ScopedSession<S: ShareSession> {
    inner: Option<S>,
    status: StepStatus,
}

impl<S: ShareSession> ScopedSession<S> {
    fn open<C>(connector: &C, credentials: &CredentialRecord, log: &impl OperationalLog) -> Self
    where
        C: ShareConnector<Session = S>,
    {
        match connector.connect(credentials) {
            Ok(session) => {
                log.info(
                    "session_established",
                    json!({
                        "host": credentials.host.clone(),
                        "share": credentials.share.clone(),
                        "username": credentials.username.clone(),
                    }),
                );
                Self {
                    inner: Some(session),
                    status: StepStatus::Completed,
                }
            }
            Err(error) => {
                log.error(
                    "session_failed",
                    json!({
                        "host": credentials.host.clone(),
                        "share": credentials.share.clone(),
                        "error_kind": error.kind,
                        "error": error.message,
                    }),
                );
                Self {
                    inner: None,
                    status: StepStatus::Failed(error.kind),
                }
            }
        }
    }

    fn status(&self) -> StepStatus {
        self.status
    }

    fn session(&self) -> Result<&S, ShareError> {
        self.inner.as_ref().ok_or_else(ShareError::not_connected)
    }

    fn release(mut self, log: &impl OperationalLog) -> StepStatus {
        let Some(session) = self.inner.take() else {
            log.info("session_release_skipped", json!({}));
            return StepStatus::Skipped;
        };
        match session.close() {
            Ok(()) => {
                log.info("session_released", json!({}));
                StepStatus::Completed
            }
            Err(error) => {
                log.error(
                    "session_release_failed",
                    json!({
                        "error_kind": error.kind,
                        "error": error.message,
                    }),
                );
                StepStatus::Failed(error.kind)
            }
        }
    }
}

impl<S: ShareSession> Drop for ScopedSession<S> {
    fn drop(&mut self) {
        if let Some(session) = self.inner.take() {
            let _ = session.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::logging::MemoryLog;
    use crate::runtime::contract::EntryKind;
    use crate::runtime::credentials::SecretPayload;
    use crate::runtime::error::SecretsErrorCode;

    const SECRET: &str =
        r#"{"username":"svc","password":"hunter2","host":"10.0.0.5","share":"data"}"#;

    struct StaticSecrets {
        result: Result<SecretPayload, SecretsError>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticSecrets {
        fn text(payload: &str) -> Self {
            Self {
                result: Ok(SecretPayload::Text(payload.to_string())),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn binary(payload: Vec<u8>) -> Self {
            Self {
                result: Ok(SecretPayload::Binary(payload)),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing(code: SecretsErrorCode) -> Self {
            Self {
                result: Err(SecretsError::new(code, "store rejected the request")),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl SecretsStore for StaticSecrets {
        fn get_secret(&self, secret_id: &str) -> Result<SecretPayload, SecretsError> {
            self.requested
                .lock()
                .expect("poisoned mutex")
                .push(secret_id.to_string());
            self.result.clone()
        }
    }

    #[derive(Default)]
    struct ShareState {
        directories: BTreeSet<Vec<String>>,
        files: BTreeMap<Vec<String>, String>,
        connects: usize,
        closes: usize,
        mkdirs: usize,
    }

    #[derive(Default)]
    struct FakeConnector {
        state: Arc<Mutex<ShareState>>,
        fail_connect: bool,
        fail_mkdir: bool,
        fail_listing: bool,
    }

    impl FakeConnector {
        fn state(&self) -> std::sync::MutexGuard<'_, ShareState> {
            self.state.lock().expect("poisoned mutex")
        }
    }

    struct FakeSession {
        state: Arc<Mutex<ShareState>>,
        fail_mkdir: bool,
        fail_listing: bool,
    }

    impl ShareConnector for FakeConnector {
        type Session = FakeSession;

        fn connect(&self, _credentials: &CredentialRecord) -> Result<FakeSession, ShareError> {
            self.state().connects += 1;
            if self.fail_connect {
                return Err(ShareError::new(ErrorKind::Io, "host unreachable"));
            }
            Ok(FakeSession {
                state: Arc::clone(&self.state),
                fail_mkdir: self.fail_mkdir,
                fail_listing: self.fail_listing,
            })
        }
    }

    impl ShareSession for FakeSession {
        fn is_directory(&self, path: &SharePath) -> Result<bool, ShareError> {
            let state = self.state.lock().expect("poisoned mutex");
            Ok(state.directories.contains(path.segments()))
        }

        fn create_directory(&self, path: &SharePath) -> Result<(), ShareError> {
            if self.fail_mkdir {
                return Err(ShareError::new(ErrorKind::Auth, "access denied"));
            }
            let mut state = self.state.lock().expect("poisoned mutex");
            state.mkdirs += 1;
            state.directories.insert(path.segments().to_vec());
            Ok(())
        }

        fn append_line(&self, path: &SharePath, line: &str) -> Result<(), ShareError> {
            let mut state = self.state.lock().expect("poisoned mutex");
            state
                .files
                .entry(path.segments().to_vec())
                .or_default()
                .push_str(line);
            Ok(())
        }

        fn list_directory(&self, path: &SharePath) -> Result<Vec<DirectoryEntry>, ShareError> {
            if self.fail_listing {
                return Err(ShareError::new(ErrorKind::Io, "connection reset"));
            }
            let state = self.state.lock().expect("poisoned mutex");
            if !state.directories.contains(path.segments()) {
                return Err(ShareError::new(ErrorKind::NotFound, "no such directory"));
            }
            let depth = path.segments().len();
            let is_child =
                |key: &Vec<String>| key.len() == depth + 1 && key.starts_with(path.segments());
            let mut entries: Vec<DirectoryEntry> = state
                .directories
                .iter()
                .filter(|key| is_child(key))
                .map(|key| DirectoryEntry::new(key[depth].clone(), EntryKind::Directory))
                .collect();
            entries.extend(
                state
                    .files
                    .keys()
                    .filter(|key| is_child(key))
                    .map(|key| DirectoryEntry::new(key[depth].clone(), EntryKind::File)),
            );
            Ok(entries)
        }

        fn close(self) -> Result<(), ShareError> {
            self.state.lock().expect("poisoned mutex").closes += 1;
            Ok(())
        }
    }

    fn context() -> InvocationContext {
        InvocationContext {
            request_id: "req-0001".to_string(),
            secret_name: "FScredentials".to_string(),
        }
    }

    fn segments(path: &str) -> Vec<String> {
        path.split('/').map(str::to_string).collect()
    }

    #[test]
    fn writes_marker_and_returns_confirmation() {
        let secrets = StaticSecrets::text(SECRET);
        let connector = FakeConnector::default();
        let log = MemoryLog::new();

        let outcome = handle_share_write(
            &json!({"directory": "D", "filename": "F"}),
            &context(),
            &secrets,
            &connector,
            &log,
        )
        .expect("invocation should succeed");

        assert_eq!(
            outcome.message,
            "Successfully stored F file under D folder to data share on 10.0.0.5 host!"
        );
        assert!(outcome.all_steps_completed());
        assert_eq!(
            secrets.requested.lock().expect("poisoned mutex").clone(),
            vec!["FScredentials"]
        );

        let state = connector.state();
        assert_eq!(
            state.files.get(&segments("D/F")).map(String::as_str),
            Some("Added by AWS Lambda requestID: req-0001 \n")
        );
        assert_eq!((state.connects, state.closes), (1, 1));
    }

    #[test]
    fn repeated_invocations_append_without_recreating_directory() {
        let secrets = StaticSecrets::text(SECRET);
        let connector = FakeConnector::default();
        let log = MemoryLog::new();
        let event = json!({"directory": "D", "filename": "F"});

        handle_share_write(&event, &context(), &secrets, &connector, &log)
            .expect("first invocation should succeed");
        let second_context = InvocationContext {
            request_id: "req-0002".to_string(),
            ..context()
        };
        handle_share_write(&event, &second_context, &secrets, &connector, &log)
            .expect("second invocation should succeed");

        let state = connector.state();
        assert_eq!(state.mkdirs, 1);
        assert_eq!(
            state.files.get(&segments("D/F")).map(String::as_str),
            Some("Added by AWS Lambda requestID: req-0001 \nAdded by AWS Lambda requestID: req-0002 \n")
        );
        assert_eq!((state.connects, state.closes), (2, 2));
        assert!(log.events().contains(&"directory_present".to_string()));
    }

    #[test]
    fn missing_input_uses_default_directory_and_file() {
        let connector = FakeConnector::default();
        let outcome = handle_share_write(
            &json!({"filename": "only-file.txt"}),
            &context(),
            &StaticSecrets::text(SECRET),
            &connector,
            &MemoryLog::new(),
        )
        .expect("invocation should succeed");

        assert_eq!(outcome.input, ResolvedInput::defaults());
        assert_eq!(
            outcome.message,
            "Successfully stored TestFile.txt file under TestDir folder to data share on 10.0.0.5 host!"
        );
        assert!(connector
            .state()
            .files
            .contains_key(&segments("TestDir/TestFile.txt")));
    }

    #[test]
    fn secrets_errors_propagate_without_share_side_effects() {
        for code in [
            SecretsErrorCode::DecryptionFailure,
            SecretsErrorCode::InternalServiceError,
            SecretsErrorCode::InvalidParameter,
            SecretsErrorCode::InvalidRequest,
            SecretsErrorCode::ResourceNotFound,
        ] {
            let connector = FakeConnector::default();
            let log = MemoryLog::new();
            let error = handle_share_write(
                &json!({"directory": "D", "filename": "F"}),
                &context(),
                &StaticSecrets::failing(code.clone()),
                &connector,
                &log,
            )
            .expect_err("secrets failure should abort");

            match error {
                InvocationError::Secrets(inner) => assert_eq!(inner.code, code),
                other => panic!("unexpected error: {other:?}"),
            }
            let state = connector.state();
            assert_eq!(state.connects, 0);
            assert!(state.directories.is_empty() && state.files.is_empty());
            assert_eq!(log.errors().len(), 1);
        }
    }

    #[test]
    fn malformed_secret_aborts_before_connecting() {
        let connector = FakeConnector::default();
        let error = handle_share_write(
            &json!({}),
            &context(),
            &StaticSecrets::text(r#"{"username":"svc","password":"p","host":"h"}"#),
            &connector,
            &MemoryLog::new(),
        )
        .expect_err("missing share key should abort");

        assert_eq!(error.kind(), ErrorKind::Parse);
        assert!(error.to_string().contains("'share'"));
        assert_eq!(connector.state().connects, 0);
    }

    #[test]
    fn base64_binary_secret_is_decoded_before_parsing() {
        // Standard base64 of SECRET.
        let encoded = b"eyJ1c2VybmFtZSI6InN2YyIsInBhc3N3b3JkIjoiaHVudGVyMiIsImhvc3QiOiIxMC4wLjAuNSIsInNoYXJlIjoiZGF0YSJ9".to_vec();
        let connector = FakeConnector::default();

        let outcome = handle_share_write(
            &json!({"directory": "D", "filename": "F"}),
            &context(),
            &StaticSecrets::binary(encoded),
            &connector,
            &MemoryLog::new(),
        )
        .expect("binary secret should be accepted");

        assert_eq!(
            outcome.message,
            "Successfully stored F file under D folder to data share on 10.0.0.5 host!"
        );
        assert!(outcome.all_steps_completed());
        assert!(connector.state().files.contains_key(&segments("D/F")));
    }

    #[test]
    fn undecodable_binary_secret_aborts_before_connecting() {
        let connector = FakeConnector::default();
        let log = MemoryLog::new();

        let error = handle_share_write(
            &json!({"directory": "D", "filename": "F"}),
            &context(),
            &StaticSecrets::binary(vec![0xff, 0xfe, 0x00]),
            &connector,
            &log,
        )
        .expect_err("non UTF-8 binary secret should abort");

        assert!(matches!(
            error,
            InvocationError::Credentials(CredentialError::InvalidBinary)
        ));
        assert_eq!(error.kind(), ErrorKind::Parse);
        assert_eq!(connector.state().connects, 0);
        assert_eq!(log.errors().len(), 1);
    }

    #[test]
    fn escaping_target_path_aborts_before_connecting() {
        for event in [
            json!({"directory": "../other/x", "filename": "F"}),
            json!({"directory": "D", "filename": "../../F"}),
        ] {
            let connector = FakeConnector::default();
            let log = MemoryLog::new();

            let error = handle_share_write(
                &event,
                &context(),
                &StaticSecrets::text(SECRET),
                &connector,
                &log,
            )
            .expect_err("escaping path should abort");

            assert!(matches!(error, InvocationError::Path(_)));
            assert_eq!(error.kind(), ErrorKind::Parse);
            let state = connector.state();
            assert_eq!(state.connects, 0);
            assert!(state.directories.is_empty() && state.files.is_empty());
            assert!(log.events().contains(&"target_path_rejected".to_string()));
        }
    }

    #[test]
    fn session_failure_is_logged_and_still_returns_confirmation() {
        let connector = FakeConnector {
            fail_connect: true,
            ..FakeConnector::default()
        };
        let log = MemoryLog::new();

        let outcome = handle_share_write(
            &json!({"directory": "D", "filename": "F"}),
            &context(),
            &StaticSecrets::text(SECRET),
            &connector,
            &log,
        )
        .expect("session failure is not fatal");

        assert!(outcome.message.starts_with("Successfully stored F file under D folder"));
        assert_eq!(outcome.session, StepStatus::Failed(ErrorKind::Io));
        assert_eq!(outcome.directory, StepStatus::Failed(ErrorKind::NotConnected));
        assert_eq!(outcome.append, StepStatus::Skipped);
        assert_eq!(outcome.listing, StepStatus::Failed(ErrorKind::NotConnected));
        assert_eq!(outcome.release, StepStatus::Skipped);
        assert!(!outcome.all_steps_completed());

        let state = connector.state();
        assert!(state.files.is_empty());
        assert_eq!(state.closes, 0);
        let events = log.events();
        assert!(events.contains(&"session_failed".to_string()));
        assert!(events.contains(&"session_release_skipped".to_string()));
    }

    #[test]
    fn directory_failure_skips_append_but_lists_and_releases() {
        let connector = FakeConnector {
            fail_mkdir: true,
            ..FakeConnector::default()
        };
        let log = MemoryLog::new();

        let outcome = handle_share_write(
            &json!({"directory": "D", "filename": "F"}),
            &context(),
            &StaticSecrets::text(SECRET),
            &connector,
            &log,
        )
        .expect("directory failure is not fatal");

        assert_eq!(outcome.directory, StepStatus::Failed(ErrorKind::Auth));
        assert_eq!(outcome.append, StepStatus::Skipped);
        assert_eq!(outcome.listing, StepStatus::Failed(ErrorKind::NotFound));
        assert_eq!(outcome.release, StepStatus::Completed);
        assert_eq!(
            outcome.message,
            "Successfully stored F file under D folder to data share on 10.0.0.5 host!"
        );

        let state = connector.state();
        assert!(state.files.is_empty());
        assert_eq!(state.closes, 1);
        let events = log.events();
        assert!(events.contains(&"directory_ensure_failed".to_string()));
        assert!(!events.contains(&"marker_appended".to_string()));
    }

    #[test]
    fn listing_failure_still_releases_session_once() {
        let connector = FakeConnector {
            fail_listing: true,
            ..FakeConnector::default()
        };

        let outcome = handle_share_write(
            &json!({"directory": "D", "filename": "F"}),
            &context(),
            &StaticSecrets::text(SECRET),
            &connector,
            &MemoryLog::new(),
        )
        .expect("listing failure is not fatal");

        assert_eq!(outcome.append, StepStatus::Completed);
        assert_eq!(outcome.listing, StepStatus::Failed(ErrorKind::Io));
        assert_eq!(outcome.release, StepStatus::Completed);
        assert_eq!(connector.state().closes, 1);
    }

    #[test]
    fn each_listed_entry_is_logged_once() {
        let connector = FakeConnector::default();
        {
            let mut state = connector.state();
            state.directories.insert(segments("D"));
            state.directories.insert(segments("D/archive"));
            state.files.insert(segments("D/old.txt"), String::new());
        }
        let log = MemoryLog::new();

        let outcome = handle_share_write(
            &json!({"directory": "D", "filename": "F"}),
            &context(),
            &StaticSecrets::text(SECRET),
            &connector,
            &log,
        )
        .expect("invocation should succeed");

        let mut lines: Vec<String> = log
            .entries()
            .into_iter()
            .filter(|entry| entry.event == "directory_entry")
            .filter_map(|entry| entry.details["line"].as_str().map(str::to_string))
            .collect();
        lines.sort();
        assert_eq!(lines, vec!["Dir: archive", "File: F", "File: old.txt"]);
        assert_eq!(outcome.entries.len(), 3);
    }

    #[test]
    fn nested_directories_are_created_level_by_level() {
        let connector = FakeConnector::default();
        handle_share_write(
            &json!({"directory": "a/b/c", "filename": "F"}),
            &context(),
            &StaticSecrets::text(SECRET),
            &connector,
            &MemoryLog::new(),
        )
        .expect("invocation should succeed");

        let state = connector.state();
        assert_eq!(state.mkdirs, 3);
        assert!(state.directories.contains(&segments("a/b")));
        assert!(state.files.contains_key(&segments("a/b/c/F")));
    }

    #[test]
    fn dropping_scoped_session_releases_it() {
        let connector = FakeConnector::default();
        let credentials = parse_credentials(SECRET).expect("secret should parse");
        {
            let _scoped = ScopedSession::open(&connector, &credentials, &MemoryLog::new());
        }
        assert_eq!(connector.state().closes, 1);
    }
}
