// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Admin client for the remote server logger configurations of a backend.
//!
//! Each operation forwards to the bound [`RemoteLoggingConfigService`]. A
//! failure is logged once at ERROR level and returned to the caller as-is.

use reqwest::Url;
use tracing::error;

use crate::error::{ConstructionError, OperationError};
use crate::http::HttpRemoteLoggingConfig;
use crate::service::RemoteLoggingConfigService;
use crate::session::SessionContext;
use crate::types::RemoteServerLoggerData;

const ADD_FAILED: &str = "Error occurred while adding remote server configuration.";
const RESET_FAILED: &str = "Error occurred while resetting remote server configuration.";
const GET_FAILED: &str = "Error occurred while getting remote server configuration.";

/// Mode flag sent with every reset request.
const RESET_FLAG: bool = false;

#[derive(Debug, Clone)]
pub struct RemoteLoggingConfigClient<S = HttpRemoteLoggingConfig> {
    service: S,
}

impl RemoteLoggingConfigClient<HttpRemoteLoggingConfig> {
    /// Binds a client to `backend_url + "RemoteLoggingConfig"` and the given
    /// session cookie. No request is sent.
    ///
    /// Plaintext `http://` backends are rejected unless the context was built
    /// with [`SessionOptions::allow_plaintext`](crate::session::SessionOptions).
    pub fn new(
        cookie: &str,
        backend_url: &str,
        context: &SessionContext,
    ) -> Result<Self, ConstructionError> {
        let service = HttpRemoteLoggingConfig::new(cookie, backend_url, context)?;
        Ok(Self { service })
    }

    pub fn endpoint(&self) -> &Url {
        self.service.endpoint()
    }
}

impl<S: RemoteLoggingConfigService> RemoteLoggingConfigClient<S> {
    pub fn with_service(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn add_remote_server_config(
        &self,
        data: &RemoteServerLoggerData,
    ) -> Result<(), OperationError> {
        self.service
            .add_remote_server_config(data)
            .await
            .inspect_err(|e| error!(error = %e, "{}", ADD_FAILED))
    }

    /// Resets the configuration identified by `data`. The remote reset mode
    /// flag is always `false`.
    pub async fn reset_remote_server_config(
        &self,
        data: &RemoteServerLoggerData,
    ) -> Result<(), OperationError> {
        self.service
            .reset_remote_server_config(data, RESET_FLAG)
            .await
            .inspect_err(|e| error!(error = %e, "{}", RESET_FAILED))
    }

    /// Returns every configuration in the order the service lists them.
    pub async fn get_remote_server_configs(
        &self,
    ) -> Result<Vec<RemoteServerLoggerData>, OperationError> {
        self.service
            .get_remote_server_configs()
            .await
            .inspect_err(|e| error!(error = %e, "{}", GET_FAILED))
    }

    pub async fn get_remote_server_config(
        &self,
        log_type: &str,
    ) -> Result<Option<RemoteServerLoggerData>, OperationError> {
        self.service
            .get_remote_server_config(log_type)
            .await
            .inspect_err(|e| error!(error = %e, log_type, "{}", GET_FAILED))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RemoteFault;
    use crate::session::SessionOptions;
    use crate::types::{API_LOG, AUDIT_LOG, CARBON_LOG};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Add(RemoteServerLoggerData),
        Reset(RemoteServerLoggerData, bool),
        List,
        Get(String),
    }

    /// Records calls and answers from a fixed script.
    #[derive(Default)]
    struct RecordingService {
        calls: Mutex<Vec<Call>>,
        records: Vec<RemoteServerLoggerData>,
        fault: Option<RemoteFault>,
    }

    impl RecordingService {
        fn failing(fault: RemoteFault) -> Self {
            Self {
                fault: Some(fault),
                ..Default::default()
            }
        }

        fn serving(records: Vec<RemoteServerLoggerData>) -> Self {
            Self {
                records,
                ..Default::default()
            }
        }

        fn record(&self, call: Call) -> Result<(), OperationError> {
            self.calls.lock().unwrap().push(call);
            match &self.fault {
                Some(fault) => Err(OperationError::Fault(fault.clone())),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteLoggingConfigService for RecordingService {
        async fn add_remote_server_config(
            &self,
            data: &RemoteServerLoggerData,
        ) -> Result<(), OperationError> {
            self.record(Call::Add(data.clone()))
        }

        async fn reset_remote_server_config(
            &self,
            data: &RemoteServerLoggerData,
            flag: bool,
        ) -> Result<(), OperationError> {
            self.record(Call::Reset(data.clone(), flag))
        }

        async fn get_remote_server_configs(
            &self,
        ) -> Result<Vec<RemoteServerLoggerData>, OperationError> {
            self.record(Call::List)?;
            Ok(self.records.clone())
        }

        async fn get_remote_server_config(
            &self,
            log_type: &str,
        ) -> Result<Option<RemoteServerLoggerData>, OperationError> {
            self.record(Call::Get(log_type.to_string()))?;
            Ok(self
                .records
                .iter()
                .find(|r| r.log_type.as_deref() == Some(log_type))
                .cloned())
        }
    }

    fn fault() -> RemoteFault {
        RemoteFault {
            status: 500,
            code: Some("Server".to_string()),
            reason: "Appender not found".to_string(),
        }
    }

    fn audit_record() -> RemoteServerLoggerData {
        RemoteServerLoggerData {
            url: Some("https://logs.example.com/audit".to_string()),
            verify_hostname: Some(false),
            ..RemoteServerLoggerData::for_log_type(AUDIT_LOG)
        }
    }

    fn single_error(lines: &[&str], expected: &str) -> Result<(), String> {
        let errors: Vec<_> = lines.iter().filter(|line| line.contains("ERROR")).collect();
        match errors.as_slice() {
            [line] if line.contains(expected) => Ok(()),
            _ => Err(format!(
                "expected one error containing {expected:?}, got {errors:?}"
            )),
        }
    }

    #[test]
    fn new_binds_endpoint() {
        let context = SessionContext::new(SessionOptions::default()).unwrap();
        let client = RemoteLoggingConfigClient::new(
            "JSESSIONID=abc",
            "https://host:9443/services/",
            &context,
        )
        .unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://host:9443/services/RemoteLoggingConfig"
        );
        assert_eq!(
            client.service().session_headers().cookie(),
            Some("JSESSIONID=abc")
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn add_forwards_record_verbatim() {
        let client = RemoteLoggingConfigClient::with_service(RecordingService::default());
        let record = audit_record();

        client.add_remote_server_config(&record).await.unwrap();

        assert_eq!(client.service().calls(), vec![Call::Add(record)]);
        assert!(!logs_contain("ERROR"));
    }

    #[tokio::test]
    #[traced_test]
    async fn add_failure_logs_and_returns_same_fault() {
        let client = RemoteLoggingConfigClient::with_service(RecordingService::failing(fault()));

        let err = client
            .add_remote_server_config(&audit_record())
            .await
            .unwrap_err();

        assert!(matches!(err, OperationError::Fault(ref f) if *f == fault()));
        assert!(logs_contain(
            "Error occurred while adding remote server configuration."
        ));
        assert!(logs_contain("Appender not found"));
        logs_assert(|lines: &[&str]| single_error(lines, ADD_FAILED));
    }

    #[tokio::test]
    #[traced_test]
    async fn add_over_http_logs_unreachable_backend_once() {
        let context = SessionContext::new(SessionOptions {
            allow_plaintext: true,
            ..Default::default()
        })
        .unwrap();
        let client = RemoteLoggingConfigClient::new(
            "JSESSIONID=abc",
            "http://127.0.0.1:1/services/",
            &context,
        )
        .unwrap();

        let err = client
            .add_remote_server_config(&audit_record())
            .await
            .unwrap_err();

        assert!(matches!(err, OperationError::Transport(_)));
        logs_assert(|lines: &[&str]| single_error(lines, ADD_FAILED));
    }

    #[tokio::test]
    async fn reset_always_sends_false_flag() {
        let client = RemoteLoggingConfigClient::with_service(RecordingService::default());
        let record = RemoteServerLoggerData::for_log_type(CARBON_LOG);

        client.reset_remote_server_config(&record).await.unwrap();
        client.reset_remote_server_config(&record).await.unwrap();

        assert_eq!(
            client.service().calls(),
            vec![
                Call::Reset(record.clone(), false),
                Call::Reset(record, false)
            ]
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn reset_failure_logs_and_returns_same_fault() {
        let client = RemoteLoggingConfigClient::with_service(RecordingService::failing(fault()));

        let err = client
            .reset_remote_server_config(&audit_record())
            .await
            .unwrap_err();

        assert!(matches!(err, OperationError::Fault(ref f) if *f == fault()));
        logs_assert(|lines: &[&str]| single_error(lines, RESET_FAILED));
    }

    #[tokio::test]
    async fn list_returns_records_in_remote_order() {
        let records = vec![
            RemoteServerLoggerData::for_log_type(CARBON_LOG),
            audit_record(),
        ];
        let client =
            RemoteLoggingConfigClient::with_service(RecordingService::serving(records.clone()));

        assert_eq!(client.get_remote_server_configs().await.unwrap(), records);
        assert_eq!(client.service().calls(), vec![Call::List]);
    }

    #[tokio::test]
    #[traced_test]
    async fn list_failure_logs_and_returns_same_fault() {
        let client = RemoteLoggingConfigClient::with_service(RecordingService::failing(fault()));

        let err = client.get_remote_server_configs().await.unwrap_err();

        assert!(matches!(err, OperationError::Fault(ref f) if *f == fault()));
        logs_assert(|lines: &[&str]| single_error(lines, GET_FAILED));
    }

    #[tokio::test]
    async fn get_returns_exact_record_for_log_type() {
        let client = RemoteLoggingConfigClient::with_service(RecordingService::serving(vec![
            RemoteServerLoggerData::for_log_type(CARBON_LOG),
            audit_record(),
        ]));

        let found = client.get_remote_server_config("AUDIT_LOG").await.unwrap();

        assert_eq!(found, Some(audit_record()));
        assert_eq!(
            client.service().calls(),
            vec![Call::Get("AUDIT_LOG".to_string())]
        );
    }

    #[tokio::test]
    async fn get_passes_through_missing_record() {
        let client = RemoteLoggingConfigClient::with_service(RecordingService::default());
        assert_eq!(
            client.get_remote_server_config(API_LOG).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn get_failure_logs_and_returns_same_fault() {
        let client = RemoteLoggingConfigClient::with_service(RecordingService::failing(fault()));

        let err = client
            .get_remote_server_config(AUDIT_LOG)
            .await
            .unwrap_err();

        assert!(matches!(err, OperationError::Fault(ref f) if *f == fault()));
        logs_assert(|lines: &[&str]| single_error(lines, GET_FAILED));
    }
}
