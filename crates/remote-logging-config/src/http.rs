// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! HTTP binding of the remote logging configuration admin service.
//!
//! Every operation is a `POST` of a JSON body to `{endpoint}/{operation}`,
//! carrying the session headers bound at construction. Non-success statuses
//! are turned into [`OperationError`] values; nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ConstructionError, OperationError, RemoteFault};
use crate::service::RemoteLoggingConfigService;
use crate::session::{SessionContext, SessionHeaders, SessionOptions};
use crate::types::RemoteServerLoggerData;

/// Service name appended to the backend URL.
pub const SERVICE_NAME: &str = "RemoteLoggingConfig";

const ADD_OPERATION: &str = "addRemoteServerConfig";
const RESET_OPERATION: &str = "resetRemoteServerConfig";
const LIST_OPERATION: &str = "getRemoteServerConfigs";
const GET_OPERATION: &str = "getRemoteServerConfig";

#[derive(Serialize)]
struct RecordRequest<'a> {
    data: &'a RemoteServerLoggerData,
}

#[derive(Serialize)]
struct ResetRequest<'a> {
    data: &'a RemoteServerLoggerData,
    flag: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogTypeRequest<'a> {
    log_type: &'a str,
}

/// Service handle bound to one endpoint and one session cookie.
#[derive(Debug, Clone)]
pub struct HttpRemoteLoggingConfig {
    client: Client,
    endpoint: Url,
    headers: SessionHeaders,
}

impl HttpRemoteLoggingConfig {
    /// Binds the service at `backend_url + "RemoteLoggingConfig"` to the
    /// session. No request is sent.
    pub fn new(
        cookie: &str,
        backend_url: &str,
        context: &SessionContext,
    ) -> Result<Self, ConstructionError> {
        let endpoint = service_endpoint(backend_url, context.options())?;
        let headers = SessionHeaders::new(cookie)?;
        debug!(endpoint = %endpoint, "Bound remote logging config service");

        Ok(Self {
            client: context.client().clone(),
            endpoint,
            headers,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn session_headers(&self) -> &SessionHeaders {
        &self.headers
    }

    fn operation_url(&self, operation: &str) -> Url {
        let mut url = self.endpoint.clone();
        // http(s) URLs always have path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(operation);
        }
        url
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        operation: &str,
        body: &B,
    ) -> Result<Response, OperationError> {
        let url = self.operation_url(operation);
        debug!(
            operation,
            url = %url,
            headers = ?self.headers.redacted(),
            "remote-logging-config HTTP request"
        );

        let response = self
            .headers
            .apply(self.client.post(url.clone()))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_bytes = match response.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!(operation, error = %e, "Failed to read error response body");
                    Default::default()
                }
            };
            debug!(
                operation,
                url = %url,
                status = %status,
                body = %String::from_utf8_lossy(&body_bytes),
                "remote-logging-config HTTP response"
            );
            return Err(classify_failure(status, &body_bytes));
        }

        debug!(
            operation,
            url = %url,
            status = %status,
            "remote-logging-config HTTP response"
        );
        Ok(response)
    }
}

#[async_trait]
impl RemoteLoggingConfigService for HttpRemoteLoggingConfig {
    async fn add_remote_server_config(
        &self,
        data: &RemoteServerLoggerData,
    ) -> Result<(), OperationError> {
        self.call(ADD_OPERATION, &RecordRequest { data }).await?;
        Ok(())
    }

    async fn reset_remote_server_config(
        &self,
        data: &RemoteServerLoggerData,
        flag: bool,
    ) -> Result<(), OperationError> {
        self.call(RESET_OPERATION, &ResetRequest { data, flag }).await?;
        Ok(())
    }

    async fn get_remote_server_configs(
        &self,
    ) -> Result<Vec<RemoteServerLoggerData>, OperationError> {
        let response = self.call(LIST_OPERATION, &json!({})).await?;
        let bytes = response.bytes().await?;
        Ok(decode_optional::<Vec<RemoteServerLoggerData>>(&bytes)?.unwrap_or_default())
    }

    async fn get_remote_server_config(
        &self,
        log_type: &str,
    ) -> Result<Option<RemoteServerLoggerData>, OperationError> {
        let response = self
            .call(GET_OPERATION, &LogTypeRequest { log_type })
            .await?;
        let bytes = response.bytes().await?;
        decode_optional(&bytes)
    }
}

/// Concatenates the backend URL and service name, then checks the result is
/// an absolute URL the session is allowed to talk to.
fn service_endpoint(
    backend_url: &str,
    options: &SessionOptions,
) -> Result<Url, ConstructionError> {
    let raw = format!("{backend_url}{SERVICE_NAME}");
    let url = Url::parse(&raw).map_err(|e| ConstructionError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "https" => {}
        "http" if options.allow_plaintext => {}
        "http" => return Err(ConstructionError::InsecureUrl(raw)),
        other => return Err(ConstructionError::UnsupportedScheme(other.to_string())),
    }
    Ok(url)
}

/// Empty bodies and JSON `null` both mean "no value".
fn decode_optional<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, OperationError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice(bytes)?)
}

fn classify_failure(status: StatusCode, body: &[u8]) -> OperationError {
    if status == StatusCode::UNAUTHORIZED {
        return OperationError::Unauthorized;
    }
    OperationError::Fault(parse_fault(status, body))
}

/// Extracts the fault code and reason from an error response body.
///
/// Accepts `{"fault": {"code", "reason"}}`, `{"faultcode", "faultstring"}`
/// and `{"message"}` shapes; anything else is reported as raw text.
fn parse_fault(status: StatusCode, body: &[u8]) -> RemoteFault {
    let value: Option<Value> = serde_json::from_slice(body).ok();
    let object = value.as_ref().and_then(|v| v.get("fault")).or(value.as_ref());

    let field = |names: &[&str]| -> Option<String> {
        let object = object?;
        names
            .iter()
            .find_map(|name| object.get(*name).and_then(Value::as_str))
            .map(str::to_string)
    };

    let code = field(&["code", "faultcode"]);
    let reason = field(&["reason", "faultstring", "message"]).unwrap_or_else(|| {
        let text = String::from_utf8_lossy(body).trim().to_string();
        if text.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown remote failure")
                .to_string()
        } else {
            text
        }
    });

    RemoteFault {
        status: status.as_u16(),
        code,
        reason,
    }
}
