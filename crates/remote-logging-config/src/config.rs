// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Environment-driven settings for an admin session.
//!
//! The embedding console can either build [`SessionOptions`] itself or derive
//! them, together with the backend URL and session cookie, from the process
//! environment.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::client::RemoteLoggingConfigClient;
use crate::error::ConstructionError;
use crate::session::{SessionContext, SessionOptions};

const ENV_BACKEND_URL: &str = "REMOTE_LOGGING_BACKEND_URL";
const ENV_SESSION_COOKIE: &str = "REMOTE_LOGGING_SESSION_COOKIE";
const ENV_ALLOW_PLAINTEXT: &str = "REMOTE_LOGGING_ALLOW_PLAINTEXT";
const ENV_NO_TLS_VALIDATION: &str = "REMOTE_LOGGING_NO_TLS_VALIDATION";
const ENV_TIMEOUT_SECS: &str = "REMOTE_LOGGING_TIMEOUT_SECS";
const ENV_PROXY_HTTPS: &str = "REMOTE_LOGGING_PROXY_HTTPS";
/// Fallback proxy variable shared with other tools.
const ENV_HTTPS_PROXY: &str = "HTTPS_PROXY";
const ENV_LOG_LEVEL: &str = "REMOTE_LOGGING_LOG_LEVEL";

const DEFAULT_LOG_LEVEL: &str = "info";
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteLoggingConfigEnv {
    /// Base URL of the admin services, e.g. `https://host:9443/services/`.
    pub backend_url: Option<String>,
    pub session_cookie: Option<String>,
    pub allow_plaintext: bool,
    pub no_tls_validation: bool,
    pub timeout: Option<Duration>,
    pub https_proxy: Option<String>,
    pub log_level: String,
}

impl Default for RemoteLoggingConfigEnv {
    fn default() -> Self {
        Self {
            backend_url: None,
            session_cookie: None,
            allow_plaintext: false,
            no_tls_validation: false,
            timeout: None,
            https_proxy: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl RemoteLoggingConfigEnv {
    pub fn from_os_env() -> Self {
        Self::from_env_iter(env::vars())
    }

    /// Builds settings from key/value pairs (typically for tests).
    pub fn from_env_iter<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let get = |key: &str| map.get(key).and_then(|value| sanitize_non_empty(value));

        // An unparseable timeout is kept as zero so validate() reports it.
        let timeout = get(ENV_TIMEOUT_SECS)
            .map(|secs| Duration::from_secs(secs.parse::<u64>().unwrap_or(0)));

        Self {
            backend_url: get(ENV_BACKEND_URL),
            session_cookie: get(ENV_SESSION_COOKIE),
            allow_plaintext: parse_bool(get(ENV_ALLOW_PLAINTEXT).as_deref(), false),
            no_tls_validation: parse_bool(get(ENV_NO_TLS_VALIDATION).as_deref(), false),
            timeout,
            https_proxy: get(ENV_PROXY_HTTPS).or_else(|| get(ENV_HTTPS_PROXY)),
            log_level: get(ENV_LOG_LEVEL)
                .map(|level| level.to_lowercase())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), ConstructionError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConstructionError::InvalidSetting(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(ConstructionError::InvalidSetting(format!(
                "{ENV_TIMEOUT_SECS} must be a positive number of seconds"
            )));
        }
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            allow_plaintext: self.allow_plaintext,
            accept_invalid_certs: self.no_tls_validation,
            timeout: self.timeout,
            https_proxy: self.https_proxy.clone(),
        }
    }

    /// Builds a session context and a client bound to the configured backend
    /// and cookie.
    pub fn connect(
        &self,
    ) -> Result<(SessionContext, RemoteLoggingConfigClient), ConstructionError> {
        self.validate()?;
        let backend_url = self
            .backend_url
            .as_deref()
            .ok_or(ConstructionError::MissingSetting(ENV_BACKEND_URL))?;
        let cookie = self
            .session_cookie
            .as_deref()
            .ok_or(ConstructionError::MissingSetting(ENV_SESSION_COOKIE))?;

        let context = SessionContext::new(self.session_options())?;
        let client = RemoteLoggingConfigClient::new(cookie, backend_url, &context)?;
        Ok((context, client))
    }
}

fn sanitize_non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value.map(|s| s.trim().to_ascii_lowercase()) {
        Some(ref v) if ["1", "true", "t", "yes", "y"].contains(&v.as_str()) => true,
        Some(ref v) if ["0", "false", "f", "no", "n"].contains(&v.as_str()) => false,
        _ => default,
    }
}
