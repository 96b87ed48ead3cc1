// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Session-scoped transport state.
//!
//! A [`SessionContext`] is owned by the embedding admin console and shared by
//! every client created for that session. [`SessionHeaders`] is the fixed set
//! of headers a single client attaches to all of its requests.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::{Client, RequestBuilder};

use crate::error::ConstructionError;
use crate::tls::create_reqwest_client_builder;

/// Transport options applied when building a [`SessionContext`].
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Whether plaintext (HTTP) endpoints are allowed.
    pub allow_plaintext: bool,
    /// Whether TLS certificate validation should be skipped.
    pub accept_invalid_certs: bool,
    /// Per-request timeout. The transport default applies when unset.
    pub timeout: Option<Duration>,
    pub https_proxy: Option<String>,
}

/// Transport environment of an administrative session.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct SessionContext {
    client: Client,
    options: SessionOptions,
}

impl SessionContext {
    pub fn new(options: SessionOptions) -> Result<Self, ConstructionError> {
        let client = create_reqwest_client_builder(&options)?.build()?;

        Ok(Self { client, options })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

/// Headers bound to one client at construction and attached to every request.
#[derive(Debug, Clone)]
pub struct SessionHeaders {
    headers: HeaderMap,
}

impl SessionHeaders {
    /// Binds the session cookie. The cookie is not interpreted, only checked
    /// to be a legal header value.
    pub fn new(cookie: &str) -> Result<Self, ConstructionError> {
        let mut cookie_value =
            HeaderValue::from_str(cookie).map_err(|_| ConstructionError::InvalidCookie)?;
        cookie_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(Self { headers })
    }

    /// Returns the bound session cookie.
    pub fn cookie(&self) -> Option<&str> {
        self.headers
            .get(COOKIE)
            .and_then(|value| value.to_str().ok())
    }

    pub fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.headers(self.headers.clone())
    }

    /// Returns the headers with session material masked, for debug logging.
    pub fn redacted(&self) -> Vec<(String, String)> {
        redact_headers(&self.headers)
    }
}

fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    const SENSITIVE_HEADERS: [&str; 2] = ["cookie", "authorization"];

    headers
        .iter()
        .map(|(name, value)| {
            let lower = name.as_str().to_ascii_lowercase();
            let display = if SENSITIVE_HEADERS.contains(&lower.as_str()) {
                "<redacted>".to_string()
            } else {
                value
                    .to_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|_| "<non-utf8>".to_string())
            };
            (lower, display)
        })
        .collect()
}
