// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Errors raised while binding a client to its endpoint and session.
#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    #[error("invalid service endpoint '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported endpoint scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("insecure endpoint requires explicit opt-in: {0}")]
    InsecureUrl(String),

    #[error("session cookie is not a valid header value")]
    InvalidCookie,

    #[error("missing setting: {0}")]
    MissingSetting(&'static str),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error("TLS configuration error: {0}")]
    Tls(String),

    #[error("failed to build HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Fault reported by the remote service for a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFault {
    /// HTTP status of the response carrying the fault.
    pub status: u16,
    /// Fault code, when the service reports one.
    pub code: Option<String>,
    pub reason: String,
}

impl fmt::Display for RemoteFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({}, status {})", self.reason, code, self.status),
            None => write!(f, "{} (status {})", self.reason, self.status),
        }
    }
}

/// Errors surfaced by forwarded remote operations.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// The service rejected the session cookie.
    #[error("unauthorized - session cookie rejected by the backend")]
    Unauthorized,

    #[error("remote fault: {0}")]
    Fault(RemoteFault),

    /// DNS, TLS, socket or protocol failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response payload: {0}")]
    Decode(#[from] serde_json::Error),
}
