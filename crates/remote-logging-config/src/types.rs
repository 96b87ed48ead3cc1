// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Record types exchanged with the remote logging configuration service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Log type of the audit log appender.
pub const AUDIT_LOG: &str = "AUDIT_LOG";
/// Log type of the main server log appender.
pub const CARBON_LOG: &str = "CARBON_LOG";
/// Log type of the API log appender.
pub const API_LOG: &str = "API_LOG";

/// Remote log-forwarding destination configuration, keyed by log type.
///
/// The schema belongs to the remote service. Fields this crate does not know
/// about are kept in `extra` so the record is forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteServerLoggerData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_type: Option<String>,
    /// Destination URL the server forwards its logs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_millis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_hostname: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystore_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystore_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truststore_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truststore_password: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RemoteServerLoggerData {
    /// Creates an otherwise empty record for the given log type.
    pub fn for_log_type(log_type: impl Into<String>) -> Self {
        Self {
            log_type: Some(log_type.into()),
            ..Default::default()
        }
    }
}
