// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::error::OperationError;
use crate::types::RemoteServerLoggerData;

/// Remote operations exposed by the logging configuration admin service.
///
/// [`crate::http::HttpRemoteLoggingConfig`] binds these to the backend;
/// tests substitute their own implementation.
#[async_trait]
pub trait RemoteLoggingConfigService: Send + Sync {
    async fn add_remote_server_config(
        &self,
        data: &RemoteServerLoggerData,
    ) -> Result<(), OperationError>;

    async fn reset_remote_server_config(
        &self,
        data: &RemoteServerLoggerData,
        flag: bool,
    ) -> Result<(), OperationError>;

    async fn get_remote_server_configs(
        &self,
    ) -> Result<Vec<RemoteServerLoggerData>, OperationError>;

    /// Returns `None` when the service holds no configuration for `log_type`.
    async fn get_remote_server_config(
        &self,
        log_type: &str,
    ) -> Result<Option<RemoteServerLoggerData>, OperationError>;
}
