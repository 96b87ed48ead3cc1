// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Admin client for the remote server logger configurations of a backend.
//!
//! A [`RemoteLoggingConfigClient`] is bound to one service endpoint and one
//! session cookie at construction, then forwards add, reset, list and
//! get-by-type calls to the remote `RemoteLoggingConfig` service.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod service;
pub mod session;
pub mod tls;
pub mod types;

pub use client::RemoteLoggingConfigClient;
pub use config::RemoteLoggingConfigEnv;
pub use error::{ConstructionError, OperationError, RemoteFault};
pub use http::{HttpRemoteLoggingConfig, SERVICE_NAME};
pub use service::RemoteLoggingConfigService;
pub use session::{SessionContext, SessionHeaders, SessionOptions};
pub use types::RemoteServerLoggerData;
