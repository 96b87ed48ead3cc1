// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Process-wide log output for embedders that do not install their own
//! `tracing` subscriber.

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("could not parse log level in configuration: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("setting default subscriber failed: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Filter directive for `log_level` with noisy transport crates silenced.
pub fn env_filter(log_level: &str) -> String {
    format!("h2=off,hyper=off,rustls=off,{log_level}")
}

/// Installs a fmt subscriber as the global default.
pub fn init(log_level: &str) -> Result<(), LoggerError> {
    let filter = EnvFilter::try_new(env_filter(log_level))?;
    tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .finish()
        .try_init()?;

    tracing::debug!("Logging subsystem enabled");
    Ok(())
}
