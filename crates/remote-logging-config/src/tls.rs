// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Transport construction for session contexts.
//!
//! The TLS backend is picked at compile time: reqwest's bundled rustls
//! configuration by default, or a configuration pinned to the installed FIPS
//! crypto provider with the `fips` feature. [`SessionOptions`] then shape the
//! builder (certificate validation, timeout, proxy).

use reqwest::{ClientBuilder, Proxy};
#[cfg(feature = "fips")]
use tracing::debug;

use crate::error::ConstructionError;
use crate::session::SessionOptions;

/// Returns a client builder configured for an admin session.
pub fn create_reqwest_client_builder(
    options: &SessionOptions,
) -> Result<ClientBuilder, ConstructionError> {
    let mut builder =
        tls_client_builder()?.danger_accept_invalid_certs(options.accept_invalid_certs);
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(proxy) = &options.https_proxy {
        builder = builder.proxy(Proxy::https(proxy)?);
    }
    Ok(builder)
}

#[cfg(not(feature = "fips"))]
fn tls_client_builder() -> Result<ClientBuilder, ConstructionError> {
    Ok(reqwest::Client::builder().use_rustls_tls())
}

/// Requires a FIPS provider to be installed process-wide beforehand, e.g.
/// with `rustls::crypto::default_fips_provider().install_default()`.
#[cfg(feature = "fips")]
fn tls_client_builder() -> Result<ClientBuilder, ConstructionError> {
    let provider = rustls::crypto::CryptoProvider::get_default()
        .filter(|provider| provider.fips())
        .ok_or_else(|| fips_error("no FIPS crypto provider installed"))?;

    let native = rustls_native_certs::load_native_certs();
    for err in &native.errors {
        debug!(error = %err, "Failed to load native root certificates");
    }
    let mut roots = rustls::RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(native.certs);
    debug!(added, ignored, "Loaded native roots for session transport");
    if roots.is_empty() {
        return Err(fips_error("native root store has no usable certificates"));
    }

    let config = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .map_err(|e| ConstructionError::Tls(e.to_string()))?
        .with_root_certificates(roots)
        .with_no_client_auth();
    if !config.fips() {
        return Err(fips_error("session TLS configuration is not FIPS-compliant"));
    }

    Ok(reqwest::Client::builder().use_preconfigured_tls(config))
}

#[cfg(feature = "fips")]
fn fips_error(reason: &str) -> ConstructionError {
    ConstructionError::Tls(format!("FIPS: {reason}"))
}
