//! HTTP product lookup client.
//!
//! One `GET {base}/products/{barcode}` per lookup, bounded by the configured
//! deadline, with every outcome classified into the closed [`LookupError`]
//! taxonomy:
//!
//! - HTTP 404 is [`LookupError::NotFound`]
//! - HTTP 5xx is [`LookupError::ServerFault`]
//! - transport failures and unexpected statuses are [`LookupError::Network`]
//! - an elapsed deadline is [`LookupError::Timeout`]
//!
//! The service's error bodies are never parsed; the status code alone drives
//! classification. The deadline is baked into the HTTP client itself, so the
//! request future is cancelled when it elapses and no guard timer can
//! outlive a call.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};

use pickscan_core::{Barcode, LookupConfig, LookupError, Product};

use crate::application::view_controller::ProductLookup;

/// Error constructing the HTTP client. Not a lookup outcome; this fires once
/// at wiring time.
#[derive(Debug, Error)]
pub enum LookupClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// reqwest-backed implementation of [`ProductLookup`].
pub struct HttpLookupClient {
    http: reqwest::Client,
    config: LookupConfig,
}

impl HttpLookupClient {
    /// Builds a client with the configured lookup deadline applied to every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`LookupClientError`] when the TLS or connection pool setup
    /// fails.
    pub fn new(config: LookupConfig) -> Result<Self, LookupClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn product_url(&self, barcode: &Barcode) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let mut url = format!("{base}/products/{barcode}");
        if self.config.force_refresh {
            url.push_str("?force_refresh=true");
        }
        url
    }
}

#[async_trait]
impl ProductLookup for HttpLookupClient {
    async fn lookup(&self, candidate: &str) -> Result<Product, LookupError> {
        // Validation first: an ill-formed candidate never reaches the network.
        let barcode = Barcode::parse(candidate).map_err(|_| LookupError::InvalidFormat {
            candidate: candidate.to_string(),
        })?;

        let url = self.product_url(&barcode);
        debug!(%url, "product lookup request");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| classify_transport_error(error, &self.config))?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => Err(LookupError::NotFound { barcode }),
            s if s.is_server_error() => Err(LookupError::ServerFault {
                status: s.as_u16(),
            }),
            s if !s.is_success() => Err(LookupError::Network {
                reason: format!("unexpected status {s}"),
            }),
            _ => response
                .json::<Product>()
                .await
                .map_err(|error| classify_transport_error(error, &self.config)),
        }
    }
}

/// Maps a reqwest failure onto the lookup taxonomy. A body that stops
/// matching the product schema counts as a network fault; the service is
/// telling us something we do not understand.
fn classify_transport_error(error: reqwest::Error, config: &LookupConfig) -> LookupError {
    if error.is_timeout() {
        LookupError::Timeout {
            timeout: config.timeout,
        }
    } else {
        warn!(%error, "lookup transport failure");
        LookupError::Network {
            reason: error.to_string(),
        }
    }
}
