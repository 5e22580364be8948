//! # HTTP environment
//!
//! This module defines the [`Transport`] seam through which every request of the crate
//! goes, and its production implementation [`UreqTransport`], a thin wrapper around a
//! persistent [`ureq::Agent`].
//!
//! ## Structure
//!
//! ```text
//! Irsa
//! └── transport (Arc<dyn Transport>)
//!     └── UreqTransport
//!         └── http_client (ureq::Agent)
//! ```
//!
//! Swapping the transport is how the query executor is exercised offline:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use irsa::irsa::Irsa;
//!
//! let irsa = Irsa::with_transport(Arc::new(MyFixtureTransport::default()));
//! ```
//!
//! ## Notes
//!
//! - Requests are blocking and issued exactly once: there is no retry layer.
//! - HTTP error statuses are reported as [`IrsaError::Http`], every other failure of the
//!   agent as [`IrsaError::Transport`].
use std::{fmt::Debug, time::Duration};

use tracing::debug;
use ureq::Agent;

use crate::irsa_errors::IrsaError;

/// Capability to perform a blocking HTTP GET and return the response body as text.
pub trait Transport: Debug + Send + Sync {
    /// Arguments
    /// -----------------
    /// * `url`: endpoint, without query string.
    /// * `params`: query parameters, in order.
    /// * `timeout`: upper bound for the whole exchange.
    ///
    /// Return
    /// ----------
    /// * The response body, or the transport error unmodified.
    fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<String, IrsaError>;
}

/// [`Transport`] backed by a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    pub http_client: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let config = Agent::config_builder().build();
        let agent: Agent = config.into();

        UreqTransport { http_client: agent }
    }
}

impl Transport for UreqTransport {
    fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<String, IrsaError> {
        debug!(url, ?params, "sending GET request");

        let mut request = self
            .http_client
            .get(url)
            .config()
            .timeout_global(Some(timeout))
            .build();
        for (key, value) in params {
            request = request.query(*key, value);
        }

        let mut response = request.call().map_err(|err| match err {
            ureq::Error::StatusCode(code) => IrsaError::Http(code),
            other => IrsaError::Transport(other),
        })?;
        Ok(response.body_mut().read_to_string()?)
    }
}
