//! # Client configuration
//!
//! Two layers of configuration drive a query:
//!
//! - The **process-wide row limit**, read every time a payload is built (`outrows`).
//!   It defaults to [`DEFAULT_ROW_LIMIT`] and can be changed at any time with
//!   [`set_row_limit`]; payloads built afterwards pick up the new value.
//! - An [`IrsaConfig`] carried by each [`Irsa`](crate::irsa::Irsa) client: service
//!   endpoints and the request timeout.
//!
//! ```rust
//! use irsa::config::{row_limit, set_row_limit};
//!
//! let previous = row_limit();
//! set_row_limit(50);
//! assert_eq!(row_limit(), 50);
//! set_row_limit(previous);
//! ```

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use crate::constants::{DEFAULT_ROW_LIMIT, DEFAULT_TIMEOUT, GATOR_LIST_URL, IRSA_URL};

static ROW_LIMIT: AtomicUsize = AtomicUsize::new(DEFAULT_ROW_LIMIT);

/// Current process-wide row limit sent as `outrows`.
pub fn row_limit() -> usize {
    ROW_LIMIT.load(Ordering::Relaxed)
}

/// Override the process-wide row limit.
pub fn set_row_limit(limit: usize) {
    ROW_LIMIT.store(limit, Ordering::Relaxed);
}

/// Endpoints and transport settings of one [`Irsa`](crate::irsa::Irsa) client.
#[derive(Debug, Clone, PartialEq)]
pub struct IrsaConfig {
    /// Gator catalog query endpoint
    pub query_url: String,
    /// Gator catalog listing endpoint
    pub catalog_list_url: String,
    /// Timeout applied to every request
    pub timeout: Duration,
}

impl Default for IrsaConfig {
    fn default() -> Self {
        IrsaConfig {
            query_url: IRSA_URL.to_string(),
            catalog_list_url: GATOR_LIST_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl IrsaConfig {
    pub fn with_query_url(mut self, url: impl Into<String>) -> Self {
        self.query_url = url.into();
        self
    }

    pub fn with_catalog_list_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_list_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
