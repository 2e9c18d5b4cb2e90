//! HTTP client factory shared by the upstream adapters.
//!
//! One client is built at startup and cloned into every adapter, so
//! connect/request timeouts stay consistent across upstreams.
//! Nothing here retries; every upstream call is attempted once.

use reqwest::Client;
use std::time::Duration;

/// Timeouts applied to every upstream client.
#[derive(Debug, Clone, Copy)]
pub struct HttpTimeouts {
    /// TCP handshake + TLS.
    pub connect: Duration,
    /// Total request/response time. `None` leaves requests unbounded.
    pub request: Option<Duration>,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            request: None,
        }
    }
}

/// Build an HTTP client with the given timeouts.
pub fn try_build_client(timeouts: HttpTimeouts) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().connect_timeout(timeouts.connect);
    if let Some(request) = timeouts.request {
        builder = builder.timeout(request);
    }
    builder.build()
}
