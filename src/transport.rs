//! The boundary between the core and the network.
//!
//! The core never constructs headers, TLS options, or base URLs; it supplies
//! a relative endpoint path and a request body and receives raw response
//! bytes. Pooling, retries, and timeouts belong to implementations, not to
//! the core.

use crate::config::ClientConfig;
use crate::error::{CayleyError, Result};

/// Submits a request body to a relative endpoint and returns the raw
/// response bytes.
pub trait Transport: Send + Sync {
    /// POSTs `body` to `endpoint` (relative to the server's API mount).
    fn submit(&self, endpoint: &str, body: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP transport over `reqwest`.
pub struct HttpTransport {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds a transport for one server picked from the configured pool.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let server = config.pick_server()?;
        Ok(Self {
            base_url: server.base_url(),
            http: reqwest::blocking::Client::new(),
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn submit(&self, endpoint: &str, body: &str) -> Result<Vec<u8>> {
        let url = format!("{}{endpoint}", self.base_url);
        let response = self
            .http
            .post(&url)
            .body(body.to_owned())
            .send()
            .map_err(|e| CayleyError::Transport(e.to_string()))?;
        let bytes = response
            .bytes()
            .map_err(|e| CayleyError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_targets_the_picked_server() {
        let config = ClientConfig::single("localhost", 64210);
        let transport = HttpTransport::new(&config).expect("transport");
        assert_eq!(transport.base_url(), "http://localhost:64210/api");
    }
}
