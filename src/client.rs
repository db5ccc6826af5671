//! The client handle: owns the configuration, the transport, and the
//! identifier source, and exposes the graph accessor plus the quad write
//! path.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::{ClientConfig, RequestKind};
use crate::error::Result;
use crate::nquad;
use crate::query::{Graph, IdSource, RandomIds};
use crate::transport::Transport;

pub(crate) struct ClientCore {
    pub(crate) config: ClientConfig,
    pub(crate) transport: Box<dyn Transport>,
    pub(crate) ids: Box<dyn IdSource>,
}

/// A Cayley client bound to one transport.
#[derive(Clone)]
pub struct Client {
    core: Arc<ClientCore>,
}

impl Client {
    /// Builds a client with the default identifier source.
    pub fn new(config: ClientConfig, transport: impl Transport + 'static) -> Result<Self> {
        Self::with_id_source(config, transport, RandomIds)
    }

    /// Builds a client with an explicit identifier source, e.g. a
    /// deterministic one for tests.
    pub fn with_id_source(
        mut config: ClientConfig,
        transport: impl Transport + 'static,
        ids: impl IdSource + 'static,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            core: Arc::new(ClientCore {
                config,
                transport: Box::new(transport),
                ids: Box::new(ids),
            }),
        })
    }

    /// The root graph accessor, compiled as `g` in query text.
    pub fn graph(&self) -> Graph {
        Graph::new(Arc::clone(&self.core), RequestKind::Query)
    }

    /// Short-form spelling of [`Client::graph`].
    pub fn g(&self) -> Graph {
        self.graph()
    }

    /// Normalizes the records into quads and writes them.
    pub fn write(&self, records: &[Value]) -> Result<Value> {
        self.send_quads(records, self.core.config.write_endpoint())
    }

    /// Normalizes the records into quads and deletes them.
    pub fn delete(&self, records: &[Value]) -> Result<Value> {
        self.send_quads(records, self.core.config.delete_endpoint())
    }

    /// Reads the full quad listing (API v2 only).
    pub fn read(&self) -> Result<Value> {
        let endpoint = self.core.config.read_endpoint()?;
        let bytes = self.core.transport.submit(endpoint, "")?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn send_quads(&self, records: &[Value], endpoint: &str) -> Result<Value> {
        let quads = nquad::normalize_records(records, self.core.config.normalize_mode)?;
        let body = serde_json::to_string(&quads)?;
        debug!(%endpoint, quads = quads.len(), "dispatching quad payload");
        let bytes = self.core.transport.submit(endpoint, &body)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
