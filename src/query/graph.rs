//! The root accessor and the terminal executor.
//!
//! [`Graph`] hands out terminal-capable [`Query`] values; a terminal verb
//! validates its calling convention, compiles the accumulated log, and
//! dispatches the text through the transport. Once a terminal is invoked,
//! compilation and dispatch run to completion or failure; there is no
//! cancellation.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::ClientCore;
use crate::config::{CallMode, RequestKind};
use crate::error::{CayleyError, Result};

use super::callable::Callable;
use super::compile::compile;
use super::path::{CallArg, Path, Traversal};
use super::verb::Verb;

/// The root accessor, compiled as `g` in query text.
#[derive(Clone)]
pub struct Graph {
    core: Arc<ClientCore>,
    kind: RequestKind,
}

impl Graph {
    pub(crate) fn new(core: Arc<ClientCore>, kind: RequestKind) -> Self {
        Self { core, kind }
    }

    /// Forks an accessor whose traversals compile as the given request kind.
    pub fn kind(&self, kind: RequestKind) -> Graph {
        Graph {
            core: Arc::clone(&self.core),
            kind,
        }
    }

    /// Starts a query at the given vertex (or list of vertices).
    pub fn v(&self, nodes: impl Into<CallArg>) -> Query {
        self.seed(vec![nodes.into()])
    }

    /// Long-form spelling of [`Graph::v`].
    pub fn vertex(&self, nodes: impl Into<CallArg>) -> Query {
        self.v(nodes)
    }

    /// Starts a query over every vertex.
    pub fn v_all(&self) -> Query {
        self.seed(Vec::new())
    }

    /// Starts a reusable morphism path.
    pub fn morphism(&self) -> Path {
        Path::morphism()
    }

    /// Short-form spelling of [`Graph::morphism`].
    pub fn m(&self) -> Path {
        Path::morphism()
    }

    fn seed(&self, args: Vec<CallArg>) -> Query {
        Query {
            path: Path::seeded(Verb::Vertex, args),
            core: Arc::clone(&self.core),
            kind: self.kind,
        }
    }
}

/// A terminal-capable traversal bound to a client.
#[derive(Clone)]
pub struct Query {
    path: Path,
    core: Arc<ClientCore>,
    kind: RequestKind,
}

impl Traversal for Query {
    fn append(mut self, verb: Verb, args: Vec<CallArg>) -> Self {
        self.path = self.path.append(verb, args);
        self
    }
}

impl Query {
    /// The accumulated call log.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copies the accumulated log into a new, independently extensible query.
    pub fn fork(&self) -> Query {
        self.clone()
    }

    /// Materializes every result.
    pub fn all(self) -> Result<Value> {
        self.finish(Verb::All, Vec::new())
    }

    /// Materializes up to `size` results.
    pub fn get_limit(self, size: i64) -> Result<Value> {
        self.finish(Verb::GetLimit, vec![CallArg::Int(size)])
    }

    /// Collects results into an array inside the remote engine and runs the
    /// callable body over it.
    pub fn to_array(self, callable: Callable) -> Result<Value> {
        self.finish(Verb::ToArray, vec![CallArg::Script(callable)])
    }

    /// Takes a single result inside the remote engine and runs the callable
    /// body over it.
    pub fn to_value(self, callable: Callable) -> Result<Value> {
        self.finish(Verb::ToValue, vec![CallArg::Script(callable)])
    }

    /// Tagged-result counterpart of [`Query::to_array`].
    pub fn tag_array(self, callable: Callable) -> Result<Value> {
        self.finish(Verb::TagArray, vec![CallArg::Script(callable)])
    }

    /// Tagged-result counterpart of [`Query::to_value`].
    pub fn tag_value(self, callable: Callable) -> Result<Value> {
        self.finish(Verb::TagValue, vec![CallArg::Script(callable)])
    }

    /// Iterates results inside the remote engine.
    pub fn for_each(self, callable: Callable) -> Result<Value> {
        self.finish(Verb::ForEach, vec![CallArg::Script(callable)])
    }

    /// Iterates up to `limit` results inside the remote engine.
    pub fn for_each_limit(self, limit: i64, callable: Callable) -> Result<Value> {
        self.finish(
            Verb::ForEach,
            vec![CallArg::Int(limit), CallArg::Script(callable)],
        )
    }

    /// `Map` spelling of [`Query::for_each`].
    pub fn map(self, callable: Callable) -> Result<Value> {
        self.finish(Verb::Map, vec![CallArg::Script(callable)])
    }

    /// `Map` spelling of [`Query::for_each_limit`].
    pub fn map_limit(self, limit: i64, callable: Callable) -> Result<Value> {
        self.finish(
            Verb::Map,
            vec![CallArg::Int(limit), CallArg::Script(callable)],
        )
    }

    /// Callback-delivery variant of [`Query::all`].
    pub fn all_with(self, handler: impl FnOnce(Result<Value>)) {
        self.finish_with(Verb::All, Vec::new(), handler)
    }

    /// Callback-delivery variant of [`Query::get_limit`].
    pub fn get_limit_with(self, size: i64, handler: impl FnOnce(Result<Value>)) {
        self.finish_with(Verb::GetLimit, vec![CallArg::Int(size)], handler)
    }

    /// Callback-delivery variant of [`Query::to_array`].
    pub fn to_array_with(self, callable: Callable, handler: impl FnOnce(Result<Value>)) {
        self.finish_with(Verb::ToArray, vec![CallArg::Script(callable)], handler)
    }

    /// Callback-delivery variant of [`Query::to_value`].
    pub fn to_value_with(self, callable: Callable, handler: impl FnOnce(Result<Value>)) {
        self.finish_with(Verb::ToValue, vec![CallArg::Script(callable)], handler)
    }

    /// Callback-delivery variant of [`Query::tag_array`].
    pub fn tag_array_with(self, callable: Callable, handler: impl FnOnce(Result<Value>)) {
        self.finish_with(Verb::TagArray, vec![CallArg::Script(callable)], handler)
    }

    /// Callback-delivery variant of [`Query::tag_value`].
    pub fn tag_value_with(self, callable: Callable, handler: impl FnOnce(Result<Value>)) {
        self.finish_with(Verb::TagValue, vec![CallArg::Script(callable)], handler)
    }

    /// Callback-delivery variant of [`Query::for_each`].
    pub fn for_each_with(self, callable: Callable, handler: impl FnOnce(Result<Value>)) {
        self.finish_with(Verb::ForEach, vec![CallArg::Script(callable)], handler)
    }

    /// Callback-delivery variant of [`Query::for_each_limit`].
    pub fn for_each_limit_with(
        self,
        limit: i64,
        callable: Callable,
        handler: impl FnOnce(Result<Value>),
    ) {
        self.finish_with(
            Verb::ForEach,
            vec![CallArg::Int(limit), CallArg::Script(callable)],
            handler,
        )
    }

    /// Callback-delivery variant of [`Query::map`].
    pub fn map_with(self, callable: Callable, handler: impl FnOnce(Result<Value>)) {
        self.finish_with(Verb::Map, vec![CallArg::Script(callable)], handler)
    }

    /// Callback-delivery variant of [`Query::map_limit`].
    pub fn map_limit_with(self, limit: i64, callable: Callable, handler: impl FnOnce(Result<Value>)) {
        self.finish_with(
            Verb::Map,
            vec![CallArg::Int(limit), CallArg::Script(callable)],
            handler,
        )
    }

    fn finish(self, verb: Verb, args: Vec<CallArg>) -> Result<Value> {
        if self.core.config.call_mode == CallMode::Callback {
            return Err(CayleyError::CallingConvention { verb: verb.name() });
        }
        self.execute(verb, args)
    }

    fn finish_with(self, verb: Verb, args: Vec<CallArg>, handler: impl FnOnce(Result<Value>)) {
        if self.core.config.call_mode == CallMode::Direct {
            warn!(
                verb = verb.name(),
                "direct delivery configured; honoring the supplied handler anyway"
            );
        }
        handler(self.execute(verb, args));
    }

    fn execute(self, verb: Verb, args: Vec<CallArg>) -> Result<Value> {
        if verb.requires_callable()
            && !args.iter().any(|a| matches!(a, CallArg::Script(_)))
        {
            return Err(CayleyError::MissingCallable { verb: verb.name() });
        }
        let path = self.path.append(verb, args);
        let text = compile(path.calls(), self.core.ids.as_ref())?;
        if text.is_empty() {
            return Err(CayleyError::EmptyQuery);
        }
        let endpoint = self.core.config.query_endpoint(self.kind);
        debug!(%endpoint, %text, "dispatching compiled query");
        let bytes = self.core.transport.submit(&endpoint, &text)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
