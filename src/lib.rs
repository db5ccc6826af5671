//! Client library for the Cayley graph database.
//!
//! Two subsystems do the real work:
//!
//! - a fluent, chainable path builder that lazily records graph-traversal
//!   calls and compiles them into query text for the `gizmo` and `gremlin`
//!   query languages, and
//! - a recursive normalizer that flattens nested JSON records into
//!   subject/predicate/object/label quads, synthesizing deterministic
//!   blank-node identifiers for nested structures.
//!
//! Everything network-shaped sits behind the [`Transport`] trait: the core
//! hands it a relative endpoint path and a request body and gets raw
//! response bytes back.
//!
//! # Quick start
//!
//! ```no_run
//! use cayley_client::{Client, ClientConfig, HttpTransport, Traversal};
//!
//! # fn main() -> cayley_client::Result<()> {
//! let config = ClientConfig::single("localhost", 64210);
//! let transport = HttpTransport::new(&config)?;
//! let client = Client::new(config, transport)?;
//!
//! let res = client.g().v("</user/shortid/23TplPdS>").out("<follows>").all()?;
//! println!("{res}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod nquad;
pub mod query;
pub mod transport;

pub use client::Client;
pub use config::{ApiVersion, CallMode, ClientConfig, QueryLang, RequestKind, ServerConfig};
pub use error::{CayleyError, Result};
pub use nquad::{normalize, NormalizeMode, Quad};
pub use query::{Callable, CallArg, Graph, IdSource, Path, Query, Traversal, Verb};
pub use transport::{HttpTransport, Transport};
