//! Client options: API version, query language, calling convention, and the
//! server pool. All of it is plain data threaded through constructors; the
//! crate keeps no process-wide state.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::warn;

use crate::error::{CayleyError, Result};
use crate::nquad::NormalizeMode;

/// HTTP API generation exposed by the Cayley server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// Classic `/write`, `/delete` endpoints.
    V1,
    /// `/v2/write`, `/v2/delete`, `/v2/read` endpoints.
    V2,
}

/// Query language the compiled text targets.
///
/// The two languages share one textual form; the choice only affects the
/// endpoint the compiled program is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryLang {
    /// The gizmo environment of current Cayley servers.
    Gizmo,
    /// The gremlin environment of older Cayley servers.
    Gremlin,
}

impl QueryLang {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            QueryLang::Gizmo => "gizmo",
            QueryLang::Gremlin => "gremlin",
        }
    }
}

impl FromStr for QueryLang {
    type Err = CayleyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gizmo" => Ok(QueryLang::Gizmo),
            "gremlin" => Ok(QueryLang::Gremlin),
            other => Err(CayleyError::Config(format!(
                "invalid query language '{other}', valid values are 'gizmo' or 'gremlin'"
            ))),
        }
    }
}

impl fmt::Display for QueryLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How terminal verbs deliver their result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    /// Terminals return `Result` directly.
    Direct,
    /// Terminals deliver through a caller-supplied handler; the direct
    /// variants become precondition errors.
    Callback,
}

/// Whether a traversal compiles as a `query` or a `shape` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Execute the traversal and return matching values.
    Query,
    /// Return the shape of the traversal instead of executing it.
    Shape,
}

impl RequestKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            RequestKind::Query => "query",
            RequestKind::Shape => "shape",
        }
    }
}

impl FromStr for RequestKind {
    type Err = CayleyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "query" => Ok(RequestKind::Query),
            "shape" => Ok(RequestKind::Shape),
            other => Err(CayleyError::Config(format!(
                "invalid request kind '{other}', valid values are 'query' or 'shape'"
            ))),
        }
    }
}

/// One server in the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name or address.
    pub host: String,
    /// TCP port of the HTTP API.
    pub port: u16,
    /// Whether to speak HTTPS.
    pub secure: bool,
}

impl ServerConfig {
    /// Base URL of the server's API mount.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}:{}/api", self.host, self.port)
    }
}

/// Options for a [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API generation for write/delete/read endpoints.
    pub api_version: ApiVersion,
    /// Target query language.
    pub query_lang: QueryLang,
    /// Calling convention for terminal verbs.
    pub call_mode: CallMode,
    /// Which normalizer generation `write`/`delete` use.
    pub normalize_mode: NormalizeMode,
    /// Server pool; one is picked at random per transport construction.
    pub servers: Vec<ServerConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_version: ApiVersion::V1,
            query_lang: QueryLang::Gremlin,
            call_mode: CallMode::Direct,
            normalize_mode: NormalizeMode::Nested,
            servers: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Configuration for a single plain-HTTP server.
    pub fn single(host: impl Into<String>, port: u16) -> Self {
        Self {
            servers: vec![ServerConfig {
                host: host.into(),
                port,
                secure: false,
            }],
            ..Self::default()
        }
    }

    /// Drops duplicate servers (same base URL) and rejects an empty pool.
    pub fn validate(&mut self) -> Result<()> {
        let mut seen: Vec<String> = Vec::new();
        self.servers.retain(|server| {
            let url = server.base_url();
            if seen.contains(&url) {
                warn!(%url, "dropping duplicate server entry");
                false
            } else {
                seen.push(url);
                true
            }
        });
        if self.servers.is_empty() {
            return Err(CayleyError::Config(
                "at least one server must be configured".into(),
            ));
        }
        Ok(())
    }

    /// Picks one server from the pool, randomly when it holds more than one.
    pub fn pick_server(&self) -> Result<&ServerConfig> {
        match self.servers.len() {
            0 => Err(CayleyError::Config(
                "at least one server must be configured".into(),
            )),
            1 => Ok(&self.servers[0]),
            n => Ok(&self.servers[rand::thread_rng().gen_range(0..n)]),
        }
    }

    pub(crate) fn query_endpoint(&self, kind: RequestKind) -> String {
        format!("/{}/{}", kind.as_str(), self.query_lang.as_str())
    }

    pub(crate) fn write_endpoint(&self) -> &'static str {
        match self.api_version {
            ApiVersion::V1 => "/write",
            ApiVersion::V2 => "/v2/write",
        }
    }

    pub(crate) fn delete_endpoint(&self) -> &'static str {
        match self.api_version {
            ApiVersion::V1 => "/delete",
            ApiVersion::V2 => "/v2/delete",
        }
    }

    pub(crate) fn read_endpoint(&self) -> Result<&'static str> {
        match self.api_version {
            ApiVersion::V1 => Err(CayleyError::Config(
                "the read endpoint requires api version v2".into(),
            )),
            ApiVersion::V2 => Ok("/v2/read"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_drops_duplicates_and_rejects_empty() {
        let mut config = ClientConfig::single("localhost", 64210);
        config.servers.push(ServerConfig {
            host: "localhost".into(),
            port: 64210,
            secure: false,
        });
        config.validate().expect("validate");
        assert_eq!(config.servers.len(), 1);

        let mut empty = ClientConfig::default();
        assert!(matches!(empty.validate(), Err(CayleyError::Config(_))));
    }

    #[test]
    fn endpoints_follow_api_version() {
        let mut config = ClientConfig::single("localhost", 64210);
        assert_eq!(config.write_endpoint(), "/write");
        assert_eq!(config.delete_endpoint(), "/delete");
        assert!(config.read_endpoint().is_err());

        config.api_version = ApiVersion::V2;
        assert_eq!(config.write_endpoint(), "/v2/write");
        assert_eq!(config.read_endpoint().expect("read"), "/v2/read");
    }

    #[test]
    fn query_endpoint_combines_kind_and_language() {
        let mut config = ClientConfig::single("localhost", 64210);
        assert_eq!(config.query_endpoint(RequestKind::Query), "/query/gremlin");
        config.query_lang = QueryLang::Gizmo;
        assert_eq!(config.query_endpoint(RequestKind::Shape), "/shape/gizmo");
    }

    #[test]
    fn kind_and_language_parse_from_text() {
        assert_eq!("shape".parse::<RequestKind>().expect("kind"), RequestKind::Shape);
        assert!("shapes".parse::<RequestKind>().is_err());
        assert_eq!("gizmo".parse::<QueryLang>().expect("lang"), QueryLang::Gizmo);
        assert!("sparql".parse::<QueryLang>().is_err());
    }

    #[test]
    fn base_url_reflects_scheme() {
        let server = ServerConfig {
            host: "db.internal".into(),
            port: 443,
            secure: true,
        };
        assert_eq!(server.base_url(), "https://db.internal:443/api");
    }
}
