use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CayleyError>;

/// Errors raised by the client.
///
/// Precondition errors fire before any compilation, compilation errors fire
/// before any dispatch, and transport/response errors are propagated from
/// the collaborator unchanged.
#[derive(Debug, Error)]
pub enum CayleyError {
    /// A direct-style terminal was invoked on a callback-configured client.
    #[error("client is configured for callback delivery; use the '_with' variant of '{verb}'")]
    CallingConvention {
        /// Terminal verb that was invoked.
        verb: &'static str,
    },
    /// A terminal requiring an embedded remote callable was invoked without one.
    #[error("terminal '{verb}' requires an embedded remote callable")]
    MissingCallable {
        /// Terminal verb that was invoked.
        verb: &'static str,
    },
    /// Embedded callable source had no single parenthesized parameter or no
    /// brace-delimited body.
    #[error("malformed remote callable: {0}")]
    MalformedCallable(String),
    /// An argument shape the target verb cannot render.
    #[error("unsupported argument for '{verb}': {detail}")]
    UnsupportedArgument {
        /// Verb whose argument list could not be rendered.
        verb: &'static str,
        /// What was wrong with the argument.
        detail: String,
    },
    /// The call log compiled to an empty program.
    #[error("compiled query text is empty")]
    EmptyQuery,
    /// Normalizer input was not a JSON array.
    #[error("normalizer input must be a JSON array of records")]
    NotAnArray,
    /// A record value only legal as a scalar (or flat scalar array) held a
    /// composite.
    #[error("invalid value under predicate '{predicate}': {detail}")]
    InvalidNesting {
        /// Bracket-wrapped predicate owning the offending value.
        predicate: String,
        /// What was found there.
        detail: String,
    },
    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Opaque failure reported by the transport collaborator.
    #[error("transport failure: {0}")]
    Transport(String),
    /// JSON (de)serialization failed, typically on a malformed response body.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
