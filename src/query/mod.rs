//! Deferred query construction.
//!
//! A traversal is recorded as pure data ([`Path`]), compiled to query-engine
//! text on demand, and only dispatched when a terminal verb runs.

/// Embedded remote callables carried as text templates.
pub mod callable;
mod compile;
/// Injected fresh-identifier generation.
pub mod ids;
/// The call recorder and chainable traversal vocabulary.
pub mod path;
/// Root accessor and terminal execution.
pub mod graph;
/// The closed verb vocabulary.
pub mod verb;

pub use callable::Callable;
pub use graph::{Graph, Query};
pub use ids::{IdSource, RandomIds};
pub use path::{Call, CallArg, Path, Traversal};
pub use verb::Verb;
