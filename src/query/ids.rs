//! Fresh-identifier generation for spliced callables.
//!
//! The source is injected through the client rather than reached through a
//! process-wide singleton, so tests can substitute a deterministic one.

use rand::{distributions::Alphanumeric, Rng};

/// Produces identifiers for the bindings declared by spliced terminal
/// callables. Candidates are additionally collision-checked against the
/// compiled prefix, so the source only needs a reasonable spread.
pub trait IdSource: Send + Sync {
    /// Returns one candidate identifier.
    fn fresh(&self) -> String;
}

/// Default source: `cay_` plus nine random alphanumerics.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn fresh(&self) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(9)
            .map(char::from)
            .collect();
        format!("cay_{suffix}")
    }
}
