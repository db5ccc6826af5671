//! The call recorder: an append-only log of traversal calls.
//!
//! A [`Path`] is pure data until compiled. No verb performs I/O, and no verb
//! validates argument shape beyond what the types enforce; malformed shapes
//! surface when the compiler runs.

use super::callable::Callable;
use super::verb::Verb;

/// One argument of a recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    /// A string literal.
    Str(String),
    /// An integer literal.
    Int(i64),
    /// A list of string literals.
    List(Vec<String>),
    /// An embedded remote callable.
    Script(Callable),
    /// A complete nested path expression.
    Path(Path),
}

impl From<&str> for CallArg {
    fn from(value: &str) -> Self {
        CallArg::Str(value.to_owned())
    }
}

impl From<String> for CallArg {
    fn from(value: String) -> Self {
        CallArg::Str(value)
    }
}

impl From<i64> for CallArg {
    fn from(value: i64) -> Self {
        CallArg::Int(value)
    }
}

impl From<Vec<String>> for CallArg {
    fn from(value: Vec<String>) -> Self {
        CallArg::List(value)
    }
}

impl From<Vec<&str>> for CallArg {
    fn from(value: Vec<&str>) -> Self {
        CallArg::List(value.into_iter().map(str::to_owned).collect())
    }
}

impl From<Callable> for CallArg {
    fn from(value: Callable) -> Self {
        CallArg::Script(value)
    }
}

impl From<Path> for CallArg {
    fn from(value: Path) -> Self {
        CallArg::Path(value)
    }
}

/// One recorded `(verb, arguments)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub(crate) verb: Verb,
    pub(crate) args: Vec<CallArg>,
}

impl Call {
    /// The recorded verb.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The recorded arguments, in original order.
    pub fn args(&self) -> &[CallArg] {
        &self.args
    }
}

/// An accumulated, not-yet-compiled graph traversal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    calls: Vec<Call>,
}

impl Path {
    /// A reusable path beginning with the morphism sentinel.
    pub fn morphism() -> Self {
        Self::seeded(Verb::Morphism, Vec::new())
    }

    pub(crate) fn seeded(verb: Verb, args: Vec<CallArg>) -> Self {
        Self {
            calls: vec![Call { verb, args }],
        }
    }

    /// The accumulated call log.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Copies the accumulated log into a new, independently extensible path.
    pub fn fork(&self) -> Self {
        self.clone()
    }
}

/// The chainable traversal vocabulary.
///
/// Implemented by [`Path`] (morphisms) and [`Query`](super::Query); every
/// method appends one call to the owning log and returns the owner for
/// further chaining.
pub trait Traversal: Sized {
    /// Appends a raw `(verb, arguments)` record.
    fn append(self, verb: Verb, args: Vec<CallArg>) -> Self;

    /// Traverses outbound along the given predicate(s).
    fn out(self, predicates: impl Into<CallArg>) -> Self {
        self.append(Verb::Out, vec![predicates.into()])
    }

    /// Outbound traversal with result tag(s).
    fn out_tagged(self, predicates: impl Into<CallArg>, tags: impl Into<CallArg>) -> Self {
        self.append(Verb::Out, vec![predicates.into(), tags.into()])
    }

    /// Traverses inbound along the given predicate(s).
    fn r#in(self, predicates: impl Into<CallArg>) -> Self {
        self.append(Verb::In, vec![predicates.into()])
    }

    /// Inbound traversal with result tag(s).
    fn in_tagged(self, predicates: impl Into<CallArg>, tags: impl Into<CallArg>) -> Self {
        self.append(Verb::In, vec![predicates.into(), tags.into()])
    }

    /// Traverses in both directions along the given predicate(s).
    fn both(self, predicates: impl Into<CallArg>) -> Self {
        self.append(Verb::Both, vec![predicates.into()])
    }

    /// Filters the current position to the given node.
    fn is(self, node: impl Into<String>) -> Self {
        self.append(Verb::Is, vec![CallArg::Str(node.into())])
    }

    /// Filters on a predicate/value pair.
    fn has(self, predicate: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(
            Verb::Has,
            vec![CallArg::Str(predicate.into()), CallArg::Str(value.into())],
        )
    }

    /// Restricts following traversals to the given label context.
    fn label_context(self, label: impl Into<String>) -> Self {
        self.append(Verb::LabelContext, vec![CallArg::Str(label.into())])
    }

    /// Label context restriction with a tag.
    fn label_context_tagged(self, label: impl Into<String>, tag: impl Into<String>) -> Self {
        self.append(
            Verb::LabelContext,
            vec![CallArg::Str(label.into()), CallArg::Str(tag.into())],
        )
    }

    /// Caps the number of results.
    fn limit(self, count: i64) -> Self {
        self.append(Verb::Limit, vec![CallArg::Int(count)])
    }

    /// Skips the first `count` results.
    fn skip(self, count: i64) -> Self {
        self.append(Verb::Skip, vec![CallArg::Int(count)])
    }

    /// Enumerates inbound predicates.
    fn in_predicates(self) -> Self {
        self.append(Verb::InPredicates, Vec::new())
    }

    /// Enumerates outbound predicates.
    fn out_predicates(self) -> Self {
        self.append(Verb::OutPredicates, Vec::new())
    }

    /// Tags the current position.
    fn tag(self, tag: impl Into<String>) -> Self {
        self.append(Verb::Tag, vec![CallArg::Str(tag.into())])
    }

    /// Tags the current position (`As` spelling of the remote engine).
    fn r#as(self, tag: impl Into<String>) -> Self {
        self.append(Verb::As, vec![CallArg::Str(tag.into())])
    }

    /// Jumps back to a tagged position.
    fn back(self, tag: impl Into<String>) -> Self {
        self.append(Verb::Back, vec![CallArg::Str(tag.into())])
    }

    /// Saves a predicate's values under a tag.
    fn save(self, predicate: impl Into<String>, tag: impl Into<String>) -> Self {
        self.append(
            Verb::Save,
            vec![CallArg::Str(predicate.into()), CallArg::Str(tag.into())],
        )
    }

    /// Intersects with another path.
    fn intersect(self, other: Path) -> Self {
        self.append(Verb::Intersect, vec![CallArg::Path(other)])
    }

    /// Intersects with another path (`And` spelling of the remote engine).
    fn and(self, other: Path) -> Self {
        self.append(Verb::And, vec![CallArg::Path(other)])
    }

    /// Unions with another path.
    fn union(self, other: Path) -> Self {
        self.append(Verb::Union, vec![CallArg::Path(other)])
    }

    /// Unions with another path (`Or` spelling of the remote engine).
    fn or(self, other: Path) -> Self {
        self.append(Verb::Or, vec![CallArg::Path(other)])
    }

    /// Subtracts another path.
    fn except(self, other: Path) -> Self {
        self.append(Verb::Except, vec![CallArg::Path(other)])
    }

    /// Subtracts another path (`Difference` spelling of the remote engine).
    fn difference(self, other: Path) -> Self {
        self.append(Verb::Difference, vec![CallArg::Path(other)])
    }

    /// Applies a morphism forward.
    fn follow(self, morphism: Path) -> Self {
        self.append(Verb::Follow, vec![CallArg::Path(morphism)])
    }

    /// Applies a morphism in reverse.
    fn follow_r(self, morphism: Path) -> Self {
        self.append(Verb::FollowR, vec![CallArg::Path(morphism)])
    }
}

impl Traversal for Path {
    fn append(mut self, verb: Verb, args: Vec<CallArg>) -> Self {
        self.calls.push(Call { verb, args });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morphism_starts_with_sentinel() {
        let path = Path::morphism();
        assert_eq!(path.calls().len(), 1);
        assert_eq!(path.calls()[0].verb(), Verb::Morphism);
        assert!(path.calls()[0].args().is_empty());
    }

    #[test]
    fn chaining_appends_in_order() {
        let path = Path::morphism()
            .out("<follows>")
            .has("<gender>", "F")
            .limit(3);
        let verbs: Vec<Verb> = path.calls().iter().map(Call::verb).collect();
        assert_eq!(
            verbs,
            vec![Verb::Morphism, Verb::Out, Verb::Has, Verb::Limit]
        );
    }

    #[test]
    fn fork_is_independently_extensible() {
        let base = Path::morphism().out("<follows>");
        let forked = base.fork().r#in("<follows>");
        assert_eq!(base.calls().len(), 2);
        assert_eq!(forked.calls().len(), 3);
        assert_eq!(&forked.calls()[..2], base.calls());
    }
}
