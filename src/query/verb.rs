//! The closed vocabulary of traversal and terminal verbs.
//!
//! The builder only exposes recognized verbs, so unrecognized operations are
//! unrepresentable in a call log.

/// A recognized traversal or terminal verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Vertex selection, the root of every query.
    Vertex,
    /// Morphism sentinel, the root of every reusable path.
    Morphism,
    /// Outbound single-hop traversal.
    Out,
    /// Inbound single-hop traversal.
    In,
    /// Traversal in both directions.
    Both,
    /// Filter to the given node.
    Is,
    /// Filter on a predicate/value pair.
    Has,
    /// Restrict following traversals to a label context.
    LabelContext,
    /// Cap the number of results.
    Limit,
    /// Skip a number of results.
    Skip,
    /// Enumerate inbound predicates.
    InPredicates,
    /// Enumerate outbound predicates.
    OutPredicates,
    /// Tag the current position.
    Tag,
    /// Alias of [`Verb::Tag`] in the remote engine.
    As,
    /// Jump back to a tagged position.
    Back,
    /// Save a predicate's values under a tag.
    Save,
    /// Intersect with another path.
    Intersect,
    /// Alias of [`Verb::Intersect`] in the remote engine.
    And,
    /// Union with another path.
    Union,
    /// Alias of [`Verb::Union`] in the remote engine.
    Or,
    /// Subtract another path.
    Except,
    /// Alias of [`Verb::Except`] in the remote engine.
    Difference,
    /// Apply a morphism forward.
    Follow,
    /// Apply a morphism in reverse.
    FollowR,
    /// Terminal: materialize every result.
    All,
    /// Terminal: materialize up to a limit.
    GetLimit,
    /// Terminal: collect results into an array inside the remote engine.
    ToArray,
    /// Terminal: take a single result inside the remote engine.
    ToValue,
    /// Terminal: collect tagged results into an array inside the remote engine.
    TagArray,
    /// Terminal: take a single tagged result inside the remote engine.
    TagValue,
    /// Terminal: iterate results inside the remote engine.
    ForEach,
    /// Alias of [`Verb::ForEach`] in the remote engine.
    Map,
}

impl Verb {
    /// Name of the verb as it appears in compiled text.
    pub fn name(self) -> &'static str {
        match self {
            Verb::Vertex => "V",
            Verb::Morphism => "M",
            Verb::Out => "Out",
            Verb::In => "In",
            Verb::Both => "Both",
            Verb::Is => "Is",
            Verb::Has => "Has",
            Verb::LabelContext => "LabelContext",
            Verb::Limit => "Limit",
            Verb::Skip => "Skip",
            Verb::InPredicates => "InPredicates",
            Verb::OutPredicates => "OutPredicates",
            Verb::Tag => "Tag",
            Verb::As => "As",
            Verb::Back => "Back",
            Verb::Save => "Save",
            Verb::Intersect => "Intersect",
            Verb::And => "And",
            Verb::Union => "Union",
            Verb::Or => "Or",
            Verb::Except => "Except",
            Verb::Difference => "Difference",
            Verb::Follow => "Follow",
            Verb::FollowR => "FollowR",
            Verb::All => "All",
            Verb::GetLimit => "GetLimit",
            Verb::ToArray => "ToArray",
            Verb::ToValue => "ToValue",
            Verb::TagArray => "TagArray",
            Verb::TagValue => "TagValue",
            Verb::ForEach => "ForEach",
            Verb::Map => "Map",
        }
    }

    /// Whether the verb ends a chain.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Verb::All
                | Verb::GetLimit
                | Verb::ToArray
                | Verb::ToValue
                | Verb::TagArray
                | Verb::TagValue
                | Verb::ForEach
                | Verb::Map
        )
    }

    /// Terminals that must carry an embedded remote callable.
    pub(crate) fn requires_callable(self) -> bool {
        matches!(
            self,
            Verb::ToArray
                | Verb::ToValue
                | Verb::TagArray
                | Verb::TagValue
                | Verb::ForEach
                | Verb::Map
        )
    }

    /// Terminals whose callable is spliced into the program as continuation
    /// code rather than rendered inline.
    pub(crate) fn splices_callable(self) -> bool {
        matches!(
            self,
            Verb::ToArray | Verb::ToValue | Verb::TagArray | Verb::TagValue
        )
    }

    /// Verbs whose callable renders inline as function-literal source.
    pub(crate) fn inlines_callable(self) -> bool {
        matches!(self, Verb::ForEach | Verb::Map)
    }
}
