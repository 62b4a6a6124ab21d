//! Line-level syntax produced by the parser and consumed by elaboration.

use prism_core::fragment::{ArrowKind, Direction, NodeShape};

use crate::span::Spanned;

/// `%% @<name> <value>` directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    View,
    Category,
    Placeholder,
}

/// A node declaration such as `KB[(Knowledge Base)]:::store`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDecl<'a> {
    pub id: Spanned<&'a str>,
    pub shape: NodeShape,
    /// `None` for a bare `ID` line; the id doubles as the label.
    pub label: Option<String>,
    pub class: Option<&'a str>,
}

/// One link of an edge chain: `-.->|label| TARGET`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hop<'a> {
    pub arrow: ArrowKind,
    pub label: Option<String>,
    pub target: Spanned<&'a str>,
}

/// `A --> B ==> C`: a head node followed by one or more hops.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeChain<'a> {
    pub head: Spanned<&'a str>,
    pub hops: Vec<Hop<'a>>,
}

impl<'a> EdgeChain<'a> {
    /// Iterates the `(source, hop)` pairs of the chain.
    pub fn links(&self) -> impl Iterator<Item = (Spanned<&'a str>, &Hop<'a>)> {
        std::iter::once(self.head)
            .chain(self.hops.iter().map(|hop| hop.target))
            .zip(self.hops.iter())
    }
}

/// One source line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    /// Empty line or a line holding only whitespace.
    Blank,
    /// A `%%` comment that is not a directive.
    Comment,
    Directive {
        kind: DirectiveKind,
        value: Spanned<&'a str>,
    },
    /// `flowchart LR` or `graph TD`.
    Header(Spanned<Direction>),
    SubgraphOpen {
        id: Spanned<&'a str>,
        title: Option<String>,
    },
    SubgraphEnd,
    Node(NodeDecl<'a>),
    Edges(EdgeChain<'a>),
}
