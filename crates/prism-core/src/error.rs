//! Errors raised while building or querying a catalog.
//!
//! Two families exist: lookups of unknown names ([`CatalogError::ViewNotFound`],
//! [`CatalogError::PresetNotFound`]) which are the caller's responsibility, and
//! construction-time referential violations ([`CatalogError::MalformedView`])
//! which mean the static catalog content is broken.

use std::fmt;

use thiserror::Error;

use crate::identifier::Id;

/// A single structural problem found while validating a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Two fragments share an id.
    DuplicateFragment(Id),
    /// An edge references an id that is not declared in the view.
    UnknownEndpoint { edge: Id, endpoint: Id },
    /// An edge references a fragment that exists but is not a node.
    EndpointNotNode { edge: Id, endpoint: Id },
    /// A subgraph encloses no node.
    EmptySubgraph(Id),
    /// A subgraph was opened but never closed.
    UnclosedSubgraph(Id),
    /// A subgraph close had no matching open.
    UnbalancedEnd,
    /// Another view with the same name is already in the catalog.
    DuplicateView,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateFragment(id) => {
                write!(f, "fragment `{id}` is declared more than once")
            }
            Violation::UnknownEndpoint { edge, endpoint } => {
                write!(f, "edge `{edge}` references undeclared node `{endpoint}`")
            }
            Violation::EndpointNotNode { edge, endpoint } => {
                write!(f, "edge `{edge}` endpoint `{endpoint}` is not a node")
            }
            Violation::EmptySubgraph(id) => write!(f, "subgraph `{id}` contains no nodes"),
            Violation::UnclosedSubgraph(id) => write!(f, "subgraph `{id}` is never closed"),
            Violation::UnbalancedEnd => write!(f, "subgraph end without a matching open"),
            Violation::DuplicateView => write!(f, "view is defined more than once"),
        }
    }
}

/// The error type for catalog construction and lookup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown view `{0}`")]
    ViewNotFound(String),

    #[error("Unknown preset `{0}`")]
    PresetNotFound(String),

    #[error("Malformed view `{view}`: {}", summarize(.violations))]
    MalformedView {
        view: String,
        violations: Vec<Violation>,
    },

    #[error("Catalog contains no views")]
    Empty,
}

impl CatalogError {
    /// Returns `true` for the unknown-name lookup errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::ViewNotFound(_) | CatalogError::PresetNotFound(_)
        )
    }

    /// Returns the violations of a [`CatalogError::MalformedView`], or an
    /// empty slice for every other variant.
    pub fn violations(&self) -> &[Violation] {
        match self {
            CatalogError::MalformedView { violations, .. } => violations,
            _ => &[],
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    match violations {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (+{} more)", rest.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let violation = Violation::UnknownEndpoint {
            edge: Id::new("A->B"),
            endpoint: Id::new("B"),
        };
        assert_eq!(
            violation.to_string(),
            "edge `A->B` references undeclared node `B`"
        );
    }

    #[test]
    fn test_malformed_view_display_single() {
        let err = CatalogError::MalformedView {
            view: "Agent Graph".to_string(),
            violations: vec![Violation::EmptySubgraph(Id::new("LOOP"))],
        };
        assert_eq!(
            err.to_string(),
            "Malformed view `Agent Graph`: subgraph `LOOP` contains no nodes"
        );
        assert!(!err.is_not_found());
        assert_eq!(err.violations().len(), 1);
    }

    #[test]
    fn test_malformed_view_display_multiple() {
        let err = CatalogError::MalformedView {
            view: "DS Pipeline".to_string(),
            violations: vec![
                Violation::DuplicateFragment(Id::new("EDA")),
                Violation::UnbalancedEnd,
                Violation::UnbalancedEnd,
            ],
        };
        assert_eq!(
            err.to_string(),
            "Malformed view `DS Pipeline`: fragment `EDA` is declared more than once (+2 more)"
        );
    }

    #[test]
    fn test_not_found() {
        let err = CatalogError::ViewNotFound("Nope".to_string());
        assert!(err.is_not_found());
        assert!(err.violations().is_empty());
        assert_eq!(err.to_string(), "Unknown view `Nope`");
    }
}
