//! Core types for Prism diagram catalogs.
//!
//! A catalog holds named [`View`](view::View)s, each an ordered sequence of
//! category-tagged [`Fragment`](fragment::Fragment)s, plus named
//! [`Preset`](preset::Preset) category bundles. A
//! [`Selection`](selection::Selection) picks one view and the categories to
//! show; composing it into Mermaid text lives in the `prism` crate.

pub mod catalog;
pub mod error;
pub mod fragment;
pub mod identifier;
pub mod preset;
pub mod selection;
pub mod view;

pub use catalog::Catalog;
pub use error::{CatalogError, Violation};
pub use fragment::{ArrowKind, Direction, Fragment, FragmentKind, NodeShape};
pub use identifier::Id;
pub use preset::Preset;
pub use selection::Selection;
pub use view::{View, ViewBuilder};
