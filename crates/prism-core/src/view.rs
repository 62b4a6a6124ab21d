//! Views: named, ordered fragment sequences.
//!
//! A [`View`] can only be obtained from a [`ViewBuilder`], whose
//! [`build`](ViewBuilder::build) step validates the referential invariants
//! once. Afterwards the view is immutable, so every later consumer may rely on:
//!
//! - fragment ids are unique,
//! - every edge endpoint names a node of the same view,
//! - subgraph spans are closed, properly nested and contain at least one node.

use std::collections::HashMap;

use indexmap::IndexSet;
use log::{debug, trace};

use crate::{
    error::{CatalogError, Violation},
    fragment::{Direction, Fragment, FragmentKind},
    identifier::Id,
};

/// One complete, validated diagram definition.
#[derive(Debug, Clone)]
pub struct View {
    name: String,
    direction: Direction,
    placeholder: Option<String>,
    fragments: Vec<Fragment>,
    categories: IndexSet<Id>,
    index: HashMap<Id, usize>,
}

impl View {
    /// Starts building a view.
    ///
    /// # Examples
    ///
    /// ```
    /// use prism_core::{fragment::Direction, view::View};
    ///
    /// let view = View::builder("Agent Graph", Direction::TopBottom)
    ///     .node("Planner", "core", "Planner")
    ///     .node("Validator", "validators", "Validator")
    ///     .edge("Planner", "Validator", "core")
    ///     .build()
    ///     .expect("valid view");
    ///
    /// assert_eq!(view.fragments().len(), 3);
    /// assert_eq!(view.categories().len(), 2);
    /// ```
    pub fn builder(name: impl Into<String>, direction: Direction) -> ViewBuilder {
        ViewBuilder::new(name, direction)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Message to show when a selection hides every fragment.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Fragments in rendering order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Category tags used by this view, in first-appearance order.
    pub fn categories(&self) -> &IndexSet<Id> {
        &self.categories
    }

    /// Returns the position of the fragment with the given id.
    pub fn position(&self, id: Id) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Returns the fragment with the given id.
    pub fn fragment(&self, id: Id) -> Option<&Fragment> {
        self.position(id).map(|idx| &self.fragments[idx])
    }
}

/// Incremental constructor for a [`View`].
///
/// Subgraphs are either built with [`subgraph`](Self::subgraph), which takes
/// a closure adding the members, or with an explicit
/// [`open_subgraph`](Self::open_subgraph) / [`close_subgraph`](Self::close_subgraph)
/// pair. Structural mistakes are recorded and reported together by
/// [`build`](Self::build).
#[derive(Debug)]
pub struct ViewBuilder {
    name: String,
    direction: Direction,
    placeholder: Option<String>,
    fragments: Vec<Fragment>,
    open: Vec<usize>,
    edge_ordinals: HashMap<(Id, Id), usize>,
    violations: Vec<Violation>,
}

impl ViewBuilder {
    fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
            placeholder: None,
            fragments: Vec::new(),
            open: Vec::new(),
            edge_ordinals: HashMap::new(),
            violations: Vec::new(),
        }
    }

    /// Sets the message shown when nothing survives filtering.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Appends a rectangle node.
    pub fn node(self, id: &str, category: &str, label: &str) -> Self {
        self.fragment(Fragment::node(Id::new(id), Id::new(category), label))
    }

    /// Appends a directed edge with a generated id.
    pub fn edge(self, source: &str, target: &str, category: &str) -> Self {
        let (source, target) = (Id::new(source), Id::new(target));
        let id = self.next_edge_id(source, target);
        self.fragment(Fragment::edge(id, Id::new(category), source, target))
    }

    /// Appends a subgraph whose members are added by `members`.
    pub fn subgraph(
        self,
        id: &str,
        category: &str,
        title: Option<&str>,
        members: impl FnOnce(Self) -> Self,
    ) -> Self {
        let builder = self.open_subgraph(Fragment::subgraph(
            Id::new(id),
            Id::new(category),
            title.map(str::to_string),
        ));
        members(builder).close_subgraph()
    }

    /// Appends any fragment.
    ///
    /// A subgraph fragment opens a boundary, exactly like
    /// [`open_subgraph`](Self::open_subgraph).
    pub fn fragment(mut self, fragment: Fragment) -> Self {
        if fragment.is_subgraph() {
            return self.open_subgraph(fragment);
        }
        if let Some((source, target)) = fragment.endpoints() {
            *self.edge_ordinals.entry((source, target)).or_default() += 1;
        }
        self.fragments.push(fragment);
        self
    }

    /// Opens a subgraph boundary. Following fragments become its members
    /// until the matching [`close_subgraph`](Self::close_subgraph).
    pub fn open_subgraph(mut self, subgraph: Fragment) -> Self {
        self.open.push(self.fragments.len());
        self.fragments.push(subgraph);
        self
    }

    /// Closes the innermost open subgraph.
    pub fn close_subgraph(mut self) -> Self {
        match self.open.pop() {
            Some(start) => {
                let end = self.fragments.len();
                self.fragments[start].set_members(start + 1..end);
            }
            None => self.violations.push(Violation::UnbalancedEnd),
        }
        self
    }

    /// Returns the id the next edge between `source` and `target` would get.
    pub fn next_edge_id(&self, source: Id, target: Id) -> Id {
        let ordinal = self.edge_ordinals.get(&(source, target)).copied().unwrap_or(0);
        Id::edge(source, target, ordinal + 1)
    }

    /// Validates the collected fragments and produces the view.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedView`] listing every violation found.
    pub fn build(mut self) -> Result<View, CatalogError> {
        // Unclosed boundaries extend to the end so they are reported once.
        let end = self.fragments.len();
        for start in std::mem::take(&mut self.open).into_iter().rev() {
            let id = self.fragments[start].id();
            self.fragments[start].set_members(start + 1..end);
            self.violations.push(Violation::UnclosedSubgraph(id));
        }

        let mut index = HashMap::with_capacity(self.fragments.len());
        for (idx, fragment) in self.fragments.iter().enumerate() {
            if index.insert(fragment.id(), idx).is_some() {
                self.violations
                    .push(Violation::DuplicateFragment(fragment.id()));
            }
        }
        // Later duplicates overwrote earlier positions; restore first wins.
        for (idx, fragment) in self.fragments.iter().enumerate().rev() {
            index.insert(fragment.id(), idx);
        }

        for fragment in &self.fragments {
            match fragment.kind() {
                FragmentKind::Edge { source, target, .. } => {
                    for endpoint in [*source, *target] {
                        match index.get(&endpoint).map(|&idx| &self.fragments[idx]) {
                            None => self.violations.push(Violation::UnknownEndpoint {
                                edge: fragment.id(),
                                endpoint,
                            }),
                            Some(other) if !other.is_node() => {
                                self.violations.push(Violation::EndpointNotNode {
                                    edge: fragment.id(),
                                    endpoint,
                                })
                            }
                            Some(_) => {}
                        }
                    }
                }
                FragmentKind::Subgraph { members } => {
                    if !self.fragments[members.clone()].iter().any(Fragment::is_node) {
                        self.violations
                            .push(Violation::EmptySubgraph(fragment.id()));
                    }
                }
                FragmentKind::Node { .. } => {}
            }
        }

        if !self.violations.is_empty() {
            debug!(
                view = self.name.as_str(),
                violations = self.violations.len();
                "View failed validation"
            );
            return Err(CatalogError::MalformedView {
                view: self.name,
                violations: self.violations,
            });
        }

        let categories: IndexSet<Id> = self.fragments.iter().map(Fragment::category).collect();

        debug!(
            view = self.name.as_str(),
            fragments = self.fragments.len(),
            categories = categories.len();
            "View validated"
        );
        trace!(fragments:? = self.fragments; "View fragments");

        Ok(View {
            name: self.name,
            direction: self.direction,
            placeholder: self.placeholder,
            fragments: self.fragments,
            categories,
            index,
        })
    }
}
