//! Selection-driven composition of views into Mermaid flowchart text.
//!
//! Composition runs in two passes. [`filter`] decides which fragment
//! positions survive an enabled-category predicate, and [`serialize`] writes
//! the survivors in view order, re-deriving subgraph nesting from the member
//! spans of the subgraphs that were kept.
//!
//! The output is a pure function of the view, the predicate and the
//! [`ComposeConfig`]: the predicate is only ever queried, never iterated.

mod filter;
mod serialize;

use log::{debug, info};

use prism_core::{identifier::Id, selection::Selection, view::View};

use crate::config::ComposeConfig;

/// Composes views into Mermaid text.
///
/// # Examples
///
/// ```
/// use prism::{compose::Composer, config::ComposeConfig};
/// use prism_core::{fragment::Direction, selection::Selection, view::View};
///
/// let view = View::builder("Agent Graph", Direction::LeftRight)
///     .node("Planner", "core", "Planner")
///     .node("Validator", "validators", "Validator")
///     .edge("Planner", "Validator", "core")
///     .build()
///     .unwrap();
///
/// let composer = Composer::new(ComposeConfig::default());
/// let selection = Selection::new("Agent Graph").with_categories(["core"]);
/// assert_eq!(
///     composer.compose_selection(&view, &selection),
///     "flowchart LR\nPlanner[Planner]"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Composer {
    config: ComposeConfig,
}

impl Composer {
    pub fn new(config: ComposeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    /// Composes `view` keeping only fragments whose category satisfies
    /// `enabled`.
    ///
    /// Edges lose out when either endpoint node is hidden, and subgraphs
    /// with no visible node are collapsed. Unknown categories simply never
    /// match, so this never fails.
    pub fn compose<F>(&self, view: &View, enabled: F) -> String
    where
        F: Fn(Id) -> bool,
    {
        let kept = filter::retain(view, enabled);
        info!(
            view = view.name(),
            kept = kept.len(),
            total = view.fragments().len();
            "Composing view"
        );

        if kept.is_empty() {
            debug!(view = view.name(); "Selection hides every fragment");
            return serialize::empty(view, &self.config);
        }
        serialize::write(view, &kept, &self.config)
    }

    /// Composes `view` with the categories enabled by `selection`.
    ///
    /// The selection's view name is not consulted; resolving it to a view is
    /// the caller's job.
    pub fn compose_selection(&self, view: &View, selection: &Selection) -> String {
        self.compose(view, |category| selection.is_enabled(category))
    }

    /// Serializes every fragment of `view`.
    pub fn compose_all(&self, view: &View) -> String {
        self.compose(view, |_| true)
    }
}
