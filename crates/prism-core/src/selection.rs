//! User selections: a view plus its enabled categories.

use std::collections::HashSet;

use log::debug;

use crate::{identifier::Id, preset::Preset};

/// The view to render and the categories enabled for it.
///
/// Selections are plain values. Categories the view does not use are allowed
/// and simply match nothing.
///
/// # Examples
///
/// ```
/// use prism_core::{fragment::Direction, identifier::Id, selection::Selection, view::View};
///
/// let view = View::builder("Agent Graph", Direction::TopBottom)
///     .node("PLAN", "core", "Plan")
///     .build()
///     .unwrap();
///
/// let selection = Selection::new(view.name()).with_categories(["core", "validators"]);
///
/// assert!(selection.is_enabled(Id::new("core")));
/// assert_eq!(selection.categories().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    view: String,
    categories: HashSet<Id>,
}

impl Selection {
    /// Creates a selection with no enabled categories.
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            categories: HashSet::new(),
        }
    }

    /// Creates a selection enabling exactly the categories of `preset`.
    pub fn from_preset(view: impl Into<String>, preset: &Preset) -> Self {
        Self {
            view: view.into(),
            categories: preset.categories().iter().copied().collect(),
        }
    }

    /// Enables additional categories.
    ///
    /// Every category a view declares is interned when the view is built, so
    /// a tag that was never interned cannot match any view and is skipped
    /// rather than interned.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for category in categories {
            let category = category.as_ref();
            match Id::lookup(category) {
                Some(id) => {
                    self.categories.insert(id);
                }
                None => debug!(category; "Skipping category no view declares"),
            }
        }
        self
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn categories(&self) -> &HashSet<Id> {
        &self.categories
    }

    pub fn is_enabled(&self, category: Id) -> bool {
        self.categories.contains(&category)
    }
}
