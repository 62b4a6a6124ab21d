//! Named category bundles.

use indexmap::IndexSet;

use crate::identifier::Id;

/// A named, predefined set of enabled categories.
///
/// A preset may name categories that no view uses; those entries select
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    name: String,
    description: String,
    categories: IndexSet<Id>,
}

impl Preset {
    pub fn new<I, S>(name: impl Into<String>, description: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            categories: categories
                .into_iter()
                .map(|category| Id::new(category.as_ref()))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn categories(&self) -> &IndexSet<Id> {
        &self.categories
    }

    pub fn contains(&self, category: Id) -> bool {
        self.categories.contains(&category)
    }
}
