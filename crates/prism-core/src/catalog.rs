//! The diagram catalog.
//!
//! A [`Catalog`] is the immutable registry of every [`View`] and [`Preset`]
//! known to the process. It is built once and only read afterwards.

use indexmap::{IndexMap, IndexSet};
use log::{debug, info};

use crate::{
    error::{CatalogError, Violation},
    identifier::Id,
    preset::Preset,
    view::View,
};

/// Registry of validated views and presets, in insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    views: IndexMap<String, View>,
    presets: IndexMap<String, Preset>,
}

impl Catalog {
    /// Creates a catalog from already validated views.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Empty`] when `views` yields nothing.
    /// - [`CatalogError::MalformedView`] with [`Violation::DuplicateView`]
    ///   when two views share a name.
    pub fn new(
        views: impl IntoIterator<Item = View>,
        presets: impl IntoIterator<Item = Preset>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            views: IndexMap::new(),
            presets: IndexMap::new(),
        };
        for view in views {
            catalog.insert_view(view)?;
        }
        if catalog.views.is_empty() {
            return Err(CatalogError::Empty);
        }
        for preset in presets {
            // Later presets replace earlier ones with the same name.
            catalog.presets.insert(preset.name().to_string(), preset);
        }

        info!(
            views = catalog.views.len(),
            presets = catalog.presets.len();
            "Catalog built"
        );
        Ok(catalog)
    }

    /// Adds another view, for example one loaded from a file at startup.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedView`] when a view of that name
    /// already exists.
    pub fn insert_view(&mut self, view: View) -> Result<(), CatalogError> {
        if self.views.contains_key(view.name()) {
            return Err(CatalogError::MalformedView {
                view: view.name().to_string(),
                violations: vec![Violation::DuplicateView],
            });
        }
        debug!(view = view.name(); "Registering view");
        self.views.insert(view.name().to_string(), view);
        Ok(())
    }

    /// View names in insertion order. Never empty.
    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.views.values()
    }

    /// Returns the view with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ViewNotFound`] for unknown names.
    pub fn view(&self, name: &str) -> Result<&View, CatalogError> {
        self.views
            .get(name)
            .ok_or_else(|| CatalogError::ViewNotFound(name.to_string()))
    }

    /// Returns the first view in insertion order.
    pub fn first_view(&self) -> &View {
        // Construction rejects empty catalogs.
        &self.views[0]
    }

    /// Category tags used by a view, in first-appearance order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ViewNotFound`] for unknown names.
    pub fn categories(&self, view: &str) -> Result<&IndexSet<Id>, CatalogError> {
        self.view(view).map(View::categories)
    }

    /// Union of the categories of every view, in first-appearance order.
    pub fn all_categories(&self) -> IndexSet<Id> {
        self.views
            .values()
            .flat_map(|view| view.categories().iter().copied())
            .collect()
    }

    pub fn presets(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    /// Returns the preset with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PresetNotFound`] for unknown names.
    pub fn preset(&self, name: &str) -> Result<&Preset, CatalogError> {
        self.presets
            .get(name)
            .ok_or_else(|| CatalogError::PresetNotFound(name.to_string()))
    }
}
