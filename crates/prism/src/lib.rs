//! Prism - category-filtered composition of Mermaid flowcharts.
//!
//! A catalog holds named views, each an ordered list of category-tagged
//! fragments. Prism composes the Mermaid text for a selection of enabled
//! categories: hidden fragments are dropped, edges to hidden nodes are
//! repaired away, and empty subgraphs collapse.

pub mod builtin;
pub mod compose;
pub mod config;
pub mod export;

mod error;

pub use prism_core::{catalog, fragment, identifier, preset, selection, view};

pub use error::PrismError;
pub use prism_core::error::CatalogError;

use log::{debug, info, trace};

use prism_core::{catalog::Catalog, selection::Selection, view::View};

use compose::Composer;
use config::AppConfig;
use export::Format;

/// Facade for composing and exporting the views of a catalog.
///
/// # Examples
///
/// ```rust,no_run
/// use prism::{ViewComposer, config::AppConfig};
///
/// let composer = ViewComposer::builtin(AppConfig::default())
///     .expect("Failed to load builtin catalog");
///
/// let mermaid = composer
///     .compose_preset("Architecture (SoC)", "rag_agents")
///     .expect("Failed to compose");
/// println!("{mermaid}");
/// ```
pub struct ViewComposer {
    config: AppConfig,
    catalog: Catalog,
    composer: Composer,
}

impl ViewComposer {
    /// Create a composer over `catalog`.
    pub fn new(config: AppConfig, catalog: Catalog) -> Self {
        let composer = Composer::new(config.compose().clone());
        Self {
            config,
            catalog,
            composer,
        }
    }

    /// Create a composer over the [builtin catalog](builtin::catalog).
    ///
    /// # Errors
    ///
    /// Returns `PrismError` if the embedded view sources fail to load.
    pub fn builtin(config: AppConfig) -> Result<Self, PrismError> {
        let catalog = builtin::catalog()?;
        Ok(Self::new(config, catalog))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Parse an annotated view source and add it to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::Parse`] with the source attached for syntax or
    /// validation problems, or [`PrismError::Catalog`] if a view with the same
    /// name already exists.
    pub fn load_view(&mut self, source: &str) -> Result<&View, PrismError> {
        let view = prism_parser::parse(source)
            .map_err(|err| PrismError::new_parse_error(err, source))?;
        let name = view.name().to_string();
        self.catalog.insert_view(view)?;
        info!(view = name.as_str(); "Loaded view source");
        Ok(self.catalog.view(&name)?)
    }

    /// Compose the view named by `selection`.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::Catalog`] if the view does not exist. Unknown
    /// categories are not an error.
    pub fn compose(&self, selection: &Selection) -> Result<String, PrismError> {
        let view = self.catalog.view(selection.view())?;
        trace!(
            view = selection.view(),
            enabled = selection.categories().len();
            "Composing selection"
        );
        Ok(self.composer.compose_selection(view, selection))
    }

    /// Compose `view` with the categories of the named preset.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::Catalog`] if the view or the preset does not
    /// exist.
    pub fn compose_preset(&self, view: &str, preset: &str) -> Result<String, PrismError> {
        let preset = self.catalog.preset(preset)?;
        self.compose(&Selection::from_preset(view, preset))
    }

    /// Compose every fragment of `view`.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::Catalog`] if the view does not exist.
    pub fn compose_all(&self, view: &str) -> Result<String, PrismError> {
        let view = self.catalog.view(view)?;
        Ok(self.composer.compose_all(view))
    }

    /// Resolve a request into a [`Selection`].
    ///
    /// The view falls back to the configured default and then to the first
    /// view of the catalog. The enabled categories are the union of the
    /// preset's categories and `categories`; when neither is given the
    /// configured default preset applies, or else every category of the view.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::Catalog`] if the view or a preset does not exist.
    pub fn selection<S>(
        &self,
        view: Option<&str>,
        preset: Option<&str>,
        categories: &[S],
    ) -> Result<Selection, PrismError>
    where
        S: AsRef<str>,
    {
        let view = match view.or(self.config.defaults().view()) {
            Some(name) => self.catalog.view(name)?,
            None => self.catalog.first_view(),
        };

        let preset = match preset {
            Some(name) => Some(self.catalog.preset(name)?),
            None if categories.is_empty() => self
                .config
                .defaults()
                .preset()
                .map(|name| self.catalog.preset(name))
                .transpose()?,
            None => None,
        };

        let selection = match preset {
            Some(preset) => Selection::from_preset(view.name(), preset),
            None if categories.is_empty() => Selection::new(view.name())
                .with_categories(view.categories().iter().map(|id| id.to_string())),
            None => Selection::new(view.name()),
        }
        .with_categories(categories);

        debug!(
            view = view.name(),
            categories = selection.categories().len();
            "Resolved selection"
        );
        Ok(selection)
    }

    /// Wrap composed text in the requested output format.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::Export`] if the exporter fails.
    pub fn export(&self, code: &str, format: Format, title: &str) -> Result<String, PrismError> {
        info!(format:% = format; "Exporting diagram");
        let exporter = export::exporter(format, self.config.export());
        Ok(exporter.export(code, title)?)
    }
}
