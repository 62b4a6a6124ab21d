//! Configuration types for composing and exporting views.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! configuration file; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`ComposeConfig`] - Serialization options for composed diagrams.
//! - [`DefaultsConfig`] - View and preset used when a request names none.
//! - [`ExportConfig`] - Options for the HTML exporter.
//!
//! # Example
//!
//! ```
//! # use prism::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.compose().indent(), 2);
//! assert!(config.compose().placeholder());
//! ```

use serde::Deserialize;

use prism_core::fragment::Direction;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    compose: ComposeConfig,

    #[serde(default)]
    defaults: DefaultsConfig,

    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    pub fn new(compose: ComposeConfig, defaults: DefaultsConfig, export: ExportConfig) -> Self {
        Self {
            compose,
            defaults,
            export,
        }
    }

    pub fn compose(&self) -> &ComposeConfig {
        &self.compose
    }

    pub fn defaults(&self) -> &DefaultsConfig {
        &self.defaults
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Serialization options for composed diagrams.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Spaces per nesting level inside subgraphs.
    indent: usize,

    /// Emit the view's placeholder node when a selection hides everything.
    placeholder: bool,

    /// Overrides the flow direction of every view.
    direction: Option<Direction>,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            placeholder: true,
            direction: None,
        }
    }
}

impl ComposeConfig {
    pub fn new(indent: usize, placeholder: bool) -> Self {
        Self {
            indent,
            placeholder,
            direction: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}

/// View and preset used when a request does not name them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    view: Option<String>,
    preset: Option<String>,
}

impl DefaultsConfig {
    pub fn new(view: Option<String>, preset: Option<String>) -> Self {
        Self { view, preset }
    }

    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    pub fn preset(&self) -> Option<&str> {
        self.preset.as_deref()
    }
}

/// Options for the standalone HTML exporter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Mermaid theme name passed to `mermaid.initialize`.
    theme: String,

    /// Where the generated page loads Mermaid from.
    mermaid_url: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mermaid_url: "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn new(theme: impl Into<String>, mermaid_url: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            mermaid_url: mermaid_url.into(),
        }
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn mermaid_url(&self) -> &str {
        &self.mermaid_url
    }
}
