//! The builtin catalog: three views of an agentic RAG platform and the
//! presets that toggle them.
//!
//! View sources are annotated Mermaid flowcharts embedded at compile time and
//! parsed on first use. They are static content, so any diagnostic is a
//! defect in this crate and is returned as [`PrismError::Parse`].

use log::info;

use prism_core::{catalog::Catalog, preset::Preset};

use crate::error::PrismError;

/// Embedded view sources in catalog order.
pub const SOURCES: [(&str, &str); 3] = [
    ("architecture.mmd", include_str!("builtin/architecture.mmd")),
    ("agent_graph.mmd", include_str!("builtin/agent_graph.mmd")),
    ("ds_pipeline.mmd", include_str!("builtin/ds_pipeline.mmd")),
];

const ALL: [&str; 11] = [
    "api",
    "orchestrator",
    "agents",
    "retrieval",
    "tools",
    "data",
    "governance",
    "obs",
    "ds",
    "validators",
    "fallback-loop",
];

/// Parses the embedded sources into a catalog with the builtin presets.
///
/// # Errors
///
/// Returns [`PrismError::Parse`] if an embedded source does not parse, or
/// [`PrismError::Catalog`] if the views conflict.
pub fn catalog() -> Result<Catalog, PrismError> {
    let views = SOURCES
        .iter()
        .map(|(file, source)| {
            info!(file = *file; "Loading builtin view");
            prism_parser::parse(source).map_err(|err| PrismError::new_parse_error(err, *source))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::new(views, presets())?)
}

/// Returns the builtin presets.
pub fn presets() -> Vec<Preset> {
    let except = |excluded: &[&str]| {
        ALL.into_iter()
            .filter(|category| !excluded.contains(category))
            .collect::<Vec<_>>()
    };

    vec![
        Preset::new("all_on", "Every category of every view", ALL),
        Preset::new("all_off", "Nothing enabled", Vec::<&str>::new()),
        Preset::new(
            "rag_agents",
            "RAG and agent runtime without the data-science workload",
            except(&["ds"]),
        ),
        Preset::new(
            "ds_pipeline",
            "Data-science workflow on top of agents, retrieval and tools",
            except(&["api", "orchestrator"]),
        ),
        Preset::new(
            "governance",
            "Full platform with the governance and safety overlay",
            except(&["ds"]),
        ),
    ]
}
