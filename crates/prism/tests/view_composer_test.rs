//! Integration tests for the ViewComposer API over the builtin catalog.

use prism::{
    PrismError, ViewComposer,
    config::{AppConfig, ComposeConfig, DefaultsConfig, ExportConfig},
    export::Format,
    selection::Selection,
};

fn composer() -> ViewComposer {
    ViewComposer::builtin(AppConfig::default()).expect("Failed to load builtin catalog")
}

#[test]
fn test_builtin_catalog_loads() {
    let composer = composer();
    let names: Vec<&str> = composer.catalog().view_names().collect();
    assert_eq!(names, ["Architecture (SoC)", "Agent Graph", "DS Pipeline"]);

    let categories: Vec<String> = composer
        .catalog()
        .categories("Agent Graph")
        .unwrap()
        .iter()
        .map(|id| id.to_string())
        .collect();
    assert_eq!(
        categories,
        ["agents", "retrieval", "validators", "fallback-loop", "tools", "obs"]
    );
}

#[test]
fn test_architecture_api_only() {
    let selection = Selection::new("Architecture (SoC)").with_categories(["api"]);
    let mermaid = composer().compose(&selection).unwrap();
    assert_eq!(
        mermaid,
        "flowchart LR\n\
         subgraph API[\"API / UI Layer (Request Surface)\"]\n  \
         UI[Web UI / Chat UI]\n  \
         API1[FastAPI / Gateway]\n  \
         UI --> API1\n\
         end"
    );
}

#[test]
fn test_architecture_cross_link_needs_both_blocks() {
    let composer = composer();

    let api_only = composer
        .compose(&Selection::new("Architecture (SoC)").with_categories(["api"]))
        .unwrap();
    assert!(!api_only.contains("API1 --> ROUTER"));

    let with_orchestrator = composer
        .compose(&Selection::new("Architecture (SoC)").with_categories(["api", "orchestrator"]))
        .unwrap();
    assert!(with_orchestrator.contains("\nAPI1 --> ROUTER"));
    assert!(with_orchestrator.contains("  ROUTER <--> STATE"));
    assert!(!with_orchestrator.contains("ROUTER --> PLAN"));
}

#[test]
fn test_architecture_orchestrator_and_data_labels() {
    let mermaid = composer()
        .compose(&Selection::new("Architecture (SoC)").with_categories(["orchestrator", "data"]))
        .unwrap();
    assert_eq!(
        mermaid,
        "flowchart LR\n\
         subgraph ORCH[\"Orchestrator (Control Plane)\"]\n  \
         ROUTER[Router / Policy]\n  \
         STATE[State Store]\n  \
         ROUTER <--> STATE\n\
         end\n\
         subgraph DATA[\"Data Stores\"]\n  \
         VDB[(Vector DB)]\n  \
         POL[(Policy Docs)]\n  \
         DWH[(Warehouse / Lake)]\n  \
         LOGS[(Logs / Traces)]\n\
         end"
    );
}

#[test]
fn test_ds_pipeline_agent_labels() {
    let mermaid = composer()
        .compose(&Selection::new("DS Pipeline").with_categories(["ds", "tools"]))
        .unwrap();
    assert!(mermaid.contains("  DATAAUD[\"Data QA Agent<br/>(nulls, drift, leakage checks)\"]\n"));
    assert!(mermaid.contains("  TRAIN[\"Training Agent<br/>CV, tuning, baselines\"]\n"));
    assert!(mermaid.contains("  SQL[SQL Tool]\n"));
    assert!(mermaid.contains("\nDATAAUD --> SQL"));
    assert!(!mermaid.contains("BRIEF --> RET"));
}

#[test]
fn test_architecture_empty_has_no_placeholder() {
    let mermaid = composer().compose_preset("Architecture (SoC)", "all_off").unwrap();
    assert_eq!(mermaid, "flowchart LR");
}

#[test]
fn test_agent_graph_placeholder() {
    let mermaid = composer().compose_preset("Agent Graph", "all_off").unwrap();
    assert_eq!(
        mermaid,
        "flowchart TB\nPLACEHOLDER[\"Enable 'Agents' to view the Agent Graph\"]"
    );
}

#[test]
fn test_agent_graph_agents_only() {
    let mermaid = composer()
        .compose(&Selection::new("Agent Graph").with_categories(["agents"]))
        .unwrap();
    assert_eq!(
        mermaid,
        "flowchart TB\n\
         START((Start))\n\
         PLAN[Plan]\n\
         REASON[Reason]\n\
         DECIDE[Decide]\n\
         START -->|goal| PLAN"
    );
}

#[test]
fn test_ds_pipeline_governance_only() {
    let mermaid = composer()
        .compose(&Selection::new("DS Pipeline").with_categories(["governance"]))
        .unwrap();
    assert_eq!(
        mermaid,
        "flowchart TB\n\
         subgraph GOVX[\"Governance Overlay (applies to ALL agents)\"]\n  \
         SCHEMA[\"Schema contracts<br/>(Pydantic / JSON schema)\"]\n  \
         PII2[PII masking]\n  \
         AUDIT[Audit logs]\n\
         end"
    );
}

#[test]
fn test_all_on_equals_compose_all() {
    let composer = composer();
    for view in ["Architecture (SoC)", "Agent Graph", "DS Pipeline"] {
        assert_eq!(
            composer.compose_preset(view, "all_on").unwrap(),
            composer.compose_all(view).unwrap(),
            "all_on differs from the full view for {view}"
        );
    }
}

#[test]
fn test_unknown_view_is_not_found() {
    let err = composer()
        .compose(&Selection::new("Sequence"))
        .expect_err("unknown view must fail");
    match err {
        PrismError::Catalog(err) => assert!(err.is_not_found()),
        other => panic!("Expected catalog error, got {other:?}"),
    }
}

#[test]
fn test_unknown_preset_is_not_found() {
    let result = composer().compose_preset("Agent Graph", "everything");
    assert!(matches!(result, Err(PrismError::Catalog(err)) if err.is_not_found()));
}

#[test]
fn test_selection_defaults_to_first_view_and_all_categories() {
    let composer = composer();
    let selection = composer.selection(None, None, &[] as &[&str]).unwrap();
    assert_eq!(selection.view(), "Architecture (SoC)");
    assert_eq!(selection.categories().len(), 9);
}

#[test]
fn test_selection_uses_configured_defaults() {
    let config = AppConfig::new(
        ComposeConfig::default(),
        DefaultsConfig::new(Some("DS Pipeline".to_string()), Some("all_off".to_string())),
        ExportConfig::default(),
    );
    let composer = ViewComposer::builtin(config).unwrap();

    let selection = composer.selection(None, None, &[] as &[&str]).unwrap();
    assert_eq!(selection.view(), "DS Pipeline");
    assert!(selection.categories().is_empty());

    // Explicit categories replace the default preset.
    let selection = composer.selection(None, None, &["tools"]).unwrap();
    assert_eq!(selection.categories().len(), 1);
}

#[test]
fn test_selection_unions_preset_and_categories() {
    let composer = composer();
    let selection = composer
        .selection(Some("Agent Graph"), Some("all_off"), &["tools", "obs"])
        .unwrap();
    assert_eq!(selection.categories().len(), 2);

    let from_preset = composer
        .selection(Some("Agent Graph"), Some("rag_agents"), &[] as &[&str])
        .unwrap();
    assert_eq!(
        composer.compose(&from_preset).unwrap(),
        composer.compose_preset("Agent Graph", "rag_agents").unwrap()
    );
}

#[test]
fn test_load_view() {
    let mut composer = composer();
    let source = "%% @view Custom\nflowchart LR\n%% @category core\nA[Alpha]\nB[Beta]\nA --> B\n";

    let view = composer.load_view(source).expect("Failed to load view");
    assert_eq!(view.name(), "Custom");
    assert_eq!(
        composer.compose_all("Custom").unwrap(),
        "flowchart LR\nA[Alpha]\nB[Beta]\nA --> B"
    );

    let err = composer.load_view(source).expect_err("duplicate view must fail");
    assert!(matches!(err, PrismError::Catalog(_)));
}

#[test]
fn test_load_view_reports_parse_errors() {
    let mut composer = composer();
    let err = composer
        .load_view("%% @view Broken\nflowchart XY\n")
        .expect_err("invalid direction must fail");
    match err {
        PrismError::Parse { err, src } => {
            assert!(src.contains("flowchart XY"));
            assert!(!err.diagnostics().is_empty());
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_export_formats() {
    let composer = composer();
    let code = composer.compose_preset("Agent Graph", "rag_agents").unwrap();

    let mermaid = composer.export(&code, Format::Mermaid, "Agent Graph").unwrap();
    assert_eq!(mermaid, format!("{code}\n"));

    let markdown = composer.export(&code, Format::Markdown, "Agent Graph").unwrap();
    assert!(markdown.starts_with("# Agent Graph\n\n```mermaid\nflowchart TB\n"));

    let html = composer.export(&code, Format::Html, "Agent Graph").unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Agent Graph</title>"));
    assert!(html.contains(&serde_json::to_string(&code).unwrap()));
}
