use proptest::prelude::*;

use prism_core::{
    fragment::{ArrowKind, Direction, FragmentKind, NodeShape},
    identifier::Id,
};
use prism_parser::{error::ErrorCode, parse};

fn codes(source: &str) -> Vec<ErrorCode> {
    parse(source)
        .expect_err("source should be rejected")
        .diagnostics()
        .iter()
        .filter_map(|diag| diag.code())
        .collect()
}

#[test]
fn test_simple_view() {
    let source = r#"
%% @view Agent Graph
%% @placeholder Enable 'Agents' to view the Agent Graph
flowchart TB
%% @category core
Planner[Planner]
%% @category validators
Validator[Validator]
%% @category core
Planner --> Validator
"#;

    let view = parse(source).expect("Failed to parse");

    assert_eq!(view.name(), "Agent Graph");
    assert_eq!(view.direction(), Direction::TopBottom);
    assert_eq!(
        view.placeholder(),
        Some("Enable 'Agents' to view the Agent Graph")
    );

    let fragments = view.fragments();
    assert_eq!(fragments.len(), 3);
    assert_eq!(fragments[0].id(), "Planner");
    assert_eq!(fragments[0].category(), "core");
    assert_eq!(fragments[1].category(), "validators");
    assert_eq!(fragments[2].id(), "Planner->Validator");
    assert_eq!(
        fragments[2].endpoints(),
        Some((Id::new("Planner"), Id::new("Validator")))
    );

    let categories: Vec<String> = view.categories().iter().map(Id::to_string).collect();
    assert_eq!(categories, vec!["core", "validators"]);
}

#[test]
fn test_subgraphs_and_shapes() {
    let source = r#"
%% @view DS Pipeline
flowchart TB
%% @category retrieval
subgraph RAGX["Reusable RAG Grounding"]
  RET[Retrieve Context]
  KB[(Knowledge Base)]:::store
  RET <--> KB
end
%% @category tools
subgraph TOOLX[Tools]
  SQL[SQL]
  subgraph INNER[Inner]
    PY[Python]
  end
end
RET -.->|query| SQL
"#;

    let view = parse(source).expect("Failed to parse");

    let ragx = view.fragment(Id::new("RAGX")).expect("RAGX exists");
    assert_eq!(ragx.label(), Some("Reusable RAG Grounding"));
    assert_eq!(ragx.members(), Some(1..4));

    let kb = view.fragment(Id::new("KB")).expect("KB exists");
    assert_eq!(
        kb.kind(),
        &FragmentKind::Node {
            shape: NodeShape::Database
        }
    );
    assert_eq!(kb.style(), Some("store"));

    assert_eq!(
        view.fragment(Id::new("TOOLX")).unwrap().members(),
        Some(5..8)
    );
    assert_eq!(
        view.fragment(Id::new("INNER")).unwrap().members(),
        Some(7..8)
    );

    let link = view.fragment(Id::new("RET->SQL")).expect("edge exists");
    assert_eq!(link.label(), Some("query"));
    assert_eq!(link.category(), "tools");
    assert!(matches!(
        link.kind(),
        FragmentKind::Edge {
            arrow: ArrowKind::Dotted,
            ..
        }
    ));
}

#[test]
fn test_parallel_edges_get_ordinals() {
    let source = "%% @view V\nflowchart LR\n%% @category c\nA\nB\nA --> B\nA ==> B\n";
    let view = parse(source).expect("Failed to parse");

    assert!(view.fragment(Id::new("A->B")).is_some());
    assert!(view.fragment(Id::new("A->B#2")).is_some());
    assert_eq!(view.fragment(Id::new("A")).unwrap().label(), Some("A"));
}

#[test]
fn test_unused_category_is_only_a_warning() {
    let source = "%% @view V\nflowchart LR\n%% @category unused\n%% @category c\nA[A]\n";
    assert!(parse(source).is_ok());
}

#[test]
fn test_structure_errors() {
    assert_eq!(
        codes("%% @view V\n%% @category c\nA[A]\n"),
        vec![ErrorCode::E102, ErrorCode::E100]
    );
    assert_eq!(
        codes("%% @view V\nflowchart LR\ngraph TB\n%% @category c\nA\n"),
        vec![ErrorCode::E101]
    );
    assert_eq!(
        codes("%% @view V\nflowchart LR\n%% @category c\nA\nend\n"),
        vec![ErrorCode::E103]
    );
    assert_eq!(
        codes("%% @view V\nflowchart LR\n%% @category c\nsubgraph S\nA\n"),
        vec![ErrorCode::E104]
    );
    assert_eq!(
        codes("flowchart LR\n%% @category c\nA\n"),
        vec![ErrorCode::E105]
    );
    assert_eq!(
        codes("%% @view V\n%% @view W\nflowchart LR\n%% @category c\nA\n"),
        vec![ErrorCode::E106]
    );
}

#[test]
fn test_validation_errors() {
    assert_eq!(
        codes("%% @view V\nflowchart LR\n%% @category c\nA\nA --> B\n"),
        vec![ErrorCode::E200]
    );
    assert_eq!(
        codes("%% @view V\nflowchart LR\n%% @category c\nsubgraph S\nA\nend\nA --> S\n"),
        vec![ErrorCode::E201]
    );
    assert_eq!(
        codes("%% @view V\nflowchart LR\n%% @category c\nA[one]\nA[two]\n"),
        vec![ErrorCode::E202]
    );
    assert_eq!(
        codes("%% @view V\nflowchart LR\nA\nB\n"),
        vec![ErrorCode::E203]
    );
    assert_eq!(
        codes("%% @view V\nflowchart LR\n%% @category c\nA\nsubgraph S\nend\n"),
        vec![ErrorCode::E204]
    );
}

#[test]
fn test_syntax_errors_skip_elaboration() {
    // The broken line would also leave `B` undeclared, but only the syntax
    // error is reported.
    let source = "%% @view V\nflowchart LR\n%% @category c\nA\nB[oops\nA --> B\n";
    assert_eq!(codes(source), vec![ErrorCode::E003]);
}

#[test]
fn test_multiple_errors_in_one_pass() {
    let source = "%% @view V\nflowchart LR\n%% @category c\nA --> X\nB --> Y\nend\n";
    let err = parse(source).expect_err("should fail");

    assert_eq!(err.diagnostics().len(), 5);
    assert!(err.to_string().contains("(+4 more)"));
}

#[test]
fn test_duplicate_has_secondary_label() {
    let source = "%% @view V\nflowchart LR\n%% @category c\nA[one]\nA[two]\n";
    let err = parse(source).expect_err("should fail");
    let diag = &err.diagnostics()[0];

    assert_eq!(diag.labels().len(), 2);
    let first = diag.labels().iter().find(|l| l.is_secondary()).unwrap();
    assert_eq!(&source[first.span().start()..first.span().end()], "A");
    assert_eq!(first.span().start(), source.find("A[one]").unwrap());
}

proptest! {
    #[test]
    fn parse_never_panics(lines in prop::collection::vec("[ -~]{0,24}", 0..12)) {
        let source = lines.join("\n");
        let _ = parse(&source);
    }

    #[test]
    fn chain_of_nodes_parses(ids in prop::collection::hash_set("[A-Z][A-Z0-9_]{0,6}", 2..8)) {
        let ids: Vec<String> = ids.into_iter().collect();

        let mut source = String::from("%% @view P\nflowchart LR\n%% @category c\n");
        for id in &ids {
            source.push_str(&format!("{id}[{id}]\n"));
        }
        source.push_str(&ids.join(" --> "));
        source.push('\n');

        let view = parse(&source).expect("generated source parses");
        prop_assert_eq!(view.fragments().len(), ids.len() * 2 - 1);
    }
}
