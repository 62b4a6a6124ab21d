//! Property tests for composition over generated views.

use std::collections::HashSet;

use proptest::prelude::*;

use prism::{
    compose::Composer,
    fragment::{Direction, Fragment},
    identifier::Id,
    view::View,
};

const CATEGORIES: [&str; 4] = ["core", "retrieval", "tools", "obs"];

/// A generated subgraph over the node run `start..=end`.
#[derive(Debug, Clone, Copy)]
struct Group {
    id: &'static str,
    start: usize,
    end: usize,
    category: usize,
}

impl Group {
    fn fragment(&self) -> Fragment {
        Fragment::subgraph(
            Id::new(self.id),
            Id::new(CATEGORIES[self.category]),
            Some(self.id.to_string()),
        )
    }
}

/// Nodes `N0..Nn` with random categories, an optional `OUTER` subgraph around
/// a run of nodes with an optional `INNER` subgraph nested in it, and random
/// edges appended after the nodes.
fn arb_view() -> impl Strategy<Value = View> {
    let group = || (0..usize::MAX, 1..usize::MAX, 0..CATEGORIES.len());
    (2..10usize)
        .prop_flat_map(move |n| {
            (
                prop::collection::vec(0..CATEGORIES.len(), n),
                prop::collection::vec((0..n, 0..n, 0..CATEGORIES.len()), 0..12),
                prop::option::of((group(), prop::option::of(group()))),
            )
        })
        .prop_map(|(nodes, edges, groups)| {
            let last = nodes.len() - 1;
            let outer = groups.map(|((start, len, category), _)| {
                let start = start % nodes.len();
                Group {
                    id: "OUTER",
                    start,
                    end: (start + len % nodes.len()).min(last),
                    category,
                }
            });
            let inner = groups.and_then(|(_, inner)| inner).zip(outer).map(
                |((offset, len, category), outer)| {
                    let width = outer.end - outer.start + 1;
                    let start = outer.start + offset % width;
                    Group {
                        id: "INNER",
                        start,
                        end: (start + len % width).min(outer.end),
                        category,
                    }
                },
            );

            let mut builder = View::builder("Generated", Direction::LeftRight);
            for (i, category) in nodes.iter().enumerate() {
                for group in [outer, inner].into_iter().flatten() {
                    if group.start == i {
                        builder = builder.open_subgraph(group.fragment());
                    }
                }
                let id = format!("N{i}");
                builder = builder.node(&id, CATEGORIES[*category], &id);
                for group in [inner, outer].into_iter().flatten() {
                    if group.end == i {
                        builder = builder.close_subgraph();
                    }
                }
            }
            for (source, target, category) in edges {
                builder = builder.edge(
                    &format!("N{source}"),
                    &format!("N{target}"),
                    CATEGORIES[category],
                );
            }
            builder.build().expect("generated view is well formed")
        })
}

fn arb_enabled() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), CATEGORIES.len())
}

fn predicate(enabled: &[bool]) -> impl Fn(Id) -> bool + '_ {
    move |category| {
        CATEGORIES
            .iter()
            .zip(enabled)
            .any(|(name, on)| *on && category == *name)
    }
}

/// Returns the node ids declared on node lines and the endpoints of edge lines.
fn scan(mermaid: &str) -> (HashSet<String>, Vec<(String, String)>) {
    let mut nodes = HashSet::new();
    let mut edges = Vec::new();
    for line in mermaid.lines().skip(1).map(str::trim) {
        if let Some((source, target)) = line.split_once(" --> ") {
            edges.push((source.to_string(), target.to_string()));
        } else if let Some((id, _)) = line.split_once('[') {
            nodes.insert(id.to_string());
        }
    }
    (nodes, edges)
}

proptest! {
    #[test]
    fn compose_is_deterministic(view in arb_view(), enabled in arb_enabled()) {
        let composer = Composer::default();
        let first = composer.compose(&view, predicate(&enabled));
        let second = composer.compose(&view, predicate(&enabled));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn all_categories_equal_compose_all(view in arb_view()) {
        let composer = Composer::default();
        let categories: HashSet<Id> = view.categories().iter().copied().collect();
        prop_assert_eq!(
            composer.compose(&view, |category| categories.contains(&category)),
            composer.compose_all(&view)
        );
    }

    #[test]
    fn kept_edges_reference_kept_nodes(view in arb_view(), enabled in arb_enabled()) {
        let mermaid = Composer::default().compose(&view, predicate(&enabled));
        let (nodes, edges) = scan(&mermaid);
        for (source, target) in edges {
            prop_assert!(nodes.contains(&source), "{source} missing in:\n{mermaid}");
            prop_assert!(nodes.contains(&target), "{target} missing in:\n{mermaid}");
        }
    }

    #[test]
    fn subgraphs_are_balanced_and_non_empty(view in arb_view(), enabled in arb_enabled()) {
        let mermaid = Composer::default().compose(&view, predicate(&enabled));
        let lines: Vec<&str> = mermaid.lines().map(str::trim).collect();
        let opens = lines.iter().filter(|line| line.starts_with("subgraph ")).count();
        let ends = lines.iter().filter(|line| **line == "end").count();
        prop_assert_eq!(opens, ends);

        // Every emitted subgraph, nested or not, holds at least one node line
        // before its matching `end`.
        for (open, _) in lines.iter().enumerate().filter(|(_, line)| line.starts_with("subgraph ")) {
            let mut depth = 0usize;
            let mut has_node = false;
            for line in &lines[open + 1..] {
                if line.starts_with("subgraph ") {
                    depth += 1;
                } else if *line == "end" {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                } else if line.starts_with('N') && line.contains('[') {
                    has_node = true;
                }
            }
            prop_assert!(has_node, "empty subgraph at line {open} in:\n{mermaid}");
        }
    }

    #[test]
    fn nested_subgraph_closes_before_outer(view in arb_view(), enabled in arb_enabled()) {
        let mermaid = Composer::default().compose(&view, predicate(&enabled));
        let indent = |line: &str| line.len() - line.trim_start().len();
        let lines: Vec<&str> = mermaid.lines().collect();
        if let Some(inner) = lines.iter().position(|line| line.trim_start().starts_with("subgraph INNER")) {
            let outer = lines.iter().position(|line| line.starts_with("subgraph OUTER"));
            let expected = if outer.is_some_and(|outer| outer < inner) { 2 } else { 0 };
            prop_assert_eq!(indent(lines[inner]), expected, "in:\n{}", mermaid);
        }
    }

    #[test]
    fn unknown_categories_match_nothing(view in arb_view()) {
        let composer = Composer::default();
        prop_assert_eq!(
            composer.compose(&view, |category| category == "not-a-real-tag"),
            composer.compose(&view, |_| false)
        );
    }

    #[test]
    fn empty_selection_is_header_only(view in arb_view()) {
        prop_assert_eq!(Composer::default().compose(&view, |_| false), "flowchart LR");
    }
}
