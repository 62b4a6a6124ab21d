//! Fragment filtering, edge repair and subgraph collapse.

use std::collections::HashSet;

use log::trace;

use prism_core::{fragment::FragmentKind, identifier::Id, view::View};

/// Returns the ascending positions of the fragments of `view` that survive
/// the `enabled` predicate.
///
/// A fragment survives when its category is enabled and, for an edge, both
/// endpoint nodes survive, or, for a subgraph, at least one node inside its
/// member span survives. Nodes never depend on other fragments, so one pass
/// over the category verdicts is enough.
pub(super) fn retain<F>(view: &View, enabled: F) -> Vec<usize>
where
    F: Fn(Id) -> bool,
{
    let fragments = view.fragments();
    let mut keep: Vec<bool> = fragments
        .iter()
        .map(|fragment| enabled(fragment.category()))
        .collect();

    let kept_nodes: HashSet<Id> = fragments
        .iter()
        .zip(&keep)
        .filter(|(fragment, keep)| **keep && fragment.is_node())
        .map(|(fragment, _)| fragment.id())
        .collect();

    for (position, fragment) in fragments.iter().enumerate() {
        if !keep[position] {
            continue;
        }

        let survives = match fragment.kind() {
            FragmentKind::Node { .. } => true,
            FragmentKind::Edge { source, target, .. } => {
                kept_nodes.contains(source) && kept_nodes.contains(target)
            }
            FragmentKind::Subgraph { members } => members
                .clone()
                .any(|member| keep[member] && fragments[member].is_node()),
        };

        if !survives {
            trace!(fragment:% = fragment.id(); "Dropping fragment with hidden dependencies");
            keep[position] = false;
        }
    }

    keep.into_iter()
        .enumerate()
        .filter_map(|(position, keep)| keep.then_some(position))
        .collect()
}
