//! Mermaid flowchart serialization of retained fragments.

use prism_core::{
    fragment::{Fragment, FragmentKind},
    view::View,
};

use crate::config::ComposeConfig;

/// Characters that force a label into a quoted string.
const RESERVED: &[char] = &['"', '(', ')', '[', ']', '{', '}', '<', '>', '|', ';', '#'];

/// Characters Mermaid reads as a shape delimiter at either end of a label.
const SLANTS: &[char] = &['/', '\\'];

/// Node id of the placeholder emitted for an empty composition.
const PLACEHOLDER_ID: &str = "PLACEHOLDER";

/// Writes the fragments at `kept` positions of `view`.
///
/// `kept` must be ascending and closed under the filter rules, so every
/// retained subgraph span only contains retained or dropped positions of the
/// same view.
pub(super) fn write(view: &View, kept: &[usize], config: &ComposeConfig) -> String {
    let fragments = view.fragments();
    let mut writer = Writer::new(config);
    writer.header(view, config);

    // End positions of the subgraphs currently open in the output.
    let mut open: Vec<usize> = Vec::new();

    for &position in kept {
        while open.last().is_some_and(|&end| position >= end) {
            open.pop();
            writer.line(open.len(), "end".to_string());
        }

        let fragment = &fragments[position];
        match fragment.kind() {
            FragmentKind::Node { .. } => writer.line(open.len(), node_line(fragment)),
            FragmentKind::Edge { .. } => writer.line(open.len(), edge_line(fragment)),
            FragmentKind::Subgraph { members } => {
                writer.line(open.len(), subgraph_line(fragment));
                open.push(members.end);
            }
        }
    }

    while open.pop().is_some() {
        writer.line(open.len(), "end".to_string());
    }

    writer.finish()
}

/// Writes the diagram for a selection that keeps nothing.
pub(super) fn empty(view: &View, config: &ComposeConfig) -> String {
    let mut writer = Writer::new(config);
    writer.header(view, config);
    if let Some(text) = view.placeholder().filter(|_| config.placeholder()) {
        writer.line(0, format!("{PLACEHOLDER_ID}[\"{}\"]", escape_quotes(text)));
    }
    writer.finish()
}

struct Writer {
    indent: usize,
    lines: Vec<String>,
}

impl Writer {
    fn new(config: &ComposeConfig) -> Self {
        Self {
            indent: config.indent(),
            lines: Vec::new(),
        }
    }

    fn header(&mut self, view: &View, config: &ComposeConfig) {
        let direction = config.direction().unwrap_or(view.direction());
        self.lines.push(format!("flowchart {direction}"));
    }

    fn line(&mut self, depth: usize, text: String) {
        let pad = " ".repeat(depth * self.indent);
        self.lines.push(format!("{pad}{text}"));
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

fn node_line(fragment: &Fragment) -> String {
    let mut line = fragment.id().to_string();
    if let (FragmentKind::Node { shape }, Some(label)) = (fragment.kind(), fragment.label()) {
        let (open, close) = shape.delimiters();
        line.push_str(open);
        line.push_str(&format_label(label));
        line.push_str(close);
    }
    if let Some(style) = fragment.style() {
        line.push_str(":::");
        line.push_str(style);
    }
    line
}

fn edge_line(fragment: &Fragment) -> String {
    let FragmentKind::Edge {
        source,
        target,
        arrow,
    } = fragment.kind()
    else {
        return String::new();
    };

    match fragment.label() {
        Some(label) => format!("{source} {arrow}|{}| {target}", format_label(label)),
        None => format!("{source} {arrow} {target}"),
    }
}

fn subgraph_line(fragment: &Fragment) -> String {
    match fragment.label() {
        Some(title) => format!("subgraph {}[\"{}\"]", fragment.id(), escape_quotes(title)),
        None => format!("subgraph {}", fragment.id()),
    }
}

/// Quotes `label` when it contains Mermaid punctuation or starts or ends
/// with a slant that would turn `[` into a trapezoid opener.
fn format_label(label: &str) -> String {
    if label.contains(RESERVED) || label.starts_with(SLANTS) || label.ends_with(SLANTS) {
        format!("\"{}\"", escape_quotes(label))
    } else {
        label.to_string()
    }
}

fn escape_quotes(text: &str) -> String {
    text.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use prism_core::{fragment::NodeShape, identifier::Id};

    use super::*;

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("Router / Policy"), "Router / Policy");
        assert_eq!(
            format_label("Specialized Agents<br/>(Policy, DS)"),
            "\"Specialized Agents<br/>(Policy, DS)\""
        );
        assert_eq!(format_label("say \"hi\""), "\"say #quot;hi#quot;\"");
        assert_eq!(format_label("a;b"), "\"a;b\"");
        assert_eq!(format_label("AuthN/AuthZ"), "AuthN/AuthZ");
    }

    #[test]
    fn test_format_label_quotes_leading_and_trailing_slants() {
        assert_eq!(format_label("/slash"), "\"/slash\"");
        assert_eq!(format_label("\\back"), "\"\\back\"");
        assert_eq!(format_label("in/out/"), "\"in/out/\"");

        let node = Fragment::node(Id::new("A"), Id::new("c"), "/slash");
        assert_eq!(node_line(&node), "A[\"/slash\"]");
    }

    #[test]
    fn test_node_line_without_label() {
        let node = Fragment::node(Id::new("BARE"), Id::new("c"), "");
        assert_eq!(node_line(&node), "BARE");

        let styled = node.with_style("muted");
        assert_eq!(node_line(&styled), "BARE:::muted");
    }

    #[test]
    fn test_node_line_shapes() {
        let node = Fragment::node(Id::new("START"), Id::new("agents"), "Start")
            .with_shape(NodeShape::Circle);
        assert_eq!(node_line(&node), "START((Start))");

        let node = Fragment::node(Id::new("KB"), Id::new("retrieval"), "Domain KB / Docs")
            .with_shape(NodeShape::Database);
        assert_eq!(node_line(&node), "KB[(Domain KB / Docs)]");
    }

    #[test]
    fn test_subgraph_line_escapes_title() {
        let subgraph = Fragment::subgraph(
            Id::new("GOV"),
            Id::new("governance"),
            Some("Governance \"Overlay\"".to_string()),
        );
        assert_eq!(
            subgraph_line(&subgraph),
            "subgraph GOV[\"Governance #quot;Overlay#quot;\"]"
        );
    }
}
