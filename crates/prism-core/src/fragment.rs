//! Diagram fragments.
//!
//! A [`Fragment`] is one line-level element of a view: a node declaration, an
//! edge, or a subgraph boundary. Fragments are the unit of filtering; each one
//! carries the category tag that decides whether it survives a selection.
//!
//! # Overview
//!
//! - [`Fragment`] - id, category, kind and display metadata.
//! - [`FragmentKind`] - tagged variant selecting the per-kind behavior.
//! - [`NodeShape`], [`ArrowKind`], [`Direction`] - Mermaid flowchart vocabulary.

use std::{fmt, ops::Range, str::FromStr};

use serde::Deserialize;

use crate::identifier::Id;

// =============================================================================
// Flowchart vocabulary
// =============================================================================

/// Flow direction of a flowchart view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Direction {
    /// Left to right (`LR`).
    #[default]
    #[serde(rename = "LR")]
    LeftRight,
    /// Right to left (`RL`).
    #[serde(rename = "RL")]
    RightLeft,
    /// Top to bottom (`TB`, also written `TD`).
    #[serde(rename = "TB", alias = "TD")]
    TopBottom,
    /// Bottom to top (`BT`).
    #[serde(rename = "BT")]
    BottomTop,
}

impl Direction {
    /// Returns the Mermaid keyword for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LR" => Ok(Self::LeftRight),
            "RL" => Ok(Self::RightLeft),
            "TB" | "TD" => Ok(Self::TopBottom),
            "BT" => Ok(Self::BottomTop),
            _ => Err(format!("Invalid flow direction: {s}")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outline of a node declaration.
///
/// Each variant maps to one pair of Mermaid delimiters around the label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    /// `ID[label]`
    #[default]
    Rectangle,
    /// `ID(label)`
    Rounded,
    /// `ID([label])`
    Stadium,
    /// `ID[[label]]`
    Subroutine,
    /// `ID[(label)]`
    Database,
    /// `ID((label))`
    Circle,
    /// `ID{label}`
    Rhombus,
}

impl NodeShape {
    /// Returns the opening and closing delimiters of this shape.
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            NodeShape::Rectangle => ("[", "]"),
            NodeShape::Rounded => ("(", ")"),
            NodeShape::Stadium => ("([", "])"),
            NodeShape::Subroutine => ("[[", "]]"),
            NodeShape::Database => ("[(", ")]"),
            NodeShape::Circle => ("((", "))"),
            NodeShape::Rhombus => ("{", "}"),
        }
    }
}

/// Link style of an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKind {
    /// `-->`
    #[default]
    Directed,
    /// `<-->`
    Bidirectional,
    /// `-.->`
    Dotted,
    /// `==>`
    Thick,
    /// `---`
    Open,
}

impl ArrowKind {
    /// Returns the Mermaid link token.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrowKind::Directed => "-->",
            ArrowKind::Bidirectional => "<-->",
            ArrowKind::Dotted => "-.->",
            ArrowKind::Thick => "==>",
            ArrowKind::Open => "---",
        }
    }
}

impl fmt::Display for ArrowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Fragment
// =============================================================================

/// Kind-specific data of a [`Fragment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentKind {
    /// A node declaration.
    Node { shape: NodeShape },
    /// A link between two node ids.
    Edge {
        source: Id,
        target: Id,
        arrow: ArrowKind,
    },
    /// A subgraph boundary.
    ///
    /// `members` is the range of fragment positions, within the owning view,
    /// enclosed by this boundary. It always starts right after the boundary
    /// itself and nests properly with other subgraph spans.
    Subgraph { members: Range<usize> },
}

/// One atomic, independently filterable element of a view.
///
/// `label` and `style` are display metadata and never influence filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    id: Id,
    category: Id,
    kind: FragmentKind,
    label: Option<String>,
    style: Option<String>,
}

impl Fragment {
    /// Creates a rectangle node.
    ///
    /// # Examples
    ///
    /// ```
    /// use prism_core::{fragment::{Fragment, NodeShape}, identifier::Id};
    ///
    /// let node = Fragment::node(Id::new("VDB"), Id::new("data"), "Vector DB")
    ///     .with_shape(NodeShape::Database);
    /// assert!(node.is_node());
    /// assert_eq!(node.label(), Some("Vector DB"));
    /// ```
    pub fn node(id: Id, category: Id, label: impl Into<String>) -> Self {
        Self {
            id,
            category,
            kind: FragmentKind::Node {
                shape: NodeShape::default(),
            },
            label: Some(label.into()).filter(|label: &String| !label.is_empty()),
            style: None,
        }
    }

    /// Creates a directed edge with an explicit id.
    pub fn edge(id: Id, category: Id, source: Id, target: Id) -> Self {
        Self {
            id,
            category,
            kind: FragmentKind::Edge {
                source,
                target,
                arrow: ArrowKind::default(),
            },
            label: None,
            style: None,
        }
    }

    /// Creates a subgraph boundary with an empty member span.
    ///
    /// The span is assigned when the boundary is closed by a
    /// [`ViewBuilder`](crate::view::ViewBuilder).
    pub fn subgraph(id: Id, category: Id, title: Option<String>) -> Self {
        Self {
            id,
            category,
            kind: FragmentKind::Subgraph { members: 0..0 },
            label: title.filter(|title| !title.is_empty()),
            style: None,
        }
    }

    /// Sets the shape of a node. Has no effect on other kinds.
    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        if let FragmentKind::Node { shape: current } = &mut self.kind {
            *current = shape;
        }
        self
    }

    /// Sets the arrow of an edge. Has no effect on other kinds.
    pub fn with_arrow(mut self, arrow: ArrowKind) -> Self {
        if let FragmentKind::Edge { arrow: current, .. } = &mut self.kind {
            *current = arrow;
        }
        self
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the style class.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn category(&self) -> Id {
        self.category
    }

    pub fn kind(&self) -> &FragmentKind {
        &self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn is_node(&self) -> bool {
        matches!(self.kind, FragmentKind::Node { .. })
    }

    pub fn is_edge(&self) -> bool {
        matches!(self.kind, FragmentKind::Edge { .. })
    }

    pub fn is_subgraph(&self) -> bool {
        matches!(self.kind, FragmentKind::Subgraph { .. })
    }

    /// Returns `(source, target)` for edges and `None` otherwise.
    pub fn endpoints(&self) -> Option<(Id, Id)> {
        match self.kind {
            FragmentKind::Edge { source, target, .. } => Some((source, target)),
            _ => None,
        }
    }

    /// Returns the member span for subgraphs and `None` otherwise.
    pub fn members(&self) -> Option<Range<usize>> {
        match &self.kind {
            FragmentKind::Subgraph { members } => Some(members.clone()),
            _ => None,
        }
    }

    pub(crate) fn set_members(&mut self, span: Range<usize>) {
        if let FragmentKind::Subgraph { members } = &mut self.kind {
            *members = span;
        }
    }
}
