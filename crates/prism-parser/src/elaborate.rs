//! Elaboration: turns parsed statements into a validated [`View`].
//!
//! The [`Builder`] walks statements in source order, tracks the current
//! `@category` and the open subgraphs, and checks every structural rule with
//! source spans so problems are reported against the lines that caused them.
//! Only a statement list that passes every check is handed to
//! [`prism_core::view::ViewBuilder`].

use std::collections::HashMap;

use log::{debug, trace};

use prism_core::{
    error::CatalogError,
    fragment::{Direction, Fragment},
    identifier::Id,
    view::View,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser_types::{DirectiveKind, EdgeChain, NodeDecl, Statement},
    span::{Span, Spanned},
};

/// Fragment stream in view order.
enum Item {
    Fragment(Fragment),
    Open(Fragment),
    Close,
}

struct Declaration {
    span: Span,
    is_node: bool,
}

struct CategoryScope {
    id: Id,
    span: Span,
    used: bool,
}

struct OpenSubgraph {
    id: Spanned<String>,
    has_node: bool,
}

/// An edge endpoint waiting to be resolved once every node is declared.
struct Reference {
    edge: Id,
    endpoint: Spanned<Id>,
}

pub(crate) struct Builder {
    diagnostics: DiagnosticCollector,
    view: Option<Spanned<String>>,
    header: Option<Spanned<Direction>>,
    placeholder: Option<String>,
    category: Option<CategoryScope>,
    items: Vec<Item>,
    declared: HashMap<Id, Declaration>,
    references: Vec<Reference>,
    open: Vec<OpenSubgraph>,
    edge_ordinals: HashMap<(Id, Id), usize>,
    reported_before_header: bool,
    reported_missing_category: bool,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            diagnostics: DiagnosticCollector::new(),
            view: None,
            header: None,
            placeholder: None,
            category: None,
            items: Vec::new(),
            declared: HashMap::new(),
            references: Vec::new(),
            open: Vec::new(),
            edge_ordinals: HashMap::new(),
            reported_before_header: false,
            reported_missing_category: false,
        }
    }

    /// Elaborate the statements of one source into a view.
    pub(crate) fn build(mut self, statements: &[Spanned<Statement<'_>>]) -> Result<View, ParseError> {
        for statement in statements {
            self.statement(statement);
        }
        self.finish()
    }

    fn statement(&mut self, statement: &Spanned<Statement<'_>>) {
        let span = statement.span();
        match statement.inner() {
            Statement::Blank | Statement::Comment => {}
            Statement::Directive { kind, value } => self.directive(*kind, *value),
            Statement::Header(direction) => self.header(*direction),
            Statement::SubgraphOpen { id, title } => {
                let category = self.fragment_category(span);
                let subgraph = Fragment::subgraph(Id::new(id), category, title.clone());
                self.declare(*id, false);
                self.open.push(OpenSubgraph {
                    id: id.map(str::to_string),
                    has_node: false,
                });
                self.items.push(Item::Open(subgraph));
            }
            Statement::SubgraphEnd => self.close_subgraph(span),
            Statement::Node(decl) => self.node(decl, span),
            Statement::Edges(chain) => self.edges(chain, span),
        }
    }

    fn directive(&mut self, kind: DirectiveKind, value: Spanned<&str>) {
        match kind {
            DirectiveKind::View => {
                if let Some(first) = &self.view {
                    self.diagnostics.emit(
                        Diagnostic::error("view name is declared more than once")
                            .with_code(ErrorCode::E106)
                            .with_label(value.span(), "second `@view`")
                            .with_secondary_label(first.span(), "first declared here")
                            .with_help("each source file defines exactly one view"),
                    );
                } else {
                    self.view = Some(value.map(str::to_string));
                }
            }
            DirectiveKind::Category => {
                self.warn_unused_category();
                self.category = Some(CategoryScope {
                    id: Id::new(&value),
                    span: value.span(),
                    used: false,
                });
            }
            DirectiveKind::Placeholder => {
                self.placeholder = Some(value.to_string());
            }
        }
    }

    fn header(&mut self, direction: Spanned<Direction>) {
        if let Some(first) = &self.header {
            self.diagnostics.emit(
                Diagnostic::error("flowchart header appears more than once")
                    .with_code(ErrorCode::E101)
                    .with_label(direction.span(), "second header")
                    .with_secondary_label(first.span(), "first header here"),
            );
        } else {
            self.header = Some(direction);
        }
    }

    /// Returns the category of a fragment statement, reporting a missing
    /// header or category once.
    fn fragment_category(&mut self, span: Span) -> Id {
        if self.header.is_none() && !self.reported_before_header {
            self.reported_before_header = true;
            self.diagnostics.emit(
                Diagnostic::error("diagram statement before the flowchart header")
                    .with_code(ErrorCode::E102)
                    .with_label(span, "appears before `flowchart`")
                    .with_help("move the `flowchart <DIR>` line above the first fragment"),
            );
        }

        match &mut self.category {
            Some(scope) => {
                scope.used = true;
                scope.id
            }
            None => {
                if !self.reported_missing_category {
                    self.reported_missing_category = true;
                    self.diagnostics.emit(
                        Diagnostic::error("fragment has no category")
                            .with_code(ErrorCode::E203)
                            .with_label(span, "no `@category` directive above this line")
                            .with_help("add `%% @category <tag>` before the first fragment"),
                    );
                }
                Id::new("")
            }
        }
    }

    fn declare(&mut self, id: Spanned<&str>, is_node: bool) {
        let key = Id::new(&id);
        if let Some(first) = self.declared.get(&key) {
            self.diagnostics.emit(
                Diagnostic::error(format!("fragment id `{}` is declared more than once", *id))
                    .with_code(ErrorCode::E202)
                    .with_label(id.span(), "duplicate declaration")
                    .with_secondary_label(first.span, "first declared here")
                    .with_help("rename one of the fragments"),
            );
            return;
        }
        self.declared.insert(
            key,
            Declaration {
                span: id.span(),
                is_node,
            },
        );
    }

    fn close_subgraph(&mut self, span: Span) {
        let Some(open) = self.open.pop() else {
            self.diagnostics.emit(
                Diagnostic::error("`end` without an open subgraph")
                    .with_code(ErrorCode::E103)
                    .with_label(span, "nothing to close")
                    .with_help("remove this line or add the matching `subgraph`"),
            );
            return;
        };
        if !open.has_node {
            self.diagnostics.emit(
                Diagnostic::error(format!("subgraph `{}` contains no nodes", open.id.inner()))
                    .with_code(ErrorCode::E204)
                    .with_label(open.id.span(), "empty subgraph")
                    .with_help("declare at least one node inside the subgraph or remove it"),
            );
        }
        self.items.push(Item::Close);
    }

    fn node(&mut self, decl: &NodeDecl<'_>, span: Span) {
        let category = self.fragment_category(span);
        self.declare(decl.id, true);
        for open in &mut self.open {
            open.has_node = true;
        }

        let label = decl.label.as_deref().unwrap_or(*decl.id);
        let mut fragment =
            Fragment::node(Id::new(&decl.id), category, label).with_shape(decl.shape);
        if let Some(class) = decl.class {
            fragment = fragment.with_style(class);
        }
        self.items.push(Item::Fragment(fragment));
    }

    fn edges(&mut self, chain: &EdgeChain<'_>, span: Span) {
        let category = self.fragment_category(span);
        for (source, hop) in chain.links() {
            let (from, to) = (Id::new(&source), Id::new(&hop.target));
            let ordinal = self.edge_ordinals.entry((from, to)).or_default();
            *ordinal += 1;
            let id = Id::edge(from, to, *ordinal);

            for endpoint in [source, hop.target] {
                self.references.push(Reference {
                    edge: id,
                    endpoint: endpoint.map(Id::new),
                });
            }

            let mut fragment = Fragment::edge(id, category, from, to).with_arrow(hop.arrow);
            if let Some(label) = &hop.label {
                fragment = fragment.with_label(label.as_str());
            }
            self.items.push(Item::Fragment(fragment));
        }
    }

    fn warn_unused_category(&mut self) {
        if let Some(scope) = self.category.take_if(|scope| !scope.used) {
            self.diagnostics.emit(
                Diagnostic::warning(format!("category `{}` tags no fragments", scope.id))
                    .with_label(scope.span, "unused category"),
            );
        }
    }

    fn resolve_references(&mut self) {
        for reference in std::mem::take(&mut self.references) {
            let endpoint = *reference.endpoint;
            match self.declared.get(&endpoint) {
                None => self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "edge `{}` references undefined node `{endpoint}`",
                        reference.edge
                    ))
                    .with_code(ErrorCode::E200)
                    .with_label(reference.endpoint.span(), "not declared in this view")
                    .with_help(format!("declare `{endpoint}` as a node or fix the spelling")),
                ),
                Some(declaration) if !declaration.is_node => self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "edge `{}` links to subgraph `{endpoint}`",
                        reference.edge
                    ))
                    .with_code(ErrorCode::E201)
                    .with_label(reference.endpoint.span(), "subgraph used as an endpoint")
                    .with_secondary_label(declaration.span, "subgraph declared here")
                    .with_help("link to a node inside the subgraph instead"),
                ),
                Some(_) => {}
            }
        }
    }

    fn finish(mut self) -> Result<View, ParseError> {
        self.warn_unused_category();

        for open in std::mem::take(&mut self.open) {
            self.diagnostics.emit(
                Diagnostic::error(format!("subgraph `{}` is never closed", open.id.inner()))
                    .with_code(ErrorCode::E104)
                    .with_label(open.id.span(), "opened here")
                    .with_help("add `end` after the last member"),
            );
        }
        if self.header.is_none() {
            self.diagnostics.emit(
                Diagnostic::error("missing flowchart header")
                    .with_code(ErrorCode::E100)
                    .with_label(Span::new(0..0), "expected `flowchart <DIR>`")
                    .with_help("add a line such as `flowchart LR`"),
            );
        }
        if self.view.is_none() {
            self.diagnostics.emit(
                Diagnostic::error("missing view name")
                    .with_code(ErrorCode::E105)
                    .with_label(Span::new(0..0), "expected `%% @view <name>`")
                    .with_help("name the view with a `%% @view <name>` line"),
            );
        }
        self.resolve_references();
        self.diagnostics.finish()?;

        let (Some(name), Some(header)) = (self.view, self.header) else {
            unreachable!("missing view name and header are reported above");
        };

        debug!(
            view = name.inner().as_str(),
            direction = header.as_str(),
            fragments = self.items.len();
            "Elaborated view source"
        );

        let mut builder = View::builder(name.inner().as_str(), *header);
        if let Some(placeholder) = self.placeholder {
            builder = builder.placeholder(placeholder);
        }
        for item in self.items {
            builder = match item {
                Item::Fragment(fragment) => builder.fragment(fragment),
                Item::Open(subgraph) => builder.open_subgraph(subgraph),
                Item::Close => builder.close_subgraph(),
            };
        }

        builder
            .build()
            .map_err(|err| rejected_view(&err, header.span()))
    }
}

/// Converts a view construction failure into E205 diagnostics at `span`.
///
/// Elaboration reports every structural problem it knows about itself, so
/// this only fires for violations the builder checks and elaboration does
/// not.
fn rejected_view(err: &CatalogError, span: Span) -> ParseError {
    trace!(err:? = err; "View construction rejected elaborated source");
    err.violations()
        .iter()
        .map(|violation| {
            Diagnostic::error(violation.to_string())
                .with_code(ErrorCode::E205)
                .with_label(span, "in this view")
        })
        .collect::<Vec<_>>()
        .into()
}
