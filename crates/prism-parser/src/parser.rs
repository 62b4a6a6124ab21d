//! Line parser for annotated Mermaid flowcharts.
//!
//! Every line of a catalog source holds at most one [`Statement`]. Lines are
//! parsed independently: when a line fails, the parser reports a
//! [`Diagnostic`], skips to the next line and carries on, so a single pass
//! reports every syntax error in the file.

use std::ops::Range;

use winnow::{
    Parser as _,
    ascii::{space0, space1, till_line_ending},
    combinator::{alt, cut_err, delimited, eof, not, opt, peek, preceded, repeat, terminated},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_till, take_until, take_while},
};

use prism_core::fragment::{ArrowKind, Direction, NodeShape};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser_types::{DirectiveKind, EdgeChain, Hop, NodeDecl, Statement},
    span::{Span, Spanned},
};

/// Diagnostic details attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SyntaxContext {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span runs from `start` to the end of the line.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type PError = ErrMode<ContextError<SyntaxContext>>;
type IResult<O> = ModalResult<O, ContextError<SyntaxContext>>;

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A keyword that must not run into an identifier character.
fn keyword<'a>(word: &'static str) -> impl winnow::Parser<Input<'a>, &'a str, PError> {
    terminated(word, peek(not(one_of(is_id_char))))
}

fn identifier<'a>(input: &mut Input<'a>) -> IResult<Spanned<&'a str>> {
    take_while(1.., is_id_char)
        .with_span()
        .map(|(id, span): (&'a str, Range<usize>)| Spanned::new(id, Span::new(span)))
        .parse_next(input)
}

/// Trailing whitespace, an optional `;` and the line break (or end of input).
fn line_end<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    preceded(
        (space0, opt(';'), space0),
        alt(("\r\n", "\n", "\r", eof)),
    )
    .parse_next(input)
}

// =============================================================================
// Directives and comments
// =============================================================================

fn directive_value<'a>(input: &mut Input<'a>) -> IResult<Spanned<&'a str>> {
    take_till(1.., ['\r', '\n'])
        .with_span()
        .verify_map(|(raw, span): (&'a str, Range<usize>)| {
            let value = raw.trim_end();
            (!value.is_empty())
                .then(|| Spanned::new(value, Span::new(span.start..span.start + value.len())))
        })
        .parse_next(input)
}

/// `%% @view NAME`, `%% @category TAG`, `%% @placeholder TEXT`, or a plain
/// `%%` comment.
fn directive<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    let start = input.current_token_start();
    "%%".parse_next(input)?;
    space0.parse_next(input)?;

    if opt('@').parse_next(input)?.is_none() {
        till_line_ending.parse_next(input)?;
        return Ok(Statement::Comment);
    }

    let checkpoint = input.checkpoint();
    let name = take_while(0.., |c: char| is_id_char(c) || c == '-').parse_next(input)?;
    let kind = match name {
        "view" => DirectiveKind::View,
        "category" => DirectiveKind::Category,
        "placeholder" => DirectiveKind::Placeholder,
        _ => {
            return Err(ErrMode::Cut(ContextError::new().add_context(
                input,
                &checkpoint,
                SyntaxContext {
                    code: ErrorCode::E005,
                    message: "unknown directive",
                    help: Some("supported directives are `@view`, `@category` and `@placeholder`"),
                    start,
                },
            )));
        }
    };

    let value = cut_err(preceded(space1, directive_value))
        .context(SyntaxContext {
            code: ErrorCode::E006,
            message: "missing directive value",
            help: Some("write the value after the directive, e.g. `%% @category retrieval`"),
            start,
        })
        .parse_next(input)?;

    Ok(Statement::Directive { kind, value })
}

// =============================================================================
// Header and subgraphs
// =============================================================================

/// `flowchart DIR` or `graph DIR`. A missing direction means top to bottom.
fn header<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    let (_, keyword_span) = alt((keyword("flowchart"), keyword("graph")))
        .with_span()
        .parse_next(input)?;

    if opt(peek(line_end)).parse_next(input)?.is_some() {
        return Ok(Statement::Header(Spanned::new(
            Direction::TopBottom,
            Span::new(keyword_span),
        )));
    }

    space1.parse_next(input)?;
    let start = input.current_token_start();
    cut_err(
        take_while(1.., |c: char| c.is_ascii_alphanumeric())
            .verify_map(|word: &str| word.parse::<Direction>().ok())
            .with_span(),
    )
    .context(SyntaxContext {
        code: ErrorCode::E004,
        message: "invalid flow direction",
        help: Some("use one of `LR`, `RL`, `TB`, `TD`, `BT`"),
        start,
    })
    .map(|(direction, span)| Statement::Header(Spanned::new(direction, Span::new(span))))
    .parse_next(input)
}

/// `subgraph ID` with an optional `[Title]`.
fn subgraph_open<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    (keyword("subgraph"), space1).parse_next(input)?;
    let id = identifier.parse_next(input)?;
    let title = opt(preceded(space0, shape_label))
        .parse_next(input)?
        .map(|(_, title)| title);
    Ok(Statement::SubgraphOpen { id, title })
}

fn subgraph_end<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    keyword("end")
        .value(Statement::SubgraphEnd)
        .parse_next(input)
}

// =============================================================================
// Labels and nodes
// =============================================================================

/// A `"..."` label. The quotes are not part of the result.
fn quoted_label<'a>(input: &mut Input<'a>) -> IResult<String> {
    let start = input.current_token_start();
    '"'.parse_next(input)?;
    cut_err(terminated(take_till(0.., ['"', '\n', '\r']), '"'))
        .context(SyntaxContext {
            code: ErrorCode::E001,
            message: "unterminated label",
            help: Some("add the closing `\"` on the same line"),
            start,
        })
        .map(str::to_string)
        .parse_next(input)
}

/// Label text up to `close`, either quoted or raw.
fn label_body<'a>(input: &mut Input<'a>, close: &'static str) -> IResult<String> {
    alt((
        delimited(space0, quoted_label, space0),
        take_until(0.., close)
            .verify(|raw: &str| !raw.contains(['\n', '\r']))
            .map(|raw: &str| raw.trim().to_string()),
    ))
    .parse_next(input)
}

/// Opening delimiter of a shape and the matching closing delimiter.
///
/// Longer delimiters come first so `[(` is not read as `[`.
fn shape_open<'a>(input: &mut Input<'a>) -> IResult<(NodeShape, &'static str)> {
    alt((
        "[(".value((NodeShape::Database, ")]")),
        "[[".value((NodeShape::Subroutine, "]]")),
        "[".value((NodeShape::Rectangle, "]")),
        "((".value((NodeShape::Circle, "))")),
        "([".value((NodeShape::Stadium, "])")),
        "(".value((NodeShape::Rounded, ")")),
        "{".value((NodeShape::Rhombus, "}")),
    ))
    .parse_next(input)
}

/// A delimited label such as `[(Vector DB)]`.
fn shape_label<'a>(input: &mut Input<'a>) -> IResult<(NodeShape, String)> {
    let start = input.current_token_start();
    let (shape, close) = shape_open.parse_next(input)?;
    let label = cut_err(terminated(|i: &mut Input<'a>| label_body(i, close), close))
        .context(SyntaxContext {
            code: ErrorCode::E003,
            message: "unclosed node shape",
            help: Some("close the shape on the same line"),
            start,
        })
        .parse_next(input)?;
    Ok((shape, label))
}

fn node_decl<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    let id = identifier.parse_next(input)?;
    let shape = opt(shape_label).parse_next(input)?;
    let class = opt(preceded(
        ":::",
        take_while(1.., |c: char| is_id_char(c) || c == '-'),
    ))
    .parse_next(input)?;

    let (shape, label) = match shape {
        Some((shape, label)) => (shape, Some(label)),
        None => (NodeShape::default(), None),
    };
    Ok(Statement::Node(NodeDecl {
        id,
        shape,
        label,
        class,
    }))
}

// =============================================================================
// Edges
// =============================================================================

fn arrow<'a>(input: &mut Input<'a>) -> IResult<ArrowKind> {
    alt((
        "<-->".value(ArrowKind::Bidirectional),
        "-.->".value(ArrowKind::Dotted),
        "==>".value(ArrowKind::Thick),
        "-->".value(ArrowKind::Directed),
        "---".value(ArrowKind::Open),
    ))
    .parse_next(input)
}

/// `|label|` after an arrow.
fn edge_label<'a>(input: &mut Input<'a>) -> IResult<String> {
    let start = input.current_token_start();
    '|'.parse_next(input)?;
    cut_err(terminated(take_till(0.., ['|', '\n', '\r']), '|'))
        .context(SyntaxContext {
            code: ErrorCode::E001,
            message: "unterminated label",
            help: Some("add the closing `|` on the same line"),
            start,
        })
        .map(|label: &str| label.trim().to_string())
        .parse_next(input)
}

fn hop<'a>(input: &mut Input<'a>) -> IResult<Hop<'a>> {
    (
        space0,
        arrow,
        opt(preceded(space0, edge_label)),
        space0,
        identifier,
    )
        .map(|(_, arrow, label, _, target)| Hop {
            arrow,
            label,
            target,
        })
        .parse_next(input)
}

fn edge_chain<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    (identifier, repeat(1.., hop))
        .map(|(head, hops): (Spanned<&'a str>, Vec<Hop<'a>>)| {
            Statement::Edges(EdgeChain { head, hops })
        })
        .parse_next(input)
}

// =============================================================================
// Lines
// =============================================================================

fn statement<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    alt((
        peek(line_end).value(Statement::Blank),
        terminated(directive, peek(line_end)),
        terminated(header, peek(line_end)),
        terminated(subgraph_open, peek(line_end)),
        terminated(subgraph_end, peek(line_end)),
        terminated(edge_chain, peek(line_end)),
        terminated(node_decl, peek(line_end)),
    ))
    .parse_next(input)
}

fn line<'a>(input: &mut Input<'a>) -> IResult<Spanned<Statement<'a>>> {
    space0.parse_next(input)?;
    let (statement, span) = statement.with_span().parse_next(input)?;
    line_end.parse_next(input)?;
    Ok(Spanned::new(statement, Span::new(span)))
}

/// Skips the rest of a failed line and returns the range of its content.
fn skip_line<'a>(input: &mut Input<'a>) -> IResult<Range<usize>> {
    space0.parse_next(input)?;
    let (_, content) = take_till(0.., ['\n', '\r']).with_span().parse_next(input)?;
    opt(alt(("\r\n", "\n", "\r"))).parse_next(input)?;
    Ok(content)
}

/// Convert a failed line into a diagnostic.
///
/// Uses the first [`SyntaxContext`] of the error when present and falls back
/// to E002 (unrecognized statement) covering the whole line otherwise.
fn line_diagnostic(err: PError, content: Range<usize>) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(SyntaxContext {
        code,
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let span = Span::new(*start..content.end.max(*start));
        let mut diag = Diagnostic::error(*message)
            .with_code(*code)
            .with_label(span, code.description());
        if let Some(help) = help {
            diag = diag.with_help(*help);
        }
        return diag;
    }

    Diagnostic::error("unrecognized statement")
        .with_code(ErrorCode::E002)
        .with_label(Span::new(content), ErrorCode::E002.description())
        .with_help(
            "expected a `%%` directive, `flowchart`, `subgraph`, `end`, \
             a node declaration or an edge chain",
        )
}

/// Parse a whole source into statements, one per non-empty line.
///
/// Blank lines and plain comments are dropped.
pub(crate) fn parse_statements(source: &str) -> Result<Vec<Spanned<Statement<'_>>>, ParseError> {
    let mut input = LocatingSlice::new(source);
    let mut statements = Vec::new();
    let mut diagnostics = DiagnosticCollector::new();

    while !input.is_empty() {
        let line_start = input.current_token_start();
        let checkpoint = input.checkpoint();

        match line(&mut input) {
            Ok(statement) => {
                if !matches!(statement.inner(), Statement::Blank | Statement::Comment) {
                    statements.push(statement);
                }
            }
            Err(err) => {
                input.reset(&checkpoint);
                let content = skip_line(&mut input).unwrap_or(line_start..line_start);
                diagnostics.emit(line_diagnostic(err, content));
            }
        }
    }

    diagnostics.finish().map(|()| statements)
}
