//! Block grammar for the source mesh format.
//!
//! The grammar is driven purely by line counts:
//!
//! ```text
//! header line   x4      discarded
//! node count N
//! node line     xN      <coord>... <label>
//! separator line        discarded
//! element count M
//! element line  xM      <1-based index>... <label>
//! ```
//!
//! Anything after the element block is ignored.

use log::{debug, trace};

use meshport_core::mesh::{Element, Mesh, Node};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Result},
    fields::{self, Field},
    lines::{Line, LineCursor},
    span::Span,
};

/// Leading lines that are read and discarded.
const HEADER_LINES: usize = 4;

/// A successfully parsed mesh together with any warnings raised on the way.
#[derive(Debug, Clone)]
pub struct Parsed {
    mesh: Mesh,
    warnings: Vec<Diagnostic>,
}

impl Parsed {
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Advisory diagnostics; every entry has warning severity.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Mesh, Vec<Diagnostic>) {
        (self.mesh, self.warnings)
    }
}

pub(crate) fn parse_mesh(source: &str) -> std::result::Result<Parsed, ParseError> {
    let mut parser = MeshParser::new(source);

    match parser.mesh() {
        Ok(mesh) => Ok(Parsed {
            mesh,
            warnings: parser.diagnostics.finish(),
        }),
        Err(fatal) => {
            let mut diagnostics = vec![fatal];
            diagnostics.extend(parser.diagnostics.finish());
            Err(ParseError::new(diagnostics))
        }
    }
}

/// The node count line, kept for pointing back at it from element errors.
struct DeclaredNodes {
    count: usize,
    span: Span,
}

/// Shape of the first data line in a block, used to flag later lines that differ.
struct FirstShape {
    width: usize,
    span: Span,
}

struct MeshParser<'src> {
    lines: LineCursor<'src>,
    diagnostics: DiagnosticCollector,
    first_node: Option<FirstShape>,
    first_element: Option<FirstShape>,
}

impl<'src> MeshParser<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            lines: LineCursor::new(source),
            diagnostics: DiagnosticCollector::new(),
            first_node: None,
            first_element: None,
        }
    }

    fn mesh(&mut self) -> Result<Mesh> {
        for header in 1..=HEADER_LINES {
            let line = self
                .lines
                .expect_line(format!("header line {header} of {HEADER_LINES}"))?;
            trace!(line = line.text(); "Skipping header line");
        }

        let (node_count, node_count_span) = self.count("node count")?;
        debug!(node_count; "Parsing node block");
        let nodes = (0..node_count)
            .map(|index| self.node(index, node_count))
            .collect::<Result<Vec<_>>>()?;

        let separator = self.lines.expect_line("element block separator line")?;
        trace!(line = separator.text(); "Skipping separator line");

        let (element_count, _) = self.count("element count")?;
        debug!(element_count; "Parsing element block");
        let declared = DeclaredNodes {
            count: node_count,
            span: node_count_span,
        };
        let elements = (0..element_count)
            .map(|index| self.element(index, element_count, &declared))
            .collect::<Result<Vec<_>>>()?;

        let trailing_lines = self.lines.remaining();
        if trailing_lines > 0 {
            debug!(trailing_lines; "Ignoring lines after the element block");
        }

        debug!(
            nodes = nodes.len(),
            elements = elements.len(),
            warnings = self.diagnostics.len();
            "Mesh parsed",
        );
        Ok(Mesh::new(nodes, elements))
    }

    /// Parse a count line, returning the count and the span of its digits.
    fn count(&mut self, what: &str) -> Result<(usize, Span)> {
        let line = self.lines.expect_line(what)?;
        let text = line.text().trim();

        if text.is_empty() {
            return Err(Diagnostic::error(format!(
                "line {}: expected the {what}, found an empty line",
                line.number()
            ))
            .with_code(ErrorCode::E002)
            .with_label(line.span(), format!("expected the {what}"))
            .with_help(format!("the {what} line must hold a single non-negative integer")));
        }

        let span = line.span_of(text);
        let count = text.parse::<usize>().map_err(|_| {
            Diagnostic::error(format!(
                "line {}: {what} `{text}` is not a non-negative integer",
                line.number()
            ))
            .with_code(ErrorCode::E002)
            .with_label(span, format!("expected the {what}"))
            .with_help(format!("the {what} line must hold a single non-negative integer"))
        })?;

        Ok((count, span))
    }

    fn node(&mut self, index: usize, count: usize) -> Result<Node> {
        let line = self
            .lines
            .expect_line(format!("node line {} of {count}", index + 1))?;
        let fields = fields::split(&line);

        let Some((_label, values)) = fields.split_last().filter(|(_, values)| !values.is_empty())
        else {
            return Err(too_few_fields(&line, fields.len(), ErrorCode::E100)
                .with_help("node lines hold one or more coordinates followed by a label"));
        };

        let coords = values
            .iter()
            .map(|field| coordinate(&line, field))
            .collect::<Result<Vec<_>>>()?;

        if let Some(warning) = check_width(
            &mut self.first_node,
            &line,
            coords.len(),
            "node",
            "coordinates",
        ) {
            self.diagnostics.emit(warning.with_code(ErrorCode::E103));
        }

        Ok(Node::new(coords))
    }

    fn element(&mut self, index: usize, count: usize, declared: &DeclaredNodes) -> Result<Element> {
        let line = self
            .lines
            .expect_line(format!("element line {} of {count}", index + 1))?;
        let fields = fields::split(&line);

        let Some((_label, values)) = fields.split_last().filter(|(_, values)| !values.is_empty())
        else {
            return Err(too_few_fields(&line, fields.len(), ErrorCode::E200)
                .with_help("element lines hold one or more node indices followed by a label"));
        };

        let indices = values
            .iter()
            .map(|field| node_index(&line, field, declared))
            .collect::<Result<Vec<_>>>()?;

        if let Some(warning) = check_width(
            &mut self.first_element,
            &line,
            indices.len(),
            "element",
            "nodes",
        ) {
            self.diagnostics.emit(warning.with_code(ErrorCode::E203));
        }

        Ok(Element::new(indices))
    }
}

fn too_few_fields(line: &Line<'_>, found: usize, code: ErrorCode) -> Diagnostic {
    Diagnostic::error(format!(
        "line {}: found {found} field(s), expected at least 2",
        line.number()
    ))
    .with_code(code)
    .with_label(line.span(), "too few fields")
}

fn coordinate(line: &Line<'_>, field: &Field<'_>) -> Result<f64> {
    let value = field.text().parse::<f64>().map_err(|_| {
        Diagnostic::error(format!(
            "line {}: `{}` is not a valid coordinate",
            line.number(),
            field.text()
        ))
        .with_code(ErrorCode::E101)
        .with_label(field.span(), "expected a floating-point number")
    })?;

    if !value.is_finite() {
        return Err(Diagnostic::error(format!(
            "line {}: coordinate `{}` is not finite",
            line.number(),
            field.text()
        ))
        .with_code(ErrorCode::E102)
        .with_label(field.span(), "not a finite number")
        .with_help("JSON has no representation for NaN or infinity"));
    }

    Ok(value)
}

/// Convert a 1-based node reference into a 0-based index into the node list.
fn node_index(line: &Line<'_>, field: &Field<'_>, declared: &DeclaredNodes) -> Result<usize> {
    let one_based = field.text().parse::<i64>().map_err(|_| {
        Diagnostic::error(format!(
            "line {}: `{}` is not an integer node index",
            line.number(),
            field.text()
        ))
        .with_code(ErrorCode::E201)
        .with_label(field.span(), "expected an integer")
    })?;

    one_based
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
        .filter(|&index| index < declared.count)
        .ok_or_else(|| {
            let help = if declared.count == 0 {
                "no nodes are declared, so elements cannot reference any".to_string()
            } else {
                format!(
                    "node indices are 1-based and must lie between 1 and {}",
                    declared.count
                )
            };
            Diagnostic::error(format!(
                "line {}: node index {one_based} is out of range",
                line.number()
            ))
            .with_code(ErrorCode::E202)
            .with_label(field.span(), "no such node")
            .with_secondary_label(
                declared.span,
                format!("{} node(s) declared here", declared.count),
            )
            .with_help(help)
        })
}

/// Record the width of the first line of a block, or warn when a later line differs.
fn check_width(
    first: &mut Option<FirstShape>,
    line: &Line<'_>,
    width: usize,
    noun: &str,
    unit: &str,
) -> Option<Diagnostic> {
    let Some(shape) = first.as_ref() else {
        *first = Some(FirstShape {
            width,
            span: line.span(),
        });
        return None;
    };

    (shape.width != width).then(|| {
        Diagnostic::warning(format!(
            "line {}: {noun} has {width} {unit}, the first {noun} has {}",
            line.number(),
            shape.width
        ))
        .with_label(line.span(), format!("{width} {unit}"))
        .with_secondary_label(shape.span, format!("first {noun} has {}", shape.width))
    })
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn mesh_source(node_count: usize, elements: &[Vec<usize>]) -> String {
        let mut text = String::from("h\nh\nh\nh\n");
        text.push_str(&format!("{node_count}\n"));
        for i in 0..node_count {
            text.push_str(&format!("{i}.5 -{i}.25 {}\n", i + 1));
        }
        text.push_str("sep\n");
        text.push_str(&format!("{}\n", elements.len()));
        for (i, element) in elements.iter().enumerate() {
            let fields: Vec<String> = element.iter().map(usize::to_string).collect();
            text.push_str(&format!("{} {}\n", fields.join(" "), i + 1));
        }
        text
    }

    fn case_strategy() -> impl Strategy<Value = (usize, Vec<Vec<usize>>)> {
        (1usize..30).prop_flat_map(|node_count| {
            let elements = prop::collection::vec(prop::collection::vec(1..=node_count, 8), 0..12);
            (Just(node_count), elements)
        })
    }

    proptest! {
        #[test]
        fn indices_are_source_minus_one((node_count, elements) in case_strategy()) {
            let text = mesh_source(node_count, &elements);
            let parsed = parse_mesh(&text).expect("generated mesh is valid");

            prop_assert_eq!(parsed.mesh().elements().len(), elements.len());
            for (element, source) in parsed.mesh().elements().iter().zip(&elements) {
                for (&index, &one_based) in element.node_indices().iter().zip(source) {
                    prop_assert_eq!(index, one_based - 1);
                    prop_assert!(index < node_count);
                }
            }
        }

        #[test]
        fn every_declared_node_is_read((node_count, elements) in case_strategy()) {
            let text = mesh_source(node_count, &elements);
            let parsed = parse_mesh(&text).expect("generated mesh is valid");

            prop_assert_eq!(parsed.mesh().nodes().len(), node_count);
            prop_assert!(parsed.mesh().nodes().iter().all(|node| node.dimension() == 2));
        }

        #[test]
        fn truncated_node_block_fails(node_count in 2usize..30, keep in 0usize..30) {
            let keep = keep % node_count;
            let full = mesh_source(node_count, &[]);
            let lines: Vec<&str> = full.lines().take(5 + keep).collect();
            let text = lines.join("\n");

            let err = parse_mesh(&text).expect_err("truncated input");
            prop_assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
        }
    }
}
