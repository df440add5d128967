//! Parser for the Meshport source mesh format.
//!
//! The source format is strictly line oriented: four header lines, a node
//! count, one line per node, a separator line, an element count and one line
//! per element. Every data line ends with a label column that is dropped.
//! Element lines hold 1-based node indices which are converted to 0-based.
//!
//! The parser is deliberately strict. Blank lines, comments or missing lines
//! are not skipped; any deviation produces a [`ParseError`] carrying a
//! [`Diagnostic`](error::Diagnostic) that points at the offending span.
//!
//! # Example
//!
//! ```
//! let source = "header\nheader\nheader\nheader\n\
//!               3\n0.0 0.0 1\n1.0 0.0 2\n0.0 1.0 3\n\
//!               separator\n1\n1 2 3 1\n";
//!
//! let parsed = meshport_parser::parse(source).expect("valid mesh");
//! assert_eq!(parsed.mesh().nodes().len(), 3);
//! assert_eq!(parsed.mesh().elements()[0].node_indices(), &[0, 1, 2]);
//! ```

pub mod error;

mod fields;
mod lines;
mod parser;
mod span;

pub use error::ParseError;
pub use parser::Parsed;
pub use span::Span;

/// Parses a complete source file into a mesh.
///
/// # Errors
///
/// Returns a [`ParseError`] when the input is truncated, a count line is not
/// a non-negative integer, a data line has fewer than two fields, a value is
/// not numeric, or an element references a node that does not exist.
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    parser::parse_mesh(source)
}
