//! Error codes for the Meshport diagnostic system.
//!
//! Error codes are organized by the part of the file they concern:
//! - `E0xx` - File structure (missing lines, count lines)
//! - `E1xx` - Node block
//! - `E2xx` - Element block

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Structure Errors (E0xx)
    // =========================================================================
    /// Unexpected end of input.
    ///
    /// The file ended before a required header, count, data or separator
    /// line. This includes a count line that declares more data lines than
    /// the file holds.
    E001,

    /// Invalid count.
    ///
    /// A node or element count line does not hold a single non-negative
    /// integer.
    E002,

    // =========================================================================
    // Node Block Errors (E1xx)
    // =========================================================================
    /// Node line has too few fields.
    ///
    /// Node lines need at least one coordinate followed by a label.
    E100,

    /// Invalid coordinate.
    ///
    /// A coordinate field is not a floating-point number.
    E101,

    /// Non-finite coordinate.
    ///
    /// A coordinate is `nan` or infinite, which JSON cannot represent.
    E102,

    /// Inconsistent node dimension.
    ///
    /// A node has a different number of coordinates than the first node.
    /// Reported as a warning.
    E103,

    // =========================================================================
    // Element Block Errors (E2xx)
    // =========================================================================
    /// Element line has too few fields.
    ///
    /// Element lines need at least one node index followed by a label.
    E200,

    /// Invalid node index.
    ///
    /// A connectivity field is not an integer.
    E201,

    /// Node index out of range.
    ///
    /// A 1-based node index is below 1 or above the node count.
    E202,

    /// Inconsistent element arity.
    ///
    /// An element connects a different number of nodes than the first
    /// element. Reported as a warning.
    E203,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unexpected end of input",
            ErrorCode::E002 => "invalid count",
            ErrorCode::E100 => "node line has too few fields",
            ErrorCode::E101 => "invalid coordinate",
            ErrorCode::E102 => "non-finite coordinate",
            ErrorCode::E103 => "inconsistent node dimension",
            ErrorCode::E200 => "element line has too few fields",
            ErrorCode::E201 => "invalid node index",
            ErrorCode::E202 => "node index out of range",
            ErrorCode::E203 => "inconsistent element arity",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
