//! Error and diagnostic system for the Meshport parser.
//!
//! This module provides:
//! - Error codes grouped by the part of the file they concern
//! - Labeled spans pointing at the offending line or field
//! - Severity levels, so advisory findings can travel with a successful parse
//! - A collector for accumulating warnings during a parse
//!
//! # Example
//!
//! ```
//! # use meshport_parser::error::{Diagnostic, ErrorCode};
//! # use meshport_parser::Span;
//!
//! let diag = Diagnostic::error("`abc` is not a valid coordinate")
//!     .with_code(ErrorCode::E101)
//!     .with_label(Span::new(40..43), "expected a floating-point number")
//!     .with_help("node lines hold coordinates followed by a label");
//!
//! assert_eq!(diag.to_string(), "error[E101]: `abc` is not a valid coordinate");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
