//! Adapts [`MeshportError`] into [`miette`] diagnostics for terminal output.
//!
//! Parse errors become one reportable per parser diagnostic, carrying the
//! source text so the offending line is shown with its labels. Every other
//! error becomes a single plain reportable. Warnings from a successful
//! conversion are rendered the same way as parse diagnostics.

use std::fmt;

use miette::{GraphicalReportHandler, LabeledSpan, SourceCode};
use thiserror::Error;

use meshport::{ConversionSummary, MeshportError};
use meshport_parser::error::{Diagnostic, Severity};

/// A renderable diagnostic.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct Reportable {
    message: String,
    code: Option<String>,
    severity: miette::Severity,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    source_code: Option<String>,
}

impl Reportable {
    fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            severity: miette::Severity::Error,
            help: None,
            labels: Vec::new(),
            source_code: None,
        }
    }

    fn from_diagnostic(diagnostic: &Diagnostic, source: &str) -> Self {
        let labels = diagnostic
            .labels()
            .iter()
            .map(|label| {
                let text = Some(label.message().to_string());
                let span = label.span().range();
                if label.is_primary() {
                    LabeledSpan::new_primary_with_span(text, span)
                } else {
                    LabeledSpan::new_with_span(text, span)
                }
            })
            .collect();

        Self {
            message: diagnostic.message().to_string(),
            code: diagnostic.code().map(|code| code.to_string()),
            severity: match diagnostic.severity() {
                Severity::Error => miette::Severity::Error,
                Severity::Warning => miette::Severity::Warning,
            },
            help: diagnostic.help().map(str::to_string),
            labels,
            source_code: Some(source.to_string()),
        }
    }
}

impl miette::Diagnostic for Reportable {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'a>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.source_code
            .as_ref()
            .map(|source| source as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.iter().cloned()))
        }
    }
}

/// Convert an error into the diagnostics to show the user.
pub fn to_reportables(err: &MeshportError) -> Vec<Reportable> {
    match err {
        MeshportError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diagnostic| Reportable::from_diagnostic(diagnostic, src))
            .collect(),
        other => vec![Reportable::plain(other.to_string())],
    }
}

/// Convert the warnings of a successful conversion into diagnostics.
pub fn warning_reportables(summary: &ConversionSummary) -> Vec<Reportable> {
    summary
        .warnings()
        .iter()
        .map(|diagnostic| Reportable::from_diagnostic(diagnostic, summary.source()))
        .collect()
}

/// Render one reportable to text with `handler`.
pub fn render(handler: &GraphicalReportHandler, reportable: &Reportable) -> String {
    let mut out = String::new();
    handler
        .render_report(&mut out, reportable)
        .expect("Writing to String buffer is infallible");
    out
}
