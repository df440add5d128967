//! Accumulates non-fatal diagnostics during a parse.

use crate::error::Diagnostic;

/// Collects diagnostics that do not abort parsing.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Consumes the collector, returning everything recorded so far.
    pub(crate) fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
