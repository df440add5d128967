//! Meshport - converts hexahedral mesh text files into FEM viewer JSON.
//!
//! The conversion is a single linear pass: read the source file, parse the
//! node and element blocks, assemble a [`MeshDocument`](document::MeshDocument),
//! serialize it and write the destination file. The destination is written
//! only after the whole document has been built, and is replaced atomically,
//! so a failed conversion never leaves a partial output file behind.

pub mod config;

mod error;
mod output;

pub use meshport_core::{document, mesh};

pub use error::MeshportError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, trace, warn};
use meshport_parser::error::Diagnostic;

use config::AppConfig;
use document::MeshDocument;

/// Converter for Meshport source files.
///
/// # Examples
///
/// ```rust
/// use meshport::{MeshConverter, config::AppConfig};
///
/// let source = "h\nh\nh\nh\n2\n0.0 0.0 1\n1.0 0.0 2\nsep\n1\n1 2 1\n";
///
/// let converter = MeshConverter::new(AppConfig::default());
/// let document = converter.parse(source).expect("Failed to parse");
/// assert_eq!(document.total_dofs(), 2);
///
/// let json = converter.render_json(&document).expect("Failed to render");
/// assert!(json.starts_with(r#"{"nodes":[[0.0,0.0],[1.0,0.0]]"#));
/// ```
#[derive(Debug, Default)]
pub struct MeshConverter {
    config: AppConfig,
}

impl MeshConverter {
    /// Create a new converter with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Path and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this converter was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a mesh document.
    ///
    /// Parser warnings are logged and do not fail the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`MeshportError::Parse`] when the source does not follow the
    /// mesh format exactly.
    pub fn parse(&self, source: &str) -> Result<MeshDocument, MeshportError> {
        let (document, warnings) = self.parse_with_warnings(source)?;
        for warning in &warnings {
            warn!("{warning}");
        }
        Ok(document)
    }

    /// Parse source text, handing the parser warnings back to the caller
    /// instead of logging them.
    ///
    /// The warnings keep their labels and help, so a caller holding the
    /// source text can render them in full.
    ///
    /// # Errors
    ///
    /// See [`MeshConverter::parse`].
    pub fn parse_with_warnings(
        &self,
        source: &str,
    ) -> Result<(MeshDocument, Vec<Diagnostic>), MeshportError> {
        info!("Parsing mesh");

        let parsed = meshport_parser::parse(source)
            .map_err(|err| MeshportError::new_parse_error(err, source))?;
        let (mesh, warnings) = parsed.into_parts();

        let document = MeshDocument::from_mesh(mesh);
        debug!(
            nodes = document.node_count(),
            elements = document.element_count(),
            total_dofs = document.total_dofs(),
            warnings = warnings.len();
            "Mesh document assembled",
        );
        trace!(document:?; "Assembled document");

        Ok((document, warnings))
    }

    /// Serialize a mesh document to JSON.
    ///
    /// Output is compact unless `output.pretty` is set in the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MeshportError::Json`] if serialization fails.
    pub fn render_json(&self, document: &MeshDocument) -> Result<String, MeshportError> {
        let pretty = self.config.output().pretty();
        let json = if pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };

        debug!(bytes = json.len(), pretty; "Document serialized");
        Ok(json)
    }

    /// Convert `input` into a JSON document at `output`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshportError::Read`] if the source cannot be read,
    /// [`MeshportError::Parse`] if it is malformed, and
    /// [`MeshportError::Write`] if the destination cannot be written. In every
    /// failure case the destination file is left untouched.
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<ConversionSummary, MeshportError> {
        let input = input.as_ref();
        let output = output.as_ref();
        info!(input_path:? = input, output_path:? = output; "Converting mesh");

        let source = fs::read_to_string(input).map_err(|source| MeshportError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        trace!(bytes = source.len(); "Source read");

        let (document, warnings) = self.parse_with_warnings(&source)?;
        let json = self.render_json(&document)?;

        output::write_atomically(output, json.as_bytes()).map_err(|source| {
            MeshportError::Write {
                path: output.to_path_buf(),
                source,
            }
        })?;
        info!(output_file:? = output; "Mesh document written");

        Ok(ConversionSummary {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            node_count: document.node_count(),
            element_count: document.element_count(),
            bytes_written: json.len(),
            warnings,
            source,
        })
    }

    /// Convert the configured input path into the configured output path.
    ///
    /// # Errors
    ///
    /// See [`MeshConverter::convert_file`].
    pub fn convert(&self) -> Result<ConversionSummary, MeshportError> {
        let paths = self.config.paths();
        self.convert_file(paths.input(), paths.output())
    }
}

/// Outcome of a successful file conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    input: PathBuf,
    output: PathBuf,
    node_count: usize,
    element_count: usize,
    bytes_written: usize,
    warnings: Vec<Diagnostic>,
    source: String,
}

impl ConversionSummary {
    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Parser warnings raised by a conversion that still succeeded.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// The source text the warning spans point into.
    pub fn source(&self) -> &str {
        &self.source
    }
}
