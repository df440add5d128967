//! Configuration types for Meshport conversions.
//!
//! All types implement [`serde::Deserialize`] and default every field, so an
//! empty configuration source yields [`AppConfig::default`].
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining paths and output settings.
//! - [`PathsConfig`] - Source and destination file paths.
//! - [`OutputConfig`] - JSON formatting options.
//!
//! # Example
//!
//! ```
//! # use meshport::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.paths().input().to_str(), Some("dragon.txt"));
//! assert_eq!(config.paths().output().to_str(), Some("salida.json"));
//! assert!(!config.output().pretty());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Source file read when no input path is configured.
pub const DEFAULT_INPUT: &str = "dragon.txt";

/// Destination file written when no output path is configured.
pub const DEFAULT_OUTPUT: &str = "salida.json";

/// Top-level configuration combining path and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Path configuration section.
    #[serde(default)]
    paths: PathsConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(paths: PathsConfig, output: OutputConfig) -> Self {
        Self { paths, output }
    }

    /// Returns the path configuration.
    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Replaces the input path.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.paths.input = input.into();
        self
    }

    /// Replaces the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.paths.output = output.into();
        self
    }

    /// Replaces the pretty-printing flag.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.output.pretty = pretty;
        self
    }
}

/// Source and destination paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Mesh text file to read.
    #[serde(default = "default_input")]
    input: PathBuf,

    /// JSON document to write.
    #[serde(default = "default_output")]
    output: PathBuf,
}

impl PathsConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT, DEFAULT_OUTPUT)
    }
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

/// JSON formatting options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Indent the JSON document instead of writing it on one line.
    #[serde(default)]
    pretty: bool,
}

impl OutputConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Returns whether the JSON document is pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}
