//! CLI logic for the Meshport converter.
//!
//! This module resolves configuration from the command line and the optional
//! configuration file, then runs a single file conversion.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use meshport::{ConversionSummary, MeshConverter, MeshportError, config::AppConfig};

/// Run the Meshport CLI application
///
/// This function converts the input mesh file into a JSON document at the
/// output path. The returned summary carries any parser warnings so the
/// caller can report them.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `MeshportError` for:
/// - Configuration loading errors
/// - File I/O errors
/// - Parse errors in the mesh file
/// - JSON serialization errors
pub fn run(args: &Args) -> Result<ConversionSummary, MeshportError> {
    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);
    info!(
        input_path:? = app_config.paths().input(),
        output_path:? = app_config.paths().output();
        "Processing mesh",
    );

    let converter = MeshConverter::new(app_config);
    let summary = converter.convert()?;

    info!(
        nodes = summary.node_count(),
        elements = summary.element_count(),
        bytes = summary.bytes_written(),
        warnings = summary.warnings().len();
        "JSON exported successfully",
    );

    Ok(summary)
}

/// Command-line values take precedence over the configuration file.
fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if let Some(input) = &args.input {
        config = config.with_input(input);
    }
    if let Some(output) = &args.output {
        config = config.with_output(output);
    }
    if args.pretty {
        config = config.with_pretty(true);
    }
    config
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use meshport::config::{OutputConfig, PathsConfig};

    use super::*;

    fn args(input: Option<&str>, output: Option<&str>, pretty: bool) -> Args {
        Args {
            input: input.map(str::to_string),
            output: output.map(str::to_string),
            config: None,
            pretty,
            log_level: "off".to_string(),
        }
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = AppConfig::new(
            PathsConfig::new("from-file.txt", "from-file.json"),
            OutputConfig::new(true),
        );

        let resolved = apply_overrides(config, &args(None, None, false));
        assert_eq!(resolved.paths().input(), Path::new("from-file.txt"));
        assert_eq!(resolved.paths().output(), Path::new("from-file.json"));
        assert!(resolved.output().pretty());
    }

    #[test]
    fn test_arguments_override_config() {
        let config = AppConfig::new(
            PathsConfig::new("from-file.txt", "from-file.json"),
            OutputConfig::new(false),
        );

        let resolved = apply_overrides(config, &args(Some("cli.txt"), Some("cli.json"), true));
        assert_eq!(resolved.paths().input(), Path::new("cli.txt"));
        assert_eq!(resolved.paths().output(), Path::new("cli.json"));
        assert!(resolved.output().pretty());
    }
}
