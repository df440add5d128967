//! Configuration file loading.
//!
//! An explicitly requested file must exist. Without one, `config.toml` in the
//! platform configuration directory is used when present, and built-in
//! defaults otherwise.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};

use meshport::{MeshportError, config::AppConfig};

/// File name looked up in the platform configuration directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load the application configuration.
///
/// # Arguments
///
/// * `path` - Configuration file given on the command line, if any
///
/// # Errors
///
/// Returns [`MeshportError::Config`] if an explicit file is missing, cannot be
/// read, or is not valid TOML for [`AppConfig`].
pub(crate) fn load_config(path: Option<&String>) -> Result<AppConfig, MeshportError> {
    if let Some(path) = path {
        let path = Path::new(path);
        if !path.exists() {
            return Err(MeshportError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        return load_file(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_file(&path),
        _ => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Returns `config.toml` inside the user configuration directory.
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "meshport")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn load_file(path: &Path) -> Result<AppConfig, MeshportError> {
    info!(config_path:? = path; "Loading configuration");

    let content = fs::read_to_string(path).map_err(|err| {
        MeshportError::Config(format!("cannot read {}: {err}", path.display()))
    })?;
    toml::from_str(&content)
        .map_err(|err| MeshportError::Config(format!("{}: {err}", path.display())))
}
