//! Unified path management for roteiro configuration files.
//!
//! All roteiro configuration, secrets, and stored prompt records live under
//! a single configuration directory, resolved consistently across platforms.

use std::path::{Path, PathBuf};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Configuration directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// The kinds of files/directories roteiro manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    /// models.toml - model configuration rows
    ModelConfig,
    /// formats.toml - per-platform format templates
    PlatformFormats,
    /// secret.json - API keys
    Secret,
    /// prompts/ - stored prompt records, one JSON file each
    Prompts,
}

/// Unified path management for roteiro.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/roteiro/           # Config directory
/// ├── models.toml              # Model configuration rows
/// ├── formats.toml             # Platform format templates
/// ├── secret.json              # API keys
/// └── prompts/                 # Stored prompt records
///     └── <uuid>.json
/// ```
pub struct RoteiroPaths {
    base: Option<PathBuf>,
}

impl RoteiroPaths {
    /// Creates path management rooted at `base`, or at the platform config
    /// directory when `base` is `None`.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the roteiro base directory.
    pub fn base_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }

        dirs::config_dir()
            .map(|dir| dir.join("roteiro"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path for a managed file or directory.
    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        let base = self.base_dir()?;
        let path = match service {
            ServiceType::ModelConfig => base.join("models.toml"),
            ServiceType::PlatformFormats => base.join("formats.toml"),
            ServiceType::Secret => base.join("secret.json"),
            ServiceType::Prompts => base.join("prompts"),
        };
        Ok(path)
    }
}
