//! Configuration loader for the outline-doc tools.
//!
//! Resolution precedence: explicit override path → `.outline-doc.toml` in
//! the working directory → built-in defaults. Parsed settings are normalised
//! into typed structures so downstream crates never touch raw TOML.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".outline-doc.toml";

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub storage: StorageSettings,
    pub export: ExportSettings,
}

/// Where documents are persisted and how the JSON payload is written.
#[derive(Clone, Debug)]
pub struct StorageSettings {
    pub root: PathBuf,
    pub pretty: bool,
}

/// Settings for rendered exports.
#[derive(Clone, Debug)]
pub struct ExportSettings {
    pub extension: String,
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("config {path}: {message}")]
    Validation { path: PathBuf, message: String },
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed
    /// settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let mut config = Config::defaults(&working_dir);

        let local_path = working_dir.join(CONFIG_FILE_NAME);
        if local_path.exists() {
            config.apply_file(&local_path)?;
        }

        if let Some(path) = options.override_path {
            let path = make_absolute(&path, &working_dir);
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path });
            }
            config.apply_file(&path)?;
        }

        Ok(config)
    }

    fn defaults(working_dir: &Path) -> Self {
        Config {
            storage: StorageSettings {
                root: working_dir.join(".outline"),
                pretty: true,
            },
            export: ExportSettings {
                extension: "html".to_string(),
            },
        }
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.into(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.into(),
            source,
        })?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        if let Some(storage) = raw.storage {
            if let Some(root) = storage.root {
                self.storage.root = make_absolute(&root, &base_dir);
            }
            if let Some(pretty) = storage.pretty {
                self.storage.pretty = pretty;
            }
        }

        if let Some(export) = raw.export {
            if let Some(extension) = export.extension {
                let extension = extension.trim_start_matches('.').to_string();
                if extension.is_empty() {
                    return Err(ConfigError::Validation {
                        path: path.into(),
                        message: "export.extension cannot be empty".into(),
                    });
                }
                self.export.extension = extension;
            }
        }

        Ok(())
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    storage: Option<RawStorage>,
    #[serde(default)]
    export: Option<RawExport>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    #[serde(default)]
    root: Option<PathBuf>,
    #[serde(default)]
    pretty: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawExport {
    #[serde(default)]
    extension: Option<String>,
}
