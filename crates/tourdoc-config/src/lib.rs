//! Configuration management for tourdoc.
//!
//! Parses `tourdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [tour]
//! source_dir = "tour"
//! intro = "README.md"
//! completion = "DONE.md"
//!
//! [docs]
//! source_dir = "docs"
//! global_data = "data/*.yml"
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `tour.source_dir`, `docs.source_dir` and `docs.global_data` support
//! `${VAR}` (error if unset) and `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override tour source directory.
    pub tour_dir: Option<PathBuf>,
    /// Override docs source directory.
    pub docs_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tourdoc.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tour configuration as written in TOML.
    tour: TourConfigRaw,
    /// Docs configuration as written in TOML.
    docs: DocsConfigRaw,

    /// Resolved tour configuration (set after loading).
    #[serde(skip)]
    pub tour_resolved: TourConfig,
    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TourConfigRaw {
    source_dir: Option<String>,
    intro: Option<String>,
    completion: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    global_data: Option<String>,
}

/// Resolved tour configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourConfig {
    /// Directory holding chapter documents.
    pub source_dir: PathBuf,
    /// Intro document name.
    pub intro: String,
    /// Completion document name.
    pub completion: String,
}

impl TourConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            source_dir: base.join("tour"),
            intro: "README.md".to_owned(),
            completion: "DONE.md".to_owned(),
        }
    }
}

impl Default for TourConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

/// Resolved docs configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Directory holding docs pages, templates and data.
    pub source_dir: PathBuf,
    /// Glob, relative to `source_dir`, of data files visible to every template.
    pub global_data: String,
}

impl DocsConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            source_dir: base.join("docs"),
            global_data: "data/*.yml".to_owned(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a plain file name with no directory part.
fn require_file_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.contains('/') || value.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "{field} must be a file name, not a path"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tourdoc.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// CLI settings are applied after loading and path resolution.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(tour_dir) = &settings.tour_dir {
            self.tour_resolved.source_dir.clone_from(tour_dir);
        }
        if let Some(docs_dir) = &settings.docs_dir {
            self.docs_resolved.source_dir.clone_from(docs_dir);
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            tour: TourConfigRaw::default(),
            docs: DocsConfigRaw::default(),
            tour_resolved: TourConfig::with_base(base),
            docs_resolved: DocsConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_file_name(&self.tour_resolved.intro, "tour.intro")?;
        require_file_name(&self.tour_resolved.completion, "tour.completion")?;

        let pattern = &self.docs_resolved.global_data;
        require_non_empty(pattern, "docs.global_data")?;
        glob::Pattern::new(pattern).map_err(|e| {
            ConfigError::Validation(format!("docs.global_data is not a valid pattern: {e}"))
        })?;

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.tour.source_dir {
            self.tour.source_dir = Some(expand::expand_env(dir, "tour.source_dir")?);
        }
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref pattern) = self.docs.global_data {
            self.docs.global_data = Some(expand::expand_env(pattern, "docs.global_data")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));
        let tour_defaults = TourConfig::default();
        let docs_defaults = DocsConfig::default();

        self.tour_resolved = TourConfig {
            source_dir: resolve(self.tour.source_dir.as_deref(), "tour"),
            intro: self.tour.intro.clone().unwrap_or(tour_defaults.intro),
            completion: self
                .tour
                .completion
                .clone()
                .unwrap_or(tour_defaults.completion),
        };

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            global_data: self
                .docs
                .global_data
                .clone()
                .unwrap_or(docs_defaults.global_data),
        };
    }
}
