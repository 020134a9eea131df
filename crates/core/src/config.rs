use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "rebate.toml";
pub const NESTED_CONFIG_FILE: &str = "config/rebate.toml";

const LOG_LEVEL_VARS: &[&str] = &["REBATE_LOGGING_LEVEL", "REBATE_LOG_LEVEL"];
const LOG_FORMAT_VARS: &[&str] = &["REBATE_LOGGING_FORMAT", "REBATE_LOG_FORMAT"];
const CATALOG_PATH_VARS: &[&str] = &["REBATE_CATALOG_PATH"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Where rebate and product reference data comes from. `None` selects the
/// built-in dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Values that win over every other layer, usually from command-line flags.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub catalog_path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    /// Fail instead of falling back to defaults when no config file exists.
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

/// The layer a configuration value was last set by.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ValueSource {
    #[default]
    Default,
    File(PathBuf),
    Env(&'static str),
    Override,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::File(path) => write!(f, "file ({})", path.display()),
            Self::Env(var) => write!(f, "env ({var})"),
            Self::Override => f.write_str("override"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigSources {
    pub log_level: ValueSource,
    pub log_format: ValueSource,
    pub catalog_path: ValueSource,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
            catalog: CatalogConfig::default(),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        Self::load_with_sources(options).map(|(config, _)| config)
    }

    /// Loads defaults, then the config file, then the environment, then
    /// explicit overrides, remembering which layer set each value.
    pub fn load_with_sources(options: LoadOptions) -> Result<(Self, ConfigSources), ConfigError> {
        let mut config = Self::default();
        let mut sources = ConfigSources::default();

        match find_config_file(options.config_path.as_deref()) {
            Some(path) => config.apply_file(read_patch(&path)?, &path, &mut sources),
            None if options.require_file => {
                let expected =
                    options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
                return Err(ConfigError::MissingConfigFile(expected));
            }
            None => {}
        }

        config.apply_env(&mut sources)?;
        config.apply_overrides(options.overrides, &mut sources);
        config.validate()?;

        Ok((config, sources))
    }

    fn apply_file(&mut self, patch: ConfigPatch, file: &Path, sources: &mut ConfigSources) {
        let from_file = || ValueSource::File(file.to_path_buf());
        let logging = patch.logging.unwrap_or_default();

        if let Some(level) = logging.level {
            self.logging.level = level;
            sources.log_level = from_file();
        }
        if let Some(format) = logging.format {
            self.logging.format = format;
            sources.log_format = from_file();
        }
        if let Some(path) = patch.catalog.and_then(|catalog| catalog.path) {
            // Relative to the directory holding the config file.
            self.catalog.path = Some(match file.parent() {
                Some(parent) if path.is_relative() => parent.join(path),
                _ => path,
            });
            sources.catalog_path = from_file();
        }
    }

    fn apply_env(&mut self, sources: &mut ConfigSources) -> Result<(), ConfigError> {
        if let Some((var, level)) = first_env(LOG_LEVEL_VARS) {
            self.logging.level = level;
            sources.log_level = ValueSource::Env(var);
        }
        if let Some((var, format)) = first_env(LOG_FORMAT_VARS) {
            self.logging.format = format.parse()?;
            sources.log_format = ValueSource::Env(var);
        }
        if let Some((var, path)) = first_env(CATALOG_PATH_VARS) {
            self.catalog.path = Some(PathBuf::from(path));
            sources.catalog_path = ValueSource::Env(var);
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides, sources: &mut ConfigSources) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
            sources.log_level = ValueSource::Override;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
            sources.log_format = ValueSource::Override;
        }
        if let Some(path) = overrides.catalog_path {
            self.catalog.path = Some(path);
            sources.catalog_path = ValueSource::Override;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {} (got `{}`)",
                LOG_LEVELS.join("|"),
                self.logging.level
            )));
        }

        match self.catalog.path.as_deref() {
            Some(path) if path.as_os_str().is_empty() => Err(ConfigError::Validation(
                "catalog.path must not be empty; remove it to use the built-in catalog".to_string(),
            )),
            Some(path) if !path.is_file() => Err(ConfigError::Validation(format!(
                "catalog.path `{}` does not point to a readable file",
                path.display()
            ))),
            _ => Ok(()),
        }
    }
}

/// An explicit path is the only candidate when given; otherwise the
/// conventional locations are tried in order.
fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    let candidates = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => vec![PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from(NESTED_CONFIG_FILE)],
    };
    candidates.into_iter().find(|path| path.is_file())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    let expanded = expand_env_references(&raw)?;

    toml::from_str(&expanded)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

/// Replaces every `${VAR}` with the value of `VAR`.
fn expand_env_references(input: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        expanded.push_str(&rest[..start]);
        let reference = &rest[start + 2..];
        let end = reference.find('}').ok_or(ConfigError::UnterminatedInterpolation)?;
        let var = &reference[..end];
        let value = env::var(var)
            .map_err(|_| ConfigError::MissingEnvInterpolation { var: var.to_string() })?;
        expanded.push_str(&value);
        rest = &reference[end + 1..];
    }
    expanded.push_str(rest);

    Ok(expanded)
}

/// First non-blank variable among `vars`, in priority order.
fn first_env(vars: &[&'static str]) -> Option<(&'static str, String)> {
    vars.iter().find_map(|var| {
        let value = env::var(var).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| (*var, value.to_string()))
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    logging: Option<LoggingPatch>,
    catalog: Option<CatalogPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}
