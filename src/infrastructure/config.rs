use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const ENV_PREFIX: &str = "AUTODOC";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("input flag is required")]
    MissingInput,

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts level names in any case, or the numeric severities -4, 0, 4 and 8.
impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "-4" => Ok(LogLevel::Debug),
            "info" | "0" => Ok(LogLevel::Info),
            "warn" | "4" => Ok(LogLevel::Warn),
            "error" | "8" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

/// Validated run settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: String,
    pub output: PathBuf,
    pub log_level: LogLevel,
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub input: Option<String>,
    pub output: Option<PathBuf>,
    pub log_level: Option<String>,
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    input: Option<String>,
    output: PathBuf,
    log_level: String,
}

/// Layers defaults, the optional settings file, `AUTODOC_*` environment
/// variables and the command line, in increasing priority.
pub fn load_settings(overrides: SettingsOverrides) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder()
        .set_default("output", ".")?
        .set_default("log_level", LogLevel::default().as_str())?;

    if let Some(path) = overrides.config_file.as_deref() {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let settings = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .set_override_option("input", overrides.input)?
        .set_override_option("output", overrides.output.as_deref().map(path_value))?
        .set_override_option("log_level", overrides.log_level)?
        .build()?;

    let raw: RawSettings = settings.try_deserialize()?;
    raw.validate()
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl RawSettings {
    fn validate(self) -> Result<Settings, ConfigError> {
        let input = self
            .input
            .filter(|input| !input.is_empty())
            .ok_or(ConfigError::MissingInput)?;

        Ok(Settings {
            input,
            output: self.output,
            log_level: self.log_level.parse()?,
        })
    }
}
