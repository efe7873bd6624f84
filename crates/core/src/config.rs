use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder credential shipped in sample config files. Treated the same
/// as a missing key so a copy-pasted template fails fast at startup.
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub memory: MemoryConfig,
    pub interaction_log: InteractionLogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
}

#[derive(Clone, Debug)]
pub struct MemoryConfig {
    /// Size of the conversation window sent to the completion service.
    /// Bounds prompt cost at the expense of long-term memory.
    pub max_turns: usize,
}

#[derive(Clone, Debug)]
pub struct InteractionLogConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub log_level: Option<String>,
    pub max_turns: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
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
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                api_key: None,
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                timeout_secs: 60,
                temperature: 0.7,
            },
            memory: MemoryConfig { max_turns: 10 },
            interaction_log: InteractionLogConfig {
                enabled: true,
                path: PathBuf::from("wayfarer.log"),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
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
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("wayfarer.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(llm) = patch.llm {
            if let Some(llm_api_key_value) = llm.api_key {
                self.llm.api_key = Some(secret_value(llm_api_key_value));
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = base_url;
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
            if let Some(temperature) = llm.temperature {
                self.llm.temperature = temperature;
            }
        }

        if let Some(memory) = patch.memory {
            if let Some(max_turns) = memory.max_turns {
                self.memory.max_turns = max_turns;
            }
        }

        if let Some(interaction_log) = patch.interaction_log {
            if let Some(enabled) = interaction_log.enabled {
                self.interaction_log.enabled = enabled;
            }
            if let Some(path) = interaction_log.path {
                self.interaction_log.path = PathBuf::from(path);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("WAYFARER_LLM_API_KEY") {
            self.llm.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("WAYFARER_LLM_BASE_URL") {
            self.llm.base_url = value;
        }
        if let Some(value) = read_env("WAYFARER_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("WAYFARER_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("WAYFARER_LLM_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("WAYFARER_LLM_TEMPERATURE") {
            self.llm.temperature = parse_f32("WAYFARER_LLM_TEMPERATURE", &value)?;
        }

        if let Some(value) = read_env("WAYFARER_MEMORY_MAX_TURNS") {
            self.memory.max_turns = parse_usize("WAYFARER_MEMORY_MAX_TURNS", &value)?;
        }

        if let Some(value) = read_env("WAYFARER_INTERACTION_LOG_ENABLED") {
            self.interaction_log.enabled = parse_bool("WAYFARER_INTERACTION_LOG_ENABLED", &value)?;
        }
        if let Some(value) = read_env("WAYFARER_INTERACTION_LOG_PATH") {
            self.interaction_log.path = PathBuf::from(value);
        }

        let log_level =
            read_env("WAYFARER_LOGGING_LEVEL").or_else(|| read_env("WAYFARER_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("WAYFARER_LOGGING_FORMAT").or_else(|| read_env("WAYFARER_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(api_key) = overrides.api_key {
            self.llm.api_key = Some(secret_value(api_key));
        }
        if let Some(base_url) = overrides.base_url {
            self.llm.base_url = base_url;
        }
        if let Some(model) = overrides.model {
            self.llm.model = model;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(max_turns) = overrides.max_turns {
            self.memory.max_turns = max_turns;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_llm(&self.llm)?;
        validate_memory(&self.memory)?;
        validate_interaction_log(&self.interaction_log)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("wayfarer.toml"), PathBuf::from("config/wayfarer.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    let key = llm.api_key.as_ref().map(|value| value.expose_secret().trim().to_string());
    match key.as_deref() {
        None | Some("") => {
            return Err(ConfigError::Validation(
                "llm.api_key is required. Set it in wayfarer.toml or WAYFARER_LLM_API_KEY"
                    .to_string(),
            ));
        }
        Some(PLACEHOLDER_API_KEY) => {
            return Err(ConfigError::Validation(format!(
                "llm.api_key still holds the placeholder `{PLACEHOLDER_API_KEY}`; \
                 replace it with a real credential"
            )));
        }
        Some(_) => {}
    }

    let base_url = llm.base_url.trim();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "llm.base_url must start with http:// or https://".to_string(),
        ));
    }

    if llm.timeout_secs == 0 || llm.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "llm.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&llm.temperature) {
        return Err(ConfigError::Validation(
            "llm.temperature must be in range 0.0..=2.0".to_string(),
        ));
    }

    Ok(())
}

fn validate_memory(memory: &MemoryConfig) -> Result<(), ConfigError> {
    if memory.max_turns == 0 {
        return Err(ConfigError::Validation(
            "memory.max_turns must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_interaction_log(interaction_log: &InteractionLogConfig) -> Result<(), ConfigError> {
    if interaction_log.enabled && interaction_log.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "interaction_log.path must be set when interaction_log.enabled is true".to_string(),
        ));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value.parse::<f32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    llm: Option<LlmPatch>,
    memory: Option<MemoryPatch>,
    interaction_log: Option<InteractionLogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    temperature: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct MemoryPatch {
    max_turns: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct InteractionLogPatch {
    enabled: Option<bool>,
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
