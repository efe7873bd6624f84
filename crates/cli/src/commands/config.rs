use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use toml::Value;
use wayfarer_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let api_key = if config.llm.api_key.is_some() { "<redacted>" } else { "<unset>" };
    lines.push(render_line("llm.api_key", api_key, source("llm.api_key", &["WAYFARER_LLM_API_KEY"])));
    lines.push(render_line(
        "llm.base_url",
        &config.llm.base_url,
        source("llm.base_url", &["WAYFARER_LLM_BASE_URL"]),
    ));
    lines.push(render_line(
        "llm.model",
        &config.llm.model,
        source("llm.model", &["WAYFARER_LLM_MODEL"]),
    ));
    lines.push(render_line(
        "llm.timeout_secs",
        &config.llm.timeout_secs.to_string(),
        source("llm.timeout_secs", &["WAYFARER_LLM_TIMEOUT_SECS"]),
    ));
    lines.push(render_line(
        "llm.temperature",
        &config.llm.temperature.to_string(),
        source("llm.temperature", &["WAYFARER_LLM_TEMPERATURE"]),
    ));
    lines.push(render_line(
        "memory.max_turns",
        &config.memory.max_turns.to_string(),
        source("memory.max_turns", &["WAYFARER_MEMORY_MAX_TURNS"]),
    ));
    lines.push(render_line(
        "interaction_log.enabled",
        &config.interaction_log.enabled.to_string(),
        source("interaction_log.enabled", &["WAYFARER_INTERACTION_LOG_ENABLED"]),
    ));
    lines.push(render_line(
        "interaction_log.path",
        &config.interaction_log.path.display().to_string(),
        source("interaction_log.path", &["WAYFARER_INTERACTION_LOG_PATH"]),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", &["WAYFARER_LOGGING_LEVEL", "WAYFARER_LOG_LEVEL"]),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", &["WAYFARER_LOGGING_FORMAT", "WAYFARER_LOG_FORMAT"]),
    ));

    lines.join("\n")
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} [{source}]")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("wayfarer.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/wayfarer.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    for env_key in env_keys {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let (Some(doc), Some(path)) = (config_file_doc, config_file_path) {
        if file_has_key(doc, key_path) {
            return format!("file ({})", path.display());
        }
    }

    "default".to_string()
}

fn file_has_key(doc: &Value, key_path: &str) -> bool {
    let mut current = doc;
    for part in key_path.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}
