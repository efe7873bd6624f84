use std::env;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use wayfarer_cli::commands::{config, doctor};

#[test]
fn doctor_passes_with_valid_env() {
    with_env(
        &[("WAYFARER_LLM_API_KEY", "sk-test"), ("WAYFARER_INTERACTION_LOG_ENABLED", "false")],
        || {
            let report = parse_payload(&doctor::run(true));
            assert_eq!(report["overall_status"], "pass");

            let checks = report["checks"].as_array().expect("checks should be an array");
            let config_check = find_check(checks, "config_validation");
            assert_eq!(config_check["status"], "pass");

            let key_check = find_check(checks, "api_key_readiness");
            assert_eq!(key_check["status"], "pass");
            let details = key_check["details"].as_str().unwrap_or("");
            assert_eq!(details, "api key present (7 characters)");
            assert!(!details.contains("sk-test"), "details must not echo the key");

            let log_check = find_check(checks, "interaction_log_writable");
            assert_eq!(log_check["status"], "skipped", "disabled log should be skipped, not failed");
        },
    );
}

#[test]
fn doctor_fails_without_api_key() {
    with_env(&[], || {
        let report = parse_payload(&doctor::run(true));
        assert_eq!(report["overall_status"], "fail");

        let checks = report["checks"].as_array().expect("checks should be an array");
        let config_check = find_check(checks, "config_validation");
        assert_eq!(config_check["status"], "fail");
        let details = config_check["details"].as_str().unwrap_or("");
        assert!(details.contains("llm.api_key"), "failure should name the missing key: {details}");

        let key_check = find_check(checks, "api_key_readiness");
        assert_eq!(key_check["status"], "skipped");
    });
}

#[test]
fn doctor_human_output_lists_each_check() {
    with_env(
        &[("WAYFARER_LLM_API_KEY", "sk-test"), ("WAYFARER_INTERACTION_LOG_ENABLED", "false")],
        || {
            let output = doctor::run(false);
            assert!(output.starts_with("doctor: all readiness checks passed"));
            assert!(output.contains("- [ok] config_validation:"));
            assert!(output.contains("- [ok] api_key_readiness:"));
            assert!(output.contains("- [skip] interaction_log_writable:"));
        },
    );
}

#[test]
fn config_redacts_api_key_and_reports_env_source() {
    with_env(
        &[("WAYFARER_LLM_API_KEY", "sk-very-secret"), ("WAYFARER_LLM_MODEL", "gpt-4o")],
        || {
            let output = config::run();
            assert!(!output.contains("sk-very-secret"), "secret must never be printed");
            assert!(output.contains("llm.api_key = <redacted> [env (WAYFARER_LLM_API_KEY)]"));
            assert!(output.contains("llm.model = gpt-4o [env (WAYFARER_LLM_MODEL)]"));
            assert!(output.contains("llm.base_url = https://api.openai.com/v1 [default]"));
            assert!(output.contains("memory.max_turns = 10 [default]"));
        },
    );
}

#[test]
fn config_reports_validation_failure_without_key() {
    with_env(&[], || {
        let output = config::run();
        assert!(output.starts_with("config validation failed:"));
        assert!(output.contains("llm.api_key"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn find_check<'a>(checks: &'a [Value], name: &str) -> &'a Value {
    checks
        .iter()
        .find(|check| check["name"] == name)
        .unwrap_or_else(|| panic!("missing check `{name}`"))
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "WAYFARER_LLM_API_KEY",
        "WAYFARER_LLM_BASE_URL",
        "WAYFARER_LLM_MODEL",
        "WAYFARER_LLM_TIMEOUT_SECS",
        "WAYFARER_LLM_TEMPERATURE",
        "WAYFARER_MEMORY_MAX_TURNS",
        "WAYFARER_INTERACTION_LOG_ENABLED",
        "WAYFARER_INTERACTION_LOG_PATH",
        "WAYFARER_LOGGING_LEVEL",
        "WAYFARER_LOGGING_FORMAT",
        "WAYFARER_LOG_LEVEL",
        "WAYFARER_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
