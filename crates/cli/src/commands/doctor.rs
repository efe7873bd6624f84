use std::fs::OpenOptions;

use secrecy::ExposeSecret;
use serde::Serialize;
use wayfarer_core::config::{AppConfig, LoadOptions, PLACEHOLDER_API_KEY};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_api_key(&config));
            checks.push(check_interaction_log(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "api_key_readiness",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "interaction_log_writable",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    // Skipped checks do not fail the report; a disabled interaction log is
    // a valid setup.
    let any_fail = checks.iter().any(|check| check.status == CheckStatus::Fail);
    let overall_status = if any_fail { CheckStatus::Fail } else { CheckStatus::Pass };
    let summary = if any_fail {
        "doctor: one or more readiness checks failed".to_string()
    } else {
        "doctor: all readiness checks passed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_api_key(config: &AppConfig) -> DoctorCheck {
    let key = config
        .llm
        .api_key
        .as_ref()
        .map(|key| key.expose_secret().trim().to_string())
        .unwrap_or_default();

    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        return DoctorCheck {
            name: "api_key_readiness",
            status: CheckStatus::Fail,
            details: "llm.api_key is missing or still the placeholder".to_string(),
        };
    }

    DoctorCheck {
        name: "api_key_readiness",
        status: CheckStatus::Pass,
        details: format!("api key present ({} characters)", key.chars().count()),
    }
}

fn check_interaction_log(config: &AppConfig) -> DoctorCheck {
    if !config.interaction_log.enabled {
        return DoctorCheck {
            name: "interaction_log_writable",
            status: CheckStatus::Skipped,
            details: "interaction log is disabled".to_string(),
        };
    }

    let path = &config.interaction_log.path;
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(_) => DoctorCheck {
            name: "interaction_log_writable",
            status: CheckStatus::Pass,
            details: format!("`{}` is writable", path.display()),
        },
        Err(error) => DoctorCheck {
            name: "interaction_log_writable",
            status: CheckStatus::Fail,
            details: format!("could not open `{}` for append: {error}", path.display()),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
