use blockdeck_core::config::{AppConfig, LoadOptions};
use blockdeck_core::{building_block_deck, Catalog, CategoryId, IconResolver};
use serde::Serialize;

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
    generated_at: String,
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
            checks.push(check_model_credentials(&config));
            checks.push(check_output_directory(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "model_credentials",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "output_directory",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }
    checks.push(check_render_roundtrip());

    let any_fail = checks.iter().any(|check| check.status == CheckStatus::Fail);
    let overall_status = if any_fail { CheckStatus::Fail } else { CheckStatus::Pass };
    let summary = if any_fail {
        "doctor: one or more readiness checks failed".to_string()
    } else {
        "doctor: all readiness checks passed".to_string()
    };

    DoctorReport {
        overall_status,
        generated_at: chrono::Utc::now().to_rfc3339(),
        summary,
        checks,
    }
}

fn check_model_credentials(config: &AppConfig) -> DoctorCheck {
    match &config.llm.api_key {
        Some(_) => DoctorCheck {
            name: "model_credentials",
            status: CheckStatus::Pass,
            details: format!(
                "api key configured for `{}` ({})",
                config.llm.model, config.llm.base_url
            ),
        },
        None => DoctorCheck {
            name: "model_credentials",
            status: CheckStatus::Skipped,
            details: "no API key configured; generation uses the keyword pipeline".to_string(),
        },
    }
}

fn check_output_directory(config: &AppConfig) -> DoctorCheck {
    let directory = &config.output.directory;
    let probe = directory.join(".blockdeck-doctor-probe");
    let result = std::fs::create_dir_all(directory)
        .and_then(|()| std::fs::write(&probe, b"probe"))
        .and_then(|()| std::fs::remove_file(&probe));
    match result {
        Ok(()) => DoctorCheck {
            name: "output_directory",
            status: CheckStatus::Pass,
            details: format!("`{}` is writable", directory.display()),
        },
        Err(error) => DoctorCheck {
            name: "output_directory",
            status: CheckStatus::Fail,
            details: format!("`{}` is not writable: {error}", directory.display()),
        },
    }
}

/// Writes a one-block deck to a scratch path and reads it back, so a broken
/// emitter shows up here instead of in the first customer run.
fn check_render_roundtrip() -> DoctorCheck {
    let path = std::env::temp_dir().join(format!(
        "blockdeck-doctor-{}.pptx",
        std::process::id()
    ));
    let deck =
        building_block_deck(&Catalog::builtin(), &[CategoryId::Infrastructure], "doctor probe");

    let result = blockdeck_pptx::write_deck(&deck, &IconResolver::new(None), &path)
        .map_err(|error| error.to_string())
        .and_then(|()| {
            blockdeck_pptx::inspect(&path).map_err(|error| error.to_string())
        });
    let _ = std::fs::remove_file(&path);

    match result {
        Ok(summary) if summary.slide_count == deck.slide_count()
            && summary.shape_counts == deck.shape_counts() =>
        {
            DoctorCheck {
                name: "render_roundtrip",
                status: CheckStatus::Pass,
                details: format!(
                    "wrote and re-read a {}-slide deck",
                    summary.slide_count
                ),
            }
        }
        Ok(summary) => DoctorCheck {
            name: "render_roundtrip",
            status: CheckStatus::Fail,
            details: format!(
                "package counts diverged: expected {:?}, read {:?}",
                deck.shape_counts(),
                summary.shape_counts
            ),
        },
        Err(error) => DoctorCheck {
            name: "render_roundtrip",
            status: CheckStatus::Fail,
            details: error,
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
