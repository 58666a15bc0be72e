// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Haven configuration system.

use haven_config::diagnostic::{suggest_key, ConfigError};
use haven_config::model::HavenConfig;
use haven_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with every section deserializes successfully.
#[test]
fn valid_toml_deserializes_into_haven_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"
admin_token = "admin-secret"
public_base_url = "https://haven.example"

[openai]
api_key = "sk-test"
model = "gpt-4o"
max_tokens = 300
temperature = 0.4

[routing]
history_limit = 6

[persona]
name = "Haven"
default_mood = "calm-centering"
default_qualities = ["gentle"]

[knowledge]
path = "kb.csv"
max_entries = 3

[sheets]
enabled = true
spreadsheet_id = "sheet-1"
access_token = "ya29.abc"

[cost]
tokens_per_reply = 400
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.server.admin_token.as_deref(), Some("admin-secret"));
    assert_eq!(config.server.public_base_url, "https://haven.example");
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.openai.model, "gpt-4o");
    assert_eq!(config.openai.max_tokens, 300);
    assert!((config.openai.temperature - 0.4).abs() < f32::EPSILON);
    assert_eq!(config.routing.history_limit, 6);
    assert_eq!(config.persona.default_mood, "calm-centering");
    assert_eq!(config.persona.default_qualities, vec!["gentle"]);
    assert_eq!(config.knowledge.path.as_deref(), Some("kb.csv"));
    assert_eq!(config.knowledge.max_entries, 3);
    assert!(config.sheets.enabled);
    assert_eq!(config.sheets.spreadsheet_id.as_deref(), Some("sheet-1"));
    assert_eq!(config.sheets.range, "Google_Haven_Data!A:O");
    assert_eq!(config.cost.tokens_per_reply, 400);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.log_level, "info");
    assert!(config.server.admin_token.is_none());
    assert!(config.openai.api_key.is_none());
    assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.openai.max_tokens, 200);
    assert!((config.openai.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.openai.max_retries, 1);
    assert_eq!(config.routing.history_limit, 10);
    assert_eq!(config.persona.name, "Haven");
    assert_eq!(config.persona.default_mood, "balanced-mix");
    assert_eq!(
        config.persona.default_qualities,
        vec!["empathetic", "non-judgmental"]
    );
    assert!(config.knowledge.path.is_none());
    assert!(!config.sheets.enabled);
    assert_eq!(config.cost.tokens_per_reply, 500);
}

/// Dotted overrides reach the right nested key, as the env provider produces them.
#[test]
fn dotted_override_reaches_openai_api_key() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: HavenConfig = Figment::new()
        .merge(Serialized::defaults(HavenConfig::default()))
        .merge(Toml::string("[openai]\napi_key = \"from-toml\"\n"))
        .merge(("openai.api_key", "from-env"))
        .extract()
        .expect("should merge env override");

    assert_eq!(config.openai.api_key.as_deref(), Some("from-env"));
}

/// Missing config files are silently skipped.
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: HavenConfig = Figment::new()
        .merge(Serialized::defaults(HavenConfig::default()))
        .merge(Toml::file("/nonexistent/path/haven.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.persona.name, "Haven");
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[payments]
provider = "stripe"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("payments"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Typo in [server] produces an UnknownKey diagnostic with a suggestion.
#[test]
fn diagnostic_prot_suggests_port() {
    let toml = r#"
[server]
prot = 8080
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "prot"
                && suggestion.as_deref() == Some("port")
                && valid_keys.contains("admin_token")
        })
    });
    assert!(has_unknown_key, "expected UnknownKey for 'prot', got: {errors:?}");
}

/// A distant typo gets no suggestion.
#[test]
fn diagnostic_no_suggestion_for_distant_typo() {
    let valid_keys = &["host", "port", "log_level"];
    assert!(suggest_key("zzzzzz", valid_keys).is_none());
}

/// Invalid type (string where number expected) produces an InvalidType diagnostic.
#[test]
fn diagnostic_invalid_type_for_port() {
    let toml = r#"
[server]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))),
        "expected InvalidType for server.port, got: {errors:?}"
    );
}

/// ConfigError renders through miette with its help text.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "prot".to_string(),
        suggestion: Some("port".to_string()),
        valid_keys: "host, port, log_level".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `port`"), "got: {help}");

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("prot"));
}

/// Validation runs after extraction and collects semantic errors.
#[test]
fn validation_catches_sheets_without_id() {
    let toml = r#"
[sheets]
enabled = true
access_token = "ya29.abc"
"#;

    let errors = load_and_validate_str(toml).expect_err("missing spreadsheet id should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("spreadsheet_id"))
    }));
}

/// Explicit config file paths are loaded and validated.
#[test]
fn load_and_validate_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("haven.toml");
    std::fs::write(&path, "[routing]\nhistory_limit = 4\n").expect("write config");

    let config = load_and_validate_path(&path).expect("file config should validate");
    assert_eq!(config.routing.history_limit, 4);
}

/// Span resolution points into the named file for unknown keys.
#[test]
fn unknown_key_in_file_carries_source_span() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("haven.toml");
    std::fs::write(&path, "[openai]\nmodle = \"gpt-4o\"\n").expect("write config");

    let errors = load_and_validate_path(&path).expect_err("typo should fail");
    let span = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey { key, span, .. } if key == "modle" => Some(*span),
        _ => None,
    });
    assert!(matches!(span, Some(Some(_))), "expected a span, got: {errors:?}");
}
