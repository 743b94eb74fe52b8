// twembed-core/tests/config_integration_tests.rs
//! Loading, validating and merging YAML whitelist configurations.

use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test;
use twembed_core::{merge_rules, EmbedConfig, EmbedEngine, RawAttributes};

fn write_config(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

#[test]
fn user_rules_override_defaults_by_name() -> Result<()> {
    let file = write_config(
        r#"
settings:
  default_height: "320"
rules:
  - name: theme
    pattern: "dark"
    case_insensitive: true
  - name: maxwidth
    pattern: "[0-9]{1,4}"
"#,
    )?;
    let user = EmbedConfig::load_from_file(file.path())?;
    let config = merge_rules(EmbedConfig::default(), Some(user));
    let engine = EmbedEngine::new(config)?;

    let raw: RawAttributes = [("theme", "light"), ("maxwidth", "640")].into_iter().collect();
    let attrs = engine.sanitizer().sanitize(&raw);

    assert!(!attrs.contains_key("data-theme"));
    assert_eq!(attrs.get("data-maxwidth"), Some("640"));
    assert_eq!(attrs.get("data-height"), Some("320"));
    Ok(())
}

#[test]
fn custom_prefix_and_base_url_flow_through_the_engine() -> Result<()> {
    let file = write_config(
        r#"
settings:
  base_url: "https://x.com/"
  attribute_prefix: "data-tw-"
"#,
    )?;
    let config = merge_rules(EmbedConfig::default(), Some(EmbedConfig::load_from_file(file.path())?));
    let engine = EmbedEngine::new(config)?;

    let raw: RawAttributes = [("screen-name", "alice"), ("width", "200")].into_iter().collect();
    let outcome = engine.prepare(&raw);
    let plan = outcome.plan().expect("screen-name classifies");

    assert_eq!(plan.url, "https://x.com/alice");
    assert_eq!(plan.attributes.get("data-tw-width"), Some("200"));
    assert_eq!(plan.attributes.get("data-tw-height"), Some("500"));
    Ok(())
}

#[test]
fn invalid_patterns_are_reported_on_load() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: broken
    pattern: "(unclosed"
  - name: broken
    pattern: "ok"
"#,
    )?;
    let err = EmbedConfig::load_from_file(file.path()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("broken"), "{message}");
    assert!(message.contains("Duplicate rule name found"), "{message}");
    Ok(())
}

#[test]
fn malformed_yaml_is_a_parse_error() -> Result<()> {
    let file = write_config("rules: [this is: not valid")?;
    let err = EmbedConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn missing_file_is_a_read_error() {
    let err = EmbedConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn case_insensitive_free_form_rule_loads_and_accepts_values() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: related
    pattern: ".*"
    case_insensitive: true
  - name: title
    pattern: "[^<>]{1,40}"
    case_insensitive: true
"#,
    )?;
    let config = merge_rules(EmbedConfig::default(), Some(EmbedConfig::load_from_file(file.path())?));
    let engine = EmbedEngine::new(config)?;

    let raw: RawAttributes = [("related", "Alice,Bob"), ("title", "Caf\u{e9} News"), ("theme", "dar\u{212A}")]
        .into_iter()
        .collect();
    let attrs = engine.sanitizer().sanitize(&raw);

    assert_eq!(attrs.get("data-related"), Some("Alice,Bob"));
    assert_eq!(attrs.get("data-title"), Some("Caf\u{e9} News"));
    // Built-in rules still fold ASCII letters only.
    assert!(!attrs.contains_key("data-theme"));
    Ok(())
}

#[test]
fn script_base_url_is_rejected_on_load() -> Result<()> {
    let file = write_config(
        r#"
settings:
  base_url: "javascript:alert(1)//"
"#,
    )?;
    let err = EmbedConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("must start with http:// or https://"));
    Ok(())
}
