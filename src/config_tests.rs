use super::{load_config, validate_config, StarterConfig, Tool, CONFIG_SCHEMA_VERSION};
use crate::paths::ProjectPaths;

fn project_with_config(contents: Option<&str>) -> (tempfile::TempDir, ProjectPaths) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let paths = ProjectPaths::new(dir.path().to_path_buf());
    if let Some(contents) = contents {
        std::fs::write(paths.starter_config(), contents).expect("write config");
    }
    (dir, paths)
}

#[test]
fn missing_config_uses_defaults() {
    let (_dir, paths) = project_with_config(None);
    let config = load_config(&paths).expect("load config");

    assert_eq!(config, StarterConfig::default());
    assert_eq!(config.command(Tool::Php).expect("php"), vec!["php"]);
}

#[test]
fn partial_config_fills_defaults() {
    let (_dir, paths) = project_with_config(Some(
        r#"{"schema_version": 1, "php": "docker compose exec app php"}"#,
    ));
    let config = load_config(&paths).expect("load config");

    assert_eq!(
        config.command(Tool::Php).expect("php"),
        vec!["docker", "compose", "exec", "app", "php"]
    );
    assert_eq!(config.command(Tool::Composer).expect("composer"), vec!["composer"]);
}

#[test]
fn quoted_words_are_kept_together() {
    let config = StarterConfig {
        npm: r#"'/opt/node tools/npm' --prefix web"#.to_string(),
        ..StarterConfig::default()
    };

    assert_eq!(
        config.command(Tool::Npm).expect("npm"),
        vec!["/opt/node tools/npm", "--prefix", "web"]
    );
}

#[test]
fn rejects_unknown_schema_version() {
    let config = StarterConfig {
        schema_version: CONFIG_SCHEMA_VERSION + 1,
        ..StarterConfig::default()
    };

    let err = validate_config(&config).expect_err("schema mismatch");
    assert!(err.to_string().contains("schema_version"));
}

#[test]
fn rejects_empty_command() {
    let (_dir, paths) = project_with_config(Some(r#"{"schema_version": 1, "composer": "  "}"#));

    let err = load_config(&paths).expect_err("empty composer");
    assert!(err.to_string().contains("composer command is empty"));
}

#[test]
fn rejects_unknown_keys() {
    let (_dir, paths) = project_with_config(Some(r#"{"schema_version": 1, "yarn": "yarn"}"#));

    assert!(load_config(&paths).is_err());
}
