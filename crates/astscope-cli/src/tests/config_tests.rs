use super::args::CliArgs;
use super::config::{
    CONFIG_FILE_NAME, PathFilter, ProjectConfig, find_config, load_config, parse_config, resolve,
    resolve_with,
};
use astscope_binder::LexicalScopeMode;
use clap::Parser;
use std::path::Path;

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["astscope"];
    argv.extend_from_slice(extra);
    argv.push("input.json");
    CliArgs::try_parse_from(argv).expect("args should parse")
}

#[test]
fn parses_full_config() {
    let config = parse_config(
        r#"{
            "analyzer": { "lexicalScopes": "fold" },
            "include": ["src/**/*.json"],
            "exclude": ["**/vendor/**"]
        }"#,
    )
    .expect("config should parse");

    assert_eq!(config.analyzer.lexical_scopes, LexicalScopeMode::Fold);
    assert_eq!(config.include.as_deref(), Some(&["src/**/*.json".to_string()][..]));
    assert_eq!(config.exclude.as_deref(), Some(&["**/vendor/**".to_string()][..]));
}

#[test]
fn empty_config_uses_defaults() {
    let config = parse_config("{}").expect("config should parse");
    assert_eq!(config.analyzer.lexical_scopes, LexicalScopeMode::Separate);
    assert!(config.include.is_none());
}

#[test]
fn rejects_unknown_keys() {
    assert!(parse_config(r#"{ "analyser": {} }"#).is_err());
    assert!(parse_config(r#"{ "analyzer": { "hoist": false } }"#).is_err());
    assert!(parse_config(r#"{ "analyzer": { "lexicalScopes": "merge" } }"#).is_err());
}

#[test]
fn cli_flags_override_config() {
    let config = ProjectConfig {
        include: Some(vec!["lib/**/*.json".to_string()]),
        exclude: Some(vec!["lib/skip.json".to_string()]),
        ..ProjectConfig::default()
    };

    let resolved = resolve_with(&args(&["--fold-lexical-scopes"]), config.clone())
        .expect("config should resolve");
    assert_eq!(resolved.options.lexical_scopes, LexicalScopeMode::Fold);
    assert!(resolved.filter.is_match(Path::new("lib/a.json")));
    assert!(!resolved.filter.is_match(Path::new("lib/skip.json")));
    assert!(!resolved.filter.is_match(Path::new("src/a.json")));

    let resolved = resolve_with(&args(&["--include", "src/*.json", "--exclude", "none"]), config)
        .expect("config should resolve");
    assert_eq!(resolved.options.lexical_scopes, LexicalScopeMode::Separate);
    assert!(resolved.filter.is_match(Path::new("src/a.json")));
    assert!(resolved.filter.is_match(Path::new("src/skip.json")));
    assert!(!resolved.filter.is_match(Path::new("lib/a.json")));
}

#[test]
fn default_filter_matches_json_anywhere() {
    let resolved = resolve_with(&args(&[]), ProjectConfig::default()).expect("config should resolve");
    assert!(resolved.filter.is_match(Path::new("a.json")));
    assert!(resolved.filter.is_match(Path::new("deep/nested/b.json")));
    assert!(!resolved.filter.is_match(Path::new("c.js")));
}

#[test]
fn invalid_glob_is_an_error() {
    let err = PathFilter::new(&["src/[".to_string()], &[]).unwrap_err();
    assert!(format!("{err:#}").contains("invalid glob pattern: src/["));
}

#[test]
fn finds_and_loads_config_in_working_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(find_config(&args(&[]), dir.path()).is_none());

    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, r#"{ "analyzer": { "lexicalScopes": "fold" } }"#).expect("write config");
    assert_eq!(find_config(&args(&[]), dir.path()), Some(path.clone()));

    let resolved = resolve(&args(&[]), dir.path()).expect("config should resolve");
    assert_eq!(resolved.options.lexical_scopes, LexicalScopeMode::Fold);
    assert!(load_config(&path).is_ok());
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = resolve(&args(&["--config", "nope.json"]), dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read config"));
}
