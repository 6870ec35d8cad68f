//! Cascades with real before-scripts run through `/bin/sh`.
#![cfg(unix)]

use super::Tree;
use restree::config::RestreeConfig;
use restree::script::ScriptError;
use restree::{resolve, ResolveError, ResolveOptions, Resolver, Variables};
use std::fs;

const NO_BODY: ResolveOptions = ResolveOptions { expand_body: false };

#[test]
fn test_script_output_feeds_headers_and_request() {
    let tree = Tree::new();
    tree.file("_before.sh", "echo host=https://api.example.com\necho token=root\n");
    tree.file("_headers.http", "Authorization: Bearer {{token}}\n");
    tree.file("admin/_before.sh", "echo token=admin\n");
    let target = tree.file("admin/users.http", "GET {{host}}/admin/users\n\nX-Token: {{token}}\n");

    let request = resolve(tree.root(), &target, &Variables::new(), NO_BODY).unwrap();

    assert_eq!(request.url, "https://api.example.com/admin/users");
    assert_eq!(request.headers["Authorization"], "Bearer root");
    assert_eq!(request.headers["X-Token"], "admin");
}

#[test]
fn test_script_variables_do_not_leak_to_siblings() {
    let tree = Tree::new();
    tree.file("authed/_before.sh", "echo TOKEN=secret\n");
    let authed = tree.file("authed/get.http", "GET https://api.example.com/{{TOKEN}}\n");
    let public = tree.file("public/get.http", "GET https://api.example.com/{{TOKEN}}\n");

    let request = resolve(tree.root(), &authed, &Variables::new(), NO_BODY).unwrap();
    assert_eq!(request.url, "https://api.example.com/secret");

    let err = resolve(tree.root(), &public, &Variables::new(), NO_BODY).unwrap_err();
    assert!(matches!(err, ResolveError::Expansion { .. }));
    assert!(std::env::var("TOKEN").map_or(true, |v| v != "secret"));
}

#[test]
fn test_script_runs_in_its_own_directory() {
    let tree = Tree::new();
    tree.file("svc/.env", "host=http://localhost:9000\n");
    tree.file("svc/_before.sh", "#!/bin/sh\n\ncat .env\n");
    let target = tree.file("svc/health.http", "GET {{host}}/health\n");

    let request = resolve(tree.root(), &target, &Variables::new(), NO_BODY).unwrap();

    assert_eq!(request.url, "http://localhost:9000/health");
}

#[test]
fn test_script_sees_exported_variables_only_through_stdout() {
    let tree = Tree::new();
    tree.file("_before.sh", "echo STAGE=dev\necho 'not a pair'\necho URL=https://x.example.com/?a=b\n");
    let target = tree.file("get.http", "GET {{URL}}\n\nX-Stage: {{STAGE}}\n");

    let request = resolve(tree.root(), &target, &Variables::new(), NO_BODY).unwrap();

    assert_eq!(request.url, "https://x.example.com/?a=b");
    assert_eq!(request.headers["X-Stage"], "dev");
}

#[test]
fn test_failing_script_aborts_with_stderr() {
    let tree = Tree::new();
    tree.file("_before.sh", "echo token=abc\necho 'vault sealed' >&2\nexit 2\n");
    let target = tree.file("get.http", "GET https://api.example.com\n");

    let err = resolve(tree.root(), &target, &Variables::new(), NO_BODY).unwrap_err();

    match &err {
        ResolveError::Script { source, .. } => {
            assert!(matches!(source, ScriptError::Exit { status: Some(2), .. }));
            assert_eq!(source.stderr(), Some("vault sealed\n"));
        }
        other => panic!("Expected Script error, got {:?}", other),
    }
    assert!(err.to_string().contains("_before.sh"));
}

#[test]
fn test_deeper_script_failure_stops_before_leaf() {
    let tree = Tree::new();
    tree.file("_before.sh", "echo ok=1\n");
    tree.file("a/_before.sh", "exit 1\n");
    let target = tree.file("a/get.http", "GET https://api.example.com\n");

    let err = resolve(tree.root(), &target, &Variables::new(), NO_BODY).unwrap_err();

    assert!(err.path().ends_with("a/_before.sh"));
}

#[test]
fn test_timeout_from_config() {
    let tree = Tree::new();
    tree.file("_before.sh", "sleep 5\n");
    let target = tree.file("get.http", "GET https://api.example.com\n");
    let config = RestreeConfig {
        script_timeout_secs: 1,
        ..Default::default()
    };

    let err = Resolver::new(config)
        .resolve(tree.root(), &target, &Variables::new(), NO_BODY)
        .unwrap_err();

    match err {
        ResolveError::Script { source, .. } => {
            assert!(matches!(source, ScriptError::Timeout { .. }));
        }
        other => panic!("Expected Script error, got {:?}", other),
    }
}

#[test]
fn test_custom_script_name() {
    let tree = Tree::new();
    tree.file("init.sh", "echo who=custom\n");
    tree.file("_before.sh", "echo who=default\n");
    let target = tree.file("get.http", "GET https://api.example.com/{{who}}\n");
    let config = RestreeConfig {
        before_script_file_name: "init.sh".to_string(),
        ..Default::default()
    };

    let request = Resolver::new(config)
        .resolve(tree.root(), &target, &Variables::new(), NO_BODY)
        .unwrap();

    assert_eq!(request.url, "https://api.example.com/custom");
    assert!(fs::metadata(tree.root().join("_before.sh")).is_ok());
}
