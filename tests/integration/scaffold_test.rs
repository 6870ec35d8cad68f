//! A freshly scaffolded tree resolves end to end.

use super::Tree;
use restree::config::RestreeConfig;
use restree::scaffold;
use restree::{resolve, ResolveOptions, Variables};

#[cfg(unix)]
#[test]
fn test_scaffolded_tree_resolves() {
    let tree = Tree::new();
    scaffold::init(tree.root(), &RestreeConfig::default()).unwrap();

    let request = resolve(
        tree.root(),
        &tree.root().join("hello.http"),
        &Variables::new(),
        ResolveOptions { expand_body: false },
    )
    .unwrap();

    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "http://localhost/hello");
    assert_eq!(request.headers["Accept"], "*/*");
    assert_eq!(request.headers["Connection"], "keep-alive");
    assert_eq!(request.headers["Content-Type"], "application/json");
    assert!(request.body.contains("\"message\": \"Hello world!\""));
}

#[test]
fn test_scaffold_twice_fails() {
    let tree = Tree::new();
    let written = scaffold::init(tree.root(), &RestreeConfig::default()).unwrap();
    assert_eq!(written.len(), 4);

    let err = scaffold::init(tree.root(), &RestreeConfig::default()).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}
