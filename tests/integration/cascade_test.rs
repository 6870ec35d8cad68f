//! Cascade resolution over real directory trees (no scripts involved).

use super::Tree;
use restree::parser::parse_request;
use restree::{resolve, HttpRequest, ResolveError, ResolveOptions, Variables};

fn vars(pairs: &[(&str, &str)]) -> Variables {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

const NO_BODY: ResolveOptions = ResolveOptions { expand_body: false };

#[test]
fn test_nearer_headers_override_farther() {
    let tree = Tree::new();
    tree.file("A/_headers.http", "X: 1\n");
    tree.file("A/B/_headers.http", "X: 2\nY: 3\n");
    let target = tree.file("A/B/req.http", "GET https://api.example.com\n\nY: 4\n");

    let request = resolve(tree.root(), &target, &Variables::new(), NO_BODY).unwrap();

    assert_eq!(request.headers.len(), 2);
    assert_eq!(request.headers["X"], "2");
    assert_eq!(request.headers["Y"], "4");
}

#[test]
fn test_root_headers_apply_to_every_request() {
    let tree = Tree::new();
    tree.file("_headers.http", "Accept: */*\nUser-Agent: restree");
    let shallow = tree.file("ping.http", "GET https://api.example.com/ping");
    let deep = tree.file("v1/users/list.http", "GET https://api.example.com/v1/users");

    for target in [shallow, deep] {
        let request = resolve(tree.root(), &target, &Variables::new(), NO_BODY).unwrap();
        assert_eq!(request.headers["Accept"], "*/*");
        assert_eq!(request.headers["User-Agent"], "restree");
    }
}

#[test]
fn test_headers_file_expanded_with_initial_variables() {
    let tree = Tree::new();
    tree.file("_headers.http", "Authorization: Bearer {{token}}\n");
    let target = tree.file("svc/get.http", "GET {{host}}/items\n");

    let request = resolve(
        tree.root(),
        &target,
        &vars(&[("token", "t0k3n"), ("host", "http://localhost:8080")]),
        NO_BODY,
    )
    .unwrap();

    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "http://localhost:8080/items");
    assert_eq!(request.headers["Authorization"], "Bearer t0k3n");
}

#[test]
fn test_body_expansion_is_opt_in() {
    let tree = Tree::new();
    let target = tree.file(
        "create.http",
        "POST https://api.example.com/users\n\nContent-Type: application/json\n\n{\"name\": \"{{name}}\"}",
    );
    let initial = vars(&[("name", "Ada")]);

    let verbatim = resolve(tree.root(), &target, &initial, NO_BODY).unwrap();
    assert_eq!(verbatim.body, "{\"name\": \"{{name}}\"}");

    let expanded = resolve(
        tree.root(),
        &target,
        &initial,
        ResolveOptions { expand_body: true },
    )
    .unwrap();
    assert_eq!(expanded.body, "{\"name\": \"Ada\"}");
}

#[test]
fn test_missing_variable_names_file_and_variable() {
    let tree = Tree::new();
    tree.file("_headers.http", "Authorization: Bearer {{token}}\n");
    let target = tree.file("get.http", "GET https://api.example.com\n");

    let err = resolve(tree.root(), &target, &Variables::new(), NO_BODY).unwrap_err();

    assert!(matches!(err, ResolveError::Expansion { .. }));
    assert!(err.path().ends_with("_headers.http"));
    assert!(err.to_string().contains("token"));
}

#[test]
fn test_target_outside_root_is_rejected() {
    let tree = Tree::new();
    let inside = tree.file("inner/req.http", "GET https://api.example.com\n");
    let other = Tree::new();
    let outside = other.file("req.http", "GET https://api.example.com\n");

    let err = resolve(&tree.root().join("inner/deeper"), &inside, &Variables::new(), NO_BODY)
        .unwrap_err();
    assert!(matches!(err, ResolveError::NotUnderRoot { .. }));

    let err = resolve(tree.root(), &outside, &Variables::new(), NO_BODY).unwrap_err();
    assert!(matches!(err, ResolveError::NotUnderRoot { .. }));
}

#[test]
fn test_malformed_request_file() {
    let tree = Tree::new();
    let target = tree.file("bad.http", "GET https://api.example.com\nAccept: */*\n");

    let err = resolve(tree.root(), &target, &Variables::new(), NO_BODY).unwrap_err();

    assert!(matches!(err, ResolveError::Parse { .. }));
    assert!(err.path().ends_with("bad.http"));
}

#[test]
fn test_directory_named_like_headers_file_is_ignored() {
    let tree = Tree::new();
    tree.file("_headers.http/nested.txt", "not a headers file");
    let target = tree.file("get.http", "GET https://api.example.com\n");

    let request = resolve(tree.root(), &target, &Variables::new(), NO_BODY).unwrap();

    assert!(request.headers.is_empty());
}

#[test]
fn test_resolved_request_renders_back_to_parseable_text() {
    let tree = Tree::new();
    tree.file("_headers.http", "Accept: application/json\nCache-Control: no-cache\n");
    let target = tree.file(
        "orders/create.http",
        "PUT {{host}}/orders/1\n\nContent-Type: application/json\n\n{\n  \"qty\": 2\n}",
    );

    let request = resolve(
        tree.root(),
        &target,
        &vars(&[("host", "https://shop.example.com")]),
        NO_BODY,
    )
    .unwrap();
    let reparsed: HttpRequest = parse_request(&request.to_string()).unwrap();

    assert_eq!(reparsed, request);
    assert_eq!(
        request.to_string(),
        "PUT https://shop.example.com/orders/1\n\n\
         Accept: application/json\n\
         Cache-Control: no-cache\n\
         Content-Type: application/json\n\
         \n{\n  \"qty\": 2\n}\n"
    );
}
