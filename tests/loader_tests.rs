#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fixtures::BOOKS_YAML;
use mcp_rest_gen::generator::load_operations;
use mcp_rest_gen::{load_description, DuplicatePolicy, GenError};
use std::thread;
use tiny_http::{Response, Server};

/// Serve `BOOKS_YAML` at `/openapi.yaml` and 404 elsewhere for `requests` requests
fn spawn_spec_server(requests: usize) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        for _ in 0..requests {
            let request = server.recv().unwrap();
            let response = if request.url() == "/openapi.yaml" {
                Response::from_string(BOOKS_YAML).with_status_code(200)
            } else {
                Response::from_string("not found").with_status_code(404)
            };
            request.respond(response).unwrap();
        }
    });
    (format!("http://{addr}"), handle)
}

#[test]
fn test_load_description_over_http() {
    let (base, handle) = spawn_spec_server(1);
    let bytes = load_description(&format!("{base}/openapi.yaml")).unwrap();
    handle.join().unwrap();
    assert_eq!(bytes, BOOKS_YAML.as_bytes());
}

#[test]
fn test_remote_operations_match_local() {
    let (base, handle) = spawn_spec_server(1);
    let table = load_operations(&format!("{base}/openapi.yaml"), DuplicatePolicy::Reject).unwrap();
    handle.join().unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.get("ListBooks").is_some());
}

#[test]
fn test_non_success_status_is_a_load_error() {
    let (base, handle) = spawn_spec_server(1);
    let location = format!("{base}/missing.yaml");
    let err = load_description(&location).unwrap_err();
    handle.join().unwrap();

    match err {
        GenError::Load { location: loc, reason } => {
            assert_eq!(loc, location);
            assert!(reason.contains("404"), "{reason}");
        }
        other => panic!("expected Load, got {other}"),
    }
}
