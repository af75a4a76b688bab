#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fixtures::{BOOKS_JSON, BOOKS_YAML, BROKEN_REF_YAML, NO_IDS_YAML};
use common::spec_files::{json_spec, yaml_spec};
use http::Method;
use mcp_rest_gen::generator::load_operations;
use mcp_rest_gen::{DuplicatePolicy, GenError};

#[test]
fn test_load_books_from_yaml_file() {
    let path = yaml_spec(BOOKS_YAML);
    let table = load_operations(path.to_str().unwrap(), DuplicatePolicy::Reject).unwrap();

    assert_eq!(table.len(), 2);
    let list = table.get("ListBooks").unwrap();
    assert_eq!(list.method, Method::GET);
    assert_eq!(list.description, "GET /books");
    assert_eq!(list.parameter_type_name, "ListBooksParams");
    let add = table.get("AddBook").unwrap();
    assert_eq!(add.description, "POST /books");
    assert_eq!(add.parameter_type_name, "AddBookJSONRequestBody");
}

#[test]
fn test_format_is_detected_by_content() {
    // JSON content in a file with a .yaml extension still parses as JSON
    let json_as_yaml = yaml_spec(BOOKS_JSON);
    let json = json_spec(BOOKS_JSON);
    let from_misnamed = load_operations(json_as_yaml.to_str().unwrap(), DuplicatePolicy::Reject).unwrap();
    let from_json = load_operations(json.to_str().unwrap(), DuplicatePolicy::Reject).unwrap();

    assert_eq!(from_misnamed.sorted(), from_json.sorted());
    assert_eq!(from_json.len(), 2);
}

#[test]
fn test_document_without_ids_is_rejected() {
    let path = yaml_spec(NO_IDS_YAML);
    let err = load_operations(path.to_str().unwrap(), DuplicatePolicy::Reject).unwrap_err();
    assert!(matches!(err, GenError::NoOperations));
}

#[test]
fn test_broken_reference_is_rejected() {
    let path = yaml_spec(BROKEN_REF_YAML);
    let err = load_operations(path.to_str().unwrap(), DuplicatePolicy::Reject).unwrap_err();

    match err {
        GenError::Invalid { issues } => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].kind, "UnresolvedRef");
            assert!(issues[0].message.contains("#/components/schemas/Thing"));
        }
        other => panic!("expected Invalid, got {other}"),
    }
}

#[test]
fn test_swagger_document_is_rejected() {
    let path = yaml_spec("swagger: \"2.0\"\ninfo:\n  title: Old\n  version: \"1\"\npaths: {}\n");
    let err = load_operations(path.to_str().unwrap(), DuplicatePolicy::Reject).unwrap_err();
    assert!(err.to_string().contains("Swagger 2.0"), "{err}");
}

#[test]
fn test_missing_file_is_a_load_error() {
    let err = load_operations("/nonexistent/openapi.yaml", DuplicatePolicy::Reject).unwrap_err();
    assert!(matches!(err, GenError::Load { .. }));
}

#[test]
fn test_openapi_30_exclusive_bounds_extract() {
    let path = yaml_spec(
        r#"openapi: 3.0.3
info:
  title: Inventory
  version: "1.0"
paths:
  /items:
    get:
      operationId: ListItems
      parameters:
        - name: minPrice
          in: query
          schema:
            type: number
            minimum: 0
            exclusiveMinimum: true
      responses:
        "200":
          description: OK
"#,
    );
    let table = load_operations(path.to_str().unwrap(), DuplicatePolicy::Reject).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.get("ListItems").unwrap().parameter_type_name, "ListItemsParams");
}
