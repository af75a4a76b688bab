#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod spec_files {
    use tempfile::{Builder, TempPath};

    /// Write `content` to a fresh temp file ending in `suffix`, removed on drop
    pub fn write_spec(content: &str, suffix: &str) -> TempPath {
        let file = Builder::new()
            .prefix("mcp-rest-gen-")
            .suffix(suffix)
            .tempfile()
            .unwrap();
        std::fs::write(file.path(), content).unwrap();
        file.into_temp_path()
    }

    pub fn yaml_spec(content: &str) -> TempPath {
        write_spec(content, ".yaml")
    }

    pub fn json_spec(content: &str) -> TempPath {
        write_spec(content, ".json")
    }
}

pub mod fixtures {
    /// One path, `GET` without a body and `POST` with one, no summaries
    pub const BOOKS_YAML: &str = r#"openapi: 3.0.3
info:
  title: Books API
  version: "1.0.0"
servers:
  - url: http://localhost:8080/books
paths:
  /books:
    get:
      operationId: ListBooks
      parameters:
        - name: Filter
          in: query
          required: false
          schema:
            type: string
      responses:
        "200":
          description: OK
    post:
      operationId: AddBook
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Book'
      responses:
        "200":
          description: OK
components:
  schemas:
    Book:
      type: object
      properties:
        title:
          type: string
"#;

    pub const BOOKS_JSON: &str = r##"{
  "openapi": "3.0.3",
  "info": { "title": "Books API", "version": "1.0.0" },
  "paths": {
    "/books": {
      "get": {
        "operationId": "ListBooks",
        "parameters": [
          { "name": "Filter", "in": "query", "required": false, "schema": { "type": "string" } }
        ],
        "responses": { "200": { "description": "OK" } }
      },
      "post": {
        "operationId": "AddBook",
        "requestBody": {
          "required": true,
          "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Book" } }
          }
        },
        "responses": { "200": { "description": "OK" } }
      }
    }
  },
  "components": {
    "schemas": {
      "Book": { "type": "object", "properties": { "title": { "type": "string" } } }
    }
  }
}"##;

    /// Valid document whose operations all lack an operationId
    pub const NO_IDS_YAML: &str = r#"openapi: 3.0.3
info:
  title: Anonymous
  version: "1"
paths:
  /health:
    get:
      responses:
        "200":
          description: OK
"#;

    /// Parses, but references a schema that does not exist
    pub const BROKEN_REF_YAML: &str = r#"openapi: 3.0.3
info:
  title: Broken
  version: "1"
paths:
  /things:
    post:
      operationId: CreateThing
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Thing'
      responses:
        "200":
          description: OK
"#;
}
