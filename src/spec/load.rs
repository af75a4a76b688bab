use oas3::OpenApiV3Spec;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::GenError;
use crate::validator::validate_document;

/// Serialization detected for an API description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    Json,
    Yaml,
}

impl DescriptionFormat {
    /// Sniff the format from the first non-whitespace byte: `{` or `[` means
    /// JSON, anything else is treated as YAML.
    pub fn detect(bytes: &[u8]) -> Self {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') | Some(b'[') => DescriptionFormat::Json,
            _ => DescriptionFormat::Yaml,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            DescriptionFormat::Json => "json",
            DescriptionFormat::Yaml => "yaml",
        }
    }
}

/// Returns true when `location` is an `http` or `https` URL.
pub fn is_remote(location: &str) -> bool {
    url::Url::parse(location)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Fetch the raw bytes of an API description.
///
/// `http(s)` URLs are fetched with a blocking GET and must answer with a
/// success status; everything else is read as a local file path.
pub fn load_description(location: &str) -> Result<Vec<u8>, GenError> {
    let load_err = |reason: String| GenError::Load {
        location: location.to_string(),
        reason,
    };

    if is_remote(location) {
        debug!(url = location, "fetching API description");
        let resp = reqwest::blocking::get(location).map_err(|e| load_err(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(load_err(format!("server answered {status}")));
        }
        let body = resp.bytes().map_err(|e| load_err(e.to_string()))?;
        info!(url = location, bytes = body.len(), "fetched API description");
        Ok(body.to_vec())
    } else {
        debug!(path = location, "reading API description");
        std::fs::read(location).map_err(|e| load_err(e.to_string()))
    }
}

/// Drop path-item keys that are neither HTTP methods nor fields OpenAPI
/// defines for path items, so stray keys do not fail typed deserialization.
fn strip_unknown_path_keys(doc: &mut Value) {
    const METHODS: [&str; 8] = ["get", "post", "put", "delete", "patch", "options", "head", "trace"];

    let Some(Value::Object(paths)) = doc.get_mut("paths") else {
        return;
    };
    for item in paths.values_mut() {
        if let Value::Object(obj) = item {
            obj.retain(|k, _| {
                let lk = k.to_ascii_lowercase();
                match lk.as_str() {
                    "summary" | "description" | "servers" | "parameters" | "$ref" => true,
                    m if METHODS.contains(&m) => true,
                    _ => k.starts_with("x-"),
                }
            });
        }
    }
}

/// Keys whose values are instance data rather than schemas
const LITERAL_KEYS: [&str; 5] = ["example", "examples", "default", "enum", "const"];

/// Rewrite OpenAPI 3.0 boolean `exclusiveMinimum`/`exclusiveMaximum` into the
/// numeric 3.1 form the typed model expects.
///
/// `exclusiveMinimum: true` next to `minimum: n` becomes `exclusiveMinimum: n`;
/// a `false` flag, or a `true` one without a bound, is dropped.
fn normalize_exclusive_bounds(node: &mut Value) {
    match node {
        Value::Object(obj) => {
            for (flag, bound) in [("exclusiveMinimum", "minimum"), ("exclusiveMaximum", "maximum")] {
                let Some(Value::Bool(exclusive)) = obj.get(flag) else {
                    continue;
                };
                let exclusive = *exclusive;
                obj.remove(flag);
                if exclusive {
                    if let Some(limit) = obj.remove(bound) {
                        obj.insert(flag.to_string(), limit);
                    }
                }
            }
            for (key, child) in obj.iter_mut() {
                if !LITERAL_KEYS.contains(&key.as_str()) {
                    normalize_exclusive_bounds(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_exclusive_bounds),
        _ => {}
    }
}

/// Parse raw bytes into a validated OpenAPI 3 document.
///
/// The serialization (YAML or JSON) is auto-detected. Structural validation
/// runs on the untyped tree first and reports every issue it finds.
pub fn parse_description(bytes: &[u8]) -> Result<OpenApiV3Spec, GenError> {
    let format = DescriptionFormat::detect(bytes);
    let mut doc: Value = match format {
        DescriptionFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        DescriptionFormat::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
    }
    .map_err(|reason| GenError::Parse {
        format: format.as_str(),
        reason,
    })?;

    validate_document(&doc)?;
    strip_unknown_path_keys(&mut doc);
    if doc["openapi"].as_str().is_some_and(|v| v.starts_with("3.0")) {
        normalize_exclusive_bounds(&mut doc);
    }

    let spec: OpenApiV3Spec = serde_json::from_value(doc).map_err(|e| GenError::Parse {
        format: "openapi",
        reason: e.to_string(),
    })?;
    debug!(title = %spec.info.title, format = format.as_str(), "parsed API description");
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"openapi: 3.0.3
info:
  title: Books
  version: "1.0"
paths:
  /books:
    get:
      operationId: ListBooks
      responses:
        "200":
          description: OK
"#;

    #[test]
    fn test_detect_format() {
        assert_eq!(DescriptionFormat::detect(b"  \n{\"a\":1}"), DescriptionFormat::Json);
        assert_eq!(DescriptionFormat::detect(b"\xEF\xBB\xBF{}"), DescriptionFormat::Json);
        assert_eq!(DescriptionFormat::detect(b"openapi: 3.0.0"), DescriptionFormat::Yaml);
        assert_eq!(DescriptionFormat::detect(b""), DescriptionFormat::Yaml);
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("http://localhost:8080/openapi.yaml"));
        assert!(is_remote("https://api.example.com/spec.json"));
        assert!(!is_remote("specs/openapi.yaml"));
        assert!(!is_remote("/tmp/openapi.yaml"));
        assert!(!is_remote("file:///tmp/openapi.yaml"));
    }

    #[test]
    fn test_parse_yaml() {
        let spec = parse_description(YAML.as_bytes()).unwrap();
        assert_eq!(spec.info.title, "Books");
        assert!(spec.paths.unwrap().contains_key("/books"));
    }

    #[test]
    fn test_yaml_syntax_error() {
        let err = parse_description(b"openapi: [unterminated").unwrap_err();
        assert!(matches!(err, GenError::Parse { format: "yaml", .. }));
    }

    #[test]
    fn test_json_syntax_error() {
        let err = parse_description(b"{ \"openapi\": ").unwrap_err();
        assert!(matches!(err, GenError::Parse { format: "json", .. }));
    }

    #[test]
    fn test_structurally_invalid_document_fails() {
        let err = parse_description(b"openapi: 3.0.0\ninfo:\n  title: X\n").unwrap_err();
        match err {
            GenError::Invalid { issues } => {
                assert!(issues.iter().any(|i| i.kind == "MissingApiVersion"));
                assert!(issues.iter().any(|i| i.kind == "MissingPaths"));
            }
            other => panic!("expected Invalid, got {other}"),
        }
    }

    #[test]
    fn test_unknown_path_keys_are_dropped() {
        let mut doc = serde_json::json!({
            "paths": {
                "/a": { "get": {}, "x-internal": true, "bogus": 1, "parameters": [] }
            }
        });
        strip_unknown_path_keys(&mut doc);
    if doc["openapi"].as_str().is_some_and(|v| v.starts_with("3.0")) {
        normalize_exclusive_bounds(&mut doc);
    }
        let item = doc["paths"]["/a"].as_object().unwrap();
        assert!(item.contains_key("get"));
        assert!(item.contains_key("x-internal"));
        assert!(item.contains_key("parameters"));
        assert!(!item.contains_key("bogus"));
    }

    #[test]
    fn test_exclusive_bounds_rewritten() {
        let mut doc = serde_json::json!({
            "a": { "minimum": 0, "exclusiveMinimum": true, "maximum": 10, "exclusiveMaximum": false },
            "b": [{ "exclusiveMaximum": true }],
            "example": { "exclusiveMinimum": true }
        });
        normalize_exclusive_bounds(&mut doc);
        assert_eq!(doc["a"], serde_json::json!({ "exclusiveMinimum": 0, "maximum": 10 }));
        assert_eq!(doc["b"][0], serde_json::json!({}));
        assert_eq!(doc["example"]["exclusiveMinimum"], true);
    }

    #[test]
    fn test_parse_openapi_30_exclusive_flags() {
        let yaml = r#"openapi: 3.0.3
info:
  title: Inventory
  version: "1.0"
paths:
  /items:
    get:
      operationId: ListItems
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
            minimum: 0
            exclusiveMinimum: true
            maximum: 100
            exclusiveMaximum: true
      responses:
        "200":
          description: OK
components:
  schemas:
    Price:
      type: number
      minimum: 0
      exclusiveMinimum: false
"#;
        let spec = parse_description(yaml.as_bytes()).unwrap();
        assert!(spec.paths.unwrap().contains_key("/items"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_description("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, GenError::Load { .. }));
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
