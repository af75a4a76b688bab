//! Structural validation of API descriptions.
//!
//! Runs on the untyped document tree before it is deserialized into an
//! [`oas3::OpenApiV3Spec`], so that every problem is reported at once instead
//! of the first serde error.

use serde_json::Value;
use std::fmt;

use crate::error::GenError;

/// One structural problem found in an API description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// JSON pointer (without the leading `#`) of the offending node
    pub location: String,
    pub kind: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(location: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.location, self.message)
    }
}

/// Collect every structural issue in `doc`.
///
/// Checks the `openapi` version, the `info` and `paths` sections, and that
/// every `$ref` is a local JSON pointer resolving inside the document.
pub fn collect_issues(doc: &Value) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let Some(root) = doc.as_object() else {
        issues.push(ValidationIssue::new(
            "/",
            "NotAnObject",
            "document root must be a mapping",
        ));
        return issues;
    };

    match root.get("openapi") {
        None => {
            let message = if root.contains_key("swagger") {
                "Swagger 2.0 documents are not supported; convert to OpenAPI 3"
            } else {
                "'openapi' version field is required"
            };
            issues.push(ValidationIssue::new("/openapi", "MissingVersion", message));
        }
        Some(Value::String(version)) if version.starts_with("3.") => {}
        Some(other) => issues.push(ValidationIssue::new(
            "/openapi",
            "UnsupportedVersion",
            format!("expected an OpenAPI 3.x version string, found {other}"),
        )),
    }

    match root.get("info") {
        Some(Value::Object(info)) => {
            if !matches!(info.get("title"), Some(Value::String(_))) {
                issues.push(ValidationIssue::new(
                    "/info/title",
                    "MissingTitle",
                    "'info.title' is required",
                ));
            }
            if !matches!(info.get("version"), Some(Value::String(_))) {
                issues.push(ValidationIssue::new(
                    "/info/version",
                    "MissingApiVersion",
                    "'info.version' is required and must be a string",
                ));
            }
        }
        _ => issues.push(ValidationIssue::new(
            "/info",
            "MissingInfo",
            "'info' section is required",
        )),
    }

    if !matches!(root.get("paths"), Some(Value::Object(_))) {
        issues.push(ValidationIssue::new(
            "/paths",
            "MissingPaths",
            "'paths' section is required",
        ));
    }

    let mut pointer = String::new();
    check_refs(doc, doc, &mut pointer, &mut issues);
    issues
}

/// Fail with [`GenError::Invalid`] when `doc` has any structural issue.
pub fn validate_document(doc: &Value) -> Result<(), GenError> {
    let issues = collect_issues(doc);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(GenError::Invalid { issues })
    }
}

fn check_refs(root: &Value, node: &Value, pointer: &mut String, issues: &mut Vec<ValidationIssue>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&escape_token(key));
                if key == "$ref" {
                    if let Value::String(target) = child {
                        check_ref(root, target, pointer, issues);
                    }
                } else {
                    check_refs(root, child, pointer, issues);
                }
                pointer.truncate(len);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&idx.to_string());
                check_refs(root, child, pointer, issues);
                pointer.truncate(len);
            }
        }
        _ => {}
    }
}

fn check_ref(root: &Value, target: &str, location: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(fragment) = target.strip_prefix('#') else {
        issues.push(ValidationIssue::new(
            location,
            "ExternalRef",
            format!("external reference '{target}' is not supported"),
        ));
        return;
    };
    // serde_json::Value::pointer decodes ~0 and ~1 per RFC 6901
    if root.pointer(fragment).is_none() {
        issues.push(ValidationIssue::new(
            location,
            "UnresolvedRef",
            format!("reference '{target}' does not resolve"),
        ));
    }
}

fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
