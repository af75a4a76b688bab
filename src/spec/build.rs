use http::Method;
use oas3::spec::PathItem;
use oas3::OpenApiV3Spec;
use tracing::{debug, info, warn};

use super::types::{type_suffix, DuplicatePolicy, Operation, OperationTable, TOOL_METHODS};
use crate::error::GenError;

/// The operation slot of `item` for `method`, if any.
fn operation_for<'a>(item: &'a PathItem, method: &Method) -> Option<&'a oas3::spec::Operation> {
    match *method {
        Method::GET => item.get.as_ref(),
        Method::POST => item.post.as_ref(),
        Method::PUT => item.put.as_ref(),
        Method::DELETE => item.delete.as_ref(),
        Method::PATCH => item.patch.as_ref(),
        Method::HEAD => item.head.as_ref(),
        Method::OPTIONS => item.options.as_ref(),
        _ => None,
    }
}

fn non_empty(text: Option<&String>) -> Option<String> {
    text.filter(|s| !s.is_empty()).cloned()
}

/// Derive the normalized record for one method slot.
///
/// Returns `None` when the slot has no operation id, or one that is empty or
/// only whitespace. Any other id is kept verbatim.
pub fn derive_operation(method: &Method, path: &str, op: &oas3::spec::Operation) -> Option<Operation> {
    let id = op
        .operation_id
        .as_ref()
        .filter(|id| !id.trim().is_empty())?
        .clone();
    let summary = non_empty(op.summary.as_ref()).unwrap_or_else(|| format!("{method} {path}"));
    let description = non_empty(op.description.as_ref()).unwrap_or_else(|| summary.clone());
    let has_request_body = op.request_body.is_some();

    Some(Operation {
        parameter_type_name: format!("{id}{}", type_suffix(has_request_body)),
        id,
        method: method.clone(),
        path: path.to_string(),
        summary,
        description,
        has_request_body,
    })
}

/// Walk every path and the seven tool methods, building the operation table.
///
/// Slots without an operation id are skipped. Duplicate ids are handled per
/// `policy`. An empty result is an error.
pub fn extract_operations(
    spec: &OpenApiV3Spec,
    policy: DuplicatePolicy,
) -> Result<OperationTable, GenError> {
    let mut table = OperationTable::new();

    if let Some(paths_map) = spec.paths.as_ref() {
        for (path, item) in paths_map {
            for method in TOOL_METHODS.iter() {
                let Some(op) = operation_for(item, method) else {
                    continue;
                };
                let Some(operation) = derive_operation(method, path, op) else {
                    debug!(%method, path = %path, "skipping operation without operationId");
                    continue;
                };

                if let Some(existing) = table.get(&operation.id) {
                    match policy {
                        DuplicatePolicy::Reject => {
                            return Err(GenError::DuplicateOperation {
                                id: operation.id.clone(),
                                first: existing.location(),
                                second: operation.location(),
                            });
                        }
                        DuplicatePolicy::LastWins => {
                            warn!(
                                id = %operation.id,
                                replaced = %existing.location(),
                                by = %operation.location(),
                                "duplicate operationId, keeping the last occurrence"
                            );
                        }
                    }
                }
                table.insert(operation);
            }
        }
    }

    if table.is_empty() {
        return Err(GenError::NoOperations);
    }
    info!(count = table.len(), "Found {} operations", table.len());
    Ok(table)
}
