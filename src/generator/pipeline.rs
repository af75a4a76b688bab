use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, info_span};

use super::emit::write_source;
use super::naming::resolve;
use super::synthesize::synthesize;
use crate::config::GenerationConfig;
use crate::error::GenError;
use crate::spec::{extract_operations, load_description, parse_description, DuplicatePolicy, OperationTable};

/// Inputs of one generator run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// File path or `http(s)` URL of the API description
    pub source: String,
    pub config: GenerationConfig,
    pub policy: DuplicatePolicy,
    /// Render the program but do not write it
    pub dry_run: bool,
}

/// What a generator run produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub operations: usize,
    pub output: PathBuf,
    /// The rendered bridge program
    pub source: String,
    pub written: bool,
}

/// One row of `inspect` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSummary {
    pub id: String,
    pub method: String,
    pub path: String,
    /// Argument type name as derived from the raw operation id
    pub parameter_type_name: String,
    pub argument_type: String,
    pub passing: String,
    pub client_method: String,
    pub description: String,
}

/// Load, validate and extract the operation table from `source`.
pub fn load_operations(source: &str, policy: DuplicatePolicy) -> Result<OperationTable, GenError> {
    let bytes = load_description(source)?;
    let spec = parse_description(&bytes)?;
    extract_operations(&spec, policy)
}

/// Run the whole generator: load, parse, extract, synthesize, render and
/// (unless `dry_run`) write.
///
/// Nothing is written when any earlier stage fails.
pub fn generate_bridge(request: &GenerateRequest) -> Result<GenerationReport, GenError> {
    let span = info_span!("generate", source = %request.source);
    let _enter = span.enter();

    request.config.validate()?;
    let table = load_operations(&request.source, request.policy)?;
    let program = synthesize(&table, &request.config)?;
    let source = program.render();
    let output = request.config.output_path();

    let written = if request.dry_run {
        info!(path = %output.display(), "dry run, not writing");
        false
    } else {
        write_source(&output, &source)?;
        true
    };

    Ok(GenerationReport {
        operations: table.len(),
        output,
        source,
        written,
    })
}

/// Resolve every operation in `source` without generating anything.
pub fn inspect_description(source: &str, policy: DuplicatePolicy) -> Result<Vec<OperationSummary>, GenError> {
    let table = load_operations(source, policy)?;
    table
        .sorted()
        .into_iter()
        .map(|op| {
            let resolved = resolve(op)?;
            Ok(OperationSummary {
                id: op.id.clone(),
                method: op.method.to_string(),
                path: op.path.clone(),
                parameter_type_name: op.parameter_type_name.clone(),
                argument_type: resolved.argument_type.to_string(),
                passing: resolved.passing.to_string(),
                client_method: resolved.client_method.to_string(),
                description: op.description.clone(),
            })
        })
        .collect()
}
