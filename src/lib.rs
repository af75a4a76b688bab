//! # mcp-rest-gen
//!
//! **mcp-rest-gen** turns an OpenAPI 3 description into a ready-to-run Rust
//! program that exposes each API operation as an MCP tool over stdio and
//! forwards every tool call to the REST API.
//!
//! ## Architecture
//!
//! - **[`spec`]** - loads the description from a file or URL, detects YAML or
//!   JSON, and extracts the [`OperationTable`]
//! - **[`validator`]** - structural checks (version, `info`, `paths`, `$ref`s)
//! - **[`generator`]** - names, synthesizes, renders and writes the bridge
//! - **[`config`]** - the [`GenerationConfig`] passed to every stage
//! - **[`cli`]** - the `mcp-rest-gen` binary
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```text
//! load_description → parse_description → extract_operations → synthesize → render → write_source
//! ```
//!
//! Every stage returns [`GenError`] on failure and nothing is written unless all
//! earlier stages succeed. Output is byte-identical for identical inputs.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mcp_rest_gen::{extract_operations, parse_description, DuplicatePolicy, GenerationConfig};
//! use mcp_rest_gen::generator::synthesize;
//!
//! let spec = parse_description(&std::fs::read("openapi.yaml")?)?;
//! let table = extract_operations(&spec, DuplicatePolicy::Reject)?;
//! let source = synthesize(&table, &GenerationConfig::default())?.render();
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod spec;
pub mod validator;

pub use config::GenerationConfig;
pub use error::GenError;
pub use spec::{
    extract_operations, load_description, parse_description, DuplicatePolicy, Operation, OperationTable,
};
