//! # Generator Module
//!
//! Turns an [`OperationTable`](crate::spec::OperationTable) into the source of
//! an MCP bridge program and writes it to disk.
//!
//! ## Architecture
//!
//! ```text
//! OperationTable → naming::resolve → synthesize → BridgeProgram → render → emit
//! ```
//!
//! 1. **Naming** - each operation id becomes an argument type
//!    (`ListBooksParams` / `AddBookJSONRequestBody`), a client method
//!    (`list_books_with_response`) and a handler name (`list_books`)
//! 2. **Synthesis** - a [`BridgeProgram`] of `syn` nodes is built with
//!    `quote!`, operations in lexicographic id order
//! 3. **Rendering** - `prettyplease` prints the tree
//! 4. **Emission** - the text is written atomically
//!
//! ## Generated Program
//!
//! The output is one `main.rs` that depends on `rmcp`, `clap`, `reqwest`,
//! `base64`, `tokio`, `anyhow`, `tracing`, `tracing-subscriber` and the typed
//! REST client. It reads `--host`, `--username` and `--password` (the latter
//! two also from env vars), builds a basic-auth client, registers one tool per
//! operation and serves MCP over stdio.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mcp_rest_gen::generator::{generate_bridge, GenerateRequest};
//! use mcp_rest_gen::{DuplicatePolicy, GenerationConfig};
//!
//! let report = generate_bridge(&GenerateRequest {
//!     source: "openapi.yaml".into(),
//!     config: GenerationConfig::default(),
//!     policy: DuplicatePolicy::Reject,
//!     dry_run: false,
//! })?;
//! println!("{} tools → {}", report.operations, report.output.display());
//! ```

mod emit;
mod naming;
mod pipeline;
mod program;
mod synthesize;

pub use emit::write_source;
pub use naming::{resolve, split_words, to_snake, to_upper_camel, ArgumentPassing, ResolvedOperation};
pub use pipeline::{
    generate_bridge, inspect_description, load_operations, GenerateRequest, GenerationReport, OperationSummary,
};
pub use program::{BridgeProgram, ToolRegistration};
pub use synthesize::synthesize;
