//! # CLI Module
//!
//! Command-line interface of the `mcp-rest-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate a bridge program from an OpenAPI description:
//!
//! ```bash
//! mcp-rest-gen generate --spec openapi.yaml --output cmd/books/main.rs
//! ```
//!
//! Options:
//! - `--spec <LOC>` - Path or http(s) URL of the description (required, or `MCP_REST_GEN_SPEC`)
//! - `--output <FILE>` - Output file (default: `generated/main.rs`; empty derives from `--server-url`)
//! - `--package <NAME>` - Name of the generated program
//! - `--client-import <PATH>` / `--client-package <NAME>` - Typed client path and local alias
//! - `--server-url <URL>` - Default `--host` of the generated bridge
//! - `--username-env` / `--password-env` - Env vars the bridge reads credentials from
//! - `--on-duplicate <reject|last-wins>` - Duplicate operationId policy
//! - `--dry-run` - Print the source instead of writing it
//!
//! ### `inspect`
//!
//! List the operations that would become tools:
//!
//! ```bash
//! mcp-rest-gen inspect --spec https://api.example.com/openapi.json --json
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands};
