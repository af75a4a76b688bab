//! API description loading and operation extraction.
//!
//! - [`load_description`] fetches raw bytes from a file or `http(s)` URL
//! - [`parse_description`] detects YAML/JSON, validates structure and
//!   deserializes into [`oas3::OpenApiV3Spec`]
//! - [`extract_operations`] builds the [`OperationTable`]

mod build;
mod load;
mod types;

pub use build::*;
pub use load::*;
pub use types::*;
