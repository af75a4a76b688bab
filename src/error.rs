use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::validator::ValidationIssue;

/// Error returned by every stage of bridge generation.
///
/// Each variant carries enough context (operation id, path, field or file)
/// to diagnose the failure without re-running with extra logging.
#[derive(Debug)]
pub enum GenError {
    /// The API description could not be read from a file or URL
    Load {
        /// The path or URL that was requested
        location: String,
        reason: String,
    },
    /// The API description is not syntactically valid YAML/JSON, or does not
    /// deserialize into an OpenAPI 3 document
    Parse {
        /// `"yaml"`, `"json"` or `"openapi"`
        format: &'static str,
        reason: String,
    },
    /// The document parsed but failed structural validation
    Invalid {
        /// Every problem found, in document order
        issues: Vec<ValidationIssue>,
    },
    /// No path/method pair carried an operation id
    NoOperations,
    /// The same operation id appeared at two locations
    DuplicateOperation {
        id: String,
        /// `"<METHOD> <path>"` of the first occurrence
        first: String,
        /// `"<METHOD> <path>"` of the second occurrence
        second: String,
    },
    /// An operation id maps to something that is not a valid Rust identifier
    InvalidSymbol { id: String, symbol: String },
    /// Two operation ids map to the same generated symbol
    SymbolCollision {
        symbol: String,
        first: String,
        second: String,
    },
    /// A required configuration field is empty
    MissingConfig { field: &'static str },
    /// A configuration field is present but malformed
    InvalidConfig { field: &'static str, reason: String },
    /// A generated syntax node failed to parse
    Syntax { context: String, reason: String },
    /// Writing the generated source failed
    Emit { path: PathBuf, source: io::Error },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::Load { location, reason } => {
                write!(f, "failed to load API description from '{location}': {reason}")
            }
            GenError::Parse { format, reason } => {
                write!(f, "failed to parse API description as {format}: {reason}")
            }
            GenError::Invalid { issues } => {
                write!(
                    f,
                    "API description failed validation ({} issue(s))",
                    issues.len()
                )?;
                for issue in issues {
                    write!(f, "\n  {issue}")?;
                }
                Ok(())
            }
            GenError::NoOperations => {
                write!(f, "no valid operations found in the API description")
            }
            GenError::DuplicateOperation { id, first, second } => write!(
                f,
                "operation id '{id}' is defined twice: at {first} and at {second}"
            ),
            GenError::InvalidSymbol { id, symbol } => write!(
                f,
                "operation id '{id}' maps to '{symbol}', which is not a valid Rust identifier"
            ),
            GenError::SymbolCollision {
                symbol,
                first,
                second,
            } => write!(
                f,
                "operations '{first}' and '{second}' both map to generated symbol '{symbol}'"
            ),
            GenError::MissingConfig { field } => {
                write!(f, "generation config field '{field}' must not be empty")
            }
            GenError::InvalidConfig { field, reason } => {
                write!(f, "generation config field '{field}' is invalid: {reason}")
            }
            GenError::Syntax { context, reason } => {
                write!(f, "failed to build {context}: {reason}")
            }
            GenError::Emit { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::Emit { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl GenError {
    pub(crate) fn syntax(context: impl Into<String>, err: syn::Error) -> Self {
        GenError::Syntax {
            context: context.into(),
            reason: err.to_string(),
        }
    }
}
