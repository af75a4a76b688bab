use http::Method;
use std::collections::HashMap;
use std::fmt;

/// The seven HTTP methods whose operations become tools, in the order they
/// are inspected on each path item. TRACE is never exposed.
pub const TOOL_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
];

/// Suffix of the argument type for operations with a request body
pub const BODY_TYPE_SUFFIX: &str = "JSONRequestBody";
/// Suffix of the argument type for parameter-only operations
pub const PARAMS_TYPE_SUFFIX: &str = "Params";

/// Argument type suffix for an operation with or without a request body
pub fn type_suffix(has_request_body: bool) -> &'static str {
    if has_request_body {
        BODY_TYPE_SUFFIX
    } else {
        PARAMS_TYPE_SUFFIX
    }
}

/// One API operation that will be exposed as a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// The `operationId`, unique within its table and never empty
    pub id: String,
    pub method: Method,
    /// Path template the operation was found under, e.g. `/books/{id}`
    pub path: String,
    /// Summary text, or `"<METHOD> <path>"`
    pub summary: String,
    /// Description text, or the summary
    pub description: String,
    pub has_request_body: bool,
    /// `"<id>JSONRequestBody"` when a body is present, otherwise `"<id>Params"`
    pub parameter_type_name: String,
}

impl Operation {
    /// `"<METHOD> <path>"`, used for fallback text and diagnostics
    pub fn location(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Suffix of [`parameter_type_name`](Self::parameter_type_name), which
    /// always starts with the raw id
    pub fn type_suffix(&self) -> &str {
        self.parameter_type_name
            .strip_prefix(self.id.as_str())
            .unwrap_or_else(|| type_suffix(self.has_request_body))
    }
}

/// What to do when the same operation id appears more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DuplicatePolicy {
    /// Fail extraction, naming both locations
    #[default]
    Reject,
    /// Keep the occurrence seen last and log a warning
    LastWins,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::LastWins => write!(f, "last-wins"),
        }
    }
}

/// Operations keyed by id.
///
/// Iteration order of the backing map is unspecified; use [`sorted`](Self::sorted)
/// wherever order is observable.
#[derive(Debug, Clone, Default)]
pub struct OperationTable {
    operations: HashMap<String, Operation>,
}

impl OperationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `op`, returning the operation it replaced, if any
    pub fn insert(&mut self, op: Operation) -> Option<Operation> {
        self.operations.insert(op.id.clone(), op)
    }

    pub fn get(&self, id: &str) -> Option<&Operation> {
        self.operations.get(id)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// All operations ordered lexicographically by id
    pub fn sorted(&self) -> Vec<&Operation> {
        let mut ops: Vec<&Operation> = self.operations.values().collect();
        ops.sort_by(|a, b| a.id.cmp(&b.id));
        ops
    }
}

impl FromIterator<Operation> for OperationTable {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        let mut table = OperationTable::new();
        for op in iter {
            table.insert(op);
        }
        table
    }
}
