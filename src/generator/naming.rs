use std::fmt;
use syn::Ident;

use crate::error::GenError;
use crate::spec::Operation;

/// Suffix the typed client appends to each operation's snake-case name
pub const CLIENT_METHOD_SUFFIX: &str = "_with_response";

/// How the tool argument is handed to the client method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentPassing {
    /// Request body operations: `client.op_with_response(arguments)`
    ByValue,
    /// Parameter operations: `client.op_with_response(&arguments)`
    ByReference,
}

impl fmt::Display for ArgumentPassing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentPassing::ByValue => write!(f, "by value"),
            ArgumentPassing::ByReference => write!(f, "by reference"),
        }
    }
}

/// The Rust symbols generated code uses for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOperation {
    pub id: String,
    pub summary: String,
    pub description: String,
    /// e.g. `ListBooksParams`
    pub argument_type: Ident,
    /// e.g. `list_books_with_response`
    pub client_method: Ident,
    /// e.g. `list_books`
    pub handler_name: Ident,
    pub passing: ArgumentPassing,
}

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Split an identifier into words.
///
/// Non-alphanumeric characters separate words. A new word starts at an
/// uppercase letter that follows a lowercase letter or digit, and at the last
/// capital of an acronym run when a lowercase letter follows it
/// (`HTTPServer` → `HTTP`, `Server`).
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `list_books`, `listBooks` and `ListBooks` all become `ListBooks`
pub fn to_upper_camel(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect()
}

/// `ListBooks`, `listBooks` and `list-books` all become `list_books`
pub fn to_snake(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

fn ident(id: &str, symbol: String) -> Result<Ident, GenError> {
    syn::parse_str::<Ident>(&symbol).map_err(|_| GenError::InvalidSymbol {
        id: id.to_string(),
        symbol,
    })
}

/// Derive every generated symbol for `op`.
///
/// Fails when the operation id does not map to valid Rust identifiers, e.g.
/// when it starts with a digit or has no alphanumeric characters.
pub fn resolve(op: &Operation) -> Result<ResolvedOperation, GenError> {
    let camel = to_upper_camel(&op.id);
    let snake = to_snake(&op.id);

    let passing = if op.has_request_body {
        ArgumentPassing::ByValue
    } else {
        ArgumentPassing::ByReference
    };

    let argument_type = ident(&op.id, format!("{camel}{}", op.type_suffix()))?;
    let client_method = ident(&op.id, format!("{snake}{CLIENT_METHOD_SUFFIX}"))?;
    let handler = if KEYWORDS.contains(&snake.as_str()) {
        format!("{snake}_")
    } else {
        snake
    };
    let handler_name = ident(&op.id, handler)?;

    Ok(ResolvedOperation {
        id: op.id.clone(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        argument_type,
        client_method,
        handler_name,
        passing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn op(id: &str, body: bool) -> Operation {
        Operation {
            id: id.to_string(),
            method: Method::GET,
            path: "/x".to_string(),
            summary: "GET /x".to_string(),
            description: "GET /x".to_string(),
            has_request_body: body,
            parameter_type_name: format!("{id}{}", crate::spec::type_suffix(body)),
        }
    }

    #[test]
    fn test_argument_type_follows_stored_type_name() {
        let mut operation = op("listBooks", false);
        assert_eq!(resolve(&operation).unwrap().argument_type, "ListBooksParams");

        operation.parameter_type_name = "listBooksJSONRequestBody".to_string();
        assert_eq!(resolve(&operation).unwrap().argument_type, "ListBooksJSONRequestBody");
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("ListBooks"), vec!["List", "Books"]);
        assert_eq!(split_words("listBooks"), vec!["list", "Books"]);
        assert_eq!(split_words("list_books"), vec!["list", "books"]);
        assert_eq!(split_words("get-HTTPServer.v2"), vec!["get", "HTTP", "Server", "v2"]);
        assert_eq!(split_words("getV2Item"), vec!["get", "V2", "Item"]);
        assert_eq!(split_words("__"), Vec::<String>::new());
    }

    #[test]
    fn test_case_conversions_agree() {
        for id in ["ListBooks", "listBooks", "list_books", "list-books"] {
            assert_eq!(to_upper_camel(id), "ListBooks", "{id}");
            assert_eq!(to_snake(id), "list_books", "{id}");
        }
        assert_eq!(to_upper_camel("getHTTPStatus"), "GetHttpStatus");
        assert_eq!(to_snake("getHTTPStatus"), "get_http_status");
    }

    #[test]
    fn test_resolve_params_by_reference() {
        let r = resolve(&op("ListBooks", false)).unwrap();
        assert_eq!(r.argument_type.to_string(), "ListBooksParams");
        assert_eq!(r.client_method.to_string(), "list_books_with_response");
        assert_eq!(r.handler_name.to_string(), "list_books");
        assert_eq!(r.passing, ArgumentPassing::ByReference);
    }

    #[test]
    fn test_resolve_body_by_value() {
        let r = resolve(&op("AddBook", true)).unwrap();
        assert_eq!(r.argument_type.to_string(), "AddBookJSONRequestBody");
        assert_eq!(r.client_method.to_string(), "add_book_with_response");
        assert_eq!(r.passing, ArgumentPassing::ByValue);
    }

    #[test]
    fn test_resolve_is_stable() {
        let operation = op("createPet", true);
        assert_eq!(resolve(&operation).unwrap(), resolve(&operation).unwrap());
    }

    #[test]
    fn test_keyword_handler_gets_suffix() {
        let r = resolve(&op("type", false)).unwrap();
        assert_eq!(r.handler_name.to_string(), "type_");
        assert_eq!(r.client_method.to_string(), "type_with_response");
        assert_eq!(r.argument_type.to_string(), "TypeParams");
        let r = resolve(&op("self", false)).unwrap();
        assert_eq!(r.handler_name.to_string(), "self_");
    }

    #[test]
    fn test_invalid_symbols() {
        for id in ["2fa", "---"] {
            match resolve(&op(id, false)) {
                Err(GenError::InvalidSymbol { id: bad, .. }) => assert_eq!(bad, id),
                other => panic!("expected InvalidSymbol for {id}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unicode_letters_are_identifiers() {
        let r = resolve(&op("über", false)).unwrap();
        assert_eq!(r.handler_name.to_string(), "über");
    }
}
