//! # Generation Configuration
//!
//! [`GenerationConfig`] is built once by the CLI (or by library callers) and
//! passed explicitly to the synthesizer and emitter. It is never mutated
//! during a run.
//!
//! | Field          | Default                 |
//! |----------------|-------------------------|
//! | `package_name` | `mcp-rest-bridge`       |
//! | `output`       | `generated/main.rs`     |
//! | `client_import`| `api`                   |
//! | `client_alias` | `api`                   |
//! | `server_url`   | `http://localhost:8080` |
//! | `username_env` | `API_USERNAME`          |
//! | `password_env` | `API_PASSWORD`          |
//!
//! An empty `output` is replaced by a path derived from the server URL; see
//! [`derive_output_path`].

use regex::Regex;
use std::path::{Path, PathBuf};

use crate::error::GenError;

pub const DEFAULT_PACKAGE_NAME: &str = "mcp-rest-bridge";
pub const DEFAULT_OUTPUT: &str = "generated/main.rs";
pub const DEFAULT_CLIENT_IMPORT: &str = "api";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_USERNAME_ENV: &str = "API_USERNAME";
pub const DEFAULT_PASSWORD_ENV: &str = "API_PASSWORD";

const ENV_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
const PACKAGE_NAME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_-]*$";

/// Everything the synthesizer and emitter need besides the operation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Name of the generated program (clap command name and file header)
    pub package_name: String,
    /// Output file; empty means "derive from `server_url`"
    pub output: PathBuf,
    /// Rust path of the typed client crate or module, e.g. `petstore_client`
    pub client_import: String,
    /// Local name generated code uses for the client, e.g. `api`
    pub client_alias: String,
    /// Base URL baked in as the bridge's default `--host`
    pub server_url: String,
    /// Env var the bridge reads its basic-auth user from
    pub username_env: String,
    /// Env var the bridge reads its basic-auth password from
    pub password_env: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            client_import: DEFAULT_CLIENT_IMPORT.to_string(),
            client_alias: DEFAULT_CLIENT_IMPORT.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            username_env: DEFAULT_USERNAME_ENV.to_string(),
            password_env: DEFAULT_PASSWORD_ENV.to_string(),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), GenError> {
    if value.trim().is_empty() {
        Err(GenError::MissingConfig { field })
    } else {
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> GenError {
    GenError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

fn check_pattern(field: &'static str, value: &str, pattern: &str) -> Result<(), GenError> {
    let re = Regex::new(pattern).map_err(|e| invalid(field, e.to_string()))?;
    if re.is_match(value) {
        Ok(())
    } else {
        Err(invalid(field, format!("'{value}' must match {pattern}")))
    }
}

impl GenerationConfig {
    /// Check every field, failing on the first empty or malformed one.
    pub fn validate(&self) -> Result<(), GenError> {
        require("package_name", &self.package_name)?;
        require("client_import", &self.client_import)?;
        require("client_alias", &self.client_alias)?;
        require("server_url", &self.server_url)?;
        require("username_env", &self.username_env)?;
        require("password_env", &self.password_env)?;

        check_pattern("package_name", &self.package_name, PACKAGE_NAME_PATTERN)?;
        syn::parse_str::<syn::Path>(&self.client_import)
            .map_err(|e| invalid("client_import", format!("'{}' is not a Rust path: {e}", self.client_import)))?;
        syn::parse_str::<syn::Ident>(&self.client_alias).map_err(|e| {
            invalid(
                "client_alias",
                format!("'{}' is not a Rust identifier: {e}", self.client_alias),
            )
        })?;
        let url = url::Url::parse(&self.server_url)
            .map_err(|e| invalid("server_url", format!("'{}': {e}", self.server_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(
                "server_url",
                format!("scheme '{}' is not http or https", url.scheme()),
            ));
        }
        check_pattern("username_env", &self.username_env, ENV_NAME_PATTERN)?;
        check_pattern("password_env", &self.password_env, ENV_NAME_PATTERN)?;
        if self.username_env == self.password_env {
            return Err(invalid(
                "password_env",
                "must differ from username_env",
            ));
        }
        Ok(())
    }

    /// The output path, derived from `server_url` when `output` is empty.
    pub fn output_path(&self) -> PathBuf {
        if self.output.as_os_str().is_empty() {
            derive_output_path(&self.server_url)
        } else {
            self.output.clone()
        }
    }
}

/// `cmd/<first URL path segment, lowercased>/main.rs`, or `cmd/app/main.rs`
/// when the URL has no usable path segment.
///
/// `https://api.example.com/Petstore/v1` → `cmd/petstore/main.rs`
pub fn derive_output_path(server_url: &str) -> PathBuf {
    let app = url::Url::parse(server_url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.find(|s| !s.is_empty()).map(str::to_lowercase))
        })
        .filter(|s| !s.is_empty() && Path::new(s).components().count() == 1 && s != "." && s != "..")
        .unwrap_or_else(|| "app".to_string());
    Path::new("cmd").join(app).join("main.rs")
}
