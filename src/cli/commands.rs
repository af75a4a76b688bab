use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    GenerationConfig, DEFAULT_CLIENT_IMPORT, DEFAULT_OUTPUT, DEFAULT_PACKAGE_NAME, DEFAULT_PASSWORD_ENV,
    DEFAULT_SERVER_URL, DEFAULT_USERNAME_ENV,
};
use crate::generator::{generate_bridge, inspect_description, GenerateRequest, OperationSummary};
use crate::logging::init_logging;
use crate::spec::DuplicatePolicy;

/// Command-line interface for mcp-rest-gen
///
/// Generates MCP stdio bridge programs from OpenAPI descriptions.
#[derive(Parser)]
#[command(name = "mcp-rest-gen", version)]
#[command(about = "Generate MCP tool bridges for REST APIs described by OpenAPI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a bridge program from an OpenAPI description
    Generate {
        /// Path or http(s) URL of the OpenAPI description (YAML or JSON)
        #[arg(short, long, env = "MCP_REST_GEN_SPEC")]
        spec: String,

        /// Output file; pass an empty value to derive cmd/<app>/main.rs from --server-url
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: String,

        /// Name of the generated program
        #[arg(long, default_value = DEFAULT_PACKAGE_NAME)]
        package: String,

        /// Rust path of the typed REST client crate or module
        #[arg(long, default_value = DEFAULT_CLIENT_IMPORT)]
        client_import: String,

        /// Local name for the client in generated code (default: last segment of --client-import)
        #[arg(long)]
        client_package: Option<String>,

        /// Default base URL of the REST API baked into the bridge
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,

        /// Env var the bridge reads the basic-auth user from
        #[arg(long, default_value = DEFAULT_USERNAME_ENV)]
        username_env: String,

        /// Env var the bridge reads the basic-auth password from
        #[arg(long, default_value = DEFAULT_PASSWORD_ENV)]
        password_env: String,

        /// How to handle an operationId used more than once
        #[arg(long, value_enum, default_value_t = DuplicatePolicy::Reject)]
        on_duplicate: DuplicatePolicy,

        /// Print the generated source to stdout instead of writing it
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// List the operations that would become tools
    Inspect {
        /// Path or http(s) URL of the OpenAPI description (YAML or JSON)
        #[arg(short, long, env = "MCP_REST_GEN_SPEC")]
        spec: String,

        /// How to handle an operationId used more than once
        #[arg(long, value_enum, default_value_t = DuplicatePolicy::Reject)]
        on_duplicate: DuplicatePolicy,

        /// Emit JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// `petstore_client::v1` → `v1`
pub(crate) fn default_alias(client_import: &str) -> String {
    client_import
        .rsplit("::")
        .next()
        .unwrap_or(client_import)
        .trim()
        .to_string()
}

fn print_table(rows: &[OperationSummary]) {
    let id_width = rows.iter().map(|r| r.id.len()).max().unwrap_or(0).max(2);
    let route_width = rows
        .iter()
        .map(|r| r.method.len() + 1 + r.path.len())
        .max()
        .unwrap_or(0)
        .max(5);
    let type_width = rows.iter().map(|r| r.argument_type.len()).max().unwrap_or(0).max(8);

    println!(
        "{:<id_width$}  {:<route_width$}  {:<type_width$}  PASSING",
        "ID", "ROUTE", "ARGUMENT"
    );
    for row in rows {
        let route = format!("{} {}", row.method, row.path);
        println!(
            "{:<id_width$}  {:<route_width$}  {:<type_width$}  {}",
            row.id, route, row.argument_type, row.passing
        );
    }
    println!("\n{} operation(s)", rows.len());
}

/// Execute a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            spec,
            output,
            package,
            client_import,
            client_package,
            server_url,
            username_env,
            password_env,
            on_duplicate,
            dry_run,
        } => {
            let client_alias = client_package.unwrap_or_else(|| default_alias(&client_import));
            let request = GenerateRequest {
                source: spec,
                config: GenerationConfig {
                    package_name: package,
                    output: PathBuf::from(output),
                    client_import,
                    client_alias,
                    server_url,
                    username_env,
                    password_env,
                },
                policy: on_duplicate,
                dry_run,
            };
            let report = generate_bridge(&request)
                .with_context(|| format!("failed to generate bridge from {}", request.source))?;
            if report.written {
                println!(
                    "✅ Wrote {} tool(s) to {}",
                    report.operations,
                    report.output.display()
                );
            } else {
                print!("{}", report.source);
            }
            Ok(())
        }
        Commands::Inspect {
            spec,
            on_duplicate,
            json,
        } => {
            let rows = inspect_description(&spec, on_duplicate)
                .with_context(|| format!("failed to inspect {spec}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_table(&rows);
            }
            Ok(())
        }
    }
}

/// Parse `std::env::args`, initialize logging and run the command
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    run(cli)
}
