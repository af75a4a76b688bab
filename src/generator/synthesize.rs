use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::parse::Parser;
use syn::{Attribute, ExprMethodCall, Ident, ImplItemFn, ItemFn, ItemImpl, ItemStruct, ItemUse};
use tracing::debug;

use super::naming::{resolve, ArgumentPassing, ResolvedOperation};
use super::program::{BridgeProgram, ToolRegistration};
use crate::config::GenerationConfig;
use crate::error::GenError;
use crate::spec::OperationTable;

/// Generated type and method names that tool handlers must not reuse
const RESERVED_HANDLER_NAMES: &[&str] = &["new", "tool_router", "get_info"];
const RESERVED_OWNER: &str = "<bridge>";

fn parse<T: syn::parse::Parse>(context: &str, tokens: TokenStream) -> Result<T, GenError> {
    syn::parse2(tokens).map_err(|e| GenError::syntax(context, e))
}

/// Tracks which operation owns each generated symbol in one namespace.
#[derive(Default)]
struct SymbolLedger {
    owners: HashMap<String, String>,
}

impl SymbolLedger {
    fn claim(&mut self, symbol: String, owner: &str) -> Result<(), GenError> {
        match self.owners.get(&symbol) {
            Some(first) => Err(GenError::SymbolCollision {
                symbol,
                first: first.clone(),
                second: owner.to_string(),
            }),
            None => {
                self.owners.insert(symbol, owner.to_string());
                Ok(())
            }
        }
    }
}

/// Fail if two operations resolve to the same argument type, client method
/// or handler name.
fn check_collisions(resolved: &[ResolvedOperation]) -> Result<(), GenError> {
    let mut types = SymbolLedger::default();
    let mut methods = SymbolLedger::default();
    let mut handlers = SymbolLedger::default();
    for name in RESERVED_HANDLER_NAMES {
        handlers.claim((*name).to_string(), RESERVED_OWNER)?;
    }

    for op in resolved {
        types.claim(op.argument_type.to_string(), &op.id)?;
        methods.claim(op.client_method.to_string(), &op.id)?;
        handlers.claim(op.handler_name.to_string(), &op.id)?;
        // the tool macro emits a `<handler>_tool_attr` companion fn
        handlers.claim(format!("{}_tool_attr", op.handler_name), &op.id)?;
    }
    Ok(())
}

fn client_alias(config: &GenerationConfig) -> Result<Ident, GenError> {
    syn::parse_str(&config.client_alias).map_err(|e| GenError::syntax("client alias", e))
}

fn escape_format(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

fn doc_line(text: &str) -> String {
    format!(" {}", text.lines().next().unwrap_or_default().trim())
}

fn header(table_len: usize, config: &GenerationConfig) -> Result<Vec<Attribute>, GenError> {
    let lines = vec![
        " Generated by mcp-rest-gen from an OpenAPI description. Do not edit.".to_string(),
        String::new(),
        format!(
            " `{}` serves {} tool(s) over MCP stdio and forwards each call to the",
            config.package_name, table_len
        ),
        format!(" REST API through the `{}` client.", config.client_import),
    ];
    Attribute::parse_inner
        .parse2(quote! { #( #![doc = #lines] )* })
        .map_err(|e| GenError::syntax("file header", e))
}

fn imports(config: &GenerationConfig) -> Result<Vec<ItemUse>, GenError> {
    let mut uses = vec![
        quote! { use anyhow::Context; },
        quote! { use base64::Engine; },
        quote! { use clap::Parser; },
        quote! { use rmcp::handler::server::tool::ToolRouter; },
        quote! { use rmcp::handler::server::wrapper::Parameters; },
        quote! {
            use rmcp::model::{
                CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
            };
        },
        quote! { use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt}; },
    ];
    if config.client_import != config.client_alias {
        let path: syn::Path = syn::parse_str(&config.client_import)
            .map_err(|e| GenError::syntax("client import", e))?;
        let alias = client_alias(config)?;
        uses.push(quote! { use #path as #alias; });
    }
    uses.into_iter().map(|tokens| parse("imports", tokens)).collect()
}

fn config_struct(config: &GenerationConfig) -> Result<ItemStruct, GenError> {
    let name = &config.package_name;
    let about = format!("MCP stdio bridge for the REST API served at {}", config.server_url);
    let server_url = &config.server_url;
    let username_env = &config.username_env;
    let password_env = &config.password_env;
    parse(
        "configuration struct",
        quote! {
            #[derive(Debug, Parser)]
            #[command(name = #name, about = #about)]
            struct Config {
                /// Base URL of the REST API
                #[arg(long, default_value = #server_url)]
                host: String,
                /// Basic-auth user name
                #[arg(long, env = #username_env, default_value = "")]
                username: String,
                /// Basic-auth password
                #[arg(long, env = #password_env, default_value = "", hide_env_values = true)]
                password: String,
            }
        },
    )
}

fn tool_registration(alias: &Ident, op: &ResolvedOperation) -> Result<ToolRegistration, GenError> {
    let context = format!("tool '{}'", op.id);
    let client_method = &op.client_method;
    let call: ExprMethodCall = match op.passing {
        ArgumentPassing::ByValue => parse(&context, quote! { self.client.#client_method(arguments) })?,
        ArgumentPassing::ByReference => {
            parse(&context, quote! { self.client.#client_method(&arguments) })?
        }
    };

    let doc = doc_line(&op.summary);
    let tool_name = &op.id;
    let description = &op.description;
    let handler = &op.handler_name;
    let argument_type = &op.argument_type;
    let calling = format!("error calling {}: {{err}}", escape_format(&op.id));
    let status = format!("error on {}: {{}}", escape_format(&op.id));

    let method: ImplItemFn = parse(
        &context,
        quote! {
            #[doc = #doc]
            #[tool(name = #tool_name, description = #description)]
            async fn #handler(
                &self,
                Parameters(arguments): Parameters<#alias::#argument_type>,
            ) -> Result<CallToolResult, McpError> {
                let resp = match #call.await {
                    Ok(resp) => resp,
                    Err(err) => {
                        return Ok(CallToolResult::error(vec![Content::text(format!(#calling))]));
                    }
                };
                if !resp.status().is_success() {
                    return Ok(CallToolResult::error(vec![Content::text(format!(#status, resp.status()))]));
                }
                Ok(CallToolResult::success(vec![Content::text(
                    String::from_utf8_lossy(resp.body()).into_owned(),
                )]))
            }
        },
    )?;

    Ok(ToolRegistration {
        operation_id: op.id.clone(),
        passing: op.passing,
        call,
        method,
    })
}

fn server_handler(tool_count: usize, config: &GenerationConfig) -> Result<ItemImpl, GenError> {
    let instructions = format!(
        "Exposes {tool_count} operation(s) of the REST API at {} as tools. \
         Each tool takes the operation's parameters or request body as arguments \
         and returns the raw response body.",
        config.server_url
    );
    parse(
        "server handler",
        quote! {
            #[tool_handler]
            impl ServerHandler for Bridge {
                fn get_info(&self) -> ServerInfo {
                    ServerInfo {
                        protocol_version: ProtocolVersion::V_2024_11_05,
                        capabilities: ServerCapabilities::builder().enable_tools().build(),
                        server_info: Implementation::from_build_env(),
                        instructions: Some(#instructions.to_string()),
                    }
                }
            }
        },
    )
}

fn client_builder(alias: &Ident) -> Result<ItemFn, GenError> {
    parse(
        "client builder",
        quote! {
            /// REST client sending basic-auth credentials from `config` on every request
            fn build_client(config: &Config) -> anyhow::Result<#alias::Client> {
                let credentials = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", config.username, config.password));
                let mut auth = reqwest::header::HeaderValue::from_str(&format!("Basic {credentials}"))
                    .context("invalid basic-auth credentials")?;
                auth.set_sensitive(true);
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(reqwest::header::AUTHORIZATION, auth);
                let http = reqwest::Client::builder()
                    .default_headers(headers)
                    .build()
                    .context("failed to build HTTP client")?;
                Ok(#alias::Client::new_with_client(&config.host, http))
            }
        },
    )
}

fn entry_point() -> Result<ItemFn, GenError> {
    parse(
        "entry point",
        quote! {
            #[tokio::main]
            async fn main() -> anyhow::Result<()> {
                tracing_subscriber::fmt()
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                    )
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .init();

                let config = Config::parse();
                let client = build_client(&config)?;
                let service = Bridge::new(client)
                    .serve(rmcp::transport::stdio())
                    .await
                    .context("failed to start MCP server")?;
                tracing::info!("Server started");
                service.waiting().await?;
                Ok(())
            }
        },
    )
}

/// Build the bridge program for `table` under `config`.
///
/// Operations are emitted in lexicographic id order. Fails before producing
/// anything if the configuration is invalid, the table is empty, an id does
/// not map to valid identifiers, or two ids map to the same symbol.
pub fn synthesize(table: &OperationTable, config: &GenerationConfig) -> Result<BridgeProgram, GenError> {
    config.validate()?;
    if table.is_empty() {
        return Err(GenError::NoOperations);
    }

    let resolved = table
        .sorted()
        .into_iter()
        .map(resolve)
        .collect::<Result<Vec<_>, _>>()?;
    check_collisions(&resolved)?;

    let alias = client_alias(config)?;
    let tools = resolved
        .iter()
        .map(|op| tool_registration(&alias, op))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(tools = tools.len(), "synthesized tool registrations");

    Ok(BridgeProgram {
        header: header(table.len(), config)?,
        imports: imports(config)?,
        config: config_struct(config)?,
        service: parse(
            "service struct",
            quote! {
                #[derive(Clone)]
                struct Bridge {
                    client: #alias::Client,
                    tool_router: ToolRouter<Self>,
                }
            },
        )?,
        constructor: parse(
            "service constructor",
            quote! {
                impl Bridge {
                    fn new(client: #alias::Client) -> Self {
                        Self {
                            client,
                            tool_router: Self::tool_router(),
                        }
                    }
                }
            },
        )?,
        router: parse("tool router", quote! { #[tool_router] impl Bridge {} })?,
        server_handler: server_handler(tools.len(), config)?,
        tools,
        client_builder: client_builder(&alias)?,
        entry_point: entry_point()?,
    })
}
