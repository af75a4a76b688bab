use syn::{Attribute, ExprMethodCall, File, ImplItem, ImplItemFn, Item, ItemFn, ItemImpl, ItemStruct, ItemUse};

use super::naming::ArgumentPassing;

/// One generated tool: the handler method plus the client call inside it.
#[derive(Debug, Clone)]
pub struct ToolRegistration {
    pub operation_id: String,
    pub passing: ArgumentPassing,
    /// `self.client.<op>_with_response(arguments)` or `(&arguments)`
    pub call: ExprMethodCall,
    /// The `#[tool(name = .., description = ..)]` async method
    pub method: ImplItemFn,
}

/// In-memory syntax tree of a generated bridge program.
///
/// Each field is one top-level part of the output file. Tests assert on these
/// nodes directly; [`render`](Self::render) turns them into source text.
#[derive(Debug, Clone)]
pub struct BridgeProgram {
    /// Inner `//!` doc lines
    pub header: Vec<Attribute>,
    pub imports: Vec<ItemUse>,
    /// clap `Config` struct: host, username, password
    pub config: ItemStruct,
    /// `Bridge { client, tool_router }`
    pub service: ItemStruct,
    /// `impl Bridge { fn new(..) }`
    pub constructor: ItemImpl,
    /// `#[tool_router] impl Bridge {}`, filled from `tools` on output
    pub router: ItemImpl,
    /// Sorted by operation id
    pub tools: Vec<ToolRegistration>,
    /// `#[tool_handler] impl ServerHandler for Bridge`
    pub server_handler: ItemImpl,
    /// Builds the basic-auth REST client from `Config`
    pub client_builder: ItemFn,
    /// `#[tokio::main] async fn main()`
    pub entry_point: ItemFn,
}

impl BridgeProgram {
    /// The `#[tool_router]` impl block with every tool method in order.
    pub fn tool_router(&self) -> ItemImpl {
        let mut router = self.router.clone();
        router
            .items
            .extend(self.tools.iter().map(|t| ImplItem::Fn(t.method.clone())));
        router
    }

    /// Assemble the complete file.
    pub fn to_file(&self) -> File {
        let mut items: Vec<Item> = self.imports.iter().cloned().map(Item::Use).collect();
        items.push(Item::Struct(self.config.clone()));
        items.push(Item::Struct(self.service.clone()));
        items.push(Item::Impl(self.constructor.clone()));
        items.push(Item::Impl(self.tool_router()));
        items.push(Item::Impl(self.server_handler.clone()));
        items.push(Item::Fn(self.client_builder.clone()));
        items.push(Item::Fn(self.entry_point.clone()));

        File {
            shebang: None,
            attrs: self.header.clone(),
            items,
        }
    }

    /// Pretty-printed source text. Identical programs render identically.
    pub fn render(&self) -> String {
        prettyplease::unparse(&self.to_file())
    }
}
