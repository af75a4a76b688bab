fn main() -> anyhow::Result<()> {
    mcp_rest_gen::cli::run_cli()
}
