fn main() -> anyhow::Result<()> {
    wldata::cli::run_cli()
}
