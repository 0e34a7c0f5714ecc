use clap::Parser;

use get_version::config::Params;

#[derive(Parser)]
#[command(name = "get-version")]
#[command(
    version,
    about = "Fetch versions from a registry and narrow them with a filter expression"
)]
struct Cli {
    #[command(flatten)]
    params: Params,

    /// Log directive for stderr diagnostics, e.g. "debug" or "get_version=info"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    get_version::logging::init(cli.log_level.as_deref());

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(get_version::app::run_cli(cli.params))
}
