//! NAT CLI - Command line tool for the nationality filings dashboard.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "nat-cli",
    version,
    about = "Évolution des nationalités: filings dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: nat_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("nat-cli {}", env!("CARGO_PKG_VERSION"));
    nat_cmd::run(cli.command).await
}
