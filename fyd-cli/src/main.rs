//! FYD CLI - Command line tool for querying the yield dashboard API.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "fyd-cli",
    version,
    about = "Factory yield dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: fyd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    fyd_cmd::run(cli.command).await
}
