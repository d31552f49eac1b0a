//! CDS CLI - inspect the dashboard datasets and print chart specs without a browser.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cds-cli",
    version,
    about = "Community District sentiment dashboard toolkit"
)]
struct Cli {
    #[command(flatten)]
    paths: cds_cmd::DataPaths,

    #[command(subcommand)]
    command: cds_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cds_cmd::run(&cli.paths, cli.command)
}
