//! Drought monitor CLI - runs the dashboard's region statistics offline.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "dm-cli",
    version,
    about = "Drought monitor region statistics toolkit"
)]
struct Cli {
    /// Dashboard config JSON (defaults to the built-in drought product)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: dm_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    dm_cmd::run(cli.config.as_deref(), cli.command)
}
