use anyhow::Result;
use clap::Parser;
use provisio::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
