use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = barangay_portal_cli::Cli::parse();
    barangay_portal_cli::run_cli(cli)
}
