//! courier: hypermedia notification backend.

use anyhow::Result;
use clap::Parser;

use courier_server::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    courier_server::run_with_cli(Cli::parse()).await
}
