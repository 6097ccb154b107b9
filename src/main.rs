use anyhow::Result;
use clap::Parser;
use payables::cli::Cli;
use payables::log::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = cli.run().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}
