use anyhow::Context;
use clap::Parser;

use pokeinfo::cli::{self, Cli};
use pokeinfo::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Cli::parse();
    let config = args.load_config().context("loading configuration")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::run(args.command, &config, &mut out).await
}
