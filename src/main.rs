use clap::Parser;

use wordbox::cli::{run, Cli};
use wordbox::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!(?cli, "Starting");
    run(cli)
}
