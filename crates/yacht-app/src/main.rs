#![deny(warnings)]

use clap::Parser;

use yacht_app::cli::{Cli, run};

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
