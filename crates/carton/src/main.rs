use clap::Parser;

use crate::cli::App;

mod cli;
mod logging;

fn main() -> anyhow::Result<()> {
    App::parse().run()
}
