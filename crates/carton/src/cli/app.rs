use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cli::archive::{CompressArg, ExtractArg, IdentifyArg, SupportedArg};
use crate::logging;

#[derive(Clone, Debug, Parser)]
#[command(name = "carton", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Log filter used when RUST_LOG is unset, e.g. `debug` or `carton_archive=trace`
    #[arg(long, global = true, default_value = "warn", value_name = "FILTER")]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, env = "CARTON_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "c", name = "compress", about = "Archive files and directories")]
    Compress(CompressArg),
    #[command(alias = "x", name = "extract", about = "Extract an archive, detecting its format")]
    Extract(ExtractArg),
    #[command(alias = "id", name = "identify", about = "Print the detected format of an archive")]
    Identify(IdentifyArg),
    #[command(alias = "s", name = "supported", about = "Check file names against the known extensions")]
    Supported(SupportedArg),
}

impl App {
    pub fn run(self) -> Result<()> {
        logging::init(&self.log_level, self.log_file.as_deref())?;

        match self.cmd {
            Commands::Compress(arg) => arg.run(),
            Commands::Extract(arg) => arg.run(),
            Commands::Identify(arg) => arg.run(),
            Commands::Supported(arg) => arg.run(),
        }
    }
}
