use std::path::PathBuf;

use anyhow::{Context, Result};
use carton_archive::{ArchiveReport, CompressOptions, get_extension, is_supported};
use clap::Args;

#[derive(Args, Clone, Debug)]
pub struct CompressArg {
    /// Files or directories to archive
    #[arg(required = true, value_name = "SOURCES")]
    pub sources: Vec<PathBuf>,

    /// Archive to write; the extension selects the format
    #[arg(long, short, value_name = "ARCHIVE")]
    pub output: PathBuf,

    /// Walk directories in file-name order for reproducible archives
    #[arg(long)]
    pub sorted: bool,
}

impl CompressArg {
    pub fn run(self) -> Result<()> {
        let options = CompressOptions::default().sorted(self.sorted);
        let report = carton_archive::compress_with(&self.sources, &self.output, &options)
            .with_context(|| format!("Failed to compress into '{}'", self.output.display()))?;
        print_summary("compressed", &report);
        Ok(())
    }
}

#[derive(Args, Clone, Debug)]
pub struct ExtractArg {
    /// Archive to extract
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Directory to extract into; created when missing
    #[arg(value_name = "DEST", default_value = ".")]
    pub destination: PathBuf,
}

impl ExtractArg {
    pub fn run(self) -> Result<()> {
        let report = carton_archive::uncompress(&self.archive, &self.destination)
            .with_context(|| format!("Failed to extract '{}'", self.archive.display()))?;
        print_summary("extracted", &report);
        Ok(())
    }
}

#[derive(Args, Clone, Debug)]
pub struct IdentifyArg {
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,
}

impl IdentifyArg {
    pub fn run(self) -> Result<()> {
        let format = carton_archive::identify(&self.archive)
            .with_context(|| format!("Failed to identify '{}'", self.archive.display()))?;
        println!("{}: {format}", self.archive.display());
        Ok(())
    }
}

#[derive(Args, Clone, Debug)]
pub struct SupportedArg {
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<String>,
}

impl SupportedArg {
    pub fn run(self) -> Result<()> {
        for file in &self.files {
            println!("{file}: {}", support_line(file));
        }
        Ok(())
    }
}

fn support_line(file: &str) -> String {
    match (is_supported(file), get_extension(file)) {
        (_, "") => "unsupported (no extension)".to_string(),
        (true, ext) => format!("supported ({ext})"),
        (false, ext) => format!("unsupported ({ext})"),
    }
}

fn print_summary(action: &str, report: &ArchiveReport) {
    println!(
        "{action} {} entries ({} bytes) as {}",
        report.entry_count, report.total_bytes, report.format
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_lines() {
        assert_eq!(support_line("a.tar.gz"), "supported (.gz)");
        assert_eq!(support_line("notes.txt"), "unsupported (.txt)");
        assert_eq!(support_line("Makefile"), "unsupported (no extension)");
    }
}
