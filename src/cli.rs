use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::AnalysisMode;

#[derive(Debug, Parser)]
#[command(name = "histotme", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a directory of histopathology images and write reports.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Directory containing the input images (png/jpg/jpeg/tif/tiff).
    #[arg(long)]
    pub input: PathBuf,

    /// Output directory for images.tsv, summary.json, and report.txt.
    #[arg(long)]
    pub out: PathBuf,

    /// Scoring method to simulate.
    #[arg(long, value_enum, default_value_t = ModeArg::Proposed)]
    pub mode: ModeArg,

    /// Simulated processing delay before synthesis, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub delay_ms: u64,

    /// Enable debug logging (RUST_LOG overrides).
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Proposed,
    Existing,
}

impl From<ModeArg> for AnalysisMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Proposed => AnalysisMode::Proposed,
            ModeArg::Existing => AnalysisMode::Existing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["histotme", "run", "--input", "slides", "--out", "out"])
            .unwrap();
        let Command::Run(args) = cli.command;
        assert_eq!(args.input, PathBuf::from("slides"));
        assert_eq!(args.out, PathBuf::from("out"));
        assert_eq!(args.mode, ModeArg::Proposed);
        assert_eq!(args.delay_ms, 2000);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_run_existing_mode() {
        let cli = Cli::try_parse_from([
            "histotme",
            "run",
            "--input",
            "slides",
            "--out",
            "out",
            "--mode",
            "existing",
            "--delay-ms",
            "0",
        ])
        .unwrap();
        let Command::Run(args) = cli.command;
        assert_eq!(args.mode, ModeArg::Existing);
        assert_eq!(args.delay_ms, 0);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        assert!(Cli::try_parse_from(["histotme", "run", "--out", "out"]).is_err());
    }
}
