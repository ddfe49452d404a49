mod cli;
mod display;
mod input;
mod model;
mod pipeline;
mod report;
mod seeded;
mod session;
mod trace;

use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};

use crate::cli::{Cli, Command, RunArgs};
use crate::display::InMemoryDisplay;
use crate::input::{InputError, scan_input_dir};
use crate::model::AnalysisMode;
use crate::pipeline::AnalysisError;
use crate::report::writer::{ReportError, write_reports};
use crate::session::AnalysisSession;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => {
            trace::init(args.verbose);
            if let Err(err) = run(&args) {
                error!("{err}");
                std::process::exit(1);
            }
        }
    }
}

fn run(args: &RunArgs) -> Result<(), AppError> {
    let mode = AnalysisMode::from(args.mode);
    let files = scan_input_dir(&args.input)?;
    info!(
        "analyzing {} images from {} in {mode} mode",
        files.len(),
        args.input.display()
    );

    let display = Rc::new(InMemoryDisplay::new());
    let mut session =
        AnalysisSession::with_delay(display, Duration::from_millis(args.delay_ms));
    let result = session.run_analysis(&files, mode)?;

    write_reports(result, mode, &args.out)?;
    Ok(())
}
