//! zipdir CLI - zips a file or directory into `<name>.zip`.

mod cli;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use zipdir_core::ArchiveConfig;
use zipdir_core::ArchiveReport;
use zipdir_core::Archiver;
use zipdir_core::NoopProgress;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet, cli.json);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match run(&cli).and_then(|report| formatter.format_result(&report)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::from(error::exit_code(&err))
        }
    }
}

fn run(cli: &cli::Cli) -> Result<ArchiveReport> {
    let input = cli.input();

    let mut config = ArchiveConfig::new()
        .with_follow_symlinks(cli.follow_symlinks)
        .with_preserve_permissions(cli.preserve_permissions);
    if let Some(dir) = &cli.output_dir {
        config = config.with_output_dir(dir);
    }
    let archiver = Archiver::new(config);

    let result = if !cli.quiet && !cli.json && progress::CliProgress::should_show() {
        let mut bar = progress::CliProgress::new();
        archiver.compress_with_progress(input, &mut bar)
    } else {
        archiver.compress_with_progress(input, &mut NoopProgress)
    };

    error::add_input_context(result, input)
}
