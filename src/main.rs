mod cli;

use clap::Parser;
use ipinfolookup::{CompactRecord, VerboseRecord};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse();

    stderrlog::new()
        .module(module_path!())
        .verbosity(args.verbose.log_level_filter())
        .init()
        .expect("The logger is initialized once");

    let result = if args.compact {
        cli::run::<CompactRecord>(&args)
    } else {
        cli::run::<VerboseRecord>(&args)
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(error) => {
            log::error!("{error}");
            ExitCode::from(2)
        }
    }
}
