use std::process::ExitCode;

use clap::Parser;
use classdeps::cli::{Arguments, ExitStatus};
use colored::Colorize;

fn main() -> ExitCode {
    let args = Arguments::parse();

    match classdeps::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("{} {:#}", "error:".bold().red(), err);
            ExitStatus::Error.into()
        }
    }
}
