//! flowtag binary.
//!
//! Entry point for the `flowtag` command-line tool.

use std::process::ExitCode;

use clap::Parser;
use flowtag_cli::exit::{codes, exit_code};
use flowtag_cli::{execute_tag, Cli};
use flowtag_core::StderrLogger;
use flowtag_fs::RealFilesystem;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger = StderrLogger::new(cli.verbosity());
    let fs = RealFilesystem;

    match execute_tag(&cli.tag, &fs, &logger) {
        Ok(result) => {
            println!(
                "Tagged {} records ({} skipped), wrote {}",
                result.records,
                result.skipped,
                result.output_path.display()
            );
            ExitCode::from(codes::SUCCESS as u8)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}
