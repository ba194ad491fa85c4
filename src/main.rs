use clap::Parser;
use log::debug;
use snafu::ErrorCompat;

mod args;
mod sheet;

use crate::args::Args;
use crate::sheet::SheetError;

fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    debug!("args: {:?}", args);

    match sheet::run_validation(&args) {
        Ok(_) => {}
        Err(SheetError::Rejected { source }) => {
            for msg in source.messages() {
                eprintln!("{}", msg);
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("An error occured: {}", e);
            if let Some(bt) = ErrorCompat::backtrace(&e) {
                eprintln!("trace: {}", bt);
            }
            std::process::exit(2);
        }
    }
}
