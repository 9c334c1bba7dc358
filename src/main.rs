use clap::Parser;
use log::debug;
use snafu::ErrorCompat;

mod args;
mod stage;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    if args.verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    }
    log_builder.init();

    debug!("arguments: {:?}", args);

    if let Err(e) = stage::run(&args) {
        eprintln!("choirstage: error: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
