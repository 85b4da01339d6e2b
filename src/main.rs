mod cli;
mod logging;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use date_calculator::{CalendarDate, Session};
use tracing::{debug, info};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(args.verbosity());
    info!("Loading datecalc {}", env!("CARGO_PKG_VERSION"));
    debug!(?args, "Parsed arguments");

    let today = CalendarDate::today().context("System date is outside the supported calendar range")?;
    let mut session = Session::new(today);
    let mut stdout = io::stdout().lock();

    if args.interactive {
        cli::interactive(&mut session, io::stdin().lock(), &mut stdout)
    } else {
        cli::run(&args, &mut session, &mut stdout)
    }
}
