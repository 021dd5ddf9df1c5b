use std::fs;
use std::io::{self, Read, Write};

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use polyparse::cliopt::CliOpt;
use polyparse::registry::Registry;
use polyparse::runner::Runner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();
    init_tracing(opt.verbose);

    let runner = Runner::new(Registry::new(), &opt);
    let mut stdout = io::stdout();

    if opt.list_formats {
        stdout.write_all(&runner.list_formats())?;
        return Ok(());
    }

    let text = match &opt.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    stdout.write_all(&runner.run(&text, opt.file.as_deref())?)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
