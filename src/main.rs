use std::error::Error;
use std::fs::File;

use clog::{printl, Severity};

use log::{info, warn};

const HELP: &str = "\
clog demo

USAGE:
  clog [OPTIONS]
OPTIONS:
  -h, --help                Prints help information
  -l, --level LEVEL         Overrides LOG_LEVEL, 0-3 or error/warning/info/debug
  -f, --fail PATH           Opens PATH and reports the OS error if it fails
ENVIRONMENT:
  LOG_LEVEL                 Threshold, defaults to 2 (info)
EXAMPLE:
  LOG_LEVEL=3 clog
  clog -l warn -f /nonexistent
";

struct Args {
    level: Option<Severity>,
    fail_path: Option<String>,
}

fn parse_env_args() -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;

    let mut level: Option<Severity> = None;
    let mut fail_path: Option<String> = None;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                println!("{}", HELP);
                std::process::exit(0);
            }
            Short('l') | Long("level") => {
                level = Some(parser.value()?.parse()?);
            }
            Short('f') | Long("fail") => {
                fail_path = Some(parser.value()?.parse()?);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Args { level, fail_path })
}

fn main() -> Result<(), Box<dyn Error>> {
    clog::install()?;
    clog::init();
    let Args { level, fail_path } = parse_env_args()?;
    if let Some(level) = level {
        clog::set_level(level.code());
    }

    if let Some(path) = fail_path {
        if File::open(&path).is_err() {
            printl!(Severity::Error, "cannot open {}", path);
        }
    }

    printl!(Severity::Error, "This is an error!");
    printl!(Severity::Warning, "This is a warn!");
    printl!(Severity::Info, "This is an info!");
    printl!(Severity::Debug, "This is a debug!");
    warn!("this warn went through the log facade");
    info!("threshold is {}", clog::level());
    Ok(())
}
