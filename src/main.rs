// SPDX-License-Identifier: MPL-2.0
use std::process::ExitCode;
use sunshine_gallery::app::{self, Flags};
use sunshine_gallery::logging;

const USAGE: &str = "\
usage: sunshine-gallery [--config-dir <dir>] [--category <slug>] [--log <filter>]

Reads commands from stdin and prints the page state after each one.
Type 'help' once running for the command list.";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        category: args.opt_value_from_str("--category")?,
        log: args.opt_value_from_str("--log")?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("warning: ignoring unused arguments: {remaining:?}");
    }
    Ok(Some(flags))
}

fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    if let Err(err) = logging::init(flags.log.as_deref()) {
        eprintln!("{err}");
    }

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "fatal");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
