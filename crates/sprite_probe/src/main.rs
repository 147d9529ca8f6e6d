use std::env;
use std::io;
use std::process::ExitCode;

use sprite_probe::{parse_args, run, usage_text, ProbeCommand};

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::from(1)
        }
    }
}

fn run_cli() -> Result<(), String> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    match parse_args(&args)? {
        ProbeCommand::Help => {
            println!("{}", usage_text());
            Ok(())
        }
        ProbeCommand::Probe(options) => run(&options, &mut io::stdout()),
    }
}
