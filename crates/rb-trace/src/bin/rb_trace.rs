//! `rb-trace`: drive the traced red-black tree from the command line.
//!
//! Usage:
//!   rb-trace [--format text|json] [--log-level LEVEL] script +5 +3 -5 ?3
//!   rb-trace [--format text|json] stress [--seed N] [--ops N] [--max-key N]

use clap::Parser;
use rb_trace::cli::{run, Cli};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the dump on stdout.
    if let Err(e) = TermLogger::init(
        cli.log_level.into(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("{e}");
    }

    match run(&cli) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
