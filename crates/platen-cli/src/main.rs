// this_file: crates/platen-cli/src/main.rs

//! Platen CLI: batch template filling from the command line.

mod cli;
mod commands;
mod prompt;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Run(args) => commands::run::run(args, cli.quiet),
        Commands::Info(args) => commands::info::run(args),
        Commands::Fonts(args) => commands::fonts::run(args),
    };

    if let Err(err) = result {
        eprintln!("Failed: {err:#}");
        std::process::exit(1);
    }
}

/// Default filter from the flags; `RUST_LOG` wins when set.
fn init_logger(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
