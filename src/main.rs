//! # chatmark - chat message formatter
//!
//! Command-line front end for the `chatmark` formatting engine: reads a message from a file or
//! stdin and prints it as styled terminal text, plain text, a debug tree, or JSON.
//!
//! ## Features
//! - Output formats with `-f ansi|plain|tree|json`
//! - Configuration file plus environment overrides
//! - Shell completions
//! - Error handling and graceful exits

mod cli;
mod core;
mod run;

use clap::Parser;

use crate::cli::{Args, Commands};

fn main() {
    let args = Args::parse();
    run::init_logger(&args);

    // Print user-friendly message; exit uses Display not Debug
    if let Err(e) = dispatch(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(args: &Args) -> Result<(), run::RunError> {
    match &args.command {
        Some(Commands::Completions { shell }) => {
            run::print_completions(*shell);
            Ok(())
        }
        Some(Commands::Config) => run::show_config(),
        None => {
            let config = core::config::load()?;
            run::format_input(args, config)
        }
    }
}
