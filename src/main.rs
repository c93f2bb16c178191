use clap::{CommandFactory, Parser};
use rmparse::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help
    if args.command.is_none() {
        if let Err(e) = Args::command().print_long_help() {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        process::exit(0);
    }

    match commands::run(args) {
        Ok(stats) if stats.has_failures() => process::exit(1),
        Ok(_) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
