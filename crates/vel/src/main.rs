//! `vel` -- sheet formula engine CLI.
//!
//! Parses CLI arguments with clap, resolves the runtime context (props,
//! settings), and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity.
    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("vel=debug,vellum_formula=trace,vellum_props=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| match cli.command {
        Commands::Eval(args) => commands::eval::run(&ctx, &args),
        Commands::Roll(args) => commands::roll::run(&ctx, &args),
        Commands::Get(args) => commands::get::run(&ctx, &args),
        Commands::Initiative(args) => commands::initiative::run(&ctx, &args),
        Commands::Template(args) => commands::template_cmd::run(&ctx, &args),
        Commands::Components => commands::components_cmd::run(&ctx),
        Commands::Functions => commands::functions_cmd::run(&ctx),
        Commands::Version => commands::version::run(&ctx),
    });

    if let Err(err) = result {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
