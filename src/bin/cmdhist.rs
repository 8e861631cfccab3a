// src/bin/cmdhist.rs

use anyhow::Result;
use clap::Parser;
use cmdhist::cli::{Cli, Commands, handlers};
use colored::Colorize;

fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);
    match cli.command {
        Commands::Show { pin } => handlers::show::handle(cli.registry, cli.log, pin),
        Commands::Scan => handlers::scan::handle(cli.registry, cli.log),
        Commands::Config => handlers::config::handle(),
    }
}
