//! itg-cli - ITGmania pack and song manager
//!
//! Adds packs and songs to an ITGmania library from folders, archives, and
//! download links, and hides songs from players by censoring them.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::AddPack(args) => commands::add_pack::run(cli.config.clone(), args),
        Commands::AddSong(args) => commands::add_song::run(cli.config.clone(), args),
        Commands::Censor(args) => commands::censor::run_censor(cli.config.clone(), args),
        Commands::Uncensor(args) => commands::censor::run_uncensor(cli.config.clone(), args),
        Commands::Censored(args) => commands::censor::run_censored(cli.config.clone(), args),
        Commands::InitConfig(args) => commands::init_config::run(cli.config.clone(), args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(help) = e.help() {
            eprintln!("  help: {help}");
        }
        std::process::exit(1);
    }
}
