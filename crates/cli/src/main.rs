//! `quote`: print a random quote fetched through the quote proxy.
//!
//! `quote` alone fetches one quote with the settings from the config file.
//! Flags on `quote random` override them; `quote config` shows what is in
//! effect.

mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use log::{debug, error};
use std::process::exit;

use crate::commands::config::ConfigArgs;
use crate::commands::random::RandomArgs;
use crate::commands::{EX_CONFIG, EX_SOFTWARE};
use crate::config::{config_file_path, CliConfig};

/// Fetch a random quote
#[derive(Parser, Debug)]
#[command(name = "quote", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and print a random quote (default)
    Random(RandomArgs),
    /// Show the configuration in effect
    Config(ConfigArgs),
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = match config_file_path() {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to locate config directory: {:#}", e);
            eprintln!("Error: {:#}", e);
            exit(EX_CONFIG);
        }
    };
    debug!("Config file: {}", path.display());

    let config = match CliConfig::load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {:#}", e);
            eprintln!("Error: {:#}", e);
            exit(EX_CONFIG);
        }
    };

    let result = match &cli.command {
        Some(Commands::Random(args)) => args.execute(&config),
        Some(Commands::Config(args)) => args.execute(&path, &config),
        None => RandomArgs::default().execute(&config),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            exit(EX_SOFTWARE);
        }
    }
}
