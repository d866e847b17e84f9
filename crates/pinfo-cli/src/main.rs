//! PInfo CLI
//!
//! Command-line host for the personal information form

use clap::{Parser, Subcommand};
use pinfo_core::logging_facility::{self, Profile};

mod backend;
mod commands;

use backend::BackendArgs;

#[derive(Debug, Parser)]
#[command(name = "pinfo")]
#[command(about = "PInfo - save and load your personal information", long_about = None)]
struct Cli {
    #[command(flatten)]
    backend: BackendArgs,

    /// Log output format (human or json); RUST_LOG sets the filter
    #[arg(long, global = true, default_value = "human")]
    log_format: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the saved profile
    Show(commands::show::ShowArgs),
    /// Validate and save a profile
    Save(commands::save::SaveArgs),
    /// Check whether an email address is valid
    CheckEmail(commands::check_email::CheckEmailArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_format);

    let result = match cli.command {
        Commands::Show(args) => commands::show::execute(&cli.backend, args),
        Commands::Save(args) => commands::save::execute(&cli.backend, args),
        Commands::CheckEmail(args) => commands::check_email::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
