//! Artifact - disposable live previews for UI components
//!
//! Each artifact is a record in a local JSON store plus, while running, a detached preview
//! server process that serves the component, hot-reloads it on change and exits when idle.

use clap::Parser;

mod analyzer;
mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod location;
mod logging;
mod paths;
mod port;
mod progress;
mod render;
mod server;
mod store;
mod supervisor;
mod temp;
mod ui;

use cli::{Cli, Commands};
use logging::LogMode;

fn main() {
    let cli = Cli::parse();

    logging::init(if cli.command.is_server() {
        LogMode::Server
    } else {
        LogMode::Cli {
            verbose: cli.verbose,
        }
    });

    let result = match cli.command {
        Commands::Create(args) => commands::create::run(args),
        Commands::Update(args) => commands::update::run(args),
        Commands::Open(args) => commands::open::run(args),
        Commands::Save(args) => commands::save::run_save(args),
        Commands::Unsave(args) => commands::save::run_unsave(args),
        Commands::Stop(args) => commands::stop::run(args),
        Commands::Clean(args) => commands::clean::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Completions(args) => commands::completions::run(args),
        Commands::Serve(args) => commands::serve::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
