pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "wayfarer",
    about = "Wayfarer travel agent CLI",
    long_about = "Chat with an LLM-backed travel agent that turns free-text requests into \
                  structured city, hotel, and activity recommendations.",
    after_help = "Examples:\n  wayfarer chat\n  wayfarer ask \"long weekend in Lisbon under 500 EUR\"\n  wayfarer doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start an interactive travel-planning conversation")]
    Chat,
    #[command(about = "Run a single travel query and print the recommendation")]
    Ask {
        #[arg(help = "Free-text travel request")]
        query: String,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate configuration, credentials, and interaction-log writability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Chat => commands::chat::run().await,
        Command::Ask { query } => commands::ask::run(&query).await,
        Command::Config => {
            println!("{}", commands::config::run());
            ExitCode::SUCCESS
        }
        Command::Doctor { json } => {
            println!("{}", commands::doctor::run(json));
            ExitCode::SUCCESS
        }
    }
}
