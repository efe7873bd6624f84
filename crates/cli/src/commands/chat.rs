use std::io::Write as _;
use std::process::ExitCode;

use tokio::io::AsyncBufReadExt;
use wayfarer_core::config::{AppConfig, LoadOptions};

use super::{render, session};

const HELP_TEXT: &str = "\
Commands:
  help   show this message
  clear  forget the conversation so far
  exit   leave the chat
Anything else is sent to the travel agent as a request.";

pub async fn run() -> ExitCode {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration error: {error}");
            return ExitCode::from(2);
        }
    };
    session::init_logging(&config);

    let mut runtime = match session::build_runtime(&config) {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("failed to initialize completion client: {error}");
            return ExitCode::from(2);
        }
    };

    println!("Wayfarer travel agent. Type `help` for commands, `exit` to quit.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        let _ = std::io::stdout().flush();

        // Ctrl-C aborts waiting for the next line of input; it does not
        // interrupt an in-flight completion call.
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => break,
            },
        };

        match line.trim() {
            "" => continue,
            "exit" => break,
            "help" => println!("{HELP_TEXT}"),
            "clear" => {
                runtime.clear_conversation();
                println!("Conversation cleared.");
            }
            query => {
                let recommendation = runtime.recommend(query).await;
                println!("\n{}\n", render::recommendation_text(&recommendation));
            }
        }
    }

    println!("Goodbye.");
    ExitCode::SUCCESS
}
