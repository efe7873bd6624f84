use std::process::ExitCode;

use wayfarer_core::config::{AppConfig, LoadOptions};

use super::{render, session};

pub async fn run(query: &str) -> ExitCode {
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

    let recommendation = runtime.recommend(query).await;
    println!("{}", render::recommendation_text(&recommendation));
    ExitCode::SUCCESS
}
