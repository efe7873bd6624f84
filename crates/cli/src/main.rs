use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    wayfarer_cli::run().await
}
