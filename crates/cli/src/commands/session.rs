use std::sync::Arc;

use wayfarer_agent::llm::OpenAiCompletionClient;
use wayfarer_agent::logging::{FileInteractionLog, InteractionLog, NoopInteractionLog};
use wayfarer_agent::runtime::TravelAgentRuntime;
use wayfarer_core::config::AppConfig;
use wayfarer_core::errors::CompletionError;

pub(crate) fn init_logging(config: &AppConfig) {
    use tracing::Level;
    use wayfarer_core::config::LogFormat::*;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub(crate) fn build_runtime(config: &AppConfig) -> Result<TravelAgentRuntime, CompletionError> {
    let client = Arc::new(OpenAiCompletionClient::from_config(&config.llm)?);
    let interaction_log: Arc<dyn InteractionLog> = if config.interaction_log.enabled {
        Arc::new(FileInteractionLog::new(&config.interaction_log.path))
    } else {
        Arc::new(NoopInteractionLog)
    };

    Ok(TravelAgentRuntime::new(client, interaction_log, config.memory.max_turns))
}
