//! Per-session orchestrator.
//!
//! One request/response cycle is linear: append user turn, extract
//! preferences (completion call 1), generate the recommendation (completion
//! call 2), extract and parse the JSON payload, append the assistant turn,
//! return. The two completion calls are strictly sequential; stage 2 depends
//! on stage 1's output. Any step's failure short-circuits to a fallback
//! recommendation; the user's turn stays in memory either way so the
//! conversation survives errors.

use std::sync::Arc;

use uuid::Uuid;
use wayfarer_core::domain::recommendation::TravelRecommendation;
use wayfarer_core::errors::AgentError;

use crate::extractor;
use crate::llm::CompletionClient;
use crate::logging::InteractionLog;
use crate::memory::{ConversationMemory, Role};
use crate::prompts;

pub struct TravelAgentRuntime {
    memory: ConversationMemory,
    client: Arc<dyn CompletionClient>,
    interaction_log: Arc<dyn InteractionLog>,
}

impl TravelAgentRuntime {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        interaction_log: Arc<dyn InteractionLog>,
        max_turns: usize,
    ) -> Self {
        Self { memory: ConversationMemory::new(max_turns), client, interaction_log }
    }

    /// Runs one request/response cycle. Never fails to the caller: every
    /// error path terminates in a structurally complete fallback value.
    pub async fn recommend(&mut self, user_query: &str) -> TravelRecommendation {
        let correlation_id = Uuid::new_v4().to_string();

        self.memory.add_message(Role::User, user_query);
        self.interaction_log.log(&format!("user: {user_query}"));

        match self.run_cycle(user_query, &correlation_id).await {
            Ok(recommendation) => {
                self.interaction_log.log(&format!("assistant: {}", recommendation.summary));
                recommendation
            }
            Err(error) => {
                tracing::warn!(
                    event_name = "agent.recommend.fallback",
                    correlation_id = %correlation_id,
                    error = %error,
                    "request cycle failed, returning fallback recommendation"
                );
                self.interaction_log.log(&format!("request failed: {error}"));
                error.into_fallback()
            }
        }
    }

    /// Wipes the conversation window and the preference map.
    pub fn clear_conversation(&mut self) {
        self.memory.clear();
        tracing::info!(event_name = "agent.memory.cleared", "conversation memory cleared");
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    async fn run_cycle(
        &mut self,
        user_query: &str,
        correlation_id: &str,
    ) -> Result<TravelRecommendation, AgentError> {
        let transcript = self.memory.conversation_history();

        let preference_prompt = prompts::preference_extraction_prompt(&transcript)?;
        tracing::debug!(
            event_name = "agent.preferences.request",
            correlation_id = %correlation_id,
            transcript_chars = transcript.len(),
            "requesting preference extraction"
        );
        let preference_output = self.client.complete(&preference_prompt).await?;
        let preferences_json = extractor::extract_json(&preference_output);
        tracing::debug!(
            event_name = "agent.preferences.extracted",
            correlation_id = %correlation_id,
            preferences = %preferences_json,
            "preference stage complete"
        );

        let recommendation_prompt =
            prompts::recommendation_prompt(&transcript, &preferences_json, user_query)?;
        tracing::debug!(
            event_name = "agent.recommendation.request",
            correlation_id = %correlation_id,
            "requesting recommendation"
        );
        let completion_output = self.client.complete(&recommendation_prompt).await?;
        let recommendation_json = extractor::extract_json(&completion_output);

        // The assistant turn is the extracted JSON text, recorded before
        // parsing so a later parse failure still leaves the exchange in the
        // transcript.
        self.memory.add_message(Role::Assistant, recommendation_json.clone());

        match extractor::parse_recommendation(&recommendation_json) {
            Ok(recommendation) if recommendation.is_empty() => {
                self.interaction_log
                    .log(&format!("empty recommendation payload: {recommendation_json}"));
                Err(AgentError::EmptyResult)
            }
            Ok(recommendation) => {
                tracing::info!(
                    event_name = "agent.recommendation.parsed",
                    correlation_id = %correlation_id,
                    hotels = recommendation.recommended_hotels.len(),
                    activities = recommendation.recommended_activities.len(),
                    "recommendation cycle complete"
                );
                Ok(recommendation)
            }
            Err(error) => {
                self.interaction_log
                    .log(&format!("unparseable completion output: {completion_output}"));
                Err(error)
            }
        }
    }
}
