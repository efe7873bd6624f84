//! Conversation-and-recommendation pipeline.
//!
//! This crate turns free-text travel requests into structured
//! recommendations through a two-stage prompt protocol:
//!
//! 1. **Preference extraction** (`prompts`) - the rendered transcript is sent
//!    to the completion service, which answers with a small preferences JSON
//!    object (budget, dates, interests, travel style).
//! 2. **Recommendation generation** (`prompts` + `extractor`) - a second
//!    prompt embeds the transcript, the stage-1 preferences, and the current
//!    query; the response's JSON payload is located, permissively parsed,
//!    and normalized.
//!
//! The split exists because a single-shot prompt loses context across turns:
//! stage 2 receives an explicit, structured memory of user intent instead of
//! re-deriving it from the raw transcript.
//!
//! # Key types
//!
//! - `TravelAgentRuntime` - per-session orchestrator (see `runtime`)
//! - `ConversationMemory` - bounded FIFO transcript window (see `memory`)
//! - `CompletionClient` - pluggable completion-service trait (see `llm`)
//! - `InteractionLog` - best-effort append-only text sink (see `logging`)
//!
//! # Failure principle
//!
//! No error from parsing or from the completion service ever reaches the
//! caller as an error: every failure path terminates in a structurally
//! complete fallback `TravelRecommendation`.

pub mod extractor;
pub mod llm;
pub mod logging;
pub mod memory;
pub mod prompts;
pub mod runtime;

pub use llm::{CompletionClient, OpenAiCompletionClient};
pub use logging::{FileInteractionLog, InteractionLog, NoopInteractionLog};
pub use memory::{ConversationMemory, Role, Turn};
pub use runtime::TravelAgentRuntime;
