use thiserror::Error;

use crate::domain::recommendation::TravelRecommendation;

/// Failure of a single completion-service invocation. The pipeline carries
/// no retry or backoff layer, so whatever the transport reports is final for
/// that request cycle.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(String),
    #[error("completion service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("completion response carried no choices")]
    EmptyResponse,
}

/// Everything that can go wrong inside one request/response cycle. These are
/// values, not raised errors: the runtime converts each variant into a
/// structurally complete fallback recommendation and the caller never sees
/// an error type.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("completion output was not parseable JSON: {message}")]
    MalformedResponse { message: String },
    #[error("completion output parsed but contained no usable recommendation")]
    EmptyResult,
    #[error("prompt template rendering failed: {0}")]
    Template(String),
}

impl AgentError {
    /// Maps each failure class to its fallback shape. Parse failures and
    /// empty results keep distinguishable cities so operators can tell the
    /// two apart in transcripts; everything else collapses into the generic
    /// request-failure shape.
    pub fn into_fallback(self) -> TravelRecommendation {
        match self {
            Self::MalformedResponse { message } => TravelRecommendation::parse_failure(&message),
            Self::EmptyResult => TravelRecommendation::empty_result(),
            Self::Completion(error) => TravelRecommendation::request_failure(&error.to_string()),
            Self::Template(message) => TravelRecommendation::request_failure(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AgentError, CompletionError};

    #[test]
    fn malformed_response_falls_back_to_parse_failure_city() {
        let fallback = AgentError::MalformedResponse {
            message: "expected value at line 1 column 2".to_string(),
        }
        .into_fallback();

        let city = fallback.recommended_city.expect("fallback city");
        assert_eq!(city.name, "Error Processing Response");
        assert!(city.description.contains("expected value at line 1 column 2"));
    }

    #[test]
    fn completion_failure_surfaces_in_summary() {
        let fallback = AgentError::Completion(CompletionError::Status {
            status: 429,
            body: "rate limit exceeded".to_string(),
        })
        .into_fallback();

        assert_eq!(fallback.recommended_city.expect("city").name, "Error");
        assert!(fallback.summary.contains("429"));
        assert!(fallback.summary.contains("rate limit exceeded"));
    }

    #[test]
    fn empty_result_keeps_its_own_city() {
        let fallback = AgentError::EmptyResult.into_fallback();
        assert_eq!(fallback.recommended_city.expect("city").name, "Error Processing City");
    }
}
