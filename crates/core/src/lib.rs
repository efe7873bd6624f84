pub mod config;
pub mod domain;
pub mod errors;

pub use domain::recommendation::{
    Activity, City, ExtractedPreferences, Hotel, TravelRecommendation,
};
pub use errors::{AgentError, CompletionError};
