//! The two fixed prompt templates of the pipeline, rendered with tera.
//!
//! Both render functions are pure string substitution; autoescape is off
//! because prompts are plain text, not HTML.

use tera::{Context, Tera};
use wayfarer_core::errors::AgentError;

const PREFERENCE_EXTRACTION_TEMPLATE: &str = "\
You are a travel preference analyst.

Review the conversation below and extract the traveler's preferences.

Conversation:
{{ transcript }}

Respond with ONLY a JSON object in exactly this shape and nothing else:
{ \"budget\": \"\", \"dates\": \"\", \"interests\": [\"...\"], \"travelStyle\": \"\" }

Leave a field as an empty string or empty array when the conversation does \
not mention it.
";

const RECOMMENDATION_TEMPLATE: &str = r#"You are an expert travel agent. Produce a travel recommendation as a single JSON object with exactly this structure:

{
  "recommendedCity": {
    "name": "...",
    "country": "...",
    "description": "...",
    "popularAttractions": ["..."],
    "bestTimeToVisit": "..."
  },
  "recommendedHotels": [
    {
      "name": "...",
      "description": "...",
      "pricePerNight": 0.00,
      "starRating": 0,
      "amenities": ["..."],
      "type": "...",
      "websiteUrl": "...",
      "address": "..."
    }
  ],
  "recommendedActivities": [
    {
      "name": "...",
      "description": "...",
      "price": 0.00,
      "duration": "...",
      "category": "..."
    }
  ],
  "summary": "...",
  "extractedPreferences": {
    "budget": "...",
    "dates": "...",
    "interests": ["..."],
    "travelStyle": "..."
  }
}

Follow these rules strictly:
1. Respond with the JSON object only. No prose, no markdown fences, nothing before or after it.
2. Once a city has been discussed, keep recommending that same city in every follow-up answer unless the user explicitly names a new city, and always re-emit the full recommendedCity fields.
3. If the user asked for a specific accommodation type (hostel, resort, apartment, bed and breakfast, ...), return only accommodations of that type and set the "type" field accordingly. Use a real booking website when you know one; otherwise use https://www.google.com/search?q=<Hotel>+<City>+booking with the hotel and city names substituted.
4. Carry budget, location, dates, interests, and travel style from earlier turns into extractedPreferences unless the user has overridden them.
5. All prices are numbers with two decimal places. Star ratings are integers.

Conversation so far:
{{ transcript }}

Preferences extracted from the conversation:
{{ preferences }}

Current request:
{{ query }}
"#;

/// Stage 1: asks the model for the small preferences JSON object given the
/// rendered transcript.
pub fn preference_extraction_prompt(transcript: &str) -> Result<String, AgentError> {
    let mut context = Context::new();
    context.insert("transcript", transcript);
    render(PREFERENCE_EXTRACTION_TEMPLATE, &context)
}

/// Stage 2: embeds the schema, the strict generation rules, the transcript,
/// the stage-1 preferences JSON, and the current user query.
pub fn recommendation_prompt(
    transcript: &str,
    preferences_json: &str,
    query: &str,
) -> Result<String, AgentError> {
    let mut context = Context::new();
    context.insert("transcript", transcript);
    context.insert("preferences", preferences_json);
    context.insert("query", query);
    render(RECOMMENDATION_TEMPLATE, &context)
}

fn render(template: &str, context: &Context) -> Result<String, AgentError> {
    Tera::one_off(template, context, false)
        .map_err(|error| AgentError::Template(error.to_string()))
}
