//! Locates, parses, and normalizes the JSON payload embedded in completion
//! output.
//!
//! The completion service is an unreliable text generator: it wraps JSON in
//! prose, mixes key casing, quotes numbers, and leaves trailing commas. The
//! decode step here is deliberately permissive, with the coercion rules
//! documented on each helper. Parse failure never escapes this module as a
//! panic; callers get a typed `AgentError` and convert it to a fallback
//! recommendation at the orchestrator boundary.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use wayfarer_core::domain::recommendation::{
    Activity, City, ExtractedPreferences, Hotel, TravelRecommendation,
};
use wayfarer_core::errors::AgentError;

/// Trims surrounding prose by taking the substring from the first `{` to the
/// last `}` inclusive. Returns `"{}"` when either brace is absent or the
/// last `}` precedes the first `{`.
///
/// This is a cheap heuristic, not a tokenizer: it assumes the model's one
/// JSON object is the outermost brace pair in the response and does not
/// check brace balance.
pub fn extract_json(text: &str) -> String {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => text[start..=end].to_string(),
        _ => "{}".to_string(),
    }
}

/// Parses completion output into a normalized recommendation.
///
/// Tolerates case-mixed keys, numbers encoded as strings, and trailing
/// commas. After a successful parse every collection field is present:
/// absent or null sequences become empty `Vec`s.
pub fn parse_recommendation(json_text: &str) -> Result<TravelRecommendation, AgentError> {
    let cleaned = strip_trailing_commas(json_text);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|error| AgentError::MalformedResponse { message: error.to_string() })?;

    let root = value.as_object().ok_or_else(|| AgentError::MalformedResponse {
        message: "top-level JSON value is not an object".to_string(),
    })?;

    Ok(decode_recommendation(root))
}

/// Removes commas that directly precede a closing `}` or `]`, skipping
/// string contents. serde_json rejects trailing commas outright, and the
/// generator produces them often enough to matter.
fn strip_trailing_commas(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in input.char_indices() {
        if in_string {
            output.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                output.push(ch);
            }
            ',' => {
                let next_structural =
                    input[index + 1..].chars().find(|next| !next.is_whitespace());
                if !matches!(next_structural, Some('}') | Some(']')) {
                    output.push(ch);
                }
            }
            _ => output.push(ch),
        }
    }

    output
}

fn decode_recommendation(root: &Map<String, Value>) -> TravelRecommendation {
    TravelRecommendation {
        recommended_city: field(root, "recommendedCity")
            .and_then(Value::as_object)
            .map(decode_city),
        recommended_hotels: decode_seq(field(root, "recommendedHotels"), decode_hotel),
        recommended_activities: decode_seq(field(root, "recommendedActivities"), decode_activity),
        summary: string_field(root, "summary"),
        extracted_preferences: field(root, "extractedPreferences")
            .and_then(Value::as_object)
            .map(decode_preferences),
    }
}

fn decode_city(object: &Map<String, Value>) -> City {
    City {
        name: string_field(object, "name"),
        country: string_field(object, "country"),
        description: string_field(object, "description"),
        popular_attractions: string_seq_field(object, "popularAttractions"),
        best_time_to_visit: string_field(object, "bestTimeToVisit"),
    }
}

fn decode_hotel(object: &Map<String, Value>) -> Hotel {
    Hotel {
        name: string_field(object, "name"),
        description: string_field(object, "description"),
        price_per_night: decimal_field(object, "pricePerNight"),
        address: string_field(object, "address"),
        star_rating: star_rating_field(object, "starRating"),
        amenities: string_seq_field(object, "amenities"),
        hotel_type: string_field(object, "type"),
        website_url: string_field(object, "websiteUrl"),
    }
}

fn decode_activity(object: &Map<String, Value>) -> Activity {
    Activity {
        name: string_field(object, "name"),
        description: string_field(object, "description"),
        price: decimal_field(object, "price"),
        duration: string_field(object, "duration"),
        category: string_field(object, "category"),
    }
}

fn decode_preferences(object: &Map<String, Value>) -> ExtractedPreferences {
    ExtractedPreferences {
        budget: string_field(object, "budget"),
        dates: string_field(object, "dates"),
        travel_style: string_field(object, "travelStyle"),
        interests: string_seq_field(object, "interests"),
    }
}

/// Case-insensitive key lookup; the exact spelling wins when both exist.
fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    })
}

fn decode_seq<T>(
    value: Option<&Value>,
    decode: fn(&Map<String, Value>) -> T,
) -> Vec<T> {
    match value.and_then(Value::as_array) {
        Some(items) => items.iter().filter_map(Value::as_object).map(decode).collect(),
        None => Vec::new(),
    }
}

/// Strings pass through; numbers and booleans are rendered; null and absent
/// become the empty string.
fn string_field(object: &Map<String, Value>, key: &str) -> String {
    match field(object, key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

fn string_seq_field(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match field(object, key).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
            .collect(),
        None => Vec::new(),
    }
}

/// Accepts JSON numbers and string-encoded numbers (currency symbols and
/// thousands separators stripped). Anything unusable, including negative
/// prices, collapses to zero.
fn decimal_field(object: &Map<String, Value>, key: &str) -> Decimal {
    let value = match field(object, key) {
        Some(value) => value,
        None => return Decimal::ZERO,
    };

    let parsed = match value {
        Value::Number(number) => parse_decimal_text(&number.to_string()),
        Value::String(text) => parse_decimal_text(text),
        _ => None,
    };

    parsed.unwrap_or_default().max(Decimal::ZERO)
}

fn parse_decimal_text(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches(['$', '€', '£'])
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<Decimal>().ok().or_else(|| Decimal::from_scientific(&cleaned).ok())
}

/// Integers pass through, floats truncate toward zero, string-encoded
/// numbers are parsed. Values outside 0..=255 or otherwise unusable become
/// zero; the 1-5 range is expected but not enforced.
fn star_rating_field(object: &Map<String, Value>, key: &str) -> u8 {
    match field(object, key) {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().map(|float| float.max(0.0) as u64))
            .and_then(|raw| u8::try_from(raw).ok())
            .unwrap_or(0),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            trimmed
                .parse::<u8>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|float| float.max(0.0) as u8))
                .unwrap_or(0)
        }
        _ => 0,
    }
}
