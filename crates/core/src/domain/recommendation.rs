use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wire contract shared with the completion service. Field names follow the
/// JSON schema embedded in the recommendation prompt, so every struct renames
/// to camelCase on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct City {
    pub name: String,
    pub country: String,
    pub description: String,
    pub popular_attractions: Vec<String>,
    pub best_time_to_visit: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hotel {
    pub name: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub address: String,
    /// Expected 1..=5 but not enforced; the generator occasionally strays.
    pub star_rating: u8,
    pub amenities: Vec<String>,
    #[serde(rename = "type")]
    pub hotel_type: String,
    pub website_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration: String,
    pub category: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedPreferences {
    pub budget: String,
    pub dates: String,
    pub travel_style: String,
    pub interests: Vec<String>,
}

/// Root result of one request/response cycle. Always structurally complete
/// once it leaves the extractor: collections are empty rather than absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TravelRecommendation {
    pub recommended_city: Option<City>,
    pub recommended_hotels: Vec<Hotel>,
    pub recommended_activities: Vec<Activity>,
    pub summary: String,
    pub extracted_preferences: Option<ExtractedPreferences>,
}

impl TravelRecommendation {
    /// Fallback for completion output that could not be parsed as JSON.
    pub fn parse_failure(error_message: &str) -> Self {
        Self {
            recommended_city: Some(City {
                name: "Error Processing Response".to_string(),
                country: "Unknown".to_string(),
                description: format!(
                    "There was an error parsing the travel recommendation: {error_message}"
                ),
                ..City::default()
            }),
            summary:
                "I apologize, but I was unable to process the travel recommendation. \
                 Please try rephrasing your request."
                    .to_string(),
            ..Self::default()
        }
    }

    /// Fallback for output that parsed but carried no usable recommendation.
    pub fn empty_result() -> Self {
        Self {
            recommended_city: Some(City {
                name: "Error Processing City".to_string(),
                country: "Unknown".to_string(),
                description: "The response was valid JSON but contained no usable \
                              recommendation data."
                    .to_string(),
                ..City::default()
            }),
            summary:
                "I apologize, but the travel service returned an empty recommendation. \
                 Please try again."
                    .to_string(),
            ..Self::default()
        }
    }

    /// Fallback for any failure in the request cycle itself, completion
    /// service errors included.
    pub fn request_failure(error_message: &str) -> Self {
        Self {
            recommended_city: Some(City {
                name: "Error".to_string(),
                country: "Unknown".to_string(),
                description: "An error occurred while processing your request.".to_string(),
                ..City::default()
            }),
            summary: format!(
                "I apologize, but an error occurred while processing your request: \
                 {error_message}"
            ),
            ..Self::default()
        }
    }

    /// True when nothing recommendable survived parsing. Used by the runtime
    /// to distinguish an empty-but-valid response from a real result.
    pub fn is_empty(&self) -> bool {
        self.recommended_city.is_none()
            && self.recommended_hotels.is_empty()
            && self.recommended_activities.is_empty()
            && self.summary.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{City, Hotel, TravelRecommendation};

    fn hotel() -> Hotel {
        Hotel {
            name: "Hotel Aurora".to_string(),
            description: "Harbourside boutique hotel".to_string(),
            price_per_night: Decimal::new(12050, 2),
            address: "1 Harbour Rd".to_string(),
            star_rating: 4,
            amenities: vec!["wifi".to_string(), "pool".to_string()],
            hotel_type: "hotel".to_string(),
            website_url: "https://example.com".to_string(),
        }
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let recommendation = TravelRecommendation {
            recommended_city: Some(City { name: "Athens".to_string(), ..City::default() }),
            recommended_hotels: vec![hotel()],
            summary: "Enjoy Athens".to_string(),
            ..TravelRecommendation::default()
        };

        let json = serde_json::to_string(&recommendation).expect("serialize");
        assert!(json.contains("\"recommendedCity\""));
        assert!(json.contains("\"recommendedHotels\""));
        assert!(json.contains("\"pricePerNight\""));
        assert!(json.contains("\"starRating\""));
        assert!(json.contains("\"type\":\"hotel\""));
        assert!(!json.contains("hotel_type"));
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let city: City = serde_json::from_str(r#"{"name":"Lisbon"}"#).expect("deserialize");
        assert_eq!(city.name, "Lisbon");
        assert_eq!(city.country, "");
        assert!(city.popular_attractions.is_empty());
    }

    #[test]
    fn fallback_shapes_are_distinguishable_and_complete() {
        let parse = TravelRecommendation::parse_failure("expected value at line 1");
        let empty = TravelRecommendation::empty_result();
        let request = TravelRecommendation::request_failure("connection refused");

        assert_eq!(parse.recommended_city.as_ref().map(|c| c.name.as_str()),
            Some("Error Processing Response"));
        assert_eq!(empty.recommended_city.as_ref().map(|c| c.name.as_str()),
            Some("Error Processing City"));
        assert_eq!(request.recommended_city.as_ref().map(|c| c.name.as_str()), Some("Error"));

        for fallback in [&parse, &empty, &request] {
            assert!(fallback.recommended_hotels.is_empty());
            assert!(fallback.recommended_activities.is_empty());
            assert!(!fallback.summary.is_empty());
        }
        assert!(parse
            .recommended_city
            .as_ref()
            .map(|c| c.description.contains("expected value at line 1"))
            .unwrap_or(false));
        assert!(request.summary.contains("connection refused"));
    }

    #[test]
    fn is_empty_reflects_usable_content() {
        assert!(TravelRecommendation::default().is_empty());
        let with_summary =
            TravelRecommendation { summary: "Go to Kyoto".to_string(), ..Default::default() };
        assert!(!with_summary.is_empty());
    }
}
