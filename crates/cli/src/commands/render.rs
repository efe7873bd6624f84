use wayfarer_core::domain::recommendation::TravelRecommendation;

/// Human-readable rendering shared by `chat` and `ask`.
pub(crate) fn recommendation_text(recommendation: &TravelRecommendation) -> String {
    let mut lines = Vec::new();

    if let Some(city) = &recommendation.recommended_city {
        if city.country.is_empty() {
            lines.push(city.name.clone());
        } else {
            lines.push(format!("{}, {}", city.name, city.country));
        }
        if !city.description.is_empty() {
            lines.push(city.description.clone());
        }
        if !city.popular_attractions.is_empty() {
            lines.push(format!("Top attractions: {}", city.popular_attractions.join(", ")));
        }
        if !city.best_time_to_visit.is_empty() {
            lines.push(format!("Best time to visit: {}", city.best_time_to_visit));
        }
    }

    if !recommendation.recommended_hotels.is_empty() {
        lines.push(String::new());
        lines.push("Where to stay:".to_string());
        for hotel in &recommendation.recommended_hotels {
            let mut line = format!("  - {}", hotel.name);
            if !hotel.hotel_type.is_empty() {
                line.push_str(&format!(" ({})", hotel.hotel_type));
            }
            line.push_str(&format!(", {} per night", hotel.price_per_night));
            if hotel.star_rating > 0 {
                line.push_str(&format!(", {} stars", hotel.star_rating));
            }
            lines.push(line);
            if !hotel.address.is_empty() {
                lines.push(format!("    {}", hotel.address));
            }
            if !hotel.amenities.is_empty() {
                lines.push(format!("    Amenities: {}", hotel.amenities.join(", ")));
            }
            if !hotel.website_url.is_empty() {
                lines.push(format!("    {}", hotel.website_url));
            }
        }
    }

    if !recommendation.recommended_activities.is_empty() {
        lines.push(String::new());
        lines.push("Things to do:".to_string());
        for activity in &recommendation.recommended_activities {
            let mut line = format!("  - {}", activity.name);
            if !activity.duration.is_empty() {
                line.push_str(&format!(" ({})", activity.duration));
            }
            line.push_str(&format!(", {}", activity.price));
            if !activity.category.is_empty() {
                line.push_str(&format!(" [{}]", activity.category));
            }
            lines.push(line);
        }
    }

    if !recommendation.summary.is_empty() {
        lines.push(String::new());
        lines.push(recommendation.summary.clone());
    }

    if lines.is_empty() {
        lines.push("No recommendation available.".to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use wayfarer_core::domain::recommendation::{City, Hotel, TravelRecommendation};

    use super::recommendation_text;

    #[test]
    fn renders_city_hotels_and_summary() {
        let recommendation = TravelRecommendation {
            recommended_city: Some(City {
                name: "Athens".to_string(),
                country: "Greece".to_string(),
                description: "Sunny capital".to_string(),
                popular_attractions: vec!["Acropolis".to_string()],
                best_time_to_visit: "June".to_string(),
            }),
            recommended_hotels: vec![Hotel {
                name: "Aegean Backpackers".to_string(),
                hotel_type: "hostel".to_string(),
                star_rating: 2,
                ..Hotel::default()
            }],
            summary: "Budget beach trip.".to_string(),
            ..TravelRecommendation::default()
        };

        let text = recommendation_text(&recommendation);
        assert!(text.starts_with("Athens, Greece"));
        assert!(text.contains("Top attractions: Acropolis"));
        assert!(text.contains("Aegean Backpackers (hostel)"));
        assert!(text.contains("2 stars"));
        assert!(text.ends_with("Budget beach trip."));
    }

    #[test]
    fn empty_recommendation_has_placeholder() {
        let text = recommendation_text(&TravelRecommendation::default());
        assert_eq!(text, "No recommendation available.");
    }
}
