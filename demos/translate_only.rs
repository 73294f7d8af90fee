//! Demonstrate the translation layer without a server or API key.
//!
//! Usage:
//!   `cargo run --example translate_only`

use restaurant_relay::translate::client_types::{SearchParams, SearchQuery};
use restaurant_relay::translate::normalize::normalize_places;
use restaurant_relay::translate::places_types::NearbySearchResponse;
use restaurant_relay::translate::query::to_nearby_params;

fn main() {
    println!("=== Client query -> Nearby Search params ===\n");

    let params = SearchParams {
        latitude: Some("40.7128".to_string()),
        longitude: Some("-74.0060".to_string()),
        radius_in_miles: Some("1.5".to_string()),
        open_now: Some("true".to_string()),
        price_levels: Some("1,2,9".to_string()),
        cuisine_keywords: Some("thai,noodles".to_string()),
    };

    let query = match SearchQuery::from_params(&params) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Invalid query: {e}");
            return;
        }
    };
    let nearby = to_nearby_params(&query);

    println!(
        "{}",
        serde_json::to_string_pretty(&nearby).unwrap_or_default()
    );

    println!("\n=== Nearby Search response -> client results ===\n");

    let payload = serde_json::json!({
        "status": "OK",
        "results": [{
            "place_id": "ChIJdemo",
            "name": "Pad Thai Palace",
            "price_level": 2,
            "rating": 4.5,
            "user_ratings_total": 87,
            "types": ["thai_restaurant", "restaurant", "food", "point_of_interest", "establishment"],
            "geometry": {"location": {"lat": 40.714, "lng": -74.005}},
            "vicinity": "12 Park Row, New York"
        }]
    });

    let response: NearbySearchResponse = match serde_json::from_value(payload) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Bad payload: {e}");
            return;
        }
    };

    let results = normalize_places(&response.results);
    println!(
        "{}",
        serde_json::to_string_pretty(&results).unwrap_or_default()
    );
}
