use super::client_types::{Category, Coordinates, Location, SearchResult};
use super::places_types::Place;

/// Type tags that say nothing about what kind of food place this is.
pub const NOISE_TYPES: [&str; 3] = ["point_of_interest", "establishment", "food"];

pub const PRICE_SYMBOL: &str = "$";

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1";

/// Translate Nearby Search places into client results, keeping provider order.
pub fn normalize_places(places: &[Place]) -> Vec<SearchResult> {
    places.iter().map(normalize_place).collect()
}

pub fn normalize_place(place: &Place) -> SearchResult {
    let image_url_reference = place
        .photos
        .as_ref()
        .and_then(|photos| photos.first())
        .map(|photo| photo.photo_reference.clone());

    let is_open_now = place.opening_hours.as_ref().and_then(|hours| hours.open_now);

    SearchResult {
        id: place.place_id.clone(),
        name: place.name.clone(),
        image_url_reference,
        is_open_now,
        rating: place.rating.unwrap_or(0.0),
        review_count: place.user_ratings_total.unwrap_or(0),
        price_level: place.price_level,
        price: price_symbol(place.price_level),
        categories: categories_for(place.types.as_deref()),
        coordinates: Coordinates {
            latitude: place.geometry.location.lat,
            longitude: place.geometry.location.lng,
        },
        location: Location::from_vicinity(place.vicinity.as_deref()),
        phone: None,
        display_phone: None,
        website: None,
        url: maps_url(&place.name, &place.place_id),
    }
}

/// Never empty: falls back to a single "restaurant" category.
pub fn categories_for(types: Option<&[String]>) -> Vec<Category> {
    let categories: Vec<Category> = types
        .unwrap_or_default()
        .iter()
        .filter(|t| !NOISE_TYPES.contains(&t.as_str()))
        .map(|t| Category::new(t.as_str(), title_case(t)))
        .collect();

    if categories.is_empty() {
        vec![Category::new("restaurant", "Restaurant")]
    } else {
        categories
    }
}

/// `meal_takeaway` -> `Meal Takeaway`. Only the first letter of each word changes.
pub fn title_case(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut at_word_start = true;

    for c in tag.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

/// Level 0 (free) and unknown levels both render as an empty string.
pub fn price_symbol(level: Option<u8>) -> String {
    match level {
        Some(n) if n > 0 => PRICE_SYMBOL.repeat(usize::from(n)),
        _ => String::new(),
    }
}

pub fn maps_url(name: &str, place_id: &str) -> String {
    format!(
        "{MAPS_SEARCH_URL}&query={}&query_place_id={}",
        urlencoding::encode(name),
        urlencoding::encode(place_id)
    )
}
