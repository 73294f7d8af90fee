//! Type definitions for the [Google Places Nearby Search API](https://developers.google.com/maps/documentation/places/web-service/search-nearby).
//!
//! These types represent both the request parameters (what we send to the provider)
//! and the response payload (what the provider sends back). Every field the
//! provider may leave out is an explicit `Option` so the normalizer has to decide
//! what absence means.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request types (what we send TO the provider)
// ---------------------------------------------------------------------------

/// Query parameters for `nearbysearch/json`, minus the credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbySearchParams {
    pub location: String,
    pub radius: String,
    #[serde(rename = "type")]
    pub place_type: String,
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opennow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minprice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxprice: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types (what the provider sends back)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySearchResponse {
    pub status: PlacesStatus,
    #[serde(default)]
    pub results: Vec<Place>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Top-level `status` of a Places response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlacesStatus {
    Ok,
    ZeroResults,
    /// INVALID_REQUEST, REQUEST_DENIED, OVER_QUERY_LIMIT, UNKNOWN_ERROR, ...
    Other(String),
}

impl PlacesStatus {
    /// Zero results is not an error.
    pub fn is_success(&self) -> bool {
        matches!(self, PlacesStatus::Ok | PlacesStatus::ZeroResults)
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlacesStatus::Ok => "OK",
            PlacesStatus::ZeroResults => "ZERO_RESULTS",
            PlacesStatus::Other(s) => s,
        }
    }
}

impl From<String> for PlacesStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OK" => PlacesStatus::Ok,
            "ZERO_RESULTS" => PlacesStatus::ZeroResults,
            _ => PlacesStatus::Other(s),
        }
    }
}

impl From<PlacesStatus> for String {
    fn from(status: PlacesStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<Photo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub photo_reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}
