//! Client-facing request and response types.
//!
//! `SearchParams` is what arrives on the query string, `SearchQuery` is the
//! validated form, and `SearchResult` is the stable schema clients consume.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Raw query string. Everything is optional text so validation can report
/// exactly which parameter is wrong.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub radius_in_miles: Option<String>,
    pub open_now: Option<String>,
    pub price_levels: Option<String>,
    pub cuisine_keywords: Option<String>,
}

/// A finite coordinate that remembers how the client wrote it, so
/// `40.7128,-74.0060` reaches the provider unchanged. Only plain decimal
/// spellings are kept; anything else (`4e1`, `+40`) renders from the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    value: f64,
    literal: Option<String>,
}

impl Coordinate {
    pub fn new(value: f64, literal: &str) -> Self {
        Self {
            value,
            literal: is_plain_decimal(literal).then(|| literal.to_string()),
        }
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Self {
            value,
            literal: None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => f.write_str(literal),
            None => write!(f, "{}", self.value),
        }
    }
}

/// `-?digits(.digits)?`
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    pub radius_in_miles: f64,
    pub open_now: bool,
    /// Parsed as given; out-of-range levels are dropped during translation.
    pub price_levels: Vec<i64>,
    pub cuisine_keywords: Vec<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub image_url_reference: Option<String>,
    /// `None` means the provider sent no opening hours, not "closed".
    pub is_open_now: Option<bool>,
    pub rating: f64,
    pub review_count: u64,
    pub price_level: Option<u8>,
    pub price: String,
    pub categories: Vec<Category>,
    pub coordinates: Coordinates,
    pub location: Location,
    pub phone: Option<String>,
    pub display_phone: Option<String>,
    pub website: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub alias: String,
    pub title: String,
}

impl Category {
    pub fn new(alias: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Nearby Search only returns `vicinity`; the structured address fields
/// need a Place Details call and are always null here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub formatted_address: Option<String>,
    pub display_address: Vec<String>,
}

impl Location {
    pub fn from_vicinity(vicinity: Option<&str>) -> Self {
        Self {
            address1: vicinity.map(str::to_string),
            city: None,
            state: None,
            zip_code: None,
            country: None,
            formatted_address: vicinity.map(str::to_string),
            display_address: vicinity.map(|v| vec![v.to_string()]).unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
    /// Provider status, when the provider itself reported the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
            status: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<serde_json::Value>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}
