//! Translate client search parameters into Google Places Nearby Search parameters.
//!
//! Validation (`SearchQuery::from_params`) and translation (`to_nearby_params`)
//! are separate steps; neither touches the network.

use super::client_types::{Coordinate, SearchParams, SearchQuery};
use super::places_types::NearbySearchParams;
use crate::error::{RelayError, Result};

pub const METERS_PER_MILE: f64 = 1609.34;

pub const BASE_KEYWORD: &str = "restaurant";
pub const PLACE_TYPE: &str = "restaurant";

pub const MIN_PRICE_LEVEL: i64 = 0;
pub const MAX_PRICE_LEVEL: i64 = 4;

impl SearchQuery {
    /// Validate raw query parameters.
    ///
    /// # Errors
    /// Returns `RelayError::Validation` when latitude, longitude or radius is
    /// missing, not a finite number, or out of range.
    pub fn from_params(params: &SearchParams) -> Result<Self> {
        let latitude = parse_coordinate("latitude", params.latitude.as_deref(), 90.0)?;
        let longitude = parse_coordinate("longitude", params.longitude.as_deref(), 180.0)?;

        let radius_in_miles = parse_finite("radiusInMiles", params.radius_in_miles.as_deref())?.0;
        if radius_in_miles <= 0.0 {
            return Err(RelayError::validation(format!(
                "radiusInMiles must be greater than 0, got {radius_in_miles}"
            )));
        }
        if !miles_to_meters(radius_in_miles).is_finite() {
            return Err(RelayError::validation(format!(
                "radiusInMiles is too large, got {radius_in_miles}"
            )));
        }

        let open_now = params.open_now.as_deref() == Some("true");

        let price_levels = params
            .price_levels
            .as_deref()
            .map(parse_price_levels)
            .unwrap_or_default();

        let cuisine_keywords = params
            .cuisine_keywords
            .as_deref()
            .map(split_keywords)
            .unwrap_or_default();

        Ok(Self {
            latitude,
            longitude,
            radius_in_miles,
            open_now,
            price_levels,
            cuisine_keywords,
        })
    }
}

/// Translate a validated query into the provider's parameter set.
/// Pure function: the credential is attached later by the provider client.
pub fn to_nearby_params(query: &SearchQuery) -> NearbySearchParams {
    let (minprice, maxprice) = match price_bounds(&query.price_levels) {
        Some((min, max)) => (Some(min.to_string()), Some(max.to_string())),
        None => (None, None),
    };

    NearbySearchParams {
        location: format!("{},{}", query.latitude, query.longitude),
        radius: miles_to_meters(query.radius_in_miles).to_string(),
        place_type: PLACE_TYPE.to_string(),
        keyword: build_keyword(&query.cuisine_keywords),
        opennow: query.open_now.then(|| "true".to_string()),
        minprice,
        maxprice,
    }
}

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

/// Min and max of the levels inside [0, 4], or `None` if nothing valid remains.
pub fn price_bounds(levels: &[i64]) -> Option<(i64, i64)> {
    let mut valid = levels
        .iter()
        .copied()
        .filter(|p| (MIN_PRICE_LEVEL..=MAX_PRICE_LEVEL).contains(p));

    let first = valid.next()?;
    Some(valid.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
}

pub fn build_keyword(cuisines: &[String]) -> String {
    std::iter::once(BASE_KEYWORD)
        .chain(cuisines.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_finite<'a>(name: &str, raw: Option<&'a str>) -> Result<(f64, &'a str)> {
    let text = raw
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RelayError::validation(format!("Missing required parameter '{name}'")))?;

    let value: f64 = text.parse().map_err(|_| {
        RelayError::validation(format!("Parameter '{name}' is not a number: {text:?}"))
    })?;

    if !value.is_finite() {
        return Err(RelayError::validation(format!(
            "Parameter '{name}' must be a finite number: {text:?}"
        )));
    }

    Ok((value, text))
}

fn parse_coordinate(name: &str, raw: Option<&str>, limit: f64) -> Result<Coordinate> {
    let (value, text) = parse_finite(name, raw)?;
    if !(-limit..=limit).contains(&value) {
        return Err(RelayError::validation(format!(
            "Parameter '{name}' must be between -{limit} and {limit}, got {text}"
        )));
    }
    Ok(Coordinate::new(value, text))
}

/// Unparseable entries are skipped rather than failing the request.
fn parse_price_levels(raw: &str) -> Vec<i64> {
    raw.split(',').filter_map(leading_integer).collect()
}

/// Integer prefix of an entry, so `2.0` and `3abc` count as 2 and 3.
fn leading_integer(entry: &str) -> Option<i64> {
    let entry = entry.trim();
    let sign_len = usize::from(entry.starts_with(['-', '+']));
    let digits_len = entry[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return None;
    }
    entry[..sign_len + digits_len].parse().ok()
}

fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lat: &str, lng: &str, radius: &str) -> SearchParams {
        SearchParams {
            latitude: Some(lat.to_string()),
            longitude: Some(lng.to_string()),
            radius_in_miles: Some(radius.to_string()),
            ..SearchParams::default()
        }
    }

    fn translate(p: &SearchParams) -> NearbySearchParams {
        to_nearby_params(&SearchQuery::from_params(p).unwrap())
    }

    #[test]
    fn test_full_scenario() {
        let mut p = params("40.7128", "-74.0060", "1");
        p.open_now = Some("true".to_string());
        p.price_levels = Some("1,3".to_string());

        let result = translate(&p);

        assert_eq!(result.location, "40.7128,-74.0060");
        assert_eq!(result.radius, "1609.34");
        assert_eq!(result.place_type, "restaurant");
        assert_eq!(result.keyword, "restaurant");
        assert_eq!(result.opennow.as_deref(), Some("true"));
        assert_eq!(result.minprice.as_deref(), Some("1"));
        assert_eq!(result.maxprice.as_deref(), Some("3"));
    }

    #[test]
    fn test_radius_uses_exact_factor() {
        assert_eq!(METERS_PER_MILE, 1609.34);
        assert_eq!(miles_to_meters(2.0), 3218.68);
        assert_eq!(translate(&params("0", "0", "2")).radius, "3218.68");
        assert_eq!(translate(&params("0", "0", "2.0")).radius, "3218.68");
    }

    #[test]
    fn test_open_now_only_when_true() {
        let mut p = params("0", "0", "1");
        assert!(translate(&p).opennow.is_none());

        p.open_now = Some("false".to_string());
        assert!(translate(&p).opennow.is_none());

        p.open_now = Some("TRUE".to_string());
        assert!(translate(&p).opennow.is_none());
    }

    #[test]
    fn test_out_of_range_prices_are_dropped() {
        let mut p = params("0", "0", "1");
        p.price_levels = Some("-1, 2, 5, 4".to_string());
        let result = translate(&p);
        assert_eq!(result.minprice.as_deref(), Some("2"));
        assert_eq!(result.maxprice.as_deref(), Some("4"));
    }

    #[test]
    fn test_all_invalid_prices_omit_filter() {
        let mut p = params("0", "0", "1");
        p.price_levels = Some("-1,5,cheap,".to_string());
        let result = translate(&p);
        assert!(result.minprice.is_none());
        assert!(result.maxprice.is_none());
    }

    #[test]
    fn test_price_levels_use_integer_prefix() {
        assert_eq!(parse_price_levels("2.0, 3abc, +1, -1, x, "), vec![2, 3, 1, -1]);

        let mut p = params("0", "0", "1");
        p.price_levels = Some("2.0,4.5".to_string());
        let result = translate(&p);
        assert_eq!(result.minprice.as_deref(), Some("2"));
        assert_eq!(result.maxprice.as_deref(), Some("4"));
    }

    #[test]
    fn test_single_price_level_is_both_bounds() {
        assert_eq!(price_bounds(&[0]), Some((0, 0)));
        assert_eq!(price_bounds(&[]), None);
    }

    #[test]
    fn test_cuisine_keywords_appended() {
        let mut p = params("0", "0", "1");
        p.cuisine_keywords = Some("thai,sushi, korean bbq".to_string());
        assert_eq!(translate(&p).keyword, "restaurant thai sushi korean bbq");

        p.cuisine_keywords = Some(" , ".to_string());
        assert_eq!(translate(&p).keyword, "restaurant");
    }

    #[test]
    fn test_missing_latitude_is_validation_error() {
        let mut p = params("0", "0", "1");
        p.latitude = None;
        let err = SearchQuery::from_params(&p).unwrap_err();
        assert!(matches!(err, RelayError::Validation { .. }));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_non_numeric_values_rejected() {
        for (lat, lng, radius) in [
            ("abc", "0", "1"),
            ("0", "12x", "1"),
            ("0", "0", "far"),
            ("NaN", "0", "1"),
            ("0", "inf", "1"),
            ("", "0", "1"),
        ] {
            let err = SearchQuery::from_params(&params(lat, lng, radius)).unwrap_err();
            assert!(
                matches!(err, RelayError::Validation { .. }),
                "expected validation error for ({lat}, {lng}, {radius})"
            );
        }
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        assert!(SearchQuery::from_params(&params("0", "0", "0")).is_err());
        assert!(SearchQuery::from_params(&params("0", "0", "-2")).is_err());
    }

    #[test]
    fn test_radius_overflowing_meters_rejected() {
        let err = SearchQuery::from_params(&params("0", "0", "1e306")).unwrap_err();
        assert!(matches!(err, RelayError::Validation { .. }));
        assert!(err.to_string().contains("radiusInMiles"));

        assert_eq!(translate(&params("0", "0", "1e300")).radius, (1e300 * METERS_PER_MILE).to_string());
    }

    #[test]
    fn test_exponent_coordinates_rendered_as_numbers() {
        let result = translate(&params("4e1", "-7.4e1", "1"));
        assert_eq!(result.location, "40,-74");
    }

    #[test]
    fn test_coordinates_out_of_range_rejected() {
        assert!(SearchQuery::from_params(&params("91", "0", "1")).is_err());
        assert!(SearchQuery::from_params(&params("0", "-180.5", "1")).is_err());
        assert!(SearchQuery::from_params(&params("-90", "180", "1")).is_ok());
    }
}
