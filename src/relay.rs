use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::translate::client_types::{SearchParams, SearchQuery, SearchResult};
use crate::translate::normalize::normalize_places;
use crate::translate::places_types::{NearbySearchParams, NearbySearchResponse, Place};
use crate::translate::query::to_nearby_params;

use tracing::{debug, info, warn};

/// Validate, translate, call the provider and normalize. One linear pass, no retry.
pub async fn relay_search(
    params: &SearchParams,
    config: &RelayConfig,
    api_key: &str,
    client: &reqwest::Client,
) -> Result<Vec<SearchResult>> {
    let query = SearchQuery::from_params(params)?;
    let nearby = to_nearby_params(&query);

    let places = search_nearby(&nearby, config, api_key, client).await?;
    let results = normalize_places(&places);

    info!(results = results.len(), "Search completed");
    Ok(results)
}

/// Call Nearby Search and return the raw places.
///
/// # Errors
/// - `Transport` when the call fails or the provider answers with an HTTP error status
/// - `Translation` when the body isn't a Nearby Search payload
/// - `UpstreamStatus` for any status other than OK / ZERO_RESULTS
pub async fn search_nearby(
    params: &NearbySearchParams,
    config: &RelayConfig,
    api_key: &str,
    client: &reqwest::Client,
) -> Result<Vec<Place>> {
    let url = config.nearby_search_url();

    info!(
        url = %url,
        location = %params.location,
        radius = %params.radius,
        keyword = %params.keyword,
        opennow = ?params.opennow,
        minprice = ?params.minprice,
        maxprice = ?params.maxprice,
        "Calling Places Nearby Search"
    );

    let response = client
        .get(&url)
        .query(params)
        .query(&[("key", api_key)])
        .send()
        .await
        .map_err(|e| {
            warn!(error = %e, "Nearby Search request failed");
            RelayError::transport(e.status().map(|s| s.as_u16()), format!("Request failed: {e}"))
        })?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(|e| {
        RelayError::transport(Some(status), format!("Failed to read response body: {e}"))
    })?;

    debug!(status, body_len = body.len(), "Nearby Search responded");

    if status >= 400 {
        warn!(status, body = truncate(&body, 300), "Provider returned HTTP error");
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .unwrap_or_else(|_| serde_json::Value::String(body.clone()));
        return Err(RelayError::transport(Some(status), detail));
    }

    let parsed: NearbySearchResponse = serde_json::from_str(&body).map_err(|e| {
        RelayError::translation(format!(
            "Failed to parse provider response: {}. Body: {}",
            e,
            truncate(&body, 300)
        ))
    })?;

    if !parsed.status.is_success() {
        warn!(
            status = parsed.status.as_str(),
            error_message = ?parsed.error_message,
            "Places API returned an error status"
        );
        return Err(RelayError::upstream_status(
            parsed.status.as_str(),
            parsed.error_message,
        ));
    }

    Ok(parsed.results)
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
