use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::flight::Flight;

/// A flight search request as received on the wire.
///
/// Field names are camelCase to match the public JSON contract. Optional
/// fields are omitted when absent so that structurally equal requests
/// serialize identically (the cache fingerprint depends on this).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub passengers: u32,
    pub cabin_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_filters: Option<FilterOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_sort_order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stops: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub airlines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<u32>,
}

/// Hour range in 24-hour local time, inclusive on both ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub search_criteria: SearchCriteria,
    pub metadata: SearchMetadata,
    pub flights: Vec<Flight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_value_flight: Option<Flight>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub return_flights: Vec<Flight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_value_return_flight: Option<Flight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_metadata: Option<SearchMetadata>,
}

/// Echo of the normalized inputs a response was computed for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub passengers: u32,
    pub cabin_class: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub total_results: usize,
    pub providers_queried: usize,
    pub providers_succeeded: usize,
    pub providers_failed: usize,
    pub search_time_ms: u64,
    pub cache_hit: bool,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub provider_results: HashMap<String, usize>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub provider_errors: HashMap<String, String>,
}

/// Error envelope returned by the HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub code: u16,
}
