use chrono::Timelike;

use santara_core::{FilterOptions, Flight, TimeRange};

/// Pure, composable post-aggregation filtering. Sub-filters apply in a fixed
/// order (price, stops, departure hour, arrival hour, max duration) and each
/// preserves the relative order of survivors.
///
/// The `airlines` filter is intentionally absent: the aggregator already
/// uses it for provider pre-selection.
#[derive(Debug, Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, mut flights: Vec<Flight>, filters: &FilterOptions) -> Vec<Flight> {
        if filters.min_price.is_some() || filters.max_price.is_some() {
            flights.retain(|f| {
                filters.min_price.map_or(true, |min| f.price.amount >= min)
                    && filters.max_price.map_or(true, |max| f.price.amount <= max)
            });
        }

        if let Some(max_stops) = filters.max_stops {
            flights.retain(|f| f.stops <= max_stops);
        }

        if let Some(range) = filters.departure_time {
            flights.retain(|f| hour_in_range(f.departure.datetime.hour(), range));
        }

        if let Some(range) = filters.arrival_time {
            flights.retain(|f| hour_in_range(f.arrival.datetime.hour(), range));
        }

        if let Some(max_duration) = filters.max_duration {
            flights.retain(|f| f.duration.total_minutes <= max_duration);
        }

        flights
    }
}

/// Inclusive on both ends, evaluated on the flight's local hour.
fn hour_in_range(hour: u32, range: TimeRange) -> bool {
    hour >= range.start && hour <= range.end
}
