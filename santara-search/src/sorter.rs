use std::cmp::Ordering;

use santara_core::Flight;

/// Stable sorting over the unified flight list. Ties keep their input
/// order, so repeated sorts are deterministic for identical inputs.
#[derive(Debug, Default)]
pub struct Sorter;

impl Sorter {
    pub fn new() -> Self {
        Self
    }

    /// Sorts by `sort_by` ("price", "duration", "departure", "arrival",
    /// "stops"); unknown keys default to price. Ascending unless
    /// `sort_order` is "desc".
    pub fn sort(&self, mut flights: Vec<Flight>, sort_by: &str, sort_order: &str) -> Vec<Flight> {
        let ascending = sort_order != "desc";

        let compare: fn(&Flight, &Flight) -> Ordering = match sort_by {
            "duration" => |a, b| a.duration.total_minutes.cmp(&b.duration.total_minutes),
            "departure" => |a, b| a.departure.datetime.cmp(&b.departure.datetime),
            "arrival" => |a, b| a.arrival.datetime.cmp(&b.arrival.datetime),
            "stops" => |a, b| a.stops.cmp(&b.stops),
            // "price" and anything unknown
            _ => |a, b| {
                a.price
                    .amount
                    .partial_cmp(&b.price.amount)
                    .unwrap_or(Ordering::Equal)
            },
        };

        if ascending {
            flights.sort_by(compare);
        } else {
            flights.sort_by(|a, b| compare(b, a));
        }
        flights
    }
}
