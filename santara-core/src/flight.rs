use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Unified flight record shared across all providers.
///
/// `id` is `"{flight_number}_{provider}"` and is unique within a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    pub id: String,
    pub provider: String,
    pub flight_number: String,
    pub airline: Airline,
    pub departure: FlightLocation,
    pub arrival: FlightLocation,
    pub duration: FlightDuration,
    pub stops: u32,
    pub price: Money,
    pub cabin_class: String,
    pub available_seats: i32,
    pub aircraft: String,
    pub amenities: Vec<String>,
    pub baggage: BaggageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Airline {
    pub name: String,
    pub code: String,
}

/// Departure or arrival point of a flight.
///
/// `datetime` carries the airport-local offset; `timestamp` is the same
/// instant as Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightLocation {
    pub airport: String,
    pub city: String,
    pub datetime: DateTime<FixedOffset>,
    pub timestamp: i64,
}

/// Provider-reported flight duration. `total_minutes` is what the backend
/// stated, never derived from the departure/arrival timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightDuration {
    pub total_minutes: u32,
    pub formatted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaggageInfo {
    pub carry_on: String,
    pub checked: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport;
    use crate::timeparse;

    #[test]
    fn flight_serializes_with_offset_datetime() {
        let departure = timeparse::at_offset(
            timeparse::parse_flexible("2025-12-15T08:30:00").unwrap(),
            airport::timezone_offset("CGK"),
        );
        let location = FlightLocation {
            airport: "CGK".to_string(),
            city: "Jakarta".to_string(),
            datetime: departure,
            timestamp: departure.timestamp(),
        };

        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["airport"], "CGK");
        assert_eq!(json["datetime"], "2025-12-15T08:30:00+07:00");
    }
}
