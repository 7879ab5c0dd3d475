use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use santara_core::airport;
use santara_core::timeparse::{self, TimeParseError};
use santara_core::{Airline, BaggageInfo, Flight, FlightDuration, FlightLocation, Money, SearchRequest};

use crate::error::ProviderError;
use crate::payload::{BatikFlight, BatikResponse};
use crate::sim::{ProviderSettings, SimulatedBackend};
use crate::Provider;

/// Adapter for the Batik Air backend, which reports travel time as
/// "Nh Mm" text and baggage as a single comma-separated string.
pub struct BatikProvider {
    backend: SimulatedBackend,
}

impl BatikProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            backend: SimulatedBackend::new(settings),
        }
    }

    fn normalize(&self, record: &BatikFlight) -> Result<Flight, TimeParseError> {
        let departure = timeparse::at_offset(
            timeparse::parse_flexible(&record.departure_date_time)?,
            airport::timezone_offset(&record.origin),
        );
        let arrival = timeparse::at_offset(
            timeparse::parse_flexible(&record.arrival_date_time)?,
            airport::timezone_offset(&record.destination),
        );

        let total_minutes = timeparse::parse_travel_time(&record.travel_time);
        let (carry_on, checked) = split_baggage(&record.baggage_info);

        Ok(Flight {
            id: format!("{}_{}", record.flight_number, self.backend.name()),
            provider: self.backend.name().to_string(),
            flight_number: record.flight_number.clone(),
            airline: Airline {
                name: record.airline_name.clone(),
                code: airport::extract_airline_code(&record.flight_number),
            },
            departure: FlightLocation {
                airport: record.origin.clone(),
                city: airport::city_name(&record.origin),
                datetime: departure,
                timestamp: departure.timestamp(),
            },
            arrival: FlightLocation {
                airport: record.destination.clone(),
                city: airport::city_name(&record.destination),
                datetime: arrival,
                timestamp: arrival.timestamp(),
            },
            duration: FlightDuration {
                total_minutes,
                formatted: airport::format_duration(total_minutes),
            },
            stops: record.number_of_stops,
            price: Money {
                amount: record.fare.total_price,
                currency: record.fare.currency_code.clone(),
            },
            cabin_class: record.fare.class.clone(),
            available_seats: record.seats_available,
            aircraft: record.aircraft_model.clone(),
            amenities: record.onboard_services.clone(),
            baggage: BaggageInfo { carry_on, checked },
        })
    }
}

/// First comma-separated segment is carry-on, second is checked. A single
/// segment describes the checked allowance; carry-on gets a stock value.
fn split_baggage(info: &str) -> (String, String) {
    if info.is_empty() {
        return (String::new(), String::new());
    }
    let parts: Vec<&str> = info.split(',').map(str::trim).collect();
    if parts.len() >= 2 {
        (parts[0].to_string(), parts[1].to_string())
    } else {
        ("Standard baggage".to_string(), parts[0].to_string())
    }
}

#[async_trait]
impl Provider for BatikProvider {
    fn name(&self) -> &str {
        self.backend.name()
    }

    async fn search(
        &self,
        cancel: &CancellationToken,
        req: &SearchRequest,
    ) -> Result<Vec<Flight>, ProviderError> {
        self.backend.delay(cancel).await?;
        self.backend.inject_failure()?;

        let response: BatikResponse = self.backend.fetch().await?;
        if response.code != 200 {
            return Err(ProviderError::InvalidResponse {
                provider: self.name().to_string(),
                reason: format!("unsuccessful response code: {}", response.code),
            });
        }

        let mut flights = Vec::with_capacity(response.results.len());
        for record in &response.results {
            if record.origin != req.origin || record.destination != req.destination {
                continue;
            }
            let flight = match self.normalize(record) {
                Ok(flight) => flight,
                Err(err) => {
                    tracing::debug!(provider = self.name(), %err, "skipping malformed record");
                    continue;
                }
            };
            if flight.departure.datetime.format("%Y-%m-%d").to_string() != req.departure_date {
                continue;
            }
            flights.push(flight);
        }

        if flights.is_empty() {
            return Err(ProviderError::NoFlights);
        }
        Ok(flights)
    }

    fn health_check(&self) -> bool {
        self.backend.healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::BatikFare;
    use std::path::PathBuf;
    use std::time::Duration;

    fn provider() -> BatikProvider {
        BatikProvider::new(ProviderSettings {
            name: "Batik Air".to_string(),
            response_time: Duration::ZERO,
            failure_rate: 0.0,
            data_path: PathBuf::new(),
        })
    }

    fn record() -> BatikFlight {
        BatikFlight {
            flight_number: "ID7520".to_string(),
            airline_name: "Batik Air".to_string(),
            origin: "CGK".to_string(),
            destination: "DPS".to_string(),
            departure_date_time: "2025-12-15T09:15:00+07:00".to_string(),
            arrival_date_time: "2025-12-15T12:05:00+08:00".to_string(),
            travel_time: "1h 50m".to_string(),
            number_of_stops: 0,
            fare: BatikFare {
                total_price: 1_050_000.0,
                currency_code: "IDR".to_string(),
                class: "economy".to_string(),
            },
            seats_available: 30,
            aircraft_model: "Airbus A320".to_string(),
            baggage_info: "7kg cabin, 20kg checked".to_string(),
            onboard_services: vec!["In-flight entertainment".to_string()],
        }
    }

    #[test]
    fn travel_time_text_becomes_minutes() {
        let flight = provider().normalize(&record()).unwrap();
        assert_eq!(flight.duration.total_minutes, 110);
        assert_eq!(flight.duration.formatted, "1h 50m");
    }

    #[test]
    fn explicit_offsets_are_restamped_as_airport_wall_clock() {
        let flight = provider().normalize(&record()).unwrap();
        // Offsets in the payload are treated as wall clock in the airport
        // zone, so +07:00 on a CGK departure survives unchanged.
        assert_eq!(
            flight.departure.datetime.to_rfc3339(),
            "2025-12-15T09:15:00+07:00"
        );
        assert_eq!(
            flight.arrival.datetime.to_rfc3339(),
            "2025-12-15T12:05:00+08:00"
        );
    }

    #[test]
    fn baggage_splitting_rules() {
        assert_eq!(
            split_baggage("7kg cabin, 20kg checked"),
            ("7kg cabin".to_string(), "20kg checked".to_string())
        );
        assert_eq!(
            split_baggage("25kg total"),
            ("Standard baggage".to_string(), "25kg total".to_string())
        );
        assert_eq!(split_baggage(""), (String::new(), String::new()));
    }
}
