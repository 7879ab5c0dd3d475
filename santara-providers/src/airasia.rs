use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use santara_core::airport;
use santara_core::timeparse::{self, TimeParseError};
use santara_core::{Airline, BaggageInfo, Flight, FlightDuration, FlightLocation, Money, SearchRequest};

use crate::error::ProviderError;
use crate::payload::{AirAsiaFlight, AirAsiaResponse};
use crate::sim::{ProviderSettings, SimulatedBackend};
use crate::Provider;

/// Adapter for the AirAsia backend. Durations arrive as fractional hours
/// and all fares are quoted in IDR.
pub struct AirAsiaProvider {
    backend: SimulatedBackend,
}

impl AirAsiaProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            backend: SimulatedBackend::new(settings),
        }
    }

    fn normalize(&self, record: &AirAsiaFlight) -> Result<Flight, TimeParseError> {
        let departure = timeparse::at_offset(
            timeparse::parse_flexible(&record.depart_time)?,
            airport::timezone_offset(&record.from_airport),
        );
        let arrival = timeparse::at_offset(
            timeparse::parse_flexible(&record.arrive_time)?,
            airport::timezone_offset(&record.to_airport),
        );

        let total_minutes = (record.duration_hours * 60.0) as u32;
        let stops = if record.direct_flight {
            0
        } else {
            record.stops.len() as u32
        };
        let (carry_on, checked) = split_baggage(&record.baggage_note);

        Ok(Flight {
            id: format!("{}_{}", record.flight_code, self.backend.name()),
            provider: self.backend.name().to_string(),
            flight_number: record.flight_code.clone(),
            airline: Airline {
                name: record.airline.clone(),
                code: airport::extract_airline_code(&record.flight_code),
            },
            departure: FlightLocation {
                airport: record.from_airport.clone(),
                city: airport::city_name(&record.from_airport),
                datetime: departure,
                timestamp: departure.timestamp(),
            },
            arrival: FlightLocation {
                airport: record.to_airport.clone(),
                city: airport::city_name(&record.to_airport),
                datetime: arrival,
                timestamp: arrival.timestamp(),
            },
            duration: FlightDuration {
                total_minutes,
                formatted: airport::format_duration(total_minutes),
            },
            stops,
            price: Money {
                amount: record.price_idr,
                currency: "IDR".to_string(),
            },
            cabin_class: record.cabin_class.clone(),
            available_seats: record.seats,
            aircraft: String::new(),
            amenities: Vec::new(),
            baggage: BaggageInfo { carry_on, checked },
        })
    }
}

fn split_baggage(note: &str) -> (String, String) {
    if note.is_empty() {
        return (String::new(), String::new());
    }
    let parts: Vec<&str> = note.split(',').map(str::trim).collect();
    let carry_on = parts.first().unwrap_or(&"").to_string();
    let checked = parts.get(1).unwrap_or(&"").to_string();
    (carry_on, checked)
}

#[async_trait]
impl Provider for AirAsiaProvider {
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

        let response: AirAsiaResponse = self.backend.fetch().await?;

        let mut flights = Vec::with_capacity(response.flights.len());
        for record in &response.flights {
            if record.from_airport != req.origin || record.to_airport != req.destination {
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
