use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use santara_core::airport;
use santara_core::timeparse::{self, TimeParseError};
use santara_core::{Airline, BaggageInfo, Flight, FlightDuration, FlightLocation, Money, SearchRequest};

use crate::error::ProviderError;
use crate::payload::{GarudaFlight, GarudaResponse};
use crate::sim::{ProviderSettings, SimulatedBackend};
use crate::Provider;

/// Adapter for the Garuda Indonesia backend.
pub struct GarudaProvider {
    backend: SimulatedBackend,
}

impl GarudaProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            backend: SimulatedBackend::new(settings),
        }
    }

    fn normalize(&self, record: &GarudaFlight) -> Result<Flight, TimeParseError> {
        let departure_offset = airport::timezone_offset(&record.departure.airport);
        let departure = timeparse::at_offset(
            timeparse::parse_flexible(&record.departure.time)?,
            departure_offset,
        );
        let arrival = timeparse::at_offset(
            timeparse::parse_flexible(&record.arrival.time)?,
            airport::timezone_offset(&record.arrival.airport),
        );

        Ok(Flight {
            id: format!("{}_{}", record.flight_id, self.backend.name()),
            provider: self.backend.name().to_string(),
            flight_number: record.flight_id.clone(),
            airline: Airline {
                name: record.airline.clone(),
                code: airport::extract_airline_code(&record.flight_id),
            },
            departure: FlightLocation {
                airport: record.departure.airport.clone(),
                city: airport::city_name(&record.departure.airport),
                datetime: departure,
                timestamp: departure.timestamp(),
            },
            arrival: FlightLocation {
                airport: record.arrival.airport.clone(),
                city: airport::city_name(&record.arrival.airport),
                datetime: arrival,
                timestamp: arrival.timestamp(),
            },
            duration: FlightDuration {
                total_minutes: record.duration_minutes,
                formatted: airport::format_duration(record.duration_minutes),
            },
            stops: record.stops,
            price: Money {
                amount: record.price.amount,
                currency: record.price.currency.clone(),
            },
            cabin_class: record.fare_class.clone(),
            available_seats: record.available_seats,
            aircraft: record.aircraft.clone(),
            amenities: record.amenities.clone(),
            baggage: BaggageInfo {
                carry_on: format_bag_count(record.baggage.carry_on),
                checked: format_bag_count(record.baggage.checked),
            },
        })
    }
}

fn format_bag_count(count: u32) -> String {
    if count == 1 {
        format!("{count} bag")
    } else {
        format!("{count} bags")
    }
}

#[async_trait]
impl Provider for GarudaProvider {
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

        let response: GarudaResponse = self.backend.fetch().await?;
        if response.status != "success" {
            return Err(ProviderError::InvalidResponse {
                provider: self.name().to_string(),
                reason: format!("unsuccessful response status: {}", response.status),
            });
        }

        let mut flights = Vec::with_capacity(response.flights.len());
        for record in &response.flights {
            if record.departure.airport != req.origin || record.arrival.airport != req.destination {
                continue;
            }
            let flight = match self.normalize(record) {
                Ok(flight) => flight,
                Err(err) => {
                    tracing::debug!(provider = self.name(), %err, "skipping malformed record");
                    continue;
                }
            };
            // Calendar-date match on the departure airport's local date.
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
