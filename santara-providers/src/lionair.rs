use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use santara_core::airport;
use santara_core::timeparse::{self, TimeParseError};
use santara_core::{Airline, BaggageInfo, Flight, FlightDuration, FlightLocation, Money, SearchRequest};

use crate::error::ProviderError;
use crate::payload::{LionAirFlight, LionAirResponse};
use crate::sim::{ProviderSettings, SimulatedBackend};
use crate::Provider;

/// Adapter for the Lion Air backend. Unusually for this set, the payload
/// names the timezone of each schedule entry itself.
pub struct LionAirProvider {
    backend: SimulatedBackend,
}

impl LionAirProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            backend: SimulatedBackend::new(settings),
        }
    }

    fn normalize(&self, record: &LionAirFlight) -> Result<Flight, TimeParseError> {
        let departure = timeparse::at_offset(
            timeparse::parse_flexible(&record.schedule.departure)?,
            airport::offset_for_zone(&record.schedule.departure_timezone),
        );
        let arrival = timeparse::at_offset(
            timeparse::parse_flexible(&record.schedule.arrival)?,
            airport::offset_for_zone(&record.schedule.arrival_timezone),
        );

        let stops = if record.is_direct { 0 } else { record.stop_count };

        let mut amenities = Vec::new();
        if record.services.wifi_available {
            amenities.push("WiFi".to_string());
        }
        if record.services.meals_included {
            amenities.push("Meals".to_string());
        }

        Ok(Flight {
            id: format!("{}_{}", record.id, self.backend.name()),
            provider: self.backend.name().to_string(),
            flight_number: record.id.clone(),
            airline: Airline {
                name: record.carrier.name.clone(),
                code: airport::extract_airline_code(&record.id),
            },
            departure: FlightLocation {
                airport: record.route.from.code.clone(),
                city: airport::city_name(&record.route.from.code),
                datetime: departure,
                timestamp: departure.timestamp(),
            },
            arrival: FlightLocation {
                airport: record.route.to.code.clone(),
                city: airport::city_name(&record.route.to.code),
                datetime: arrival,
                timestamp: arrival.timestamp(),
            },
            duration: FlightDuration {
                total_minutes: record.flight_time,
                formatted: airport::format_duration(record.flight_time),
            },
            stops,
            price: Money {
                amount: record.pricing.total,
                currency: record.pricing.currency.clone(),
            },
            cabin_class: record.pricing.fare_type.clone(),
            available_seats: record.seats_left,
            aircraft: record.plane_type.clone(),
            amenities,
            baggage: BaggageInfo {
                carry_on: record.services.baggage.cabin.clone(),
                checked: record.services.baggage.hold.clone(),
            },
        })
    }
}

#[async_trait]
impl Provider for LionAirProvider {
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

        let response: LionAirResponse = self.backend.fetch().await?;
        if !response.success {
            return Err(ProviderError::InvalidResponse {
                provider: self.name().to_string(),
                reason: "unsuccessful response".to_string(),
            });
        }

        let mut flights = Vec::with_capacity(response.data.available_flights.len());
        for record in &response.data.available_flights {
            if record.route.from.code != req.origin || record.route.to.code != req.destination {
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
