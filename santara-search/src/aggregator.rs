use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use santara_core::{Flight, SearchRequest};
use santara_providers::{Provider, ProviderError};

use crate::retry::{self, RetryPolicy};

/// Combined outcome of one fan-out round across providers.
#[derive(Debug, Default)]
pub struct AggregatedResults {
    pub flights: Vec<Flight>,
    /// Provider name -> number of flights contributed.
    pub provider_results: HashMap<String, usize>,
    /// Provider name -> error message.
    pub provider_errors: HashMap<String, String>,
    pub total_duration: Duration,
}

/// Every selected provider failed or returned nothing. The per-provider
/// maps ride along so callers can still report what happened.
#[derive(Debug, Error)]
#[error("no flights found from any provider")]
pub struct NoFlightsError {
    pub results: AggregatedResults,
}

struct ProviderOutcome {
    provider: String,
    result: Result<Vec<Flight>, retry::RetryError<ProviderError>>,
    elapsed: Duration,
}

/// Fans a search request out to the selected providers under a shared
/// deadline and folds the per-provider outcomes back together.
pub struct Aggregator {
    providers: Vec<Arc<dyn Provider>>,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn Provider>>, timeout: Duration, retry: RetryPolicy) -> Self {
        Self {
            providers,
            timeout,
            retry,
        }
    }

    pub async fn search_all(
        &self,
        cancel: &CancellationToken,
        req: &SearchRequest,
    ) -> Result<AggregatedResults, NoFlightsError> {
        let started = Instant::now();
        let selected = self.select_providers(req);

        // Narrow the inbound token with the aggregator deadline; whichever
        // fires first cancels every in-flight provider task.
        let cancel = cancel.child_token();
        let deadline = tokio::spawn({
            let cancel = cancel.clone();
            let timeout = self.timeout;
            async move {
                tokio::time::sleep(timeout).await;
                cancel.cancel();
            }
        });

        let (tx, mut rx) = mpsc::channel::<ProviderOutcome>(selected.len().max(1));
        for provider in selected {
            let tx = tx.clone();
            let cancel = cancel.clone();
            let req = req.clone();
            let retry_policy = self.retry.clone();
            tokio::spawn(async move {
                let provider_started = Instant::now();
                let label = format!("provider {}", provider.name());
                let result = retry::retry_with_check(
                    &cancel,
                    &retry_policy,
                    &label,
                    || provider.search(&cancel, &req),
                    ProviderError::is_retryable,
                )
                .await;
                let _ = tx
                    .send(ProviderOutcome {
                        provider: provider.name().to_string(),
                        result,
                        elapsed: provider_started.elapsed(),
                    })
                    .await;
            });
        }
        drop(tx);

        let mut aggregated = AggregatedResults::default();
        while let Some(outcome) = rx.recv().await {
            match outcome.result {
                Ok(flights) => {
                    tracing::debug!(
                        provider = %outcome.provider,
                        count = flights.len(),
                        elapsed = ?outcome.elapsed,
                        "provider returned flights"
                    );
                    aggregated
                        .provider_results
                        .insert(outcome.provider, flights.len());
                    aggregated.flights.extend(flights);
                }
                Err(err) => {
                    tracing::debug!(
                        provider = %outcome.provider,
                        elapsed = ?outcome.elapsed,
                        %err,
                        "provider failed"
                    );
                    aggregated
                        .provider_errors
                        .insert(outcome.provider, err.to_string());
                }
            }
        }
        deadline.abort();
        aggregated.total_duration = started.elapsed();

        if aggregated.flights.is_empty() {
            return Err(NoFlightsError {
                results: aggregated,
            });
        }
        Ok(aggregated)
    }

    /// Provider pre-selection: a non-empty airline filter narrows the set to
    /// providers whose name matches, case-insensitively. A filter matching
    /// nothing falls back to all providers rather than starving the request.
    fn select_providers(&self, req: &SearchRequest) -> Vec<Arc<dyn Provider>> {
        if let Some(filters) = &req.filters {
            if !filters.airlines.is_empty() {
                let wanted: HashSet<String> =
                    filters.airlines.iter().map(|a| a.to_lowercase()).collect();
                let matched: Vec<Arc<dyn Provider>> = self
                    .providers
                    .iter()
                    .filter(|p| wanted.contains(&p.name().to_lowercase()))
                    .cloned()
                    .collect();
                if !matched.is_empty() {
                    return matched;
                }
                tracing::warn!(
                    airlines = ?filters.airlines,
                    "airline filter matches no known provider, querying all"
                );
            }
        }
        self.providers.clone()
    }

    pub fn providers(&self) -> &[Arc<dyn Provider>] {
        &self.providers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use santara_core::{
        Airline, BaggageInfo, FilterOptions, Flight, FlightDuration, FlightLocation, Money,
    };
    use santara_core::{airport, timeparse};

    struct StubProvider {
        name: String,
        outcome: Result<Vec<Flight>, &'static str>,
        delay: Duration,
    }

    #[async_trait]
    impl Provider for StubProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn search(
            &self,
            cancel: &CancellationToken,
            _req: &SearchRequest,
        ) -> Result<Vec<Flight>, ProviderError> {
            if !self.delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(self.delay) => {}
                    _ = cancel.cancelled() => {
                        return Err(ProviderError::Timeout {
                            provider: self.name.clone(),
                        });
                    }
                }
            }
            match &self.outcome {
                Ok(flights) => Ok(flights.clone()),
                Err(reason) => Err(ProviderError::Unavailable {
                    provider: self.name.clone(),
                    reason: reason.to_string(),
                }),
            }
        }

        fn health_check(&self) -> bool {
            true
        }
    }

    fn flight(provider: &str, number: &str) -> Flight {
        let departure = timeparse::at_offset(
            timeparse::parse_flexible("2025-12-15T08:00:00").unwrap(),
            airport::timezone_offset("CGK"),
        );
        let arrival = timeparse::at_offset(
            timeparse::parse_flexible("2025-12-15T10:50:00").unwrap(),
            airport::timezone_offset("DPS"),
        );
        Flight {
            id: format!("{number}_{provider}"),
            provider: provider.to_string(),
            flight_number: number.to_string(),
            airline: Airline {
                name: provider.to_string(),
                code: airport::extract_airline_code(number),
            },
            departure: FlightLocation {
                airport: "CGK".to_string(),
                city: "Jakarta".to_string(),
                datetime: departure,
                timestamp: departure.timestamp(),
            },
            arrival: FlightLocation {
                airport: "DPS".to_string(),
                city: "Denpasar".to_string(),
                datetime: arrival,
                timestamp: arrival.timestamp(),
            },
            duration: FlightDuration {
                total_minutes: 110,
                formatted: "1h 50m".to_string(),
            },
            stops: 0,
            price: Money {
                amount: 1_000_000.0,
                currency: "IDR".to_string(),
            },
            cabin_class: "economy".to_string(),
            available_seats: 10,
            aircraft: "A320".to_string(),
            amenities: Vec::new(),
            baggage: BaggageInfo {
                carry_on: "7kg".to_string(),
                checked: "20kg".to_string(),
            },
        }
    }

    fn request_with_airlines(airlines: Vec<String>) -> SearchRequest {
        SearchRequest {
            origin: "CGK".to_string(),
            destination: "DPS".to_string(),
            departure_date: "2025-12-15".to_string(),
            return_date: None,
            passengers: 1,
            cabin_class: "economy".to_string(),
            filters: if airlines.is_empty() {
                None
            } else {
                Some(FilterOptions {
                    min_price: None,
                    max_price: None,
                    max_stops: None,
                    airlines,
                    departure_time: None,
                    arrival_time: None,
                    max_duration: None,
                })
            },
            sort_by: None,
            sort_order: None,
            return_filters: None,
            return_sort_by: None,
            return_sort_order: None,
        }
    }

    fn retry_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 1,
            initial_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(100),
            multiplier: 2.0,
        }
    }

    fn stub(name: &str, outcome: Result<Vec<Flight>, &'static str>) -> Arc<dyn Provider> {
        Arc::new(StubProvider {
            name: name.to_string(),
            outcome,
            delay: Duration::ZERO,
        })
    }

    #[tokio::test]
    async fn partial_failure_still_yields_the_healthy_providers_flights() {
        let aggregator = Aggregator::new(
            vec![
                stub("Garuda Indonesia", Ok(vec![flight("Garuda Indonesia", "GA402")])),
                stub("Lion Air", Err("connection refused")),
            ],
            Duration::from_secs(5),
            retry_policy(),
        );

        let results = aggregator
            .search_all(&CancellationToken::new(), &request_with_airlines(vec![]))
            .await
            .expect("partial results");

        assert_eq!(results.flights.len(), 1);
        assert_eq!(results.provider_results["Garuda Indonesia"], 1);
        assert!(results.provider_errors.contains_key("Lion Air"));
    }

    #[tokio::test]
    async fn all_providers_failing_is_a_no_flights_error_with_the_error_map() {
        let aggregator = Aggregator::new(
            vec![
                stub("Garuda Indonesia", Err("down")),
                stub("Lion Air", Err("down")),
            ],
            Duration::from_secs(5),
            retry_policy(),
        );

        let err = aggregator
            .search_all(&CancellationToken::new(), &request_with_airlines(vec![]))
            .await
            .unwrap_err();

        assert_eq!(err.results.provider_errors.len(), 2);
        assert!(err.results.flights.is_empty());
    }

    #[tokio::test]
    async fn airline_filter_narrows_the_provider_set() {
        let aggregator = Aggregator::new(
            vec![
                stub("Garuda Indonesia", Ok(vec![flight("Garuda Indonesia", "GA402")])),
                stub("Lion Air", Ok(vec![flight("Lion Air", "JT30")])),
            ],
            Duration::from_secs(5),
            retry_policy(),
        );

        let results = aggregator
            .search_all(
                &CancellationToken::new(),
                &request_with_airlines(vec!["garuda indonesia".to_string()]),
            )
            .await
            .expect("results");

        assert_eq!(results.provider_results.len(), 1);
        assert!(results.provider_results.contains_key("Garuda Indonesia"));
        assert!(results.flights.iter().all(|f| f.provider == "Garuda Indonesia"));
    }

    #[tokio::test]
    async fn an_unmatched_airline_filter_falls_back_to_every_provider() {
        let aggregator = Aggregator::new(
            vec![
                stub("Garuda Indonesia", Ok(vec![flight("Garuda Indonesia", "GA402")])),
                stub("Lion Air", Ok(vec![flight("Lion Air", "JT30")])),
            ],
            Duration::from_secs(5),
            retry_policy(),
        );

        let results = aggregator
            .search_all(
                &CancellationToken::new(),
                &request_with_airlines(vec!["Nonexistent Airways".to_string()]),
            )
            .await
            .expect("results");

        assert_eq!(results.provider_results.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn the_deadline_cancels_slow_providers() {
        let slow: Arc<dyn Provider> = Arc::new(StubProvider {
            name: "Lion Air".to_string(),
            outcome: Ok(vec![flight("Lion Air", "JT30")]),
            delay: Duration::from_secs(60),
        });
        let aggregator = Aggregator::new(
            vec![
                stub("Garuda Indonesia", Ok(vec![flight("Garuda Indonesia", "GA402")])),
                slow,
            ],
            Duration::from_secs(2),
            retry_policy(),
        );

        let results = aggregator
            .search_all(&CancellationToken::new(), &request_with_airlines(vec![]))
            .await
            .expect("fast provider still contributes");

        assert_eq!(results.flights.len(), 1);
        let lion_err = &results.provider_errors["Lion Air"];
        assert!(lion_err.contains("timeout"), "got: {lion_err}");
    }
}
