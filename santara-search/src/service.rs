use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use santara_config::{Config, ConfigError};
use santara_core::{
    Flight, SearchCriteria, SearchMetadata, SearchRequest, SearchResponse,
};
use santara_providers::{
    AirAsiaProvider, BatikProvider, GarudaProvider, LionAirProvider, Provider, ProviderSettings,
};

use crate::aggregator::{AggregatedResults, Aggregator};
use crate::cache::{self, TtlCache};
use crate::filter::FilterEngine;
use crate::retry::RetryPolicy;
use crate::scorer::{Scorer, Weights};
use crate::sorter::Sorter;
use crate::validator::{ValidationError, Validator};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no flights found from any provider")]
    NoFlights {
        provider_errors: HashMap<String, String>,
    },

    #[error("search cancelled")]
    Cancelled,
}

/// Top-level search pipeline: validate, consult the cache, aggregate,
/// filter, score, sort, and cache the composed response.
pub struct SearchService {
    providers: Vec<Arc<dyn Provider>>,
    aggregator: Aggregator,
    cache: Arc<TtlCache<SearchResponse>>,
    filter: FilterEngine,
    sorter: Sorter,
    scorer: Scorer,
    validator: Validator,
}

impl SearchService {
    pub fn new(
        providers: Vec<Arc<dyn Provider>>,
        provider_timeout: Duration,
        cache_ttl: Duration,
        retry: RetryPolicy,
        weights: Weights,
    ) -> Self {
        Self {
            providers: providers.clone(),
            aggregator: Aggregator::new(providers, provider_timeout, retry),
            cache: Arc::new(TtlCache::new(cache_ttl)),
            filter: FilterEngine::new(),
            sorter: Sorter::new(),
            scorer: Scorer::new(weights),
            validator: Validator::new(),
        }
    }

    /// Builds the service from configuration, constructing every enabled
    /// provider in its configured order.
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let mut providers: Vec<Arc<dyn Provider>> = Vec::new();
        for key in ["garuda", "lionair", "batik", "airasia"] {
            let Some(detail) = cfg.provider.providers.get(key) else {
                continue;
            };
            if !detail.enabled {
                continue;
            }
            let settings = ProviderSettings {
                name: detail.name.clone(),
                response_time: detail.response_time()?,
                failure_rate: detail.failure_rate,
                data_path: PathBuf::from(&detail.data_path),
            };
            tracing::info!(
                provider = %settings.name,
                delay = ?settings.response_time,
                failure_rate = settings.failure_rate,
                "initializing provider"
            );
            let provider: Arc<dyn Provider> = match key {
                "garuda" => Arc::new(GarudaProvider::new(settings)),
                "lionair" => Arc::new(LionAirProvider::new(settings)),
                "batik" => Arc::new(BatikProvider::new(settings)),
                _ => Arc::new(AirAsiaProvider::new(settings)),
            };
            providers.push(provider);
        }
        tracing::info!(count = providers.len(), "initialized providers from configuration");

        let retry = RetryPolicy {
            max_attempts: cfg.retry.max_attempts,
            initial_delay: cfg.retry.initial_delay()?,
            max_delay: cfg.retry.max_delay()?,
            multiplier: cfg.retry.multiplier,
        };
        let weights = Weights {
            price: cfg.scoring.weights.price,
            duration: cfg.scoring.weights.duration,
            stops: cfg.scoring.weights.stops,
            departure_time: cfg.scoring.weights.departure_time,
        };

        Ok(Self::new(
            providers,
            cfg.provider.timeout()?,
            cfg.cache.ttl()?,
            retry,
            weights,
        ))
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// The shared response cache, exposed so the caller can spawn the
    /// sweeper and inspect statistics.
    pub fn cache(&self) -> Arc<TtlCache<SearchResponse>> {
        self.cache.clone()
    }

    pub async fn search(
        &self,
        cancel: &CancellationToken,
        req: &SearchRequest,
    ) -> Result<SearchResponse, SearchError> {
        let started = Instant::now();

        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        self.validator.validate(req)?;

        let key = cache::request_fingerprint(req);
        if let Some(mut cached) = self.cache.get(&key).await {
            tracing::debug!(%key, "cache hit");
            cached.metadata.cache_hit = true;
            return Ok(cached);
        }
        tracing::debug!(%key, "cache miss");

        let results = match self.aggregator.search_all(cancel, req).await {
            Ok(results) => results,
            Err(err) => {
                return Err(SearchError::NoFlights {
                    provider_errors: err.results.provider_errors,
                });
            }
        };
        let AggregatedResults {
            flights,
            provider_results,
            provider_errors,
            ..
        } = results;

        let (flights, best_value_flight) = self.refine(
            flights,
            req.filters.as_ref(),
            req.sort_by.as_deref(),
            req.sort_order.as_deref(),
        );

        let metadata = build_metadata(
            flights.len(),
            provider_results,
            provider_errors,
            started.elapsed(),
        );

        let (return_flights, best_value_return_flight, return_metadata) =
            match req.return_date.as_deref().filter(|d| !d.is_empty()) {
                Some(return_date) => self.search_return_leg(cancel, req, return_date).await,
                None => (Vec::new(), None, None),
            };

        let response = SearchResponse {
            search_criteria: SearchCriteria {
                origin: req.origin.clone(),
                destination: req.destination.clone(),
                departure_date: req.departure_date.clone(),
                return_date: req.return_date.clone(),
                passengers: req.passengers,
                cabin_class: req.cabin_class.clone(),
            },
            metadata,
            flights,
            best_value_flight,
            return_flights,
            best_value_return_flight,
            return_metadata,
        };

        self.cache.set(key, response.clone()).await;
        Ok(response)
    }

    /// Filter, score (capturing the best-value flight), and apply the user
    /// sort. The returned list keeps aggregator order unless a sort key was
    /// given; scoring never reorders it.
    fn refine(
        &self,
        mut flights: Vec<Flight>,
        filters: Option<&santara_core::FilterOptions>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> (Vec<Flight>, Option<Flight>) {
        if let Some(filters) = filters {
            let before = flights.len();
            flights = self.filter.apply(flights, filters);
            tracing::debug!(before, after = flights.len(), "applied filters");
        }

        let mut best_value_flight = None;
        if !flights.is_empty() {
            let scored = self.scorer.score_flights(&flights);
            if let Some(top) = scored.first() {
                tracing::debug!(
                    flight = %top.flight.flight_number,
                    score = top.score,
                    "best value flight"
                );
                best_value_flight = Some(top.flight.clone());
            }
        }

        if let Some(sort_by) = sort_by.filter(|s| !s.is_empty()) {
            flights = self
                .sorter
                .sort(flights, sort_by, sort_order.unwrap_or(""));
        }

        (flights, best_value_flight)
    }

    /// The return leg is an independent search with origin and destination
    /// swapped and the `return_*` request parameters. It has its own cache
    /// key and metadata; a total failure degrades to an empty section
    /// instead of failing the outbound response.
    async fn search_return_leg(
        &self,
        cancel: &CancellationToken,
        req: &SearchRequest,
        return_date: &str,
    ) -> (Vec<Flight>, Option<Flight>, Option<SearchMetadata>) {
        let started = Instant::now();
        let return_req = SearchRequest {
            origin: req.destination.clone(),
            destination: req.origin.clone(),
            departure_date: return_date.to_string(),
            return_date: None,
            passengers: req.passengers,
            cabin_class: req.cabin_class.clone(),
            filters: req.return_filters.clone(),
            sort_by: req.return_sort_by.clone(),
            sort_order: req.return_sort_order.clone(),
            return_filters: None,
            return_sort_by: None,
            return_sort_order: None,
        };

        let key = cache::request_fingerprint(&return_req);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(%key, "return leg cache hit");
            let mut metadata = cached.metadata;
            metadata.cache_hit = true;
            metadata.search_time_ms = started.elapsed().as_millis() as u64;
            return (cached.flights, cached.best_value_flight, Some(metadata));
        }
        tracing::debug!(%key, "return leg cache miss");

        let results = match self.aggregator.search_all(cancel, &return_req).await {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(%err, "return leg search failed");
                err.results
            }
        };
        let AggregatedResults {
            flights,
            provider_results,
            provider_errors,
            ..
        } = results;

        let (flights, best_value_flight) = self.refine(
            flights,
            return_req.filters.as_ref(),
            return_req.sort_by.as_deref(),
            return_req.sort_order.as_deref(),
        );

        let metadata = build_metadata(
            flights.len(),
            provider_results,
            provider_errors,
            started.elapsed(),
        );

        (flights, best_value_flight, Some(metadata))
    }
}

fn build_metadata(
    total_results: usize,
    provider_results: HashMap<String, usize>,
    provider_errors: HashMap<String, String>,
    elapsed: Duration,
) -> SearchMetadata {
    let providers_succeeded = provider_results.values().filter(|count| **count > 0).count();
    SearchMetadata {
        total_results,
        providers_queried: provider_results.len() + provider_errors.len(),
        providers_succeeded,
        providers_failed: provider_errors.len(),
        search_time_ms: elapsed.as_millis() as u64,
        cache_hit: false,
        provider_results,
        provider_errors,
    }
}
