use chrono::Timelike;

use santara_core::Flight;

/// Relative importance of each scoring feature. Callers choose the balance;
/// no normalization is applied to the weights themselves.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub price: f64,
    pub duration: f64,
    pub stops: f64,
    pub departure_time: f64,
}

/// A flight with its computed best-value score (0-100 scale).
#[derive(Debug, Clone)]
pub struct FlightScore {
    pub flight: Flight,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Per-feature sub-scores, each in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct ScoreBreakdown {
    pub price: f64,
    pub duration: f64,
    pub stops: f64,
    pub departure_time: f64,
}

/// Computes weighted best-value scores over a candidate set. Price and
/// duration are normalized against the set's own min/max, so scores are
/// only comparable within one result set.
pub struct Scorer {
    weights: Weights,
}

impl Scorer {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    /// Scores every flight and returns them ordered by score, highest
    /// first. Ties keep input order.
    pub fn score_flights(&self, flights: &[Flight]) -> Vec<FlightScore> {
        if flights.is_empty() {
            return Vec::new();
        }

        let (min_price, max_price) = min_max(flights.iter().map(|f| f.price.amount));
        let (min_duration, max_duration) =
            min_max(flights.iter().map(|f| f.duration.total_minutes as f64));

        let mut scored: Vec<FlightScore> = flights
            .iter()
            .map(|flight| {
                let breakdown = ScoreBreakdown {
                    price: normalized_inverse(flight.price.amount, min_price, max_price),
                    duration: normalized_inverse(
                        flight.duration.total_minutes as f64,
                        min_duration,
                        max_duration,
                    ),
                    stops: score_stops(flight.stops),
                    departure_time: score_departure_hour(flight.departure.datetime.hour()),
                };
                let score = (breakdown.price * self.weights.price
                    + breakdown.duration * self.weights.duration
                    + breakdown.stops * self.weights.stops
                    + breakdown.departure_time * self.weights.departure_time)
                    * 100.0;
                FlightScore {
                    flight: flight.clone(),
                    score,
                    breakdown,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}

/// `1 - (value - min) / (max - min)` clamped to [0, 1]; a degenerate range
/// scores 1.0 for everyone.
fn normalized_inverse(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 1.0;
    }
    (1.0 - (value - min) / (max - min)).clamp(0.0, 1.0)
}

fn score_stops(stops: u32) -> f64 {
    match stops {
        0 => 1.0,
        1 => 0.7,
        2 => 0.4,
        _ => 0.2,
    }
}

/// Preference curve over the local departure hour: daytime departures score
/// highest, red-eyes lowest.
fn score_departure_hour(hour: u32) -> f64 {
    match hour {
        8..=20 => 1.0,
        6..=7 | 21..=22 => 0.8,
        5 | 23 => 0.6,
        _ => 0.3,
    }
}
