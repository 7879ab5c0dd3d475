//! Application configuration, loaded from `config/default.yaml` merged with
//! `SANTARA__`-prefixed environment variables (e.g. `SANTARA__SERVER__PORT`).

use std::env;
use std::time::Duration;

pub mod types;

pub use types::{
    CacheConfig, Config, LoggingConfig, ProviderConfig, ProviderDetail, RateLimitConfig,
    RetryConfig, ScoringConfig, ScoringWeights, ServerConfig,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),
    #[error("invalid duration {value:?} for {key}: {reason}")]
    InvalidDuration {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let source = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SANTARA").separator("__"))
            .build()?;

        Ok(source.try_deserialize()?)
    }
}

/// Parses Go-style duration strings: one or more `<number><unit>` segments
/// where unit is `ms`, `s`, `m`, or `h` (e.g. "500ms", "5s", "1m30s").
pub fn parse_duration(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidDuration {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.is_empty() {
        return Err(invalid("empty string"));
    }

    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| invalid("missing unit"))?;
        if digits_end == 0 {
            return Err(invalid("expected a number"));
        }
        let amount: u64 = rest[..digits_end]
            .parse()
            .map_err(|_| invalid("number out of range"))?;
        rest = &rest[digits_end..];

        let (unit_len, unit) = if rest.starts_with("ms") {
            (2, Duration::from_millis(amount))
        } else if rest.starts_with('s') {
            (1, Duration::from_secs(amount))
        } else if rest.starts_with('m') {
            (1, Duration::from_secs(amount * 60))
        } else if rest.starts_with('h') {
            (1, Duration::from_secs(amount * 3600))
        } else {
            return Err(invalid("unknown unit"));
        };
        total += unit;
        rest = &rest[unit_len..];
    }

    Ok(total)
}
