use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::{parse_duration, ConfigError};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub provider: ProviderConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
    pub scoring: ScoringConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub read_timeout: String,
    pub write_timeout: String,
    pub idle_timeout: String,
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("server.read_timeout", &self.read_timeout)
    }

    pub fn write_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("server.write_timeout", &self.write_timeout)
    }

    pub fn idle_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("server.idle_timeout", &self.idle_timeout)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub ttl: String,
}

impl CacheConfig {
    pub fn ttl(&self) -> Result<Duration, ConfigError> {
        parse_duration("cache.ttl", &self.ttl)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub timeout: String,
    #[serde(default)]
    pub providers: HashMap<String, ProviderDetail>,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("provider.timeout", &self.timeout)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderDetail {
    pub name: String,
    pub enabled: bool,
    pub response_time: String,
    pub failure_rate: f64,
    pub data_path: String,
}

impl ProviderDetail {
    pub fn response_time(&self) -> Result<Duration, ConfigError> {
        parse_duration("provider.providers.response_time", &self.response_time)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub requests: u32,
    pub window: String,
}

impl RateLimitConfig {
    pub fn window(&self) -> Result<Duration, ConfigError> {
        parse_duration("rate_limit.window", &self.window)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScoringWeights {
    pub price: f64,
    pub duration: f64,
    pub stops: f64,
    pub departure_time: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: String,
    pub max_delay: String,
    pub multiplier: f64,
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Result<Duration, ConfigError> {
        parse_duration("retry.initial_delay", &self.initial_delay)
    }

    pub fn max_delay(&self) -> Result<Duration, ConfigError> {
        parse_duration("retry.max_delay", &self.max_delay)
    }
}
