//! Airline backend adapters.
//!
//! Each adapter normalizes one backend's native records into the unified
//! [`Flight`] model. Adapters never retry; that is the aggregator's concern.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use santara_core::{Flight, SearchRequest};

pub mod error;
pub mod payload;
pub mod sim;

mod airasia;
mod batik;
mod garuda;
mod lionair;

pub use airasia::AirAsiaProvider;
pub use batik::BatikProvider;
pub use error::ProviderError;
pub use garuda::GarudaProvider;
pub use lionair::LionAirProvider;
pub use sim::ProviderSettings;

/// Capability set every airline backend adapter exposes.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable provider name, used for result attribution and pre-selection.
    fn name(&self) -> &str;

    /// Searches the backend for flights matching the request. Returns the
    /// normalized batch or an error from the [`ProviderError`] taxonomy.
    async fn search(
        &self,
        cancel: &CancellationToken,
        req: &SearchRequest,
    ) -> Result<Vec<Flight>, ProviderError>;

    /// Cheap liveness probe.
    fn health_check(&self) -> bool;
}
