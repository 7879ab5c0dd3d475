use std::sync::Arc;

use santara_search::SearchService;

use crate::middleware::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
    pub rate_limiter: Arc<RateLimiter>,
}
