use std::net::SocketAddr;
use std::sync::Arc;

use santara_api::{app, middleware::rate_limit::RateLimiter, AppState};
use santara_config::Config;
use santara_search::{cache, SearchService};
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("configuration loaded");

    let service = Arc::new(SearchService::from_config(&config)?);
    let _sweeper = cache::spawn_sweeper(service.cache(), cache::SWEEP_INTERVAL);

    let rate_limiter = Arc::new(RateLimiter::new(
        config.rate_limit.requests,
        config.rate_limit.window()?,
    ));

    let state = AppState {
        search: service,
        rate_limiter,
    };

    // write/idle timeouts are validated here even though only the request
    // timeout maps onto the tower stack.
    let read_timeout = config.server.read_timeout()?;
    let write_timeout = config.server.write_timeout()?;
    let idle_timeout = config.server.idle_timeout()?;

    let app = app(state).layer(TimeoutLayer::new(read_timeout));

    tracing::info!(
        port = config.server.port,
        cache_ttl = %config.cache.ttl,
        provider_timeout = %config.provider.timeout,
        rate_limit_requests = config.rate_limit.requests,
        rate_limit_window = %config.rate_limit.window,
        ?write_timeout,
        ?idle_timeout,
        "starting server"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
