use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    routing::{get, post},
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::{
    app::{envy::Envy, errors::DefaultApiError},
    stripe::{config::StripeConfig, handlers::StripeHandlers},
};

mod app;
mod stripe;

#[derive(Clone)]
pub struct AppState {
    pub stripe: Arc<StripeConfig>,
    pub handlers: Arc<StripeHandlers>,
}

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(app::controller::get_root))
        // stripe
        .route("/api/stripe/webhook", post(stripe::controller::handle_webhook))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    // properties
    let port = envy.port();
    let max_body_bytes = envy.max_body_bytes();
    let rate_limit_per_sec = envy.rate_limit_per_sec();

    let stripe = StripeConfig::from_envy(&envy);
    if stripe.webhook_secret.is_none() {
        tracing::warn!("STRIPE_WEBHOOK_SECRET is not set, every webhook will be rejected");
    }
    tracing::info!(
        app_env = envy.app_env.as_deref().unwrap_or(&app_env),
        config = ?stripe,
        "stripe webhook configured"
    );

    let state = AppState {
        stripe: Arc::new(stripe),
        handlers: Arc::new(StripeHandlers::default()),
    };

    // app
    let app = router(state, max_body_bytes)
        // layers
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!(%err, "request rejected by middleware");
                    DefaultApiError::ServiceUnavailable.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(rate_limit_per_sec, Duration::from_secs(1))),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    if let Err(e) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(%e, "server error");
    }
}
