//! Call-screening webhook responder
//!
//! Receives Exotel webhook callbacks for the turns of a live phone call,
//! walks the caller through a two-question script (name, then reason), and
//! emails a notification once both answers are collected.

mod api;
mod notify;
mod screener;
mod state_machine;
mod store;

use api::{create_router, AppState};
use notify::{NotifyConfig, ResendNotifier};
use screener::CallScreener;
use state_machine::CallLimits;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "call_screen=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("CALL_SCREEN_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    // Notification delivery
    let notifier = ResendNotifier::new(NotifyConfig::from_env());
    if notifier.is_configured() {
        tracing::info!("Resend notifier configured");
    } else {
        tracing::warn!(
            "Notifications disabled. Set RESEND_API_KEY and RECIPIENT_EMAIL."
        );
    }

    // Create the screener and start the session reaper
    let screener = Arc::new(CallScreener::new(
        Arc::new(notifier),
        CallLimits::default(),
    ));
    let _reaper = screener.spawn_reaper();

    let state = AppState::new(screener);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Call screener listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
