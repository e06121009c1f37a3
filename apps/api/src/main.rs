use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use chrono::Utc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use scheduling_cell::handlers::SchedulerState;
use scheduling_cell::models::ScheduleConfig;
use scheduling_cell::services::booking::BookingCoordinator;
use shared_config::AppConfig;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Praxis practice API server");

    // Load configuration
    let config = AppConfig::from_env();
    let schedule = ScheduleConfig {
        start_hour: config.schedule_start_hour,
        end_hour: config.schedule_end_hour,
        slot_minutes: config.schedule_slot_minutes,
    };

    // An unusable slot grid is a startup failure, not a request-time one
    let coordinator = BookingCoordinator::new(&schedule, Utc::now().date_naive())
        .expect("schedule configuration must describe a valid slot grid");

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Create shared state
    let state = Arc::new(SchedulerState::new(coordinator));

    // Build the application router
    let app = router::create_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let host: IpAddr = config.host.parse().unwrap_or_else(|_| {
        warn!("PRAXIS_HOST={} is not a valid address, using 0.0.0.0", config.host);
        IpAddr::from([0, 0, 0, 0])
    });
    let addr = SocketAddr::from((host, config.port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .await
        .unwrap();
}
