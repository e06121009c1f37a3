use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use scheduling_cell::handlers::SchedulerState;
use scheduling_cell::router::schedule_routes;

pub fn create_router(state: Arc<SchedulerState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Praxis practice API is running!" }))
        .nest("/schedule", schedule_routes(state))
}
