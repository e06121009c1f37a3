// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{self, SchedulerState};

pub fn schedule_routes(state: Arc<SchedulerState>) -> Router {
    Router::new()
        // Grid and navigation
        .route("/slots", get(handlers::get_slots))
        .route("/week", get(handlers::get_week))
        .route("/week/shift", post(handlers::shift_week))
        .route("/grid", get(handlers::get_grid))
        .route("/availability", get(handlers::check_availability))
        .route("/filter", get(handlers::get_filter))
        .route("/filter", put(handlers::set_filter))
        // Booking and edit dialogs
        .route("/dialog", get(handlers::get_dialog))
        .route("/dialog/cancel", post(handlers::cancel_dialog))
        .route("/booking-requests", post(handlers::request_booking))
        .route(
            "/appointments/{appointment_id}/edit-request",
            post(handlers::request_edit),
        )
        // Appointment management
        .route("/appointments", post(handlers::create_appointment))
        .route("/appointments", get(handlers::list_appointments))
        .route("/appointments/{appointment_id}", get(handlers::get_appointment))
        .route("/appointments/{appointment_id}", put(handlers::update_appointment))
        .route(
            "/appointments/{appointment_id}",
            delete(handlers::delete_appointment),
        )
        .with_state(state)
}
