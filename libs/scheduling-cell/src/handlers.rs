// libs/scheduling-cell/src/handlers.rs
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{hhmm, ActiveFilter, AppointmentDraft, AppointmentPatch, SchedulingError};
use crate::services::booking::BookingCoordinator;

/// Shared application state for the schedule routes. The engine itself is
/// synchronous and single-threaded; the lock exists only to satisfy the
/// server runtime and is never held across an await point.
pub struct SchedulerState {
    coordinator: RwLock<BookingCoordinator>,
}

impl SchedulerState {
    pub fn new(coordinator: BookingCoordinator) -> Self {
        Self {
            coordinator: RwLock::new(coordinator),
        }
    }
}

fn read_coordinator(
    state: &SchedulerState,
) -> Result<RwLockReadGuard<'_, BookingCoordinator>, AppError> {
    state
        .coordinator
        .read()
        .map_err(|_| AppError::Internal("scheduler state poisoned".to_string()))
}

fn write_coordinator(
    state: &SchedulerState,
) -> Result<RwLockWriteGuard<'_, BookingCoordinator>, AppError> {
    state
        .coordinator
        .write()
        .map_err(|_| AppError::Internal("scheduler state poisoned".to_string()))
}

fn map_engine_error(err: SchedulingError) -> AppError {
    match err {
        SchedulingError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        SchedulingError::Validation(msg) => AppError::ValidationError(msg),
        SchedulingError::InvalidRange(msg) => AppError::BadRequest(msg),
    }
}

// ==============================================================================
// QUERY AND REQUEST STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    #[serde(deserialize_with = "hhmm::deserialize")]
    pub time: NaiveTime,
}

#[derive(Debug, Deserialize)]
pub struct ShiftWeekRequest {
    pub delta_weeks: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetFilterRequest {
    pub filter: ActiveFilter,
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    #[serde(deserialize_with = "hhmm::deserialize")]
    pub time: NaiveTime,
}

// ==============================================================================
// GRID AND NAVIGATION HANDLERS
// ==============================================================================

/// Fixed slot labels for the grid header and the booking form's time picker.
#[axum::debug_handler]
pub async fn get_slots(State(state): State<Arc<SchedulerState>>) -> Result<Json<Value>, AppError> {
    let coordinator = read_coordinator(&state)?;
    Ok(Json(json!({ "slots": coordinator.slot_labels() })))
}

#[axum::debug_handler]
pub async fn get_week(State(state): State<Arc<SchedulerState>>) -> Result<Json<Value>, AppError> {
    let coordinator = read_coordinator(&state)?;
    Ok(Json(json!({ "week": coordinator.week() })))
}

#[axum::debug_handler]
pub async fn shift_week(
    State(state): State<Arc<SchedulerState>>,
    Json(request): Json<ShiftWeekRequest>,
) -> Result<Json<Value>, AppError> {
    let mut coordinator = write_coordinator(&state)?;
    let week = coordinator.shift_week(request.delta_weeks);
    Ok(Json(json!({ "week": week })))
}

#[axum::debug_handler]
pub async fn get_grid(State(state): State<Arc<SchedulerState>>) -> Result<Json<Value>, AppError> {
    let coordinator = read_coordinator(&state)?;
    Ok(Json(json!({ "grid": coordinator.grid() })))
}

#[axum::debug_handler]
pub async fn check_availability(
    State(state): State<Arc<SchedulerState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let coordinator = read_coordinator(&state)?;
    let available = coordinator.can_book_new_at(query.date, query.time);
    Ok(Json(json!({
        "date": query.date,
        "time": query.time.format("%H:%M").to_string(),
        "available": available
    })))
}

#[axum::debug_handler]
pub async fn get_filter(State(state): State<Arc<SchedulerState>>) -> Result<Json<Value>, AppError> {
    let coordinator = read_coordinator(&state)?;
    Ok(Json(json!({ "filter": coordinator.filter() })))
}

#[axum::debug_handler]
pub async fn set_filter(
    State(state): State<Arc<SchedulerState>>,
    Json(request): Json<SetFilterRequest>,
) -> Result<Json<Value>, AppError> {
    let mut coordinator = write_coordinator(&state)?;
    coordinator.set_filter(request.filter);
    Ok(Json(json!({
        "success": true,
        "filter": coordinator.filter()
    })))
}

// ==============================================================================
// DIALOG HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_dialog(State(state): State<Arc<SchedulerState>>) -> Result<Json<Value>, AppError> {
    let coordinator = read_coordinator(&state)?;
    Ok(Json(json!({ "dialog": coordinator.dialog() })))
}

#[axum::debug_handler]
pub async fn cancel_dialog(
    State(state): State<Arc<SchedulerState>>,
) -> Result<Json<Value>, AppError> {
    let mut coordinator = write_coordinator(&state)?;
    coordinator.cancel_dialog();
    Ok(Json(json!({ "success": true })))
}

/// Slot click. An occupied slot yields `opened: false` with a 200 status:
/// the refusal is a UX policy, not an error.
#[axum::debug_handler]
pub async fn request_booking(
    State(state): State<Arc<SchedulerState>>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Value>, AppError> {
    let mut coordinator = write_coordinator(&state)?;
    let opened = coordinator.request_new_booking(request.date, request.time);
    Ok(Json(json!({
        "opened": opened,
        "dialog": coordinator.dialog()
    })))
}

/// Appointment click: open the edit form pre-filled with the full record.
#[axum::debug_handler]
pub async fn request_edit(
    State(state): State<Arc<SchedulerState>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let mut coordinator = write_coordinator(&state)?;
    let appointment = coordinator
        .request_edit(appointment_id)
        .map_err(map_engine_error)?;
    Ok(Json(json!({
        "opened": true,
        "appointment": appointment
    })))
}

// ==============================================================================
// APPOINTMENT CRUD HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<SchedulerState>>,
    Json(draft): Json<AppointmentDraft>,
) -> Result<Json<Value>, AppError> {
    let mut coordinator = write_coordinator(&state)?;
    let (appointment, notice) = coordinator
        .confirm_new_booking(draft)
        .map_err(map_engine_error)?;
    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": notice.message
    })))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<SchedulerState>>,
) -> Result<Json<Value>, AppError> {
    let coordinator = read_coordinator(&state)?;
    Ok(Json(json!({
        "appointments": coordinator.appointments(),
        "total": coordinator.appointments().len()
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<SchedulerState>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let coordinator = read_coordinator(&state)?;
    let appointment = coordinator
        .appointment(appointment_id)
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;
    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<SchedulerState>>,
    Path(appointment_id): Path<i64>,
    Json(patch): Json<AppointmentPatch>,
) -> Result<Json<Value>, AppError> {
    let mut coordinator = write_coordinator(&state)?;
    let (appointment, notice) = coordinator
        .confirm_edit(appointment_id, patch)
        .map_err(map_engine_error)?;
    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": notice.message
    })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<SchedulerState>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let mut coordinator = write_coordinator(&state)?;
    let notice = coordinator
        .confirm_delete(appointment_id)
        .map_err(map_engine_error)?;
    Ok(Json(json!({
        "success": true,
        "message": notice.message
    })))
}
