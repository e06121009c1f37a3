pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export the engine surface for external use
pub use models::*;
pub use services::*;

// Specifically re-export the scheduling engine types
pub use models::{
    ActiveFilter, Appointment, AppointmentDraft, AppointmentPatch, AppointmentType, DialogState,
    Notice, ScheduleConfig, ScheduleGrid, SchedulingError, WeekWindow,
};
