use chrono::NaiveTime;
use tracing::debug;

use crate::models::{ScheduleConfig, SchedulingError};

/// Generate the fixed ordered sequence of bookable times for a working day.
///
/// The top edge is exclusive: the reference configuration of 08:00-18:00 at a
/// 30-minute granularity yields exactly 20 slots, 08:00 through 17:30, with
/// no 18:00 slot. The edit-form validation in the store accepts exactly this
/// sequence.
pub fn generate_slots(
    start_hour: u32,
    end_hour: u32,
    slot_minutes: u32,
) -> Result<Vec<NaiveTime>, SchedulingError> {
    if end_hour <= start_hour {
        return Err(SchedulingError::InvalidRange(format!(
            "end hour {end_hour} must be after start hour {start_hour}"
        )));
    }
    if end_hour > 24 {
        return Err(SchedulingError::InvalidRange(format!(
            "end hour {end_hour} must fall within a single day"
        )));
    }
    if slot_minutes == 0 {
        return Err(SchedulingError::InvalidRange(
            "slot granularity must be positive".to_string(),
        ));
    }

    let span_minutes = (end_hour - start_hour) * 60;
    if span_minutes % slot_minutes != 0 {
        return Err(SchedulingError::InvalidRange(format!(
            "{slot_minutes}-minute slots do not evenly divide a {span_minutes}-minute day"
        )));
    }

    let count = span_minutes / slot_minutes;
    let slots = (0..count)
        .map(|index| {
            let minutes = start_hour * 60 + index * slot_minutes;
            NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            SchedulingError::InvalidRange(format!(
                "slot grid {start_hour}-{end_hour} at {slot_minutes} minutes is not representable"
            ))
        })?;

    debug!(
        "Generated {} slots from {start_hour:02}:00 to {end_hour:02}:00",
        slots.len()
    );
    Ok(slots)
}

/// Slots for a schedule configuration.
pub fn slots_for(config: &ScheduleConfig) -> Result<Vec<NaiveTime>, SchedulingError> {
    generate_slots(config.start_hour, config.end_hour, config.slot_minutes)
}

/// `HH:MM` labels for the grid header and the booking form's time picker.
pub fn slot_labels(slots: &[NaiveTime]) -> Vec<String> {
    slots
        .iter()
        .map(|slot| slot.format("%H:%M").to_string())
        .collect()
}
