use chrono::NaiveTime;
use tracing::debug;

use crate::models::{Appointment, AppointmentDraft, AppointmentPatch, SchedulingError};

/// Authoritative in-memory collection of appointments for the session.
///
/// Ids are assigned monotonically from 1 and never reused, including after a
/// delete. Records are kept in insertion order; callers that need
/// chronological order sort explicitly. Drafts and patches are validated here
/// rather than trusted from the form layer: the patient name must be
/// non-empty, the duration positive, and the time a member of the generated
/// slot sequence.
#[derive(Debug)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
    next_id: i64,
    slot_times: Vec<NaiveTime>,
}

impl AppointmentStore {
    pub fn new(slot_times: Vec<NaiveTime>) -> Self {
        Self {
            appointments: Vec::new(),
            next_id: 1,
            slot_times,
        }
    }

    /// Insert a new appointment and return the persisted record.
    pub fn create(&mut self, draft: AppointmentDraft) -> Result<Appointment, SchedulingError> {
        validate_patient(&draft.patient)?;
        validate_duration(draft.duration_minutes)?;
        self.validate_time(draft.time)?;

        let appointment = Appointment {
            id: self.next_id,
            patient: draft.patient,
            appointment_type: draft.appointment_type,
            date: draft.date,
            time: draft.time,
            duration_minutes: draft.duration_minutes,
        };
        self.next_id += 1;
        self.appointments.push(appointment.clone());

        debug!(
            "Created appointment {} ({}) at {} {}",
            appointment.id,
            appointment.appointment_type,
            appointment.date,
            appointment.time.format("%H:%M")
        );
        Ok(appointment)
    }

    /// Replace the fields present in `patch` on the record matching `id`.
    /// A failed update leaves the collection untouched.
    pub fn update(
        &mut self,
        id: i64,
        patch: AppointmentPatch,
    ) -> Result<Appointment, SchedulingError> {
        let index = self
            .appointments
            .iter()
            .position(|appointment| appointment.id == id)
            .ok_or(SchedulingError::NotFound)?;

        if let Some(patient) = &patch.patient {
            validate_patient(patient)?;
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            validate_duration(duration_minutes)?;
        }
        if let Some(time) = patch.time {
            self.validate_time(time)?;
        }

        let appointment = &mut self.appointments[index];
        if let Some(patient) = patch.patient {
            appointment.patient = patient;
        }
        if let Some(appointment_type) = patch.appointment_type {
            appointment.appointment_type = appointment_type;
        }
        if let Some(date) = patch.date {
            appointment.date = date;
        }
        if let Some(time) = patch.time {
            appointment.time = time;
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            appointment.duration_minutes = duration_minutes;
        }

        debug!("Updated appointment {id}");
        Ok(appointment.clone())
    }

    /// Remove the record matching `id`. Absence is reported, not silently
    /// ignored, so the coordinator can decide how to surface it.
    pub fn delete(&mut self, id: i64) -> Result<(), SchedulingError> {
        let index = self
            .appointments
            .iter()
            .position(|appointment| appointment.id == id)
            .ok_or(SchedulingError::NotFound)?;
        self.appointments.remove(index);

        debug!("Deleted appointment {id}");
        Ok(())
    }

    pub fn get(&self, id: i64) -> Option<&Appointment> {
        self.appointments
            .iter()
            .find(|appointment| appointment.id == id)
    }

    /// All appointments in insertion order.
    pub fn list(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn slot_times(&self) -> &[NaiveTime] {
        &self.slot_times
    }

    fn validate_time(&self, time: NaiveTime) -> Result<(), SchedulingError> {
        if self.slot_times.contains(&time) {
            Ok(())
        } else {
            Err(SchedulingError::Validation(format!(
                "time {} is not a bookable slot",
                time.format("%H:%M")
            )))
        }
    }
}

fn validate_patient(patient: &str) -> Result<(), SchedulingError> {
    if patient.trim().is_empty() {
        return Err(SchedulingError::Validation(
            "patient name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_duration(duration_minutes: i32) -> Result<(), SchedulingError> {
    if duration_minutes <= 0 {
        return Err(SchedulingError::Validation(format!(
            "duration must be positive, got {duration_minutes}"
        )));
    }
    Ok(())
}
