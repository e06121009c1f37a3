// libs/scheduling-cell/src/services/booking.rs
use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};

use crate::models::{
    ActiveFilter, Appointment, AppointmentDraft, AppointmentPatch, DialogState, GridCell, GridRow,
    Notice, ScheduleConfig, ScheduleGrid, SchedulingError, WeekWindow,
};
use crate::services::store::AppointmentStore;
use crate::services::{occupancy, slots, week};

/// Orchestrates user-initiated calendar actions against the store and the
/// occupancy resolver, and owns the per-session state: the displayed week's
/// anchor date, the active type filter, and the booking/edit dialog.
///
/// The one scheduling invariant lives here: a new booking may only be
/// initiated on a slot that is unoccupied in the unfiltered appointment set.
/// The store itself never enforces one-appointment-per-slot.
#[derive(Debug)]
pub struct BookingCoordinator {
    store: AppointmentStore,
    slot_times: Vec<NaiveTime>,
    anchor: NaiveDate,
    filter: ActiveFilter,
    dialog: DialogState,
}

impl BookingCoordinator {
    /// Build a coordinator for the given working-day configuration. An
    /// invalid slot grid is a startup error, not a request-time one.
    pub fn new(config: &ScheduleConfig, anchor: NaiveDate) -> Result<Self, SchedulingError> {
        let slot_times = slots::slots_for(config)?;
        Ok(Self {
            store: AppointmentStore::new(slot_times.clone()),
            slot_times,
            anchor,
            filter: ActiveFilter::All,
            dialog: DialogState::Closed,
        })
    }

    // ── Session state ────────────────────────────────────────

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// The business week currently on display, recomputed from the anchor.
    pub fn week(&self) -> WeekWindow {
        week::resolve_week(self.anchor)
    }

    /// Navigate forward or backward by whole weeks.
    pub fn shift_week(&mut self, delta_weeks: i64) -> WeekWindow {
        self.anchor = week::shift_week(self.anchor, delta_weeks);
        debug!("Week shifted to anchor {}", self.anchor);
        self.week()
    }

    pub fn filter(&self) -> ActiveFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ActiveFilter) {
        debug!("Active filter set to {filter}");
        self.filter = filter;
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn slot_times(&self) -> &[NaiveTime] {
        &self.slot_times
    }

    pub fn slot_labels(&self) -> Vec<String> {
        slots::slot_labels(&self.slot_times)
    }

    pub fn appointments(&self) -> &[Appointment] {
        self.store.list()
    }

    pub fn appointment(&self, id: i64) -> Option<&Appointment> {
        self.store.get(id)
    }

    // ── Availability ─────────────────────────────────────────

    pub fn can_book_new_at(&self, date: NaiveDate, time: NaiveTime) -> bool {
        occupancy::can_book_new_at(date, time, self.store.list())
    }

    /// Occupants of one cell under the current display filter.
    pub fn occupants_at(&self, date: NaiveDate, time: NaiveTime) -> Vec<&Appointment> {
        occupancy::occupants_of(date, time, self.filter, self.store.list())
    }

    // ── Dialog intents ───────────────────────────────────────

    /// Slot click: open the booking form pre-filled with `(date, time)`, or
    /// do nothing at all if the slot is already occupied. The refusal is
    /// silent by policy; it never surfaces as an error.
    pub fn request_new_booking(&mut self, date: NaiveDate, time: NaiveTime) -> bool {
        if !self.can_book_new_at(date, time) {
            debug!(
                "Ignored booking request for occupied slot {} {}",
                date,
                time.format("%H:%M")
            );
            return false;
        }
        self.dialog = DialogState::NewBooking { date, time };
        debug!(
            "Opened booking form for {} {}",
            date,
            time.format("%H:%M")
        );
        true
    }

    /// Appointment click: open the edit form pre-filled with the full record.
    pub fn request_edit(&mut self, id: i64) -> Result<Appointment, SchedulingError> {
        let appointment = self
            .store
            .get(id)
            .cloned()
            .ok_or(SchedulingError::NotFound)?;
        self.dialog = DialogState::EditBooking {
            appointment: appointment.clone(),
        };
        debug!("Opened edit form for appointment {id}");
        Ok(appointment)
    }

    /// Dismiss any open form without mutating the store.
    pub fn cancel_dialog(&mut self) {
        if self.dialog.is_open() {
            debug!("Dialog cancelled");
        }
        self.dialog = DialogState::Closed;
    }

    // ── Confirmations ────────────────────────────────────────

    /// Confirmed "new appointment" form: create the record and close the
    /// form. On a validation error the form stays open for correction.
    pub fn confirm_new_booking(
        &mut self,
        draft: AppointmentDraft,
    ) -> Result<(Appointment, Notice), SchedulingError> {
        let appointment = self.store.create(draft)?;
        self.dialog = DialogState::Closed;
        info!(
            "Appointment {} booked for {} at {} {}",
            appointment.id,
            appointment.patient,
            appointment.date,
            appointment.time.format("%H:%M")
        );
        Ok((
            appointment,
            Notice::new("New appointment created successfully"),
        ))
    }

    /// Confirmed "edit appointment" form: apply the patch and close the
    /// form. A missing record means someone else already deleted it; the
    /// stale form is closed and the error propagates as a non-fatal notice.
    pub fn confirm_edit(
        &mut self,
        id: i64,
        patch: AppointmentPatch,
    ) -> Result<(Appointment, Notice), SchedulingError> {
        match self.store.update(id, patch) {
            Ok(appointment) => {
                self.dialog = DialogState::Closed;
                info!("Appointment {id} updated");
                Ok((appointment, Notice::new("Appointment updated successfully")))
            }
            Err(SchedulingError::NotFound) => {
                warn!("Edit confirmed for missing appointment {id}");
                self.close_dialog_referencing(id);
                Err(SchedulingError::NotFound)
            }
            Err(err) => Err(err),
        }
    }

    /// Confirmed deletion: remove the record and close any open form that
    /// references it.
    pub fn confirm_delete(&mut self, id: i64) -> Result<Notice, SchedulingError> {
        match self.store.delete(id) {
            Ok(()) => {
                self.close_dialog_referencing(id);
                info!("Appointment {id} deleted");
                Ok(Notice::new("Appointment deleted successfully"))
            }
            Err(SchedulingError::NotFound) => {
                warn!("Delete confirmed for missing appointment {id}");
                self.close_dialog_referencing(id);
                Err(SchedulingError::NotFound)
            }
            Err(err) => Err(err),
        }
    }

    fn close_dialog_referencing(&mut self, id: i64) {
        if let DialogState::EditBooking { appointment } = &self.dialog {
            if appointment.id == id {
                self.dialog = DialogState::Closed;
            }
        }
    }

    // ── Presentation feed ────────────────────────────────────

    /// The full calendar feed for the displayed week: one row per slot, one
    /// cell per business day. Cell occupants honor the display filter while
    /// the availability flag is computed from the unfiltered set.
    pub fn grid(&self) -> ScheduleGrid {
        let week = self.week();
        let appointments = self.store.list();
        let rows = self
            .slot_times
            .iter()
            .map(|&time| GridRow {
                time,
                cells: week
                    .days
                    .iter()
                    .map(|&date| GridCell {
                        date,
                        appointments: occupancy::occupants_of(
                            date,
                            time,
                            self.filter,
                            appointments,
                        )
                        .into_iter()
                        .cloned()
                        .collect(),
                        available: occupancy::can_book_new_at(date, time, appointments),
                    })
                    .collect(),
            })
            .collect();

        ScheduleGrid {
            week,
            filter: self.filter,
            rows,
        }
    }
}
