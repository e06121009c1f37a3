use chrono::{NaiveDate, NaiveTime};

use crate::models::{ActiveFilter, Appointment};

/// Appointments occupying the `(date, time)` grid cell, narrowed by the
/// active filter. Zero, one, or many results; the grid stacks all of them
/// within the cell.
pub fn occupants_of<'a>(
    date: NaiveDate,
    time: NaiveTime,
    filter: ActiveFilter,
    appointments: &'a [Appointment],
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|appointment| {
            appointment.date == date
                && appointment.time == time
                && filter.admits(appointment.appointment_type)
        })
        .collect()
}

/// Booking gate: a new appointment may only be initiated on a cell with no
/// occupants. Always evaluated against the unfiltered set, so a slot hidden
/// by the active display filter still reports itself as occupied.
pub fn can_book_new_at(date: NaiveDate, time: NaiveTime, appointments: &[Appointment]) -> bool {
    occupants_of(date, time, ActiveFilter::All, appointments).is_empty()
}
