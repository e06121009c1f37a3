use chrono::{NaiveDate, NaiveTime};

use scheduling_cell::models::{ActiveFilter, Appointment, AppointmentType};
use scheduling_cell::services::occupancy::{can_book_new_at, occupants_of};

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn appointment(
    id: i64,
    appointment_type: AppointmentType,
    date: NaiveDate,
    time: NaiveTime,
) -> Appointment {
    Appointment {
        id,
        patient: format!("Patient {id}"),
        appointment_type,
        date,
        time,
        duration_minutes: 30,
    }
}

#[test]
fn empty_set_has_no_occupants() {
    let cell = d(2024, 1, 2);

    assert!(occupants_of(cell, t(9, 30), ActiveFilter::All, &[]).is_empty());
    assert!(can_book_new_at(cell, t(9, 30), &[]));
}

#[test]
fn occupancy_matches_on_date_and_time() {
    let set = vec![appointment(
        1,
        AppointmentType::Checkup,
        d(2024, 1, 2),
        t(9, 30),
    )];

    assert_eq!(
        occupants_of(d(2024, 1, 2), t(9, 30), ActiveFilter::All, &set).len(),
        1
    );
    // Same time on another day is a different cell
    assert!(occupants_of(d(2024, 1, 3), t(9, 30), ActiveFilter::All, &set).is_empty());
    // Same day at another time is a different cell
    assert!(occupants_of(d(2024, 1, 2), t(10, 0), ActiveFilter::All, &set).is_empty());
}

#[test]
fn multiple_appointments_stack_in_one_cell() {
    let cell = d(2024, 1, 2);
    let set = vec![
        appointment(1, AppointmentType::Checkup, cell, t(11, 0)),
        appointment(2, AppointmentType::Consultation, cell, t(11, 0)),
        appointment(3, AppointmentType::Emergency, cell, t(11, 0)),
    ];

    let occupants = occupants_of(cell, t(11, 0), ActiveFilter::All, &set);
    assert_eq!(occupants.len(), 3);
}

#[test]
fn filter_narrows_to_matching_type() {
    // Scenario B: one emergency appointment at 11:00
    let cell = d(2024, 1, 2);
    let set = vec![appointment(1, AppointmentType::Emergency, cell, t(11, 0))];

    let hidden = occupants_of(
        cell,
        t(11, 0),
        ActiveFilter::Only(AppointmentType::Checkup),
        &set,
    );
    assert!(hidden.is_empty());

    let visible = occupants_of(cell, t(11, 0), ActiveFilter::All, &set);
    assert_eq!(visible.len(), 1);

    // The gate ignores the display filter entirely
    assert!(!can_book_new_at(cell, t(11, 0), &set));
}

#[test]
fn filtered_occupants_are_a_subset_of_the_unfiltered_set() {
    let cell = d(2024, 1, 2);
    let set = vec![
        appointment(1, AppointmentType::Checkup, cell, t(9, 0)),
        appointment(2, AppointmentType::Followup, cell, t(9, 0)),
        appointment(3, AppointmentType::Consultation, cell, t(9, 0)),
        appointment(4, AppointmentType::Emergency, cell, t(9, 0)),
        appointment(5, AppointmentType::Checkup, cell, t(9, 0)),
    ];

    let all = occupants_of(cell, t(9, 0), ActiveFilter::All, &set);
    for appointment_type in AppointmentType::ALL {
        let narrowed = occupants_of(cell, t(9, 0), ActiveFilter::Only(appointment_type), &set);
        for occupant in &narrowed {
            assert_eq!(occupant.appointment_type, appointment_type);
            assert!(all.iter().any(|a| a.id == occupant.id));
        }
    }
}

#[test]
fn gate_blocks_only_the_exact_cell() {
    let set = vec![appointment(
        1,
        AppointmentType::Checkup,
        d(2024, 1, 2),
        t(9, 30),
    )];

    assert!(!can_book_new_at(d(2024, 1, 2), t(9, 30), &set));
    assert!(can_book_new_at(d(2024, 1, 2), t(10, 0), &set));
    assert!(can_book_new_at(d(2024, 1, 3), t(9, 30), &set));
}

#[test]
fn long_appointment_does_not_block_the_following_slot() {
    let mut long = appointment(1, AppointmentType::Consultation, d(2024, 1, 2), t(9, 0));
    long.duration_minutes = 60;
    let set = vec![long];

    // Occupancy is slot-equality, not interval overlap
    assert!(can_book_new_at(d(2024, 1, 2), t(9, 30), &set));
}
