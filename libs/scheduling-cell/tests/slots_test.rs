use assert_matches::assert_matches;
use chrono::NaiveTime;

use scheduling_cell::models::SchedulingError;
use scheduling_cell::services::slots::{generate_slots, slot_labels};

fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn reference_configuration_yields_twenty_slots() {
    let slots = generate_slots(8, 18, 30).unwrap();

    assert_eq!(slots.len(), 20);
    assert_eq!(slots.first(), Some(&t(8, 0)));
    // Exclusive top edge: the last bookable slot is 17:30, never 18:00
    assert_eq!(slots.last(), Some(&t(17, 30)));
}

#[test]
fn slots_are_strictly_increasing() {
    let slots = generate_slots(8, 18, 30).unwrap();

    for pair in slots.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn labels_are_zero_padded_half_hours() {
    let labels = slot_labels(&generate_slots(8, 18, 30).unwrap());

    for label in &labels {
        assert_eq!(label.len(), 5);
        assert!(label.ends_with(":00") || label.ends_with(":30"));
    }
    assert!(labels.contains(&"08:00".to_string()));
    assert!(labels.contains(&"09:30".to_string()));
    assert!(!labels.contains(&"18:00".to_string()));
}

#[test]
fn same_inputs_yield_same_sequence() {
    assert_eq!(
        generate_slots(8, 18, 30).unwrap(),
        generate_slots(8, 18, 30).unwrap()
    );
}

#[test]
fn hourly_granularity_is_supported() {
    let slots = generate_slots(9, 12, 60).unwrap();

    assert_eq!(slots, vec![t(9, 0), t(10, 0), t(11, 0)]);
}

#[test]
fn rejects_inverted_range() {
    assert_matches!(
        generate_slots(18, 8, 30),
        Err(SchedulingError::InvalidRange(_))
    );
    assert_matches!(
        generate_slots(9, 9, 30),
        Err(SchedulingError::InvalidRange(_))
    );
}

#[test]
fn rejects_zero_granularity() {
    assert_matches!(
        generate_slots(8, 18, 0),
        Err(SchedulingError::InvalidRange(_))
    );
}

#[test]
fn rejects_granularity_that_does_not_divide_the_day() {
    assert_matches!(
        generate_slots(8, 18, 45),
        Err(SchedulingError::InvalidRange(_))
    );
    assert_matches!(
        generate_slots(8, 18, 7),
        Err(SchedulingError::InvalidRange(_))
    );
}

#[test]
fn rejects_end_hour_past_midnight() {
    assert_matches!(
        generate_slots(8, 25, 30),
        Err(SchedulingError::InvalidRange(_))
    );
}
