use chrono::{Datelike, NaiveDate, Weekday};

use scheduling_cell::services::week::{resolve_week, shift_week};

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn midweek_anchor_resolves_to_monday_through_friday() {
    // 2024-01-03 was a Wednesday
    let week = resolve_week(d(2024, 1, 3));

    assert_eq!(week.anchor, d(2024, 1, 3));
    assert_eq!(
        week.days,
        vec![
            d(2024, 1, 1),
            d(2024, 1, 2),
            d(2024, 1, 3),
            d(2024, 1, 4),
            d(2024, 1, 5),
        ]
    );
}

#[test]
fn every_weekday_anchor_resolves_to_the_same_week() {
    let from_monday = resolve_week(d(2024, 1, 1));
    let from_friday = resolve_week(d(2024, 1, 5));

    assert_eq!(from_monday.days, from_friday.days);
}

#[test]
fn weekend_anchors_resolve_to_their_own_iso_week() {
    // Saturday and Sunday belong to the week that started the preceding Monday
    let from_saturday = resolve_week(d(2024, 1, 6));
    let from_sunday = resolve_week(d(2024, 1, 7));

    assert_eq!(from_saturday.days[0], d(2024, 1, 1));
    assert_eq!(from_sunday.days[0], d(2024, 1, 1));
}

#[test]
fn week_is_five_consecutive_business_days() {
    let week = resolve_week(d(2024, 3, 14));

    assert_eq!(week.days.len(), 5);
    assert_eq!(week.days[0].weekday(), Weekday::Mon);
    assert_eq!(week.days[4].weekday(), Weekday::Fri);
    for pair in week.days.windows(2) {
        assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
    }
    for day in &week.days {
        assert_ne!(day.weekday(), Weekday::Sat);
        assert_ne!(day.weekday(), Weekday::Sun);
    }
}

#[test]
fn week_may_span_a_month_boundary() {
    // 2024-02-29 was a Thursday; its week runs into March
    let week = resolve_week(d(2024, 2, 29));

    assert_eq!(week.days[0], d(2024, 2, 26));
    assert_eq!(week.days[4], d(2024, 3, 1));
}

#[test]
fn shift_week_moves_whole_weeks() {
    assert_eq!(shift_week(d(2024, 1, 3), 1), d(2024, 1, 10));
    assert_eq!(shift_week(d(2024, 1, 3), -1), d(2023, 12, 27));
    assert_eq!(shift_week(d(2024, 1, 3), 3), d(2024, 1, 24));
}

#[test]
fn navigation_round_trip_is_lossless() {
    for anchor in [d(2024, 1, 1), d(2024, 2, 29), d(2024, 6, 15), d(2024, 12, 31)] {
        let there_and_back = shift_week(shift_week(anchor, 1), -1);
        assert_eq!(resolve_week(there_and_back), resolve_week(anchor));
    }
}
