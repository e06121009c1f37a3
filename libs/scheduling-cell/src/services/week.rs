use chrono::{Datelike, Duration, NaiveDate};

use crate::models::WeekWindow;

/// Monday through Friday of the ISO week containing `anchor`. Weeks start on
/// Monday regardless of locale; Saturday and Sunday do not appear in the
/// output at all.
pub fn resolve_week(anchor: NaiveDate) -> WeekWindow {
    let monday = anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);
    let days = (0..5).map(|offset| monday + Duration::days(offset)).collect();
    WeekWindow { anchor, days }
}

/// A new anchor offset by whole weeks. Navigation is always `shift_week`
/// followed by `resolve_week` on the result; the week window itself is never
/// mutated in place.
pub fn shift_week(anchor: NaiveDate, delta_weeks: i64) -> NaiveDate {
    anchor + Duration::weeks(delta_weeks)
}
