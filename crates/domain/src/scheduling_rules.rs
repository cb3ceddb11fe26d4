use crate::check_in::CheckIn;
use crate::shared::entity::ID;
use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone};

/// Maximum number of check-ins a single user may hold on one calendar day.
pub const MAX_CHECK_INS_PER_DAY: usize = 5;

/// Minimum spacing required between any two check-ins for the same user,
/// measured as absolute time difference.
pub fn conflict_window() -> Duration {
    Duration::hours(1)
}

/// The `[midnight, next midnight)` bounds of the calendar day containing `t`,
/// in `t`'s own utc offset.
pub fn day_bounds(t: &DateTime<FixedOffset>) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    let midnight = t.date_naive().and_time(NaiveTime::MIN);
    // A fixed offset has no gaps or overlaps, local midnight always exists
    let start = t
        .offset()
        .from_local_datetime(&midnight)
        .single()
        .unwrap_or_else(|| *t);
    (start, start + Duration::days(1))
}

/// Finds the first existing check-in within the conflict window of
/// `proposed_time`, skipping `exclude` (the record being updated, so that it
/// does not conflict with itself). Ordering of `existing` does not matter.
pub fn find_conflict<'a>(
    existing: &'a [CheckIn],
    proposed_time: &DateTime<FixedOffset>,
    exclude: Option<&ID>,
) -> Option<&'a CheckIn> {
    existing.iter().find(|check_in| {
        if exclude.map_or(false, |id| check_in.id == *id) {
            return false;
        }
        let delta = check_in
            .check_in_time
            .signed_duration_since(*proposed_time);
        delta.num_seconds().abs() < conflict_window().num_seconds()
    })
}
