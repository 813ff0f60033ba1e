use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::service::BookingError;

pub fn resolve_timezone(name: &str) -> Result<Tz, BookingError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| BookingError::InvalidTimezone(name.to_string()))
}

/// Attaches `canonical` to a stored naive date-time.
///
/// Folded wall-clock times resolve to the earlier instant. Times that fall
/// into a DST gap keep the offset that was in force before the transition.
pub fn localize(naive: NaiveDateTime, canonical: Tz) -> DateTime<Tz> {
    match canonical.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            let before = canonical
                .from_local_datetime(&(naive - Duration::days(1)))
                .earliest()
                .map(|dt| dt.offset().fix())
                .unwrap_or_else(|| canonical.offset_from_utc_datetime(&naive).fix());
            let utc = naive - Duration::seconds(before.local_minus_utc().into());
            canonical.from_utc_datetime(&utc)
        }
    }
}

/// Reinterprets `naive` in `canonical` and expresses it in `target`.
pub fn convert(naive: NaiveDateTime, canonical: Tz, target: Tz) -> DateTime<FixedOffset> {
    localize(naive, canonical).with_timezone(&target).fixed_offset()
}
