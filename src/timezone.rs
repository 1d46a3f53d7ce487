//! Resolves the configured timezone name to the current billing period.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current (month, year) in the given canonical timezone, e.g. "Pacific/Auckland".
pub fn current_month_and_year(canonical_timezone: &str) -> Option<(u8, i32)> {
    let offset = get_local_offset(canonical_timezone)?;
    let now = OffsetDateTime::now_utc().to_offset(offset);

    Some((u8::from(now.month()), now.year()))
}
