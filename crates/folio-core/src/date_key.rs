//! Calendar-day keys in Japan Standard Time.
//!
//! Every day boundary in the contribution tables is computed here, so the
//! recorder and the summary reader agree regardless of the server's local
//! time zone.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use once_cell::sync::Lazy;

/// JST is a fixed UTC+09:00 with no daylight saving.
const JST_OFFSET_SECS: i32 = 9 * 3600;

static JST: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(JST_OFFSET_SECS).expect("UTC+9 is a valid offset"));

/// First and last instants whose JST day has a four-digit year.
static KEY_BOUNDS: Lazy<(DateTime<Utc>, DateTime<Utc>)> = Lazy::new(|| {
    let earliest = jst()
        .with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .expect("0001-01-01 exists in JST");
    let latest = jst()
        .with_ymd_and_hms(9999, 12, 31, 23, 59, 59)
        .single()
        .expect("9999-12-31 exists in JST");
    (earliest.with_timezone(&Utc), latest.with_timezone(&Utc))
});

/// The fixed JST offset.
pub fn jst() -> FixedOffset {
    *JST
}

/// Saturate `instant` into the range where keys are `0001-01-01..=9999-12-31`.
pub fn clamp_to_key_range(instant: DateTime<Utc>) -> DateTime<Utc> {
    let (earliest, latest) = *KEY_BOUNDS;
    instant.clamp(earliest, latest)
}

/// Format an instant as the `YYYY-MM-DD` day it falls on in JST.
///
/// Instants outside years 1 to 9999 saturate to the nearest representable day.
pub fn date_key(instant: DateTime<Utc>) -> String {
    clamp_to_key_range(instant)
        .with_timezone(&jst())
        .format("%Y-%m-%d")
        .to_string()
}

/// `days` consecutive date keys ending at the day of `end`, oldest first.
///
/// Always returns exactly `days` distinct keys. An `end` too close to the
/// earliest key is moved forward so the whole range fits.
pub fn date_keys_ending_at(end: DateTime<Utc>, days: u32) -> Vec<String> {
    let (earliest, _) = *KEY_BOUNDS;
    let span = Duration::days(days.saturating_sub(1) as i64);
    let floor = earliest.checked_add_signed(span).unwrap_or(earliest);
    let end = clamp_to_key_range(end).max(floor);

    (0..days as i64)
        .rev()
        .map(|offset| {
            let day = end
                .checked_sub_signed(Duration::days(offset))
                .unwrap_or(earliest);
            date_key(day)
        })
        .collect()
}
