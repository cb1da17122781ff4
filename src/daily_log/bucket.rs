use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{AppError, Result};

/// Day bucketing policy: maps a calendar day in the reference timezone onto
/// the absolute-instant range used to query and store records. A day boundary
/// is local midnight in that timezone, regardless of server or client zones.

pub fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!("invalid date '{raw}', expected YYYY-MM-DD"))
    })
}

/// Today's calendar date in the reference timezone.
pub fn today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// `[00:00:00.000, 23:59:59.999]` of the given local calendar day, as UTC
/// instants.
pub fn day_range(tz: Tz, day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_to_utc(tz, day.and_time(NaiveTime::MIN));
    let next_midnight = local_to_utc(tz, (day + Duration::days(1)).and_time(NaiveTime::MIN));
    (start, next_midnight - Duration::milliseconds(1))
}

/// Monday of the ISO week containing `day`; the week's key for trend
/// grouping.
pub fn monday_of(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

fn local_to_utc(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let mut candidate = local;
    loop {
        match tz.from_local_datetime(&candidate) {
            // Ambiguous local times (DST fall-back) resolve to the earlier
            // instant so the day starts as early as possible.
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                return dt.with_timezone(&Utc)
            }
            // DST gap: the local time does not exist, roll forward to the
            // first hour that does.
            LocalResult::None => candidate += Duration::hours(1),
        }
    }
}
