use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Hong Kong time is UTC+8 all year round.
pub const HONG_KONG_UTC_OFFSET_HOURS: i64 = 8;

/// Calendar date in Hong Kong at the given instant.
///
/// Callers compute this once per request or batch and pass it down, so every
/// window in a computation sees the same "today".
pub fn hong_kong_today(now: DateTime<Utc>) -> NaiveDate {
    (now.naive_utc() + Duration::hours(HONG_KONG_UTC_OFFSET_HOURS)).date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rolls_over_at_sixteen_hundred_utc() {
        let before = Utc
            .with_ymd_and_hms(2025, 9, 24, 15, 59, 59)
            .single()
            .expect("valid instant");
        let after = Utc
            .with_ymd_and_hms(2025, 9, 24, 16, 0, 0)
            .single()
            .expect("valid instant");

        assert_eq!(
            hong_kong_today(before),
            NaiveDate::from_ymd_opt(2025, 9, 24).expect("valid date")
        );
        assert_eq!(
            hong_kong_today(after),
            NaiveDate::from_ymd_opt(2025, 9, 25).expect("valid date")
        );
    }
}
