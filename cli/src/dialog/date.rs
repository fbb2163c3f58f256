//! # Birthdate Formatting
//!
//! File: cli/src/dialog/date.rs
//!
//! Renders a date-picker value (milliseconds since the Unix epoch) as a
//! long-form English date such as "January 5, 1990". The picker sends midnight
//! UTC of the chosen day, so the default offset of zero shows the day the user
//! picked; a configured offset shifts the instant before the calendar day is
//! taken.
//!
use chrono::{DateTime, FixedOffset};

const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// `None` when `millis` is outside the range `chrono` can represent.
pub fn format_long_date(millis: i64, offset: &FixedOffset) -> Option<String> {
    let instant = DateTime::from_timestamp_millis(millis)?;
    Some(
        instant
            .with_timezone(offset)
            .format(LONG_DATE_FORMAT)
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_formats_new_year_1990() {
        assert_eq!(
            format_long_date(631_152_000_000, &utc()).as_deref(),
            Some("January 1, 1990")
        );
    }

    #[test]
    fn test_day_is_not_zero_padded() {
        // 1990-01-05T00:00:00Z
        assert_eq!(
            format_long_date(631_497_600_000, &utc()).as_deref(),
            Some("January 5, 1990")
        );
    }

    #[test]
    fn test_negative_offset_moves_to_previous_day() {
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            format_long_date(631_152_000_000, &new_york).as_deref(),
            Some("December 31, 1989")
        );
    }

    #[test]
    fn test_pre_epoch_dates() {
        // 1815-12-10T00:00:00Z
        assert_eq!(
            format_long_date(-4_861_728_000_000, &utc()).as_deref(),
            Some("December 10, 1815")
        );
    }

    #[test]
    fn test_out_of_range_is_none() {
        assert_eq!(format_long_date(i64::MAX, &utc()), None);
    }

    #[test]
    fn test_formatted_date_parses_back_to_same_day() {
        for millis in [0_i64, 631_152_000_000, 631_197_296_789, 1_709_164_800_000] {
            let formatted = format_long_date(millis, &utc()).unwrap();
            let parsed = NaiveDate::parse_from_str(&formatted, "%B %d, %Y").unwrap();
            let expected = DateTime::<Utc>::from_timestamp_millis(millis)
                .unwrap()
                .date_naive();
            assert_eq!(parsed, expected, "round trip of {}", millis);
        }
    }
}
