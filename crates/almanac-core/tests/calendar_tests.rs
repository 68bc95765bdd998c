//! Calendar projection: leap years, field extraction, weekdays, validation.
//!
//! chrono serves as the reference oracle for years 1–9999.

use almanac_core::gregorian::{days_before_year, days_in_month, year_from_days, MAX_DAYS};
use almanac_core::{is_leap_year, CompatRecord, DateError, DateTime, Duration, ErrorKind, Timeline};
use chrono::{Datelike, NaiveDate};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn ymd(y: i32, m: u32, d: u32) -> DateTime {
    DateTime::from_ymd(y, m, d).unwrap()
}

fn at_day(days: i64) -> DateTime {
    DateTime::from_timeline(Timeline::new(days, 0)).unwrap()
}

// ── Leap years ──────────────────────────────────────────────────────────────

#[test]
fn leap_year_rule() {
    assert!(!is_leap_year(1900));
    assert!(is_leap_year(2000));
    assert!(is_leap_year(2004));
    assert!(!is_leap_year(2100));
    assert!(is_leap_year(1600));
    assert!(!is_leap_year(2001));
}

#[test]
fn year_zero_is_not_leap() {
    assert!(!is_leap_year(0));
    assert_eq!(days_in_month(0, 2), Some(28));
    assert_eq!(days_before_year(1), 365);
}

#[test]
fn february_length_follows_leap_rule() {
    assert_eq!(days_in_month(2000, 2), Some(29));
    assert_eq!(days_in_month(1900, 2), Some(28));
    assert_eq!(days_in_month(2000, 13), None);
    assert_eq!(days_in_month(2000, 0), None);
}

// ── Epoch and projection ────────────────────────────────────────────────────

#[test]
fn day_zero_is_january_first_of_year_zero() {
    let origin = at_day(0);
    assert_eq!(origin.ymd(), (0, 1, 1));
    assert_eq!(origin.day_of_year(), 1);
    assert_eq!(origin.day_of_week(), 0);
}

#[test]
fn year_one_starts_on_a_monday() {
    let first = at_day(365);
    assert_eq!(first.ymd(), (1, 1, 1));
    assert_eq!(first.day_of_week(), 1);
}

#[test]
fn known_day_counts() {
    assert_eq!(ymd(1900, 1, 1).days(), 693_960);
    assert_eq!(ymd(2000, 1, 1).days(), 730_484);
    assert_eq!(ymd(2100, 1, 1).days(), 767_009);
    assert_eq!(year_from_days(730_484), 2000);
    assert_eq!(year_from_days(730_483), 1999);
}

#[test]
fn leap_day_boundaries() {
    let feb29 = ymd(2000, 2, 29);
    assert_eq!(feb29.day_of_year(), 60);
    assert_eq!((feb29.month(), feb29.day()), (2, 29));

    let mar1 = ymd(2000, 3, 1);
    assert_eq!(mar1.day_of_year(), 61);
    assert_eq!((mar1.month(), mar1.day()), (3, 1));

    let dec31 = ymd(2000, 12, 31);
    assert_eq!(dec31.day_of_year(), 366);
    assert_eq!(ymd(2001, 12, 31).day_of_year(), 365);
}

#[test]
fn from_ordinal_matches_from_ymd() {
    assert_eq!(DateTime::from_ordinal(2000, 60).unwrap(), ymd(2000, 2, 29));
    assert_eq!(DateTime::from_ordinal(2000, 366).unwrap(), ymd(2000, 12, 31));
    assert_eq!(
        DateTime::from_ordinal(2001, 366).unwrap_err(),
        DateError::OutOfRange {
            field: "day of year",
            value: 366
        }
    );
    assert!(DateTime::from_ordinal(2001, 0).is_err());
}

// ── Weekdays ────────────────────────────────────────────────────────────────

#[test]
fn reference_weekdays() {
    assert_eq!(ymd(2000, 1, 1).day_of_week(), 6);
    assert_eq!(ymd(2005, 2, 27).day_of_week(), 0);
    assert_eq!(ymd(2005, 3, 1).day_of_week(), 2);
    assert_eq!(ymd(2002, 6, 10).day_of_week(), 1);
}

#[test]
fn weekday_is_periodic_through_year_zero() {
    let mut previous = at_day(0).day_of_week();
    for days in 1..800 {
        let current = at_day(days).day_of_week();
        assert_eq!(current, (previous + 1) % 7, "break at day {days}");
        previous = current;
    }
}

#[test]
fn chrono_agrees_on_weekday_and_ordinal() {
    let first = days_before_year(1);
    let last = days_before_year(10_000);
    for days in (first..last).step_by(37) {
        let date = at_day(days);
        let (y, m, d) = date.ymd();
        let oracle = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap_or_else(|| panic!("chrono rejects {y}-{m}-{d} at day {days}"));
        assert_eq!(date.day_of_week(), oracle.weekday().num_days_from_sunday());
        assert_eq!(date.day_of_year(), oracle.ordinal());
        assert_eq!(date.is_leap_year(), oracle.leap_year());
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn february_29_only_in_leap_years() {
    assert_eq!(
        DateTime::from_ymd(2001, 2, 29).unwrap_err(),
        DateError::OutOfRange {
            field: "day",
            value: 29
        }
    );
    assert!(DateTime::from_ymd(2000, 2, 29).is_ok());
}

#[test]
fn rejects_bad_calendar_fields() {
    for (y, m, d) in [(2000, 0, 1), (2000, 13, 1), (2000, 1, 0), (2000, 4, 31), (-1, 1, 1)] {
        let err = DateTime::from_ymd(y, m, d).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange, "{y}-{m}-{d}");
    }
}

#[test]
fn rejects_bad_time_fields() {
    let day = ymd(2000, 1, 1);
    assert!(day.with_time(24, 0, 0).is_err());
    assert!(day.with_time(0, 60, 0).is_err());
    assert!(day.with_time(0, 0, 61).is_err());
    assert!(day.with_time(23, 59, 59).is_ok());
}

#[test]
fn second_sixty_rolls_into_next_minute() {
    let t = DateTime::from_ymd_hms(2000, 1, 1, 23, 59, 60).unwrap();
    assert_eq!(t.to_string(), "2000-01-02 00:00:00");
}

#[test]
fn negative_timeline_is_rejected() {
    let err = DateTime::from_timeline(Timeline::new(-1, 0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn timeline_past_last_representable_year_is_rejected() {
    let err = DateTime::from_timeline(Timeline::new(1_000_000_000_000, 0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    let err = DateTime::from_timeline(Timeline::new(MAX_DAYS + 1, 0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn last_representable_day_projects_cleanly() {
    let last = at_day(MAX_DAYS);
    assert_eq!(last.ymd(), (i32::MAX, 12, 31));
    assert_eq!(last.day_of_year(), 365);
    assert!(last.day_of_week() < 7);
    assert_eq!(ymd(i32::MAX, 12, 31), last);

    let err = last.checked_add(Duration::from_days(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn iso_string_parses_back() {
    let t = DateTime::from_ymd_hms(2006, 4, 17, 20, 49, 5).unwrap();
    assert_eq!(t.to_iso_string(), "2006-04-17T20:49:05");
    assert_eq!(t.to_iso_string().parse::<DateTime>().unwrap(), t);
    assert_eq!(ymd(7, 1, 2).to_iso_string(), "0007-01-02T00:00:00");
}

// ── Serde ───────────────────────────────────────────────────────────────────

#[test]
fn serde_round_trip_keeps_the_instant() {
    let t = DateTime::from_ymd_hms(2006, 4, 17, 20, 49, 5).unwrap();
    let json = serde_json::to_string(&t).unwrap();
    let back: DateTime = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}

#[test]
fn deserialize_rejects_days_outside_the_calendar() {
    assert!(serde_json::from_str::<DateTime>(r#"{"timeline":{"days":-5,"ticks":0}}"#).is_err());
    let json = format!(r#"{{"timeline":{{"days":{},"ticks":0}}}}"#, MAX_DAYS + 1);
    assert!(serde_json::from_str::<DateTime>(&json).is_err());
}

#[test]
fn deserialize_normalizes_time_of_day() {
    let t: DateTime = serde_json::from_str(r#"{"timeline":{"days":0,"ticks":100000000}}"#).unwrap();
    assert_eq!(t.to_string(), "0000-01-02 03:46:40");
    assert_eq!(t.hour(), 3);
}

#[test]
fn with_date_keeps_time_and_with_time_keeps_date() {
    let t = DateTime::from_ymd_hms(2006, 4, 17, 20, 49, 5).unwrap();
    let moved = t.with_date(1999, 12, 31).unwrap();
    assert_eq!(moved.to_string(), "1999-12-31 20:49:05");
    let retimed = t.with_time(8, 0, 0).unwrap();
    assert_eq!(retimed.to_string(), "2006-04-17 08:00:00");
    assert_eq!(t.at_midnight(), ymd(2006, 4, 17));
}

// ── Time of day ─────────────────────────────────────────────────────────────

#[test]
fn time_fields() {
    let t = DateTime::from_ymd_hms(2006, 4, 17, 20, 49, 5).unwrap();
    assert_eq!((t.hour(), t.minute(), t.second(), t.subsecond()), (20, 49, 5, 0));

    let later = t.checked_add(Duration::from_subseconds(250)).unwrap();
    assert_eq!(later.subsecond(), 250);
    assert_eq!(later.second(), 5);
}

#[test]
fn display_format() {
    let t = DateTime::from_ymd_hms(5, 3, 9, 7, 6, 5).unwrap();
    assert_eq!(t.to_string(), "0005-03-09 07:06:05");
}

// ── Compatibility record ────────────────────────────────────────────────────

#[test]
fn to_record_uses_posix_conventions() {
    let t = DateTime::from_ymd_hms(2005, 2, 27, 13, 4, 5).unwrap();
    assert_eq!(
        t.to_record(),
        CompatRecord {
            second: 5,
            minute: 4,
            hour: 13,
            day_of_month: 27,
            weekday: 0,
            month: 1,
            year: 105,
        }
    );
}

#[test]
fn from_record_validates_like_from_ymd_hms() {
    let t = DateTime::from_ymd_hms(1969, 7, 20, 20, 17, 40).unwrap();
    assert_eq!(DateTime::from_record(&t.to_record()).unwrap(), t);

    let bad = CompatRecord {
        month: 12,
        day_of_month: 1,
        ..CompatRecord::default()
    };
    assert_eq!(
        DateTime::from_record(&bad).unwrap_err(),
        DateError::OutOfRange {
            field: "month",
            value: 13
        }
    );

    let negative = CompatRecord {
        day_of_month: -3,
        ..CompatRecord::default()
    };
    assert_eq!(DateTime::from_record(&negative).unwrap_err().kind(), ErrorKind::OutOfRange);

    let overflowing = CompatRecord {
        year: i32::MAX,
        day_of_month: 1,
        ..CompatRecord::default()
    };
    assert_eq!(
        DateTime::from_record(&overflowing).unwrap_err(),
        DateError::OutOfRange {
            field: "year",
            value: i64::from(i32::MAX)
        }
    );
}
