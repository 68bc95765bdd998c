//! Property-based tests for the calendar projection, timeline arithmetic and
//! the compact format/parse round trip.

use almanac_core::gregorian::{days_before_month, days_before_year, days_in_month};
use almanac_core::timeline::TICKS_PER_DAY;
use almanac_core::{is_leap_year, DateFormatter, DateTime, Timeline};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A valid (year, month, day) with year in 0..=9999.
fn arb_ymd() -> impl Strategy<Value = (i32, u32, u32)> {
    (0i32..=9999, 1u32..=12).prop_flat_map(|(y, m)| {
        let last = days_in_month(y, m).unwrap_or(28);
        (Just(y), Just(m), 1u32..=last)
    })
}

fn arb_time() -> impl Strategy<Value = (u32, u32, u32)> {
    (0u32..24, 0u32..60, 0u32..60)
}

/// A timeline point with normalized ticks.
fn arb_timeline() -> impl Strategy<Value = Timeline> {
    (-1_000_000i64..1_000_000, 0i64..TICKS_PER_DAY).prop_map(|(d, t)| Timeline::new(d, t))
}

/// Dates between 1970 and 2100, biased towards February 29th.
fn arb_modern() -> impl Strategy<Value = DateTime> {
    // Every multiple of four in 1972..=2096 is a leap year.
    let leap_day = (1972i32..=2096).prop_map(|y| (y - y % 4, 2u32, 29u32));
    let any_day = (1970i32..=2100, 1u32..=12).prop_flat_map(|(y, m)| {
        let last = days_in_month(y, m).unwrap_or(28);
        (Just(y), Just(m), 1u32..=last)
    });
    (prop_oneof![1 => leap_day, 3 => any_day], arb_time()).prop_map(|((y, m, d), (h, mi, s))| {
        DateTime::from_ymd_hms(y, m, d, h, mi, s).unwrap()
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Calendar projection
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn ymd_survives_timeline_round_trip((y, m, d) in arb_ymd()) {
        let date = DateTime::from_ymd(y, m, d).unwrap();
        let back = DateTime::from_timeline(date.timeline()).unwrap();
        prop_assert_eq!(back.ymd(), (y, m, d));
        prop_assert_eq!((back.year(), back.month(), back.day()), (y, m, d));
    }

    #[test]
    fn day_of_year_and_month_match_tables(days in 0i64..=4_000_000) {
        let date = DateTime::from_timeline(Timeline::new(days, 0)).unwrap();
        let year = date.year();
        let doy = date.day_of_year();
        prop_assert!((1..=366).contains(&doy));
        if doy == 366 {
            prop_assert!(is_leap_year(year));
        }
        prop_assert_eq!(days_before_year(year) + i64::from(doy) - 1, days);

        let leap = is_leap_year(year);
        let month = date.month();
        prop_assert!(days_before_month(leap, month) < i64::from(doy));
        prop_assert!(i64::from(doy) <= days_before_month(leap, month + 1));
    }

    #[test]
    fn weekday_advances_by_one_each_day(days in 0i64..=4_000_000) {
        let today = DateTime::from_timeline(Timeline::new(days, 0)).unwrap();
        let tomorrow = DateTime::from_timeline(Timeline::new(days + 1, 0)).unwrap();
        prop_assert_eq!(tomorrow.day_of_week(), (today.day_of_week() + 1) % 7);

        let anchor = DateTime::from_ymd(2000, 1, 1).unwrap();
        let offset = (days - anchor.days()).rem_euclid(7) as u32;
        prop_assert_eq!(today.day_of_week(), (6 + offset) % 7);
    }
}

// ---------------------------------------------------------------------------
// Timeline arithmetic
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn add_then_subtract_restores(a in arb_timeline(), b in arb_timeline()) {
        prop_assert_eq!((a + b) - b, a);
        prop_assert_eq!((a - b) + b, a);
    }

    #[test]
    fn arithmetic_matches_total_ticks(a in arb_timeline(), b in arb_timeline()) {
        prop_assert_eq!((a + b).total_ticks(), a.total_ticks() + b.total_ticks());
        prop_assert_eq!((a - b).total_ticks(), a.total_ticks() - b.total_ticks());
        prop_assert!((0..TICKS_PER_DAY).contains(&(a + b).ticks()));
        prop_assert!((0..TICKS_PER_DAY).contains(&(a - b).ticks()));
    }

    #[test]
    fn ordering_matches_total_ticks(a in arb_timeline(), b in arb_timeline()) {
        prop_assert_eq!(a.cmp(&b), a.total_ticks().cmp(&b.total_ticks()));
    }
}

// ---------------------------------------------------------------------------
// Format / parse
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn compact_format_round_trips(date in arb_modern()) {
        let formatter = DateFormatter::new("%Y%m%d%H%M%S").unwrap();
        let text = formatter.format(&date);
        prop_assert_eq!(text.len(), 14);
        prop_assert_eq!(formatter.parse(&text).unwrap(), date);
    }

    #[test]
    fn named_format_round_trips(date in arb_modern()) {
        let formatter = DateFormatter::new("%a, %d %b %Y %I:%M:%S %p").unwrap();
        prop_assert_eq!(formatter.parse(&formatter.format(&date)).unwrap(), date);
    }

    #[test]
    fn any_year_round_trips_with_padded_year((y, m, d) in arb_ymd()) {
        let formatter = DateFormatter::new("%Y-%m-%d").unwrap();
        let date = DateTime::from_ymd(y, m, d).unwrap();
        prop_assert_eq!(formatter.parse(&formatter.format(&date)).unwrap(), date);
    }
}
