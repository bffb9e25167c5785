//! Project timeline: fixed milestone offsets from each well's baseline test

use chrono::{Days, Local, NaiveDate};

use crate::types::{Milestone, TimelineEvent, WellRecord};

/// Days from baseline test to plugging.
pub const PNA_OFFSET_DAYS: u64 = 30;

/// Days from plugging to token mint.
pub const MINT_OFFSET_DAYS: u64 = 31;

/// Days from plugging to the verification re-test.
pub const RETEST_OFFSET_DAYS: u64 = 365;

/// Build four one-day milestone events per well, in input order.
///
/// Wells without a baseline date use `reference_date`; when that is `None`
/// the reference is the earliest baseline date in the batch, or today if no
/// well has one.
pub fn build_timeline(wells: &[WellRecord], reference_date: Option<NaiveDate>) -> Vec<TimelineEvent> {
    let reference = reference_date.unwrap_or_else(|| default_reference_date(wells, today()));
    wells
        .iter()
        .flat_map(|well| well_events(well, well.baseline_date.unwrap_or(reference)))
        .collect()
}

/// Earliest baseline date across the batch, falling back to `today`.
pub fn default_reference_date(wells: &[WellRecord], today: NaiveDate) -> NaiveDate {
    wells
        .iter()
        .filter_map(|w| w.baseline_date)
        .min()
        .unwrap_or(today)
}

/// Milestone dates for a baseline test on `baseline`.
pub fn milestone_date(milestone: Milestone, baseline: NaiveDate) -> NaiveDate {
    let pna = add_days(baseline, PNA_OFFSET_DAYS);
    match milestone {
        Milestone::BaselineTest => baseline,
        Milestone::PlugAndAbandon => pna,
        Milestone::TokenMint => add_days(pna, MINT_OFFSET_DAYS),
        Milestone::SecondTest => add_days(pna, RETEST_OFFSET_DAYS),
    }
}

fn well_events(well: &WellRecord, baseline: NaiveDate) -> impl Iterator<Item = TimelineEvent> + '_ {
    Milestone::ALL.into_iter().map(move |milestone| {
        let start = milestone_date(milestone, baseline);
        TimelineEvent {
            well: well.name.clone(),
            milestone,
            start,
            end: add_days(start, 1),
            description: milestone.description().to_string(),
        }
    })
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    // Only overflows at the end of chrono's representable range
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_offsets_from_baseline() {
        let d = date(2025, 3, 1);
        let wells = vec![WellRecord::new("Well-01", 15.0).with_baseline_date(d)];
        let events = build_timeline(&wells, None);
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].milestone, Milestone::BaselineTest);
        assert_eq!(events[0].start, d);
        assert_eq!(events[1].start, d + chrono::Duration::days(30));
        assert_eq!(events[2].start, d + chrono::Duration::days(61));
        assert_eq!(events[3].start, d + chrono::Duration::days(395));
    }

    #[test]
    fn test_each_event_spans_one_day() {
        let wells = vec![WellRecord::new("W", 15.0).with_baseline_date(date(2024, 12, 31))];
        for event in build_timeline(&wells, None) {
            assert_eq!(event.end, event.start + chrono::Duration::days(1));
            assert_eq!(event.description, event.milestone.description());
        }
    }

    #[test]
    fn test_missing_baseline_uses_earliest_in_batch() {
        let wells = vec![
            WellRecord::new("A", 15.0).with_baseline_date(date(2025, 6, 1)),
            WellRecord::new("B", 15.0),
            WellRecord::new("C", 15.0).with_baseline_date(date(2025, 2, 1)),
        ];
        let events = build_timeline(&wells, None);
        assert_eq!(events.len(), 12);
        let b_baseline = &events[4];
        assert_eq!(b_baseline.well, "B");
        assert_eq!(b_baseline.start, date(2025, 2, 1));
    }

    #[test]
    fn test_explicit_reference_date_overrides_batch_minimum() {
        let wells = vec![
            WellRecord::new("A", 15.0).with_baseline_date(date(2025, 6, 1)),
            WellRecord::new("B", 15.0),
        ];
        let events = build_timeline(&wells, Some(date(2026, 1, 15)));
        assert_eq!(events[0].start, date(2025, 6, 1));
        assert_eq!(events[4].start, date(2026, 1, 15));
    }

    #[test]
    fn test_reference_falls_back_to_today() {
        let wells = vec![WellRecord::new("A", 15.0)];
        let today = date(2026, 10, 19);
        assert_eq!(default_reference_date(&wells, today), today);
    }

    #[test]
    fn test_leap_year_is_plain_day_arithmetic() {
        let d = date(2027, 12, 31);
        // P&A on 2028-01-30, re-test 365 days later lands on 2029-01-29 (2028 is a leap year)
        assert_eq!(milestone_date(Milestone::SecondTest, d), date(2029, 1, 29));
    }

    #[test]
    fn test_empty_batch() {
        assert!(build_timeline(&[], None).is_empty());
    }
}
