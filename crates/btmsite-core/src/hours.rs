//! Operating-hours qualification.

use crate::rules::QualificationRules;
use crate::types::OpeningHoursSchedule;
use crate::verdict::CheckResult;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Open minutes accumulated per weekday (0 = Sunday).
#[must_use]
pub fn daily_open_minutes(schedule: &OpeningHoursSchedule) -> [u32; 7] {
    let mut daily = [0u32; 7];

    for period in &schedule.periods {
        let Some(bucket) = daily.get_mut(usize::from(period.day)) else {
            tracing::debug!(day = period.day, "skipping period with out-of-range day");
            continue;
        };

        let Some(open_minute) = period.open_minute else {
            tracing::debug!(day = period.day, "skipping period with unreadable times");
            continue;
        };

        let Some(close) = period.close_minute else {
            if open_minute == 0 {
                *bucket += MINUTES_PER_DAY;
            } else {
                tracing::debug!(
                    day = period.day,
                    open = open_minute,
                    "skipping period without close time"
                );
            }
            continue;
        };

        let open = i32::from(open_minute);
        let close = i32::from(close);
        let mut duration = close - open;
        if duration < 0 {
            duration += 24 * 60;
        }
        *bucket += duration.unsigned_abs();
    }

    daily
}

/// Classify a place's weekly schedule.
///
/// Absent data is a `Warn`, never a failure. A lone open-ended Sunday period
/// is the provider's encoding of 24/7.
#[must_use]
pub fn classify_hours(
    schedule: Option<&OpeningHoursSchedule>,
    rules: &QualificationRules,
) -> CheckResult {
    let Some(schedule) = schedule.filter(|s| !s.periods.is_empty()) else {
        return CheckResult::warn("Hours not available. Manual check required.");
    };

    if let [only] = schedule.periods.as_slice() {
        if only.day == 0 && only.is_readable() && only.close_minute.is_none() {
            return CheckResult::success("Open 24/7");
        }
    }

    let daily = daily_open_minutes(schedule);
    let open_days = daily.iter().filter(|&&m| m > 0).count();
    let long_enough_days = daily
        .iter()
        .filter(|&&m| m >= rules.min_daily_open_minutes)
        .count();
    let min_hours = rules.min_daily_open_hours();

    if open_days < rules.min_open_days {
        return CheckResult::fail(format!("Fails: Open only {open_days} days/week."));
    }
    if long_enough_days < rules.min_open_days {
        return CheckResult::fail(format!(
            "Fails: Only {long_enough_days} days meet {min_hours}hr min."
        ));
    }
    CheckResult::success(format!(
        "Open {open_days} days/week ({long_enough_days} meet {min_hours}hr min)."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OpeningPeriod;
    use crate::verdict::CheckStatus;

    fn schedule(periods: Vec<OpeningPeriod>) -> OpeningHoursSchedule {
        OpeningHoursSchedule { periods }
    }

    fn days(range: std::ops::Range<u8>, open: u16, close: u16) -> Vec<OpeningPeriod> {
        range
            .map(|d| OpeningPeriod::from_hhmm(d, open, Some(close)))
            .collect()
    }

    #[test]
    fn absent_schedule_warns() {
        let rules = QualificationRules::default();
        let result = classify_hours(None, &rules);
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.message.contains("Manual check required"));
    }

    #[test]
    fn empty_schedule_warns() {
        let rules = QualificationRules::default();
        let result = classify_hours(Some(&schedule(vec![])), &rules);
        assert_eq!(result.status, CheckStatus::Warn);
    }

    #[test]
    fn single_open_ended_sunday_is_24_7() {
        let rules = QualificationRules::default();
        let s = schedule(vec![OpeningPeriod::from_hhmm(0, 0, None)]);
        let result = classify_hours(Some(&s), &rules);
        assert_eq!(result, CheckResult::success("Open 24/7"));
    }

    #[test]
    fn four_days_fail_regardless_of_duration() {
        let rules = QualificationRules::default();
        let s = schedule(days(1..5, 0, 2359));
        let result = classify_hours(Some(&s), &rules);
        assert_eq!(result, CheckResult::fail("Fails: Open only 4 days/week."));
    }

    #[test]
    fn short_days_fail_on_duration() {
        let rules = QualificationRules::default();
        let mut periods = days(0..3, 900, 2000);
        periods.extend(days(3..7, 1000, 1600));
        let result = classify_hours(Some(&schedule(periods)), &rules);
        assert_eq!(result, CheckResult::fail("Fails: Only 3 days meet 9hr min."));
    }

    #[test]
    fn full_week_passes_with_counts() {
        let rules = QualificationRules::default();
        let s = schedule(days(0..7, 800, 2200));
        let result = classify_hours(Some(&s), &rules);
        assert_eq!(
            result,
            CheckResult::success("Open 7 days/week (7 meet 9hr min).")
        );
    }

    #[test]
    fn overnight_span_wraps_midnight() {
        let s = schedule(vec![OpeningPeriod::from_hhmm(5, 1800, Some(200))]);
        let daily = daily_open_minutes(&s);
        assert_eq!(daily[5], 8 * 60);
    }

    #[test]
    fn split_shifts_accumulate_on_the_same_day() {
        let s = schedule(vec![
            OpeningPeriod::from_hhmm(1, 700, Some(1100)),
            OpeningPeriod::from_hhmm(1, 1200, Some(1730)),
        ]);
        let daily = daily_open_minutes(&s);
        assert_eq!(daily[1], 4 * 60 + 5 * 60 + 30);
    }

    #[test]
    fn open_ended_midnight_periods_count_as_full_days() {
        let rules = QualificationRules::default();
        let s = schedule((0..7).map(|d| OpeningPeriod::from_hhmm(d, 0, None)).collect());
        let result = classify_hours(Some(&s), &rules);
        assert_eq!(
            result,
            CheckResult::success("Open 7 days/week (7 meet 9hr min).")
        );
    }

    #[test]
    fn period_without_close_is_skipped() {
        let s = schedule(vec![
            OpeningPeriod::from_hhmm(2, 900, None),
            OpeningPeriod::from_hhmm(3, 900, Some(1800)),
        ]);
        let daily = daily_open_minutes(&s);
        assert_eq!(daily[2], 0);
        assert_eq!(daily[3], 540);
    }

    #[test]
    fn all_periods_are_consumed_before_deciding() {
        // Early periods alone would fail; later ones bring the week up.
        let rules = QualificationRules::default();
        let mut periods = days(0..2, 900, 1000);
        periods.extend(days(0..7, 1000, 1900));
        let result = classify_hours(Some(&schedule(periods)), &rules);
        assert_eq!(result.status, CheckStatus::Success);
    }

    #[test]
    fn unreadable_period_blocks_the_24_7_shortcut() {
        let rules = QualificationRules::default();
        let s = schedule(vec![
            OpeningPeriod::from_hhmm(0, 0, None),
            OpeningPeriod::unreadable(1),
        ]);
        let result = classify_hours(Some(&s), &rules);
        assert_eq!(result, CheckResult::fail("Fails: Open only 1 days/week."));
    }

    #[test]
    fn lone_unreadable_sunday_is_not_24_7() {
        let rules = QualificationRules::default();
        let s = schedule(vec![OpeningPeriod::unreadable(0)]);
        let result = classify_hours(Some(&s), &rules);
        assert_eq!(result, CheckResult::fail("Fails: Open only 0 days/week."));
    }

    #[test]
    fn all_unreadable_schedule_is_classified_not_warned() {
        let rules = QualificationRules::default();
        let s = schedule((0..7).map(OpeningPeriod::unreadable).collect());
        assert_eq!(daily_open_minutes(&s), [0; 7]);
        let result = classify_hours(Some(&s), &rules);
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn out_of_range_day_is_ignored() {
        let s = schedule(vec![OpeningPeriod::from_hhmm(9, 900, Some(1800))]);
        assert_eq!(daily_open_minutes(&s), [0; 7]);
    }
}
