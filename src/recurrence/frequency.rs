use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Supported cadences for recurring series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    /// Date of the `index`-th occurrence counted from the anchor.
    ///
    /// Monthly occurrences keep the anchor's day-of-month, clamped to the
    /// length of each target month independently: an anchor on Jan 31 yields
    /// Feb 28 (or 29) and then Mar 31 again.
    pub fn occurrence(&self, anchor: NaiveDate, index: u32) -> NaiveDate {
        match self {
            Frequency::Weekly => anchor + Duration::days(7 * index as i64),
            Frequency::Biweekly => anchor + Duration::days(14 * index as i64),
            Frequency::Monthly => shift_month(anchor, index as i32),
        }
    }

    /// Number of whole cadence periods from the anchor up to `target`,
    /// saturating at zero when the target precedes the anchor.
    ///
    /// This is the arithmetic fast-forward used to skip ahead without a
    /// day-by-day scan; the result may undershoot by one period around
    /// month-end clamping, never overshoot by more than one.
    pub fn periods_until(&self, anchor: NaiveDate, target: NaiveDate) -> u32 {
        if target <= anchor {
            return 0;
        }
        match self {
            Frequency::Weekly => ((target - anchor).num_days() / 7) as u32,
            Frequency::Biweekly => ((target - anchor).num_days() / 14) as u32,
            Frequency::Monthly => {
                let anchor_idx = anchor.year() * 12 + anchor.month() as i32 - 1;
                let target_idx = target.year() * 12 + target.month() as i32 - 1;
                (target_idx - anchor_idx).max(0) as u32
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Bi-weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 28,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_occurrences_step_seven_days() {
        let anchor = date(2024, 1, 1);
        assert_eq!(Frequency::Weekly.occurrence(anchor, 0), anchor);
        assert_eq!(Frequency::Weekly.occurrence(anchor, 4), date(2024, 1, 29));
    }

    #[test]
    fn monthly_clamps_to_short_months_without_drift() {
        let anchor = date(2024, 1, 31);
        assert_eq!(Frequency::Monthly.occurrence(anchor, 1), date(2024, 2, 29));
        assert_eq!(Frequency::Monthly.occurrence(anchor, 2), date(2024, 3, 31));
        assert_eq!(Frequency::Monthly.occurrence(anchor, 13), date(2025, 2, 28));
    }

    #[test]
    fn periods_until_saturates_before_anchor() {
        let anchor = date(2024, 6, 1);
        assert_eq!(Frequency::Biweekly.periods_until(anchor, date(2024, 5, 1)), 0);
        assert_eq!(
            Frequency::Biweekly.periods_until(anchor, date(2024, 6, 29)),
            2
        );
    }

    #[test]
    fn periods_until_monthly_counts_calendar_months() {
        let anchor = date(2023, 11, 15);
        assert_eq!(Frequency::Monthly.periods_until(anchor, date(2024, 2, 1)), 3);
    }
}
