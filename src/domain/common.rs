use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive date range used for expansion and projection queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window covering `now` through `now + horizon_days`, both inclusive.
    pub fn from_horizon(now: NaiveDate, horizon_days: u32) -> Self {
        Self {
            start: now,
            end: now + Duration::days(horizon_days as i64),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// An inverted window holds no dates.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Calendar-month key identifying one billing period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
}

impl PeriodKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The period immediately before this one.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_contains_is_inclusive() {
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        assert!(window.contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(window.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        assert!(!window.is_empty());
    }

    #[test]
    fn period_rollover_wraps_january() {
        let january = PeriodKey { year: 2024, month: 1 };
        assert_eq!(
            january.previous(),
            PeriodKey {
                year: 2023,
                month: 12
            }
        );
    }
}
