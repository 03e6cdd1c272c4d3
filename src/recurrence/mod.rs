//! Expansion of recurring-transaction definitions into concrete dated
//! occurrences over a query window.

mod detect;
mod frequency;

pub use detect::recurring_candidates;
pub use frequency::Frequency;

use tracing::warn;
use uuid::Uuid;

use crate::domain::{DateWindow, TransactionInstance, TransactionSeries};
use crate::errors::{ForecastError, Result};

/// Upper bound on occurrences generated for one series in one expansion.
/// Guards against malformed cadences producing unbounded loops.
pub const MAX_EXPANSION_OCCURRENCES: usize = 1024;

/// Result of expanding one series over a window.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesExpansion {
    pub series_id: Uuid,
    pub instances: Vec<TransactionInstance>,
    /// Set when the occurrence cap stopped the expansion before the window
    /// end, so a partial result is distinguishable from a natural stop.
    pub truncated: bool,
}

impl SeriesExpansion {
    fn empty(series_id: Uuid) -> Self {
        Self {
            series_id,
            instances: Vec::new(),
            truncated: false,
        }
    }

    /// Converts a truncated expansion into a hard error for callers that
    /// cannot tolerate partial schedules.
    pub fn into_result(self) -> Result<Vec<TransactionInstance>> {
        if self.truncated {
            Err(ForecastError::ExpansionTruncated(self.series_id))
        } else {
            Ok(self.instances)
        }
    }
}

/// Merged expansion across a set of series.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionSet {
    /// Ascending by date; ties keep the input series order.
    pub instances: Vec<TransactionInstance>,
    pub truncated_series: Vec<Uuid>,
}

/// Expands one series into its concrete occurrences inside `window`.
///
/// One-time series pass through unchanged as a single instance when their
/// date falls in the window. Inverted windows and rules whose end date
/// precedes their anchor produce an empty list.
pub fn expand_series(series: &TransactionSeries, window: DateWindow) -> SeriesExpansion {
    if window.is_empty() {
        return SeriesExpansion::empty(series.id);
    }

    let Some(rule) = series.recurrence.as_ref() else {
        let mut expansion = SeriesExpansion::empty(series.id);
        if window.contains(series.date) {
            expansion.instances.push(series.instance_on(series.date, false));
        }
        return expansion;
    };

    if let Some(end) = rule.end_date {
        if end < rule.anchor_date {
            return SeriesExpansion::empty(series.id);
        }
    }

    let mut expansion = SeriesExpansion::empty(series.id);

    // Jump arithmetically to just before the window instead of scanning the
    // whole span from the anchor. periods_until may undershoot by one around
    // month-end clamping, so back off one period and let the loop align.
    let mut index = rule
        .frequency
        .periods_until(rule.anchor_date, window.start)
        .saturating_sub(1);

    let mut generated = 0usize;
    loop {
        let date = rule.frequency.occurrence(rule.anchor_date, index);
        if date > window.end {
            break;
        }
        if let Some(end) = rule.end_date {
            if date > end {
                break;
            }
        }
        if window.contains(date) && !rule.excluded_dates.contains(&date) {
            expansion.instances.push(series.instance_on(date, true));
        }
        index += 1;
        generated += 1;
        if generated >= MAX_EXPANSION_OCCURRENCES {
            expansion.truncated = true;
            break;
        }
    }

    expansion
}

/// Expands every series and returns one date-ordered instance list.
///
/// Truncated series are reported and logged but do not abort the pass.
pub fn expand_all(series: &[TransactionSeries], window: DateWindow) -> ExpansionSet {
    let mut instances = Vec::new();
    let mut truncated_series = Vec::new();

    for entry in series {
        let expansion = expand_series(entry, window);
        if expansion.truncated {
            warn!(
                series_id = %entry.id,
                description = %entry.description,
                "expansion hit the occurrence cap before the window end"
            );
            truncated_series.push(entry.id);
        }
        instances.extend(expansion.instances);
    }

    // Stable sort keeps input order for same-day instances.
    instances.sort_by_key(|instance| instance.date);

    ExpansionSet {
        instances,
        truncated_series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecurrenceRule, TransactionKind};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly_rent(anchor: NaiveDate) -> TransactionSeries {
        TransactionSeries::recurring(
            "Rent",
            TransactionKind::Expense,
            100.0,
            Uuid::new_v4(),
            RecurrenceRule::new(Frequency::Weekly, anchor),
        )
    }

    #[test]
    fn fast_forward_matches_naive_stepping() {
        let anchor = date(2020, 3, 4);
        let series = weekly_rent(anchor);
        let window = DateWindow::new(date(2024, 1, 1), date(2024, 1, 31));

        let expansion = expand_series(&series, window);
        let dates: Vec<NaiveDate> = expansion.instances.iter().map(|i| i.date).collect();

        // Every produced date stays aligned to the anchor's weekly grid.
        for produced in &dates {
            assert_eq!((*produced - anchor).num_days() % 7, 0);
        }
        assert_eq!(dates.first(), Some(&date(2024, 1, 3)));
        assert_eq!(dates.len(), 5);
        assert!(!expansion.truncated);
    }

    #[test]
    fn inverted_window_yields_empty() {
        let series = weekly_rent(date(2024, 1, 1));
        let window = DateWindow::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(expand_series(&series, window).instances.is_empty());
    }

    #[test]
    fn end_date_before_anchor_yields_empty() {
        let mut series = weekly_rent(date(2024, 5, 1));
        series.recurrence = Some(
            RecurrenceRule::new(Frequency::Weekly, date(2024, 5, 1)).until(date(2024, 4, 1)),
        );
        let window = DateWindow::new(date(2024, 1, 1), date(2024, 12, 31));
        assert!(expand_series(&series, window).instances.is_empty());
    }

    #[test]
    fn truncation_is_signaled_not_silent() {
        let series = weekly_rent(date(2000, 1, 3));
        // Far more weekly occurrences than the cap allows.
        let window = DateWindow::new(date(2000, 1, 1), date(2030, 1, 1));

        let expansion = expand_series(&series, window);
        assert!(expansion.truncated);
        assert_eq!(expansion.instances.len(), MAX_EXPANSION_OCCURRENCES);
        assert!(expansion.into_result().is_err());

        let set = expand_all(std::slice::from_ref(&series), window);
        assert_eq!(set.truncated_series, vec![series.id]);
    }
}
