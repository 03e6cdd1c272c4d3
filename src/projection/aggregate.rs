use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;

use super::engine::{ProjectedDay, Projection};

/// Merges several accounts' projections into one consolidated daily series.
///
/// The output covers the union of all input dates. Where one account has no
/// sample for a date, its last known balance is carried forward (and its
/// first balance is reused for dates before its series begins) rather than
/// counting as zero. Lowest and highest are recomputed over the merged
/// series because the per-account extremes can fall on different dates.
pub fn aggregate(projections: &[Projection]) -> Projection {
    let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
    for projection in projections {
        dates.extend(projection.days.iter().map(|d| d.date));
    }

    let reserved: f64 = projections.iter().map(|p| p.reserved).sum();

    if dates.is_empty() {
        return Projection {
            account_id: None,
            start: projections
                .iter()
                .map(|p| p.start)
                .min()
                .unwrap_or(NaiveDate::MIN),
            days: Vec::new(),
            lowest_balance: 0.0,
            highest_balance: 0.0,
            reserved,
            available_to_spend: 0.0,
        };
    }

    // One sweep cursor per input; dates ascend, so each cursor only moves
    // forward.
    let mut cursors = vec![0usize; projections.len()];
    let mut seen: HashSet<(uuid::Uuid, NaiveDate)> = HashSet::new();
    let mut days = Vec::with_capacity(dates.len());

    for date in &dates {
        let mut balance = 0.0;
        let mut instances = Vec::new();

        for (projection, cursor) in projections.iter().zip(cursors.iter_mut()) {
            if projection.days.is_empty() {
                continue;
            }
            while *cursor + 1 < projection.days.len()
                && projection.days[*cursor + 1].date <= *date
            {
                *cursor += 1;
            }
            let day = &projection.days[*cursor];
            balance += day.balance;
            if day.date == *date {
                for instance in &day.instances {
                    if seen.insert(instance.identity()) {
                        instances.push(instance.clone());
                    }
                }
            }
        }

        days.push(ProjectedDay {
            date: *date,
            balance,
            instances,
        });
    }

    let lowest_balance = days
        .iter()
        .map(|d| d.balance)
        .fold(f64::INFINITY, f64::min);
    let highest_balance = days
        .iter()
        .map(|d| d.balance)
        .fold(f64::NEG_INFINITY, f64::max);
    let start = days.first().map(|d| d.date).unwrap_or(NaiveDate::MIN);

    Projection {
        account_id: None,
        start,
        days,
        lowest_balance,
        highest_balance,
        reserved,
        available_to_spend: lowest_balance - reserved,
    }
}
