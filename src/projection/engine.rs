use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, TransactionInstance};

/// Balance sample for one day of a projection, with the instances that
/// landed on it. Days without activity carry an empty list so callers always
/// see a complete daily series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectedDay {
    pub date: NaiveDate,
    pub balance: f64,
    pub instances: Vec<TransactionInstance>,
}

/// Simulated running balance for one account, or a multi-account merge when
/// `account_id` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    pub account_id: Option<Uuid>,
    pub start: NaiveDate,
    pub days: Vec<ProjectedDay>,
    pub lowest_balance: f64,
    pub highest_balance: f64,
    /// Funds held back from spending: cushion plus goal allocations.
    pub reserved: f64,
    /// Lowest simulated balance minus reserved funds. Negative values are
    /// meaningful and flag overdraft risk.
    pub available_to_spend: f64,
}

/// First point at which spending down the available figure turns negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProtectionHorizon {
    Depleted(NaiveDate),
    BeyondHorizon,
}

impl Projection {
    /// Walks upcoming instances chronologically with a running total seeded
    /// from `available_to_spend` and reports the first date it would go
    /// negative, or [`ProtectionHorizon::BeyondHorizon`] if it never does
    /// within the projected span.
    pub fn protection_horizon(&self) -> ProtectionHorizon {
        let mut running = self.available_to_spend;
        if running < 0.0 {
            return ProtectionHorizon::Depleted(self.start);
        }
        for day in &self.days {
            for instance in &day.instances {
                running += instance.amount;
            }
            if running < 0.0 {
                return ProtectionHorizon::Depleted(day.date);
            }
        }
        ProtectionHorizon::BeyondHorizon
    }
}

/// Simulates `account`'s balance from `now` through `now + horizon_days`.
///
/// The recorded balance may not yet reflect instances dated before `now`
/// (the store recomputes lazily rather than writing back), so those are
/// replayed first to reconcile the true starting balance. Callers must pass
/// instances derived fresh from series so reconciliation never double-counts.
pub fn project(
    account: &Account,
    instances: &[TransactionInstance],
    horizon_days: u32,
    now: NaiveDate,
) -> Projection {
    let horizon_end = now + Duration::days(horizon_days as i64);

    let mut balance = account.current_balance;
    let mut by_date: BTreeMap<NaiveDate, Vec<TransactionInstance>> = BTreeMap::new();
    for instance in instances.iter().filter(|i| i.account_id == account.id) {
        if instance.date < now {
            balance += instance.amount;
        } else if instance.date <= horizon_end {
            by_date
                .entry(instance.date)
                .or_default()
                .push(instance.clone());
        }
    }

    let mut days = Vec::with_capacity(horizon_days as usize + 1);
    for offset in 0..=horizon_days {
        let date = now + Duration::days(offset as i64);
        let todays = by_date.remove(&date).unwrap_or_default();
        balance += todays.iter().map(|i| i.amount).sum::<f64>();
        days.push(ProjectedDay {
            date,
            balance,
            instances: todays,
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
    let reserved = account.reserved();

    Projection {
        account_id: Some(account.id),
        start: now,
        days,
        lowest_balance,
        highest_balance,
        reserved,
        available_to_spend: lowest_balance - reserved,
    }
}
