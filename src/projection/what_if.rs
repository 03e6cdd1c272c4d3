use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::{project, Projection};
use crate::domain::{Account, TransactionInstance};

/// Risk classification for a hypothetical purchase. Only the highest
/// applicable level is reported.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WhatIfRisk {
    /// The projected balance dips below zero somewhere in the horizon.
    NegativeBalance,
    /// Funds stay positive but nothing would be left to spend.
    ZeroAvailableFunds,
    Ok,
}

/// Projection produced with the hypothetical instance overlaid, plus its
/// risk classification.
#[derive(Debug, Clone, PartialEq)]
pub struct WhatIfOutcome {
    pub projection: Projection,
    pub risk: WhatIfRisk,
}

/// Runs one projection with `hypothetical` overlaid on the base instances.
///
/// The base slice is borrowed immutably and the hypothetical lives only in a
/// private copy for this run, so discarding the outcome recovers the base
/// projection exactly and nothing is ever persisted.
pub fn simulate(
    account: &Account,
    base: &[TransactionInstance],
    hypothetical: &TransactionInstance,
    horizon_days: u32,
    now: NaiveDate,
) -> WhatIfOutcome {
    let mut overlay = Vec::with_capacity(base.len() + 1);
    overlay.extend_from_slice(base);
    overlay.push(hypothetical.clone());

    let projection = project(account, &overlay, horizon_days, now);
    let risk = classify(&projection);

    WhatIfOutcome { projection, risk }
}

fn classify(projection: &Projection) -> WhatIfRisk {
    if projection.days.iter().any(|day| day.balance < 0.0) {
        WhatIfRisk::NegativeBalance
    } else if projection.available_to_spend <= 0.0 {
        WhatIfRisk::ZeroAvailableFunds
    } else {
        WhatIfRisk::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountKind, TransactionKind, TransactionSeries};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn purchase(account: &Account, amount: f64, on: NaiveDate) -> TransactionInstance {
        TransactionSeries::one_time("New TV", TransactionKind::Expense, amount, account.id, on)
            .instance_on(on, true)
    }

    #[test]
    fn negative_balance_outranks_zero_available() {
        let account = Account::new("Checking", AccountKind::Checking, 100.0).with_cushion(50.0);
        let now = date(2024, 4, 1);
        // Overdraws outright, which also drives available funds negative;
        // only the stronger classification is reported.
        let outcome = simulate(&account, &[], &purchase(&account, 150.0, now), 30, now);
        assert_eq!(outcome.risk, WhatIfRisk::NegativeBalance);
    }

    #[test]
    fn exactly_zero_available_counts_as_zero_available_funds() {
        let account = Account::new("Checking", AccountKind::Checking, 100.0).with_cushion(50.0);
        let now = date(2024, 4, 1);
        let outcome = simulate(&account, &[], &purchase(&account, 50.0, now), 30, now);
        assert_eq!(outcome.risk, WhatIfRisk::ZeroAvailableFunds);
    }

    #[test]
    fn comfortable_purchase_is_ok() {
        let account = Account::new("Checking", AccountKind::Checking, 500.0).with_cushion(50.0);
        let now = date(2024, 4, 1);
        let outcome = simulate(&account, &[], &purchase(&account, 100.0, now), 30, now);
        assert_eq!(outcome.risk, WhatIfRisk::Ok);
    }
}
