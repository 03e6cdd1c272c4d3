use chrono::NaiveDate;

use forecast_core::domain::{Account, AccountKind, TransactionKind, TransactionSeries};
use forecast_core::projection::{project, simulate, WhatIfRisk};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn discarding_the_hypothetical_recovers_the_base_projection() {
    let account = Account::new("Checking", AccountKind::Checking, 600.0).with_cushion(50.0);
    let now = date(2024, 7, 1);
    let base = vec![
        TransactionSeries::one_time(
            "Rent",
            TransactionKind::Expense,
            400.0,
            account.id,
            date(2024, 7, 5),
        )
        .instance_on(date(2024, 7, 5), false),
    ];
    let hypothetical = TransactionSeries::one_time(
        "New TV",
        TransactionKind::Expense,
        300.0,
        account.id,
        date(2024, 7, 3),
    )
    .instance_on(date(2024, 7, 3), true);

    let before = project(&account, &base, 30, now);
    let outcome = simulate(&account, &base, &hypothetical, 30, now);
    let after = project(&account, &base, 30, now);

    // The overlay run saw the hypothetical; the base inputs did not change.
    assert_ne!(outcome.projection, before);
    assert_eq!(before, after);
}

#[test]
fn overlay_affects_exactly_one_run() {
    let account = Account::new("Checking", AccountKind::Checking, 500.0);
    let now = date(2024, 7, 1);
    let hypothetical = TransactionSeries::one_time(
        "Impulse buy",
        TransactionKind::Expense,
        200.0,
        account.id,
        date(2024, 7, 2),
    )
    .instance_on(date(2024, 7, 2), true);

    let outcome = simulate(&account, &[], &hypothetical, 10, now);
    assert_eq!(outcome.projection.lowest_balance, 300.0);
    assert!(outcome
        .projection
        .days
        .iter()
        .any(|d| d.instances.iter().any(|i| i.description == "Impulse buy")));
}

#[test]
fn classification_precedence_reports_only_the_strongest() {
    let account = Account::new("Checking", AccountKind::Checking, 100.0).with_cushion(80.0);
    let now = date(2024, 7, 1);

    // Drives the balance itself negative: both conditions hold, only
    // negative_balance is reported.
    let overdraw = TransactionSeries::one_time(
        "Car repair",
        TransactionKind::Expense,
        150.0,
        account.id,
        date(2024, 7, 4),
    )
    .instance_on(date(2024, 7, 4), true);
    let outcome = simulate(&account, &[], &overdraw, 30, now);
    assert_eq!(outcome.risk, WhatIfRisk::NegativeBalance);

    // Keeps the balance positive but wipes out available funds.
    let tight = TransactionSeries::one_time(
        "Car repair",
        TransactionKind::Expense,
        30.0,
        account.id,
        date(2024, 7, 4),
    )
    .instance_on(date(2024, 7, 4), true);
    let outcome = simulate(&account, &[], &tight, 30, now);
    assert_eq!(outcome.risk, WhatIfRisk::ZeroAvailableFunds);

    // Leaves comfortable headroom.
    let small = TransactionSeries::one_time(
        "Coffee",
        TransactionKind::Expense,
        5.0,
        account.id,
        date(2024, 7, 4),
    )
    .instance_on(date(2024, 7, 4), true);
    let outcome = simulate(&account, &[], &small, 30, now);
    assert_eq!(outcome.risk, WhatIfRisk::Ok);
}
