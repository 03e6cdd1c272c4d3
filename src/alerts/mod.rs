//! Budget-threshold alert tracking and the notification payloads handed to
//! the external dispatcher.
//!
//! Evaluation is pure: the caller owns the [`AlertState`], passes it in, and
//! receives the updated copy back together with an optional consolidated
//! payload. Dispatching the payload is a separate, caller-driven step, so
//! replaying the same records never re-notifies.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Account, Budget, PeriodKey, TransactionSeries};

/// Default floor, in currency units, under which available funds trigger a
/// low-balance payload.
pub const DEFAULT_LOW_BALANCE_THRESHOLD: f64 = 50.0;

/// Spend-vs-limit crossing points tracked per category. Declaration order is
/// ascending severity.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBand {
    /// Spend reached 80% of the limit.
    Approaching,
    /// Spend reached 90% of the limit.
    Critical,
    /// Spend went strictly over the limit.
    Exceeded,
}

impl ThresholdBand {
    /// Whether this band matches the given spend percentage. Bands are
    /// disjoint; exactly 100% matches none of them.
    fn matches(&self, percentage: f64) -> bool {
        match self {
            ThresholdBand::Approaching => (80.0..90.0).contains(&percentage),
            ThresholdBand::Critical => (90.0..100.0).contains(&percentage),
            ThresholdBand::Exceeded => percentage > 100.0,
        }
    }

    pub fn percent(&self) -> u8 {
        match self {
            ThresholdBand::Approaching => 80,
            ThresholdBand::Critical => 90,
            ThresholdBand::Exceeded => 100,
        }
    }
}

/// Urgency carried on a notification payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

/// Consolidated payload handed to the external notification dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertNotification {
    pub title: String,
    pub body: String,
    pub severity: AlertSeverity,
}

/// Externally owned bookkeeping of which `(category, band)` pairs already
/// alerted in the current billing period. Resets on period rollover only;
/// spending dipping back under a band does not re-arm it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertState {
    period: Option<PeriodKey>,
    fired: BTreeSet<(String, ThresholdBand)>,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self, category: &str, band: ThresholdBand) -> bool {
        self.fired.contains(&(category.to_string(), band))
    }
}

/// One threshold crossing observed during an evaluation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThresholdCrossing {
    pub category: String,
    pub band: ThresholdBand,
    pub percentage: f64,
}

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertPass {
    /// Updated bookkeeping; hand it back on the next pass.
    pub state: AlertState,
    /// Crossings that fired this pass, sorted by band descending.
    pub crossings: Vec<ThresholdCrossing>,
    /// Consolidated payload, present when at least one band fired.
    pub notification: Option<AlertNotification>,
}

/// Evaluates every budget against the threshold bands for the billing period
/// containing `today`.
///
/// Each `(category, band)` fires at most once per period; all bands fired in
/// one pass consolidate into a single notification.
pub fn evaluate(budgets: &[Budget], state: AlertState, today: NaiveDate) -> AlertPass {
    let mut state = state;
    let period = PeriodKey::from_date(today);
    if state.period != Some(period) {
        state.fired.clear();
        state.period = Some(period);
    }

    let mut crossings = Vec::new();
    for budget in budgets {
        let percentage = budget.percentage_spent();
        for band in [
            ThresholdBand::Exceeded,
            ThresholdBand::Critical,
            ThresholdBand::Approaching,
        ] {
            if !band.matches(percentage) {
                continue;
            }
            if state.fired.insert((budget.category.clone(), band)) {
                crossings.push(ThresholdCrossing {
                    category: budget.category.clone(),
                    band,
                    percentage,
                });
            }
        }
    }

    // Highest band first; stable sort keeps budget input order within a band.
    crossings.sort_by(|a, b| b.band.cmp(&a.band));
    let notification = consolidate(&crossings);

    AlertPass {
        state,
        crossings,
        notification,
    }
}

fn consolidate(crossings: &[ThresholdCrossing]) -> Option<AlertNotification> {
    let first = crossings.first()?;
    let severity = if first.band >= ThresholdBand::Critical {
        AlertSeverity::Critical
    } else {
        AlertSeverity::Warning
    };

    let title = if crossings.len() == 1 {
        match first.band {
            ThresholdBand::Exceeded => format!("{} budget exceeded", first.category),
            _ => format!("{} budget at {}%", first.category, first.band.percent()),
        }
    } else {
        "Multiple budget alerts".to_string()
    };

    let body = crossings
        .iter()
        .map(|crossing| match crossing.band {
            ThresholdBand::Exceeded => format!(
                "{} is over its limit ({:.0}% spent).",
                crossing.category, crossing.percentage
            ),
            _ => format!(
                "{} has reached {:.0}% of its limit.",
                crossing.category, crossing.percentage
            ),
        })
        .collect::<Vec<_>>()
        .join(" ");

    Some(AlertNotification {
        title,
        body,
        severity,
    })
}

/// Low available-balance payload for one account, when the spendable figure
/// sits under the configured floor.
pub fn low_balance_alert(
    account: &Account,
    available_to_spend: f64,
    threshold: f64,
) -> Option<AlertNotification> {
    if available_to_spend >= threshold {
        return None;
    }
    Some(AlertNotification {
        title: "Low Available Balance Alert".to_string(),
        body: format!(
            "Your {} account's available balance is getting low (${:.2}). Be mindful of extra spending.",
            account.name, available_to_spend
        ),
        severity: AlertSeverity::Warning,
    })
}

/// Reminders for recurring bills whose next occurrence lands exactly
/// `days_ahead` days after `today`.
pub fn upcoming_bill_reminders(
    series: &[TransactionSeries],
    today: NaiveDate,
    days_ahead: i64,
) -> Vec<AlertNotification> {
    let due_date = today + chrono::Duration::days(days_ahead);
    series
        .iter()
        .filter(|entry| entry.amount < 0.0)
        .filter_map(|entry| {
            let rule = entry.recurrence.as_ref()?;
            let next = rule.next_occurrence_on_or_after(today)?;
            if next != due_date {
                return None;
            }
            Some(AlertNotification {
                title: "Upcoming Bill Reminder".to_string(),
                body: format!(
                    "Heads up! Your {} payment of ${:.2} is due on {}.",
                    entry.description,
                    entry.amount.abs(),
                    next.format("%A")
                ),
                severity: AlertSeverity::Warning,
            })
        })
        .collect()
}
