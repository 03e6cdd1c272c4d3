//! Aggregations the app's report and budget screens derive their figures
//! from. All helpers classify direction by the instance's signed amount.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{PeriodKey, TransactionInstance};

const UNCATEGORIZED: &str = "Uncategorized";

/// Number of rows reported by [`month_over_month`].
const TOP_CHANGES: usize = 5;

/// Income, expense, and net totals over a set of instances.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyMetrics {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
}

pub fn key_metrics(instances: &[TransactionInstance]) -> KeyMetrics {
    let mut metrics = KeyMetrics::default();
    for instance in instances {
        if instance.amount >= 0.0 {
            metrics.total_income += instance.amount;
        } else {
            metrics.total_expenses += instance.amount.abs();
        }
    }
    metrics.net_savings = metrics.total_income - metrics.total_expenses;
    metrics
}

/// Expense magnitude for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
}

/// Expense totals grouped by category, largest first.
pub fn spending_by_category(instances: &[TransactionInstance]) -> Vec<CategorySpend> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for instance in instances.iter().filter(|i| i.amount < 0.0) {
        let category = instance
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        *totals.entry(category).or_insert(0.0) += instance.amount.abs();
    }
    let mut rows: Vec<CategorySpend> = totals
        .into_iter()
        .map(|(category, amount)| CategorySpend { category, amount })
        .collect();
    rows.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    rows
}

/// Current-period expense total per category; the figure that feeds
/// `Budget::spent`.
pub fn spent_by_category(
    instances: &[TransactionInstance],
    period: PeriodKey,
) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for instance in instances.iter().filter(|i| i.amount < 0.0) {
        if !period.contains(instance.date) {
            continue;
        }
        let category = instance
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        *totals.entry(category).or_insert(0.0) += instance.amount.abs();
    }
    totals
}

/// Per-category comparison of the current month against the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryComparison {
    pub category: String,
    pub current_amount: f64,
    pub last_amount: f64,
    pub change: f64,
    pub percent_change: f64,
}

/// Compares spend per category between the month of `reference` and the
/// month before it, reporting the five biggest absolute changes.
pub fn month_over_month(
    instances: &[TransactionInstance],
    reference: NaiveDate,
) -> Vec<CategoryComparison> {
    let current_period = PeriodKey::from_date(reference);
    let last_period = current_period.previous();

    let current = spent_by_category(instances, current_period);
    let last = spent_by_category(instances, last_period);

    let categories: BTreeSet<&String> = current.keys().chain(last.keys()).collect();
    let mut comparisons: Vec<CategoryComparison> = categories
        .into_iter()
        .map(|category| {
            let current_amount = current.get(category).copied().unwrap_or(0.0);
            let last_amount = last.get(category).copied().unwrap_or(0.0);
            let change = current_amount - last_amount;
            let percent_change = if last_amount > 0.0 {
                change / last_amount * 100.0
            } else if current_amount > 0.0 {
                100.0
            } else {
                0.0
            };
            CategoryComparison {
                category: category.clone(),
                current_amount,
                last_amount,
                change,
                percent_change,
            }
        })
        .filter(|c| c.current_amount > 0.0 || c.last_amount > 0.0)
        .collect();

    comparisons.sort_by(|a, b| b.change.abs().total_cmp(&a.change.abs()));
    comparisons.truncate(TOP_CHANGES);
    comparisons
}
